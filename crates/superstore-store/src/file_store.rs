//! File-backed configuration store
//!
//! The whole store is one document (a JSON or YAML object) in one file. The
//! file is re-read on every access and rewritten atomically on every
//! mutation, so edits or deletions made by someone else are seen on the next
//! call. A missing file reads as an empty document.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde_json::{Map, Value};
use superstore_core::errors::{ExError, StoreError};
use superstore_core::{key_path, log_op_end, log_op_error, log_op_start};
use superstore_core::{KeyValueStore, OpenStore};

use crate::atomic::atomic_write;
use crate::errors::{io_error, serialization_error, Result};
use crate::options::StoreOptions;
use crate::path::resolve_path;
use crate::subscriptions::{SubscriptionId, Subscribers};

/// Keys with this prefix are reserved for store bookkeeping
pub const RESERVED_KEY_PREFIX: &str = "__internal__";

/// File-backed key-value store
#[derive(Debug)]
pub struct FileStore {
    options: StoreOptions,
    path: PathBuf,
    subscribers: Subscribers,
}

impl FileStore {
    /// Open the store described by `options`
    ///
    /// Creates the store directory, then merges `options.defaults` under the
    /// file's top-level entries and writes the result if it differs from
    /// what is on disk.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for unusable options, `InvalidConfig` for an
    /// unparsable file when `clear_invalid_config` is off, and `Io` or
    /// `Serialization` if the directory or merged document cannot be written.
    pub fn open(options: StoreOptions) -> Result<Self> {
        log_op_start!("open", store_name = options.name.as_str());
        let start = Instant::now();

        let store = Self::open_impl(options).map_err(|e| {
            log_op_error!("open", e, duration_ms = start.elapsed().as_millis() as u64);
            e
        })?;

        log_op_end!(
            "open",
            duration_ms = start.elapsed().as_millis() as u64,
            path = %store.path.display()
        );

        Ok(store)
    }

    fn open_impl(options: StoreOptions) -> Result<Self> {
        options.validate()?;

        let path = resolve_path(&options);
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| io_error("create_store_dir", dir, e))?;
        }

        let mut store = Self {
            options,
            path,
            subscribers: Subscribers::default(),
        };

        let on_disk = store.load()?;
        let mut merged = store.options.defaults.clone();
        merged.extend(on_disk.clone());
        if merged != on_disk {
            store.save(&merged)?;
        }

        Ok(store)
    }

    /// Path of the store file
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    /// Read the value under `key`
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a malformed key, plus any load failure.
    pub fn get(&self, key: &str) -> Result<Option<Value>> {
        let segments = self.segments(key)?;
        let doc = self.load()?;
        Ok(key_path::get(&doc, &segments).cloned())
    }

    /// Write `value` under `key`
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a malformed or reserved key, plus any load
    /// or write failure.
    pub fn set(&mut self, key: &str, value: Value) -> Result<()> {
        let segments = self.writable_segments(key)?;
        self.mutate("set", Some(key), |doc| {
            key_path::set(doc, &segments, value);
            Ok(true)
        })
        .map(|_| ())
    }

    /// Write several entries with one file write
    ///
    /// # Errors
    ///
    /// Fails without writing anything if any key is malformed or reserved.
    pub fn set_all(&mut self, entries: Map<String, Value>) -> Result<()> {
        let entries = entries
            .into_iter()
            .map(|(key, value)| -> Result<(Vec<String>, Value)> {
                Ok((self.writable_segments(&key)?, value))
            })
            .collect::<Result<Vec<_>>>()?;

        self.mutate("set_all", None, |doc| {
            for (segments, value) in entries {
                key_path::set(doc, &segments, value);
            }
            Ok(true)
        })
        .map(|_| ())
    }

    /// Whether a value (including `null`) is stored under `key`
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a malformed key, plus any load failure.
    pub fn has(&self, key: &str) -> Result<bool> {
        let segments = self.segments(key)?;
        Ok(key_path::has(&self.load()?, &segments))
    }

    /// Remove `key`, returning whether it was present
    ///
    /// The file is only rewritten when something was removed.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a malformed key, plus any load or write
    /// failure.
    pub fn delete(&mut self, key: &str) -> Result<bool> {
        let segments = self.segments(key)?;
        self.mutate("delete", Some(key), |doc| Ok(key_path::delete(doc, &segments)))
    }

    /// Replace the document with the configured defaults
    ///
    /// # Errors
    ///
    /// Returns any load or write failure.
    pub fn clear(&mut self) -> Result<()> {
        let defaults = self.options.defaults.clone();
        self.mutate("clear", None, |doc| {
            *doc = defaults;
            Ok(true)
        })
        .map(|_| ())
    }

    /// Set each key back to its configured default
    ///
    /// Keys without a default are left unchanged.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a malformed key, plus any load or write
    /// failure.
    pub fn reset(&mut self, keys: &[&str]) -> Result<()> {
        let mut resets = Vec::with_capacity(keys.len());
        for key in keys {
            let segments = self.writable_segments(key)?;
            if let Some(default) = key_path::get(&self.options.defaults, &segments) {
                resets.push((segments, default.clone()));
            }
        }

        self.mutate("reset", None, |doc| {
            let changed = !resets.is_empty();
            for (segments, value) in resets {
                key_path::set(doc, &segments, value);
            }
            Ok(changed)
        })
        .map(|_| ())
    }

    /// Number of top-level entries
    ///
    /// # Errors
    ///
    /// Returns any load failure.
    pub fn size(&self) -> Result<usize> {
        Ok(self.load()?.len())
    }

    /// The whole document
    ///
    /// # Errors
    ///
    /// Returns any load failure.
    pub fn store(&self) -> Result<Map<String, Value>> {
        self.load()
    }

    /// Replace the whole document
    ///
    /// # Errors
    ///
    /// Returns any load or write failure.
    pub fn set_store(&mut self, doc: Map<String, Value>) -> Result<()> {
        self.mutate("set_store", None, |current| {
            *current = doc;
            Ok(true)
        })
        .map(|_| ())
    }

    /// Call `callback(new, old)` whenever the value under `key` changes
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a malformed key.
    pub fn on_did_change<F>(&mut self, key: &str, callback: F) -> Result<SubscriptionId>
    where
        F: Fn(Option<&Value>, Option<&Value>) + Send + Sync + 'static,
    {
        let segments = self.segments(key)?;
        Ok(self.subscribers.add_key(segments, Box::new(callback)))
    }

    /// Call `callback(new, old)` whenever the document changes
    pub fn on_did_any_change<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&Map<String, Value>, &Map<String, Value>) + Send + Sync + 'static,
    {
        self.subscribers.add_any(Box::new(callback))
    }

    /// Drop a subscription, returning whether it existed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.remove(id)
    }

    /// Load, edit, and (if the edit reports a change) save the document
    ///
    /// Subscribers are notified after a successful save.
    fn mutate<F>(&mut self, op: &str, key: Option<&str>, edit: F) -> Result<bool>
    where
        F: FnOnce(&mut Map<String, Value>) -> Result<bool>,
    {
        log_op_start!(op, key = key.unwrap_or_default());
        let start = Instant::now();

        let result = self.mutate_impl(edit).map_err(|e| {
            let e = match key {
                Some(key) if e.key().is_none() => e.with_key(key),
                _ => e,
            };
            log_op_error!(
                op,
                e,
                duration_ms = start.elapsed().as_millis() as u64,
                key = key.unwrap_or_default()
            );
            e
        })?;

        log_op_end!(
            op,
            duration_ms = start.elapsed().as_millis() as u64,
            key = key.unwrap_or_default(),
            changed = result
        );

        Ok(result)
    }

    fn mutate_impl<F>(&mut self, edit: F) -> Result<bool>
    where
        F: FnOnce(&mut Map<String, Value>) -> Result<bool>,
    {
        let old = self.load()?;
        let mut new = old.clone();
        if !edit(&mut new)? {
            return Ok(false);
        }

        self.save(&new)?;
        self.subscribers.notify(&old, &new);
        Ok(true)
    }

    /// Read and decode the store file
    fn load(&self) -> Result<Map<String, Value>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(io_error("read_store", &self.path, e)),
        };

        match self.options.format.deserialize(&bytes) {
            Ok(doc) => Ok(doc),
            Err(reason) if self.options.clear_invalid_config => {
                tracing::warn!(
                    path = %self.path.display(),
                    reason = %reason,
                    "Ignoring invalid store file"
                );
                Ok(Map::new())
            }
            Err(reason) => Err(ExError::from(StoreError::CorruptFile {
                path: self.path.display().to_string(),
                reason: reason.to_string(),
            })
            .with_op("read_store")),
        }
    }

    /// Encode and atomically write the document
    fn save(&self, doc: &Map<String, Value>) -> Result<()> {
        let bytes = self
            .options
            .format
            .serialize(doc)
            .map_err(|reason| serialization_error(&self.path, &reason))?;
        atomic_write(&self.path, &bytes)
    }

    fn segments(&self, key: &str) -> Result<Vec<String>> {
        if self.options.access_properties_by_dot_notation {
            key_path::parse(key)
        } else if key.is_empty() {
            Err(StoreError::InvalidKey {
                key: String::new(),
                reason: "key cannot be empty".to_string(),
            }
            .into())
        } else {
            Ok(vec![key.to_string()])
        }
    }

    fn writable_segments(&self, key: &str) -> Result<Vec<String>> {
        if key.starts_with(RESERVED_KEY_PREFIX) {
            return Err(StoreError::ReservedKey {
                key: key.to_string(),
                prefix: RESERVED_KEY_PREFIX.to_string(),
            }
            .into());
        }
        self.segments(key)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        FileStore::get(self, key)
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        FileStore::set(self, key, value)
    }
}

impl OpenStore for FileStore {
    type Options = StoreOptions;

    fn open(options: StoreOptions) -> Result<Self> {
        FileStore::open(options)
    }
}
