//! In-memory base store
//!
//! Flat keys over a `BTreeMap`. Not thread-safe (no Arc/RwLock); designed for
//! single-threaded use and as a stand-in base store in tests.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::errors::Result;
use crate::kv::{KeyValueStore, OpenStore};

/// In-memory key-value store
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryStore {
    entries: BTreeMap<String, Value>,
}

impl MemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `entries`
    pub fn with_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Remove a key, returning its previous value
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// All entries in key order
    pub fn entries(&self) -> &BTreeMap<String, Value> {
        &self.entries
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

impl OpenStore for MemoryStore {
    type Options = BTreeMap<String, Value>;

    fn open(options: Self::Options) -> Result<Self> {
        Ok(Self { entries: options })
    }
}
