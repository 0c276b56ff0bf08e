//! Default-filling reads
//!
//! `DefaultingStore` wraps a base store and changes one thing: reading a key
//! with a default never reports "missing". On a miss the default is written
//! through the base store before it is returned, so a deleted key (or a
//! deleted backing file) heals back to its default on the next read.
//!
//! The read and the write are two separate base-store calls. Two writers
//! racing on the same absent key both write; the last one wins.

use std::ops::{Deref, DerefMut};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use superstore_core_types::schema::EVENT_DEFAULT_FILLED;

use crate::errors::{ExError, Result, StoreError};
use crate::kv::{KeyValueStore, OpenStore};

/// A base store whose reads fill misses with a caller-supplied default
///
/// Every other operation of the base store is reachable unchanged through
/// `Deref`/`DerefMut` or [`DefaultingStore::inner`].
#[derive(Debug, Clone, Default)]
pub struct DefaultingStore<S> {
    inner: S,
}

impl<S: OpenStore> DefaultingStore<S> {
    /// Open the base store with `options`, forwarded as-is
    ///
    /// # Errors
    ///
    /// Returns whatever the base store's constructor returns.
    pub fn open(options: S::Options) -> Result<Self> {
        Ok(Self {
            inner: S::open(options)?,
        })
    }
}

impl<S> DefaultingStore<S> {
    /// Wrap an already-open base store
    pub fn wrap(inner: S) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: KeyValueStore> DefaultingStore<S> {
    /// Read `key`, writing and returning `default_value` if it is absent
    ///
    /// Only the base store's "absent" result triggers the write. Present
    /// values are returned unchanged, including `null`, `false`, `0` and `""`.
    ///
    /// # Errors
    ///
    /// Propagates base-store read and write failures unchanged. A failed
    /// write means the default was not persisted and is not returned.
    pub fn get(&mut self, key: &str, default_value: Value) -> Result<Value> {
        if let Some(value) = self.inner.get(key)? {
            return Ok(value);
        }

        self.inner.set(key, default_value.clone())?;
        tracing::debug!(
            component = module_path!(),
            op = "get",
            event = EVENT_DEFAULT_FILLED,
            key = key,
        );

        Ok(default_value)
    }

    /// Typed variant of [`DefaultingStore::get`]
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if `default_value` cannot be represented as
    /// JSON or the stored value does not deserialize into `T`, plus any
    /// base-store failure.
    pub fn get_as<T>(&mut self, key: &str, default_value: T) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
    {
        let default_value = serde_json::to_value(default_value).map_err(StoreError::from)?;
        let value = self.get(key, default_value)?;
        let typed = serde_json::from_value(value).map_err(|e| {
            ExError::from(StoreError::from(e))
                .with_op("get_as")
                .with_key(key)
        })?;
        Ok(typed)
    }
}

impl<S> Deref for DefaultingStore<S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.inner
    }
}

impl<S> DerefMut for DefaultingStore<S> {
    fn deref_mut(&mut self) -> &mut S {
        &mut self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ExErrorKind;
    use crate::memory::MemoryStore;
    use serde_json::json;
    use std::collections::BTreeMap;

    /// Base store that counts writes and can be told to fail them
    #[derive(Default)]
    struct CountingStore {
        inner: MemoryStore,
        writes: usize,
        fail_writes: bool,
    }

    impl KeyValueStore for CountingStore {
        fn get(&self, key: &str) -> Result<Option<Value>> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: Value) -> Result<()> {
            if self.fail_writes {
                return Err(ExError::new(ExErrorKind::Io)
                    .with_op("write")
                    .with_message("disk full"));
            }
            self.writes += 1;
            self.inner.set(key, value)
        }
    }

    #[test]
    fn test_miss_writes_default() {
        let mut store = DefaultingStore::wrap(MemoryStore::new());

        let value = store.get("theme", json!("dark")).unwrap();

        assert_eq!(value, json!("dark"));
        assert_eq!(store.inner().get("theme").unwrap(), Some(json!("dark")));
    }

    #[test]
    fn test_present_falsy_values_win() {
        let present = [json!(0), json!(false), json!(""), Value::Null, json!([]), json!({})];
        for v in present {
            let mut store = DefaultingStore::wrap(MemoryStore::with_entries([("k", v.clone())]));

            assert_eq!(store.get("k", json!("default")).unwrap(), v);
            assert_eq!(store.inner().get("k").unwrap(), Some(v));
        }
    }

    #[test]
    fn test_second_read_does_not_write() {
        let mut store = DefaultingStore::wrap(CountingStore::default());

        assert_eq!(store.get("k", json!(7)).unwrap(), json!(7));
        assert_eq!(store.get("k", json!(7)).unwrap(), json!(7));

        assert_eq!(store.inner().writes, 1);
    }

    #[test]
    fn test_write_failure_propagates() {
        let mut store = DefaultingStore::wrap(CountingStore {
            fail_writes: true,
            ..Default::default()
        });

        let err = store.get("k", json!(1)).unwrap_err();

        assert_eq!(err.kind(), ExErrorKind::Io);
        assert_eq!(err.op(), Some("write"));
        assert_eq!(store.inner().inner.get("k").unwrap(), None);
    }

    #[test]
    fn test_open_forwards_options() {
        let options: BTreeMap<String, Value> =
            [("name".to_string(), json!("prefs"))].into_iter().collect();
        let store: DefaultingStore<MemoryStore> = DefaultingStore::open(options).unwrap();
        assert_eq!(store.entries().get("name"), Some(&json!("prefs")));
    }

    #[test]
    fn test_wraps_borrowed_store() {
        let mut base = MemoryStore::new();
        {
            let mut store = DefaultingStore::wrap(&mut base);
            store.get("k", json!(true)).unwrap();
        }
        assert_eq!(base.get("k").unwrap(), Some(json!(true)));
    }

    #[test]
    fn test_get_as_typed() {
        let mut store = DefaultingStore::wrap(MemoryStore::new());

        let width: u32 = store.get_as("width", 800).unwrap();
        assert_eq!(width, 800);

        store.inner_mut().set("width", json!(1024)).unwrap();
        let width: u32 = store.get_as("width", 800).unwrap();
        assert_eq!(width, 1024);
    }

    #[test]
    fn test_get_as_type_mismatch() {
        let mut store = DefaultingStore::wrap(MemoryStore::with_entries([("width", json!("wide"))]));

        let err = store.get_as::<u32>("width", 800).unwrap_err();

        assert_eq!(err.kind(), ExErrorKind::Serialization);
        assert_eq!(err.key(), Some("width"));
    }
}
