//! Capability traits for base stores
//!
//! A base store is anything that can read a value by key (reporting absence
//! as `None`) and write one back. `DefaultingStore` is generic over these.

use serde_json::Value;

use crate::errors::Result;

/// Minimal key-value capability a base store provides
pub trait KeyValueStore {
    /// Read the value stored under `key`
    ///
    /// Returns `Ok(None)` only when no record exists. A stored JSON `null` is
    /// `Ok(Some(Value::Null))`.
    ///
    /// # Errors
    ///
    /// Returns whatever the store raises when it cannot read its records.
    fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Write `value` under `key`
    ///
    /// # Errors
    ///
    /// Returns whatever the store raises when it cannot persist the record.
    fn set(&mut self, key: &str, value: Value) -> Result<()>;
}

/// Construction from an options value the store defines
pub trait OpenStore: Sized {
    /// Options accepted by the store's constructor
    type Options;

    /// Open (and initialize) a store from `options`
    ///
    /// # Errors
    ///
    /// Returns the store's own initialization failures.
    fn open(options: Self::Options) -> Result<Self>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        (**self).set(key, value)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        (**self).set(key, value)
    }
}
