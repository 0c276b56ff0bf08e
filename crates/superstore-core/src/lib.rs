//! SuperStore Core - default-filling reads over a generic key-value store
//!
//! This crate provides:
//! - The `KeyValueStore` / `OpenStore` capability traits a base store implements
//! - `DefaultingStore`, which turns a read miss into a persisted default
//! - `MemoryStore`, a flat in-process base store
//! - Dot-notation key paths over JSON documents
//! - The error facility (`ExError`) and the structured logging facility

pub mod defaulting;
pub mod errors;
pub mod key_path;
pub mod kv;
pub mod logging_facility;
pub mod memory;

// Re-export commonly used types
pub use defaulting::DefaultingStore;
pub use errors::{ExError, ExErrorKind, Result, StoreError};
pub use kv::{KeyValueStore, OpenStore};
pub use memory::MemoryStore;
