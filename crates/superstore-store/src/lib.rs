//! SuperStore Store - file-backed configuration store
//!
//! Provides:
//! - `FileStore`: a whole-document JSON/YAML store re-read on every access
//! - `StoreOptions`: file naming, location, format and defaults
//! - Atomic writes (temp file + rename)
//! - Change subscriptions per key or for the whole document
//! - `SuperStore`: `FileStore` wrapped in default-filling reads

pub mod atomic;
pub mod errors;
pub mod file_store;
pub mod format;
pub mod options;
pub mod path;
pub mod subscriptions;

// Re-export key types
pub use errors::Result;
pub use file_store::FileStore;
pub use format::Format;
pub use options::StoreOptions;
pub use subscriptions::SubscriptionId;

/// A `FileStore` whose `get(key, default)` persists the default on a miss
pub type SuperStore = superstore_core::DefaultingStore<FileStore>;
