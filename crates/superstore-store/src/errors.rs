//! Error handling for superstore-store
//!
//! Wraps superstore-core ExError with store-specific helpers

use std::path::Path;

use superstore_core::errors::{ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create an IO error for a file operation
pub fn io_error(operation: &str, path: &Path, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_path(path.display().to_string())
        .with_message(err.to_string())
}

/// Create an error for unusable store options
pub fn invalid_options(reason: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("open_store")
        .with_message(reason.to_string())
}

/// Create an error for an options file that cannot be parsed
pub fn invalid_options_file(path: Option<&Path>, reason: &str) -> ExError {
    let err = ExError::new(ExErrorKind::InvalidConfig)
        .with_op("load_options")
        .with_message(format!("Invalid store options: {}", reason));
    match path {
        Some(path) => err.with_path(path.display().to_string()),
        None => err,
    }
}

/// Create an error for a document that cannot be serialized
pub fn serialization_error(path: &Path, reason: &str) -> ExError {
    ExError::new(ExErrorKind::Serialization)
        .with_op("serialize_store")
        .with_path(path.display().to_string())
        .with_message(format!("Failed to serialize store: {}", reason))
}
