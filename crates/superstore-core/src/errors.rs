use thiserror::Error;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and CLI output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Validation
    InvalidInput,
    NotFound,

    // Persisted document
    /// The store file exists but cannot be parsed, or its root is not an object
    InvalidConfig,

    // Integration/IO
    Io,
    Serialization,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification kind for programmatic handling plus optional
/// context (operation, key, file path) for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    key: Option<String>,
    path: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            key: None,
            path: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add store key context
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Add file path context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the key context, if any
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Get the file path context, if any
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(key) = &self.key {
            write!(f, " (key: {})", key)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Typed store failures
///
/// Raised where the failure has a precise shape; converted into `ExError`
/// at the crate boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Key is empty or contains an empty path segment
    #[error("Invalid key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    /// Key uses a prefix reserved for store bookkeeping
    #[error("Key '{key}' uses reserved prefix '{prefix}'")]
    ReservedKey { key: String, prefix: String },

    /// Persisted document could not be parsed
    #[error("Store file {path} is invalid: {reason}")]
    CorruptFile { path: String, reason: String },

    /// Value could not be converted to or from its typed form
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<StoreError> for ExError {
    fn from(err: StoreError) -> Self {
        let message = err.to_string();
        match err {
            StoreError::InvalidKey { key, .. } | StoreError::ReservedKey { key, .. } => {
                ExError::new(ExErrorKind::InvalidInput)
                    .with_key(key)
                    .with_message(message)
            }
            StoreError::CorruptFile { path, .. } => ExError::new(ExErrorKind::InvalidConfig)
                .with_path(path)
                .with_message(message),
            StoreError::Serialization { .. } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

/// Conversion from serde_json::Error to StoreError
impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization {
            message: err.to_string(),
        }
    }
}
