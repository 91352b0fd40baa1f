use std::path::Path;
use thiserror::Error;

/// Result type alias using LogDeltaError
pub type Result<T> = std::result::Result<T, LogDeltaError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and log correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    /// A caller-supplied value (flag, config entry) is unusable
    InvalidInput,
    /// Input path does not exist or is not readable
    NotFound,
    /// Header missing, key column absent, or record shape inconsistent with header
    MalformedInput,
    /// Duplicate key within one snapshot (informational, never returned as a failure)
    KeyCollision,
    Io,
    Serialization,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::MalformedInput => "ERR_MALFORMED_INPUT",
            ExErrorKind::KeyCollision => "ERR_KEY_COLLISION",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }
}

/// Canonical structured error type
///
/// Carries classification fields for programmatic handling and context
/// (operation, path, line) for presenting the failure to a user.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    path: Option<String>,
    line: Option<u64>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            path: None,
            line: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add path context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add line context (1-based, as reported by the CSV reader)
    pub fn with_line(mut self, line: u64) -> Self {
        self.line = Some(line);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn line(&self) -> Option<u64> {
        self.line
    }

    pub fn message(&self) -> &str {
        &self.message
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
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        if let Some(line) = self.line {
            write!(f, " (line: {})", line)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for logdelta operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LogDeltaError {
    // ===== Source Errors =====
    /// Snapshot source does not exist or cannot be opened for reading
    #[error("Cannot open snapshot source {path}: {reason}")]
    SourceNotFound { path: String, reason: String },

    /// Logs directory does not exist
    #[error("Logs directory not found: {path}")]
    LogsDirNotFound { path: String },

    // ===== Shape Errors =====
    /// Source has no header row
    #[error("Missing header row in {path}")]
    HeaderMissing { path: String },

    /// Key column is not among the header columns
    #[error("Key column '{key_column}' not found in header of {path}")]
    KeyColumnMissing { path: String, key_column: String },

    /// Record has a different field count than the header
    #[error("Record at line {line} in {path} has {found} fields, header has {expected}")]
    RecordShape {
        path: String,
        line: u64,
        expected: usize,
        found: usize,
    },

    /// Record is not valid UTF-8
    #[error("Record at line {line} in {path} is not valid UTF-8")]
    InvalidUtf8 { path: String, line: u64 },

    /// Any other delimited-text syntax failure
    #[error("Cannot parse {path}: {message}")]
    CsvSyntax { path: String, message: String },

    // ===== Input Errors =====
    /// Delimiter is not a single ASCII character
    #[error("Invalid delimiter '{value}': must be a single ASCII character")]
    InvalidDelimiter { value: String },

    /// A session step ran before the selection it needs
    #[error("No {what} selected")]
    NothingSelected { what: String },

    /// Configuration file could not be parsed
    #[error("Invalid configuration in {path}: {reason}")]
    InvalidConfig { path: String, reason: String },

    // ===== Integration Errors =====
    /// Filesystem operation failed
    #[error("I/O error during {op} on {path}: {message}")]
    Io {
        op: String,
        path: String,
        message: String,
    },

    /// Output could not be serialized
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl LogDeltaError {
    /// Build an `Io` error from a `std::io::Error`
    pub fn io(op: &str, path: &Path, err: &std::io::Error) -> Self {
        LogDeltaError::Io {
            op: op.to_string(),
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }

    /// Classify this error in the canonical taxonomy
    pub fn kind(&self) -> ExErrorKind {
        match self {
            LogDeltaError::SourceNotFound { .. } | LogDeltaError::LogsDirNotFound { .. } => {
                ExErrorKind::NotFound
            }
            LogDeltaError::HeaderMissing { .. }
            | LogDeltaError::KeyColumnMissing { .. }
            | LogDeltaError::RecordShape { .. }
            | LogDeltaError::InvalidUtf8 { .. }
            | LogDeltaError::CsvSyntax { .. } => ExErrorKind::MalformedInput,
            LogDeltaError::InvalidDelimiter { .. }
            | LogDeltaError::InvalidConfig { .. }
            | LogDeltaError::NothingSelected { .. } => ExErrorKind::InvalidInput,
            LogDeltaError::Io { .. } => ExErrorKind::Io,
            LogDeltaError::Serialization { .. } => ExErrorKind::Serialization,
        }
    }
}

impl From<LogDeltaError> for ExError {
    fn from(err: LogDeltaError) -> Self {
        let message = err.to_string();
        let base = ExError::new(err.kind()).with_message(message);
        match err {
            LogDeltaError::SourceNotFound { path, .. }
            | LogDeltaError::LogsDirNotFound { path }
            | LogDeltaError::HeaderMissing { path }
            | LogDeltaError::KeyColumnMissing { path, .. }
            | LogDeltaError::CsvSyntax { path, .. }
            | LogDeltaError::InvalidConfig { path, .. } => base.with_path(path),
            LogDeltaError::RecordShape { path, line, .. }
            | LogDeltaError::InvalidUtf8 { path, line } => base.with_path(path).with_line(line),
            LogDeltaError::Io { op, path, .. } => base.with_op(op).with_path(path),
            LogDeltaError::InvalidDelimiter { .. }
            | LogDeltaError::NothingSelected { .. }
            | LogDeltaError::Serialization { .. } => base,
        }
    }
}

impl From<serde_json::Error> for LogDeltaError {
    fn from(err: serde_json::Error) -> Self {
        LogDeltaError::Serialization {
            message: err.to_string(),
        }
    }
}
