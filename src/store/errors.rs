//! Store error types
//!
//! Error codes:
//! - LEDGER_SNAPSHOT_NOT_FOUND (ERROR severity)
//! - LEDGER_SNAPSHOT_PARSE_FAILED (FATAL severity)
//! - LEDGER_SNAPSHOT_IO_ERROR (ERROR severity)

use std::fmt;
use std::io;

/// Severity levels for store errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Operation fails, process continues
    Error,
    /// The snapshot is unusable; the process cannot serve from it
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Store-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorCode {
    /// Snapshot file does not exist
    SnapshotNotFound,
    /// Snapshot content is not well-formed JSON
    SnapshotParseFailed,
    /// Snapshot read/write failure
    SnapshotIoError,
}

impl StoreErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            StoreErrorCode::SnapshotNotFound => "LEDGER_SNAPSHOT_NOT_FOUND",
            StoreErrorCode::SnapshotParseFailed => "LEDGER_SNAPSHOT_PARSE_FAILED",
            StoreErrorCode::SnapshotIoError => "LEDGER_SNAPSHOT_IO_ERROR",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self {
            StoreErrorCode::SnapshotNotFound => Severity::Error,
            StoreErrorCode::SnapshotParseFailed => Severity::Fatal,
            StoreErrorCode::SnapshotIoError => Severity::Error,
        }
    }
}

impl fmt::Display for StoreErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Store error type with full context
#[derive(Debug)]
pub struct StoreError {
    /// Error code
    code: StoreErrorCode,
    /// Human-readable message
    message: String,
    /// Underlying IO error if applicable
    source: Option<io::Error>,
}

impl StoreError {
    /// Create a snapshot-not-found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            code: StoreErrorCode::SnapshotNotFound,
            message: message.into(),
            source: None,
        }
    }

    /// Create a snapshot parse error
    pub fn parse_failed(message: impl Into<String>) -> Self {
        Self {
            code: StoreErrorCode::SnapshotParseFailed,
            message: message.into(),
            source: None,
        }
    }

    /// Create a snapshot I/O error
    pub fn io_error(message: impl Into<String>, source: io::Error) -> Self {
        Self {
            code: StoreErrorCode::SnapshotIoError,
            message: message.into(),
            source: Some(source),
        }
    }

    /// Create a snapshot I/O error without an underlying source
    pub fn io_error_no_source(message: impl Into<String>) -> Self {
        Self {
            code: StoreErrorCode::SnapshotIoError,
            message: message.into(),
            source: None,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> StoreErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns whether this is a missing-snapshot error
    pub fn is_not_found(&self) -> bool {
        self.code == StoreErrorCode::SnapshotNotFound
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.severity(),
            self.code.code(),
            self.message
        )
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
