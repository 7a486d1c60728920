//! Engine error types
//!
//! Error codes:
//! - LEDGER_RECORD_NOT_FOUND (unknown id)
//! - LEDGER_VALIDATION_FAILED (mandatory field missing or bad explicit id)
//! - store codes pass through unchanged (snapshot load/save failures)

use std::fmt;

use crate::store::{RecordId, StoreError};

/// Engine error type
#[derive(Debug)]
pub enum EngineError {
    /// No live record carries the requested id
    RecordNotFound {
        /// The id that was looked up
        id: RecordId,
    },
    /// The input record is not insertable as supplied
    ValidationFailed {
        /// What was wrong with the input
        reason: String,
    },
    /// The persistence layer failed; the mutation was rolled back
    Store(StoreError),
}

impl EngineError {
    /// Create a record-not-found error
    pub fn not_found(id: RecordId) -> Self {
        EngineError::RecordNotFound { id }
    }

    /// Create a validation error
    pub fn validation(reason: impl Into<String>) -> Self {
        EngineError::ValidationFailed {
            reason: reason.into(),
        }
    }

    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::RecordNotFound { .. } => "LEDGER_RECORD_NOT_FOUND",
            EngineError::ValidationFailed { .. } => "LEDGER_VALIDATION_FAILED",
            EngineError::Store(e) => e.code().code(),
        }
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::RecordNotFound { id } => {
                write!(f, "LEDGER_RECORD_NOT_FOUND: no record with id {}", id)
            }
            EngineError::ValidationFailed { reason } => {
                write!(f, "LEDGER_VALIDATION_FAILED: {}", reason)
            }
            EngineError::Store(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for EngineError {
    fn from(e: StoreError) -> Self {
        EngineError::Store(e)
    }
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
