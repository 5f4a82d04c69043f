//! Error types for RowKV
//!
//! Provides a unified error type for all store operations.

use thiserror::Error;

/// Result type alias using RowKvError
pub type Result<T> = std::result::Result<T, RowKvError>;

/// Unified error type for RowKV operations
#[derive(Debug, Error)]
pub enum RowKvError {
    // -------------------------------------------------------------------------
    // Request Errors (never reach the storage engine)
    // -------------------------------------------------------------------------
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    // -------------------------------------------------------------------------
    // Record Errors
    // -------------------------------------------------------------------------
    #[error("Key already exists: {0}")]
    KeyConflict(String),

    #[error("Record not found: id={0}")]
    NotFound(i64),

    // -------------------------------------------------------------------------
    // Storage Errors
    // -------------------------------------------------------------------------
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed timestamp: {0}")]
    Timestamp(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl RowKvError {
    /// True for any failure of the underlying engine (I/O, SQL, pool, decoding)
    pub fn is_storage_failure(&self) -> bool {
        matches!(
            self,
            RowKvError::Storage(_)
                | RowKvError::Pool(_)
                | RowKvError::Io(_)
                | RowKvError::Timestamp(_)
        )
    }
}

/// Returns true when the SQLite error is a UNIQUE constraint violation
pub(crate) fn is_unique_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(code, _) => {
            code.code == rusqlite::ErrorCode::ConstraintViolation
                && code.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
        }
        _ => false,
    }
}
