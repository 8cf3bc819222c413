//! # Store Errors
//!
//! Error types for the SQLite-backed query executor.

use std::path::PathBuf;

use rusqlite::ErrorCode;
use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// A UNIQUE or PRIMARY KEY constraint rejected the statement
    #[error("Constraint conflict: {0}")]
    Conflict(String),

    /// Any other failure reported by SQLite
    #[error("SQLite error: {0}")]
    Sqlite(#[source] rusqlite::Error),

    /// Database file could not be opened
    #[error("Failed to open database at {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// A row did not carry the expected column or type
    #[error("Row decode error: {0}")]
    Decode(String),

    /// The pool has been closed and hands out no more connections
    #[error("Connection pool is closed")]
    PoolClosed,

    /// The blocking task running the statement failed
    #[error("Store task failed: {0}")]
    Task(String),

    /// Store configuration is unusable
    #[error("Invalid store configuration: {0}")]
    InvalidConfig(String),
}

impl StoreError {
    /// True for uniqueness violations
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict(_))
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(failure, message)
                if failure.code == ErrorCode::ConstraintViolation
                    && is_uniqueness_violation(failure.extended_code) =>
            {
                StoreError::Conflict(
                    message
                        .clone()
                        .unwrap_or_else(|| "unique constraint failed".to_string()),
                )
            }
            _ => StoreError::Sqlite(err),
        }
    }
}

fn is_uniqueness_violation(extended_code: i32) -> bool {
    extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
        || extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
}

impl From<tokio::task::JoinError> for StoreError {
    fn from(err: tokio::task::JoinError) -> Self {
        StoreError::Task(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sqlite_failure(code: ErrorCode, extended_code: i32) -> rusqlite::Error {
        rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error {
                code,
                extended_code,
            },
            Some("UNIQUE constraint failed: books.book_name, books.author".to_string()),
        )
    }

    #[test]
    fn test_unique_violation_is_conflict() {
        let err = StoreError::from(sqlite_failure(
            ErrorCode::ConstraintViolation,
            rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE,
        ));
        assert!(err.is_conflict());
        assert!(err.to_string().contains("books.book_name"));
    }

    #[test]
    fn test_not_null_violation_is_not_conflict() {
        let err = StoreError::from(sqlite_failure(
            ErrorCode::ConstraintViolation,
            rusqlite::ffi::SQLITE_CONSTRAINT_NOTNULL,
        ));
        assert!(matches!(err, StoreError::Sqlite(_)));
    }

    #[test]
    fn test_other_errors_pass_through() {
        let err = StoreError::from(rusqlite::Error::QueryReturnedNoRows);
        assert!(!err.is_conflict());
    }
}
