//! Error types for the dealership service.

use thiserror::Error;

/// Common error type for the dealership service.
#[derive(Error, Debug)]
pub enum DealershipError {
    /// Database error.
    ///
    /// Errors from sqlx are converted automatically. Constraint violations
    /// are mapped to `Conflict` or `Validation` by the repositories.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Uniqueness or reference conflict.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Unexpected failure (hashing, token signing, ...).
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<sqlx::Error> for DealershipError {
    fn from(e: sqlx::Error) -> Self {
        DealershipError::Database(e.to_string())
    }
}

/// Result type alias for dealership operations.
pub type Result<T> = std::result::Result<T, DealershipError>;
