//! Error types for the storage layer.
//!
//! This module defines the error types used throughout the obras-store crate.

use obras_types::{ErrorCode, Field};
use thiserror::Error;

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Database error from SQLite.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Schema initialization error.
    #[error("Schema error: {0}")]
    Schema(String),

    /// A sum was requested over a field that is not numeric.
    #[error("Field is not numeric: {0}")]
    NotNumeric(Field),

    /// Invalid data format.
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl StoreError {
    /// Create a schema error.
    pub fn schema(msg: impl Into<String>) -> Self {
        StoreError::Schema(msg.into())
    }

    /// Create an invalid data error.
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        StoreError::InvalidData(msg.into())
    }

    /// Map this error to a stable error code.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            StoreError::Io(_) => ErrorCode::ConnectionFailed,
            StoreError::Schema(_) => ErrorCode::SchemaFailed,
            StoreError::NotNumeric(_) => ErrorCode::QueryFailed,
            StoreError::InvalidData(_) => ErrorCode::InvalidValue,
            StoreError::Database(_) => ErrorCode::InternalError,
        }
    }
}
