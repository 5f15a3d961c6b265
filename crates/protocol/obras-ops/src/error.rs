//! Error types for the operations layer.
//!
//! This module defines the `OpsError` enum used by all operation
//! functions in this crate.

use std::path::PathBuf;

use obras_store::StoreError;
use obras_types::ErrorCode;
use thiserror::Error;

/// Result type for operations.
pub type OpsResult<T> = std::result::Result<T, OpsError>;

/// Errors that can occur during pipeline operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OpsError {
    // =========================================================================
    // Extraction Errors
    // =========================================================================
    /// Source file does not exist.
    #[error("source not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// Source is not valid semicolon-delimited UTF-8.
    #[error("malformed source: {0}")]
    Csv(#[from] csv::Error),

    /// A record has more fields than the header.
    #[error("line {line}: found {found} fields, header has {expected}")]
    ExtraFields {
        /// 1-based line number of the record.
        line: u64,
        /// Number of header columns.
        expected: usize,
        /// Number of fields in the record.
        found: usize,
    },

    // =========================================================================
    // Store Lifecycle Errors
    // =========================================================================
    /// The store could not be opened.
    #[error("store connection failed: {0}")]
    Connection(#[source] StoreError),

    /// The schema could not be created.
    #[error("schema setup failed: {0}")]
    Schema(#[source] StoreError),

    // =========================================================================
    // Load Errors
    // =========================================================================
    /// The store rejected an insert.
    #[error("insert of '{name}' failed: {source}")]
    Insert {
        /// Name of the record being inserted.
        name: String,
        /// Underlying store error.
        #[source]
        source: StoreError,
    },

    /// A record with this name already exists.
    #[error("an obra named '{0}' already exists")]
    DuplicateName(String),

    /// A record name was empty.
    #[error("obra name must not be empty")]
    EmptyName,

    // =========================================================================
    // Wrapped Errors
    // =========================================================================
    /// Storage error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl OpsError {
    /// Create an insert error.
    pub fn insert(name: impl Into<String>, source: StoreError) -> Self {
        OpsError::Insert {
            name: name.into(),
            source,
        }
    }

    /// Returns true for failures of the extraction step.
    pub fn is_extraction(&self) -> bool {
        matches!(
            self,
            Self::SourceNotFound(_) | Self::Csv(_) | Self::ExtraFields { .. }
        )
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            // Extraction errors
            Self::SourceNotFound(_) => ErrorCode::NotFound,
            Self::Csv(_) | Self::ExtraFields { .. } => ErrorCode::ExtractionFailed,

            // Store lifecycle
            Self::Connection(_) => ErrorCode::ConnectionFailed,
            Self::Schema(_) => ErrorCode::SchemaFailed,

            // Load errors
            Self::Insert { .. } => ErrorCode::InsertFailed,
            Self::DuplicateName(_) => ErrorCode::DuplicateName,
            Self::EmptyName => ErrorCode::MissingField,

            // Wrapped errors - delegate to inner type
            Self::Store(e) => e.error_code(),
            Self::Io(_) => ErrorCode::InternalError,
        }
    }

    /// Get a user-friendly suggestion for recovering from this error.
    pub fn suggestion(&self) -> Option<&'static str> {
        self.error_code().suggestion()
    }
}
