//! Error codes shared by all obras crates.
//!
//! Every crate-level error maps onto one of these codes so the CLI can
//! print a stable identifier and a recovery hint.

use serde::{Deserialize, Serialize};

/// Stable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u16)]
#[non_exhaustive]
pub enum ErrorCode {
    // =========================================================================
    // Input Errors (0x0001 - 0x00FF)
    // =========================================================================
    /// Source file could not be read or parsed
    ExtractionFailed = 0x0001,
    /// Requested file does not exist
    NotFound = 0x0002,
    /// A row value could not be converted to its field type
    InvalidValue = 0x0003,
    /// A required field has no value
    MissingField = 0x0004,

    // =========================================================================
    // Store Errors (0x0100 - 0x01FF)
    // =========================================================================
    /// Store could not be opened
    ConnectionFailed = 0x0100,
    /// Schema could not be created
    SchemaFailed = 0x0101,
    /// A write was rejected by the store
    InsertFailed = 0x0102,
    /// An aggregate query failed
    QueryFailed = 0x0103,
    /// A record with the same name already exists
    DuplicateName = 0x0104,

    // =========================================================================
    // Configuration Errors (0x0200 - 0x02FF)
    // =========================================================================
    /// Configuration file is invalid
    InvalidConfig = 0x0200,

    // =========================================================================
    // Internal Errors
    // =========================================================================
    /// Internal error
    InternalError = 0xFFFF,
}

impl ErrorCode {
    /// Get the numeric code value
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Recovery hint shown next to the error, if any.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            ErrorCode::ExtractionFailed => {
                Some("Check that the file is semicolon-delimited UTF-8 with a header row")
            }
            ErrorCode::NotFound => Some("Check the path and try again"),
            ErrorCode::ConnectionFailed => {
                Some("Check the storage.database path in config.toml or pass --database")
            }
            ErrorCode::SchemaFailed => Some("Run 'obras init' against a writable database"),
            ErrorCode::DuplicateName => Some("Obra names are unique; choose a different name"),
            ErrorCode::InvalidConfig => Some("Fix or delete config.toml to fall back to defaults"),
            _ => None,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::ExtractionFailed => write!(f, "EXTRACTION_FAILED"),
            ErrorCode::NotFound => write!(f, "NOT_FOUND"),
            ErrorCode::InvalidValue => write!(f, "INVALID_VALUE"),
            ErrorCode::MissingField => write!(f, "MISSING_FIELD"),
            ErrorCode::ConnectionFailed => write!(f, "CONNECTION_FAILED"),
            ErrorCode::SchemaFailed => write!(f, "SCHEMA_FAILED"),
            ErrorCode::InsertFailed => write!(f, "INSERT_FAILED"),
            ErrorCode::QueryFailed => write!(f, "QUERY_FAILED"),
            ErrorCode::DuplicateName => write!(f, "DUPLICATE_NAME"),
            ErrorCode::InvalidConfig => write!(f, "INVALID_CONFIG"),
            ErrorCode::InternalError => write!(f, "INTERNAL_ERROR"),
        }
    }
}
