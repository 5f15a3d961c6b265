//! Cleaning and validation rules for obras rows.
//!
//! This crate turns extracted rows into loadable ones. It provides both
//! standalone functions and a `Validator` trait combining them.
//!
//! # Rules
//!
//! - **Cleaning**: legacy column rename, featured normalization, blank and
//!   incomplete row removal
//! - **Conversion**: required fields parsed into a typed [`obras_types::Obra`]
//!
//! # Usage
//!
//! ```
//! use obras_types::RawRow;
//! use obras_valid::{clean_rows, DefaultValidator, Validator};
//!
//! let rows = vec![RawRow::from_pairs([("nombre", ""), ("destacada", "")])];
//! let report = clean_rows(rows);
//! assert_eq!(report.blank_dropped, 1);
//!
//! let validator = DefaultValidator::new();
//! assert!(validator.validate_row(&RawRow::new()).is_err());
//! ```
//!
//! # Error Handling
//!
//! Fallible functions return `ValidationResult<T>`. Each
//! `ValidationError` maps to an [`obras_types::ErrorCode`].

pub mod clean;
pub mod convert;
pub mod error;
pub mod validator;

// Re-export main types and functions
pub use error::{ValidationError, ValidationResult};

pub use clean::{
    check_columns, clean_rows, first_missing_field, is_featured, normalize_featured,
    rename_legacy_columns, validate_required, CleanReport,
};
pub use convert::{obra_from_row, parse_date, parse_decimal, parse_integer};

pub use validator::{DefaultValidator, Validator};
