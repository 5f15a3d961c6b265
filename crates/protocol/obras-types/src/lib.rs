//! Data structures for public-works (obras) records.
//!
//! This crate provides the types shared by the obras pipeline. It contains
//! no business logic, only type definitions with serialization support.
//!
//! # Module Organization
//!
//! - [`constants`] - Fixed dataset rules (column names, tokens, indicator filters)
//! - [`error`] - Error codes
//! - [`field`] - The 18-field catalogue and value kinds
//! - [`row`] - Untyped rows as read from a source
//! - [`obra`] - Typed records
//!
//! # Example
//!
//! ```
//! use obras_types::{Cell, Field, RawRow};
//!
//! let row = RawRow::from_pairs([("nombre", "Plaza Norte"), ("area", "")]);
//!
//! assert!(row.has_value(Field::Name));
//! assert!(!row.has_value(Field::ResponsibleArea));
//! assert_eq!(row.get("area"), Some(&Cell::Null));
//! ```

/// Crate version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod constants;
pub mod error;
pub mod field;
pub mod obra;
pub mod row;

pub use constants::*;
pub use error::ErrorCode;
pub use field::{Field, FieldKind};
pub use obra::{ManualObra, Obra, ObraDate};
pub use row::{Cell, RawRow};
