//! Validation error types for obras rows.
//!
//! This module defines the `ValidationError` enum used by the cleaner and
//! the typed row conversion.

use obras_types::{ErrorCode, Field};
use thiserror::Error;

/// Result type for validation operations.
pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

/// Errors that can occur while cleaning or converting rows.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum ValidationError {
    /// A column the cleaner transforms is absent from every row
    #[error("column '{0}' is absent from the source")]
    MissingColumn(String),

    /// A required field has no value
    #[error("required field '{0}' is missing")]
    MissingField(Field),

    /// A numeric field could not be parsed
    #[error("invalid number for '{field}': {value:?}")]
    InvalidNumber {
        /// Field being converted
        field: Field,
        /// Offending source value
        value: String,
    },

    /// An integer field holds a non-integral value
    #[error("invalid integer for '{field}': {value:?}")]
    InvalidInteger {
        /// Field being converted
        field: Field,
        /// Offending source value
        value: String,
    },
}

impl ValidationError {
    /// Get the error code for this validation error.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            ValidationError::MissingColumn(_) | ValidationError::MissingField(_) => {
                ErrorCode::MissingField
            }
            ValidationError::InvalidNumber { .. }
            | ValidationError::InvalidInteger { .. } => ErrorCode::InvalidValue,
        }
    }

    /// Field this error refers to, if any.
    pub fn field(&self) -> Option<Field> {
        match self {
            ValidationError::MissingColumn(_) => None,
            ValidationError::MissingField(field)
            | ValidationError::InvalidNumber { field, .. }
            | ValidationError::InvalidInteger { field, .. } => Some(*field),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ValidationError::InvalidInteger {
            field: Field::TermMonths,
            value: "doce".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("plazo_meses"));
        assert!(msg.contains("doce"));
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            ValidationError::MissingField(Field::Name).error_code(),
            ErrorCode::MissingField
        );
        assert_eq!(
            ValidationError::InvalidNumber {
                field: Field::ContractAmount,
                value: "x".into()
            }
            .error_code(),
            ErrorCode::InvalidValue
        );
    }

    #[test]
    fn test_error_field() {
        assert_eq!(
            ValidationError::MissingField(Field::Stage).field(),
            Some(Field::Stage)
        );
        assert_eq!(ValidationError::MissingColumn("destacada".into()).field(), None);
    }
}
