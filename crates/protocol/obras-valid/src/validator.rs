//! Validator trait and default implementation.
//!
//! This module provides the `Validator` trait that combines the cleaning
//! and conversion rules, as well as a default implementation.

use obras_types::{Obra, RawRow};

use crate::clean::{clean_rows, validate_required, CleanReport};
use crate::convert::obra_from_row;
use crate::error::ValidationResult;

/// Trait for cleaning and validating obras rows.
///
/// Implementations can tighten the rules; the loader only depends on
/// this trait.
pub trait Validator {
    /// Clean an extracted row sequence.
    fn clean(&self, rows: Vec<RawRow>) -> CleanReport;

    /// Check that a row carries every required field.
    fn validate_row(&self, row: &RawRow) -> ValidationResult<()>;

    /// Convert a validated row into a typed record.
    fn to_obra(&self, row: &RawRow) -> ValidationResult<Obra>;
}

/// Default validator using the standard cleaning and conversion rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultValidator;

impl DefaultValidator {
    /// Create a new default validator.
    pub fn new() -> Self {
        Self
    }
}

impl Validator for DefaultValidator {
    fn clean(&self, rows: Vec<RawRow>) -> CleanReport {
        clean_rows(rows)
    }

    fn validate_row(&self, row: &RawRow) -> ValidationResult<()> {
        validate_required(row)
    }

    fn to_obra(&self, row: &RawRow) -> ValidationResult<Obra> {
        self.validate_row(row)?;
        obra_from_row(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use obras_types::Field;

    #[test]
    fn test_to_obra_checks_required_first() {
        let validator = DefaultValidator::new();
        let row = RawRow::from_pairs([("nombre", "A"), ("monto_contrato", "no es numero")]);
        assert_eq!(
            validator.to_obra(&row),
            Err(ValidationError::MissingField(Field::WorkType))
        );
    }

    #[test]
    fn test_clean_delegates() {
        let validator = DefaultValidator::new();
        let report = validator.clean(vec![RawRow::from_pairs([("destacada", "")])]);
        assert_eq!(report.blank_dropped, 1);
        assert_eq!(report.kept(), 0);
    }
}
