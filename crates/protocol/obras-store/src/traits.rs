//! Trait definitions for storage components.
//!
//! Implementations may vary (e.g., SQLite vs a fault-injecting test double)
//! but must satisfy this interface.

use std::collections::BTreeMap;

use obras_types::{Field, ManualObra, Obra};

use crate::error::Result;
use crate::query::{CountSum, Predicate};

// =============================================================================
// Obra Storage
// =============================================================================

/// Persistence for obra records with existence checks and aggregates.
///
/// Grouped queries key null group values as the empty string. Sums are
/// null-safe and default to zero.
pub trait ObraStore {
    /// Create the schema if it is missing.
    ///
    /// Idempotent: safe to call when the schema already exists.
    fn ensure_schema(&mut self) -> Result<()>;

    /// Check whether a record with this exact name exists.
    fn exists_by_name(&self, name: &str) -> Result<bool>;

    /// Insert a complete record.
    ///
    /// Does not check for duplicates; callers check `exists_by_name` first.
    fn insert(&mut self, obra: &Obra) -> Result<()>;

    /// Insert a hand-entered record, leaving unlisted fields null.
    fn insert_manual(&mut self, obra: &ManualObra) -> Result<()>;

    /// Distinct non-null values of a field over rows matching `filter`,
    /// in ascending order.
    fn distinct_values_where(&self, field: Field, filter: &Predicate) -> Result<Vec<String>>;

    /// Distinct non-null values of a field over the whole table.
    fn distinct_values(&self, field: Field) -> Result<Vec<String>> {
        self.distinct_values_where(field, &Predicate::All)
    }

    /// Row count per value of `field`.
    fn count_grouped_by(&self, field: Field) -> Result<BTreeMap<String, u64>>;

    /// Row count and sum of `sum_field` per value of `group`.
    ///
    /// Returns an error if `sum_field` is not numeric.
    fn sum_grouped_by(&self, group: Field, sum_field: Field) -> Result<BTreeMap<String, CountSum>>;

    /// Number of rows matching `filter`.
    fn count_where(&self, filter: &Predicate) -> Result<u64>;

    /// Sum of `field` over rows matching `filter` (0 when nothing matches).
    ///
    /// Returns an error if `field` is not numeric.
    fn sum_where(&self, filter: &Predicate, field: Field) -> Result<f64>;

    /// Sum of `field` over the whole table (0 when empty or all null).
    fn scalar_sum(&self, field: Field) -> Result<f64> {
        self.sum_where(&Predicate::All, field)
    }

    /// Total number of rows.
    fn count_all(&self) -> Result<u64> {
        self.count_where(&Predicate::All)
    }
}
