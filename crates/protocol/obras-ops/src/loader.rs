//! Loading cleaned rows into the store.
//!
//! Rows are processed in source order. A row whose name already exists is
//! skipped; a row that fails the required-field re-check is counted as
//! incomplete. A date that does not parse is stored as its source text. The
//! first insert failure aborts the rest of the batch, including a number the
//! record cannot hold. Rows inserted before the failure stay inserted.

use obras_store::{ObraStore, StoreError};
use obras_types::{Field, RawRow};
use obras_valid::Validator;

use crate::error::{OpsError, OpsResult};

/// Outcome of a load call.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Rows inserted.
    pub inserted: usize,
    /// Rows skipped because the name already existed.
    pub duplicates: usize,
    /// Rows rejected by the required-field re-check.
    pub incomplete: usize,
    /// The error that aborted the batch, if any.
    pub failure: Option<OpsError>,
}

impl LoadReport {
    /// Returns true if the whole batch was processed.
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }

    /// Rows processed before the batch ended.
    pub fn processed(&self) -> usize {
        self.inserted + self.duplicates + self.incomplete
    }
}

/// Load `rows` into `store`, deduplicating by name.
pub fn load_rows<S, V>(store: &mut S, validator: &V, rows: &[RawRow]) -> LoadReport
where
    S: ObraStore + ?Sized,
    V: Validator + ?Sized,
{
    let mut report = LoadReport::default();

    if let Err(err) = load_into(store, validator, rows, &mut report) {
        tracing::error!(
            error = %err,
            inserted = report.inserted,
            remaining = rows.len() - report.processed(),
            "Load aborted"
        );
        report.failure = Some(err);
        return report;
    }

    tracing::info!(
        inserted = report.inserted,
        duplicates = report.duplicates,
        incomplete = report.incomplete,
        "Load complete"
    );
    report
}

fn load_into<S, V>(
    store: &mut S,
    validator: &V,
    rows: &[RawRow],
    report: &mut LoadReport,
) -> OpsResult<()>
where
    S: ObraStore + ?Sized,
    V: Validator + ?Sized,
{
    for row in rows {
        let Some(name) = row.text(Field::Name.column()) else {
            tracing::warn!("Skipping row without a name");
            report.incomplete += 1;
            continue;
        };

        if store.exists_by_name(name)? {
            tracing::warn!(name, "Duplicate skipped");
            report.duplicates += 1;
            continue;
        }

        if let Err(err) = validator.validate_row(row) {
            tracing::warn!(name, error = %err, "Skipping incomplete row");
            report.incomplete += 1;
            continue;
        }

        let obra = validator
            .to_obra(row)
            .map_err(|e| OpsError::insert(name, StoreError::invalid_data(e.to_string())))?;
        store
            .insert(&obra)
            .map_err(|e| OpsError::insert(name, e))?;
        report.inserted += 1;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use obras_store::SqliteObraStore;
    use obras_types::FEATURED_COLUMN;
    use obras_valid::{clean_rows, DefaultValidator};

    fn setup_store() -> SqliteObraStore {
        let mut store = SqliteObraStore::open_in_memory().unwrap();
        store.ensure_schema().unwrap();
        store
    }

    fn cleaned_row(name: &str) -> RawRow {
        let row = RawRow::from_pairs(Field::ALL.iter().map(|field| {
            let value = match field {
                Field::Name => name,
                Field::ContractAmount => "1000",
                Field::ProgressPercentage => "50",
                Field::TermMonths => "12",
                Field::LaborCount => "4",
                Field::StartDate | Field::InitialEndDate => "2021-06-01",
                Field::Featured => "SI",
                _ => "dato",
            };
            (field.column(), value)
        }));
        clean_rows(vec![row]).rows.remove(0)
    }

    #[test]
    fn test_load_inserts_new_rows() {
        let mut store = setup_store();
        let rows = vec![cleaned_row("A"), cleaned_row("B")];

        let report = load_rows(&mut store, &DefaultValidator, &rows);
        assert!(report.is_success());
        assert_eq!(report.inserted, 2);
        assert_eq!(store.count_all().unwrap(), 2);
    }

    #[test]
    fn test_second_load_skips_duplicates() {
        let mut store = setup_store();
        let rows = vec![cleaned_row("Plaza Norte")];

        load_rows(&mut store, &DefaultValidator, &rows);
        let report = load_rows(&mut store, &DefaultValidator, &rows);

        assert!(report.is_success());
        assert_eq!(report.inserted, 0);
        assert_eq!(report.duplicates, 1);
        assert_eq!(store.count_all().unwrap(), 1);
    }

    #[test]
    fn test_duplicates_within_batch() {
        let mut store = setup_store();
        let rows = vec![cleaned_row("Igual"), cleaned_row("Igual")];

        let report = load_rows(&mut store, &DefaultValidator, &rows);
        assert_eq!(report.inserted, 1);
        assert_eq!(report.duplicates, 1);
    }

    #[test]
    fn test_incomplete_rows_counted() {
        let mut store = setup_store();
        let mut missing = cleaned_row("Sin destacada");
        missing.remove(FEATURED_COLUMN);
        let unnamed = RawRow::from_pairs([("tipo", "Escuelas")]);

        let report = load_rows(&mut store, &DefaultValidator, &[missing, unnamed]);
        assert!(report.is_success());
        assert_eq!(report.incomplete, 2);
        assert_eq!(store.count_all().unwrap(), 0);
    }

    #[test]
    fn test_unparsed_date_is_loaded() {
        let mut store = setup_store();
        let odd = cleaned_row("Rara").with("fecha_inicio", "nunca");
        let rows = vec![cleaned_row("Primera"), odd, cleaned_row("Ultima")];

        let report = load_rows(&mut store, &DefaultValidator, &rows);
        assert!(report.is_success());
        assert_eq!(report.inserted, 3);
        assert!(store.exists_by_name("Rara").unwrap());
        assert!(store.exists_by_name("Ultima").unwrap());
    }

    #[test]
    fn test_unparsed_number_aborts_batch() {
        let mut store = setup_store();
        let bad = cleaned_row("Mala").with("mano_obra", "muchos");
        let rows = vec![cleaned_row("Primera"), bad, cleaned_row("Ultima")];

        let report = load_rows(&mut store, &DefaultValidator, &rows);
        assert!(!report.is_success());
        assert_eq!(report.inserted, 1);
        assert!(matches!(
            report.failure,
            Some(OpsError::Insert { ref name, .. }) if name == "Mala"
        ));
        assert!(store.exists_by_name("Primera").unwrap());
        assert!(!store.exists_by_name("Ultima").unwrap());
    }

    #[test]
    fn test_store_failure_aborts_batch() {
        let mut store = SqliteObraStore::open_in_memory().unwrap();
        let report = load_rows(&mut store, &DefaultValidator, &[cleaned_row("A")]);
        assert!(matches!(report.failure, Some(OpsError::Store(_))));
        assert_eq!(report.inserted, 0);
    }

    #[test]
    fn test_empty_batch() {
        let mut store = setup_store();
        let report = load_rows(&mut store, &DefaultValidator, &[]);
        assert!(report.is_success());
        assert_eq!(report.processed(), 0);
    }
}
