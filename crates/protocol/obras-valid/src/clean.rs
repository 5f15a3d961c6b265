//! Row cleaning.
//!
//! Cleaning runs four steps over the extracted rows, in order:
//!
//! 1. Rename `expediente-numero` to `expediente_numero`.
//! 2. Normalize `destacada`: `"SI"` becomes `true`, anything else `false`.
//! 3. Drop rows whose source values are all empty.
//! 4. Drop rows missing any of the 18 required fields.
//!
//! Blankness (step 3) is judged on the source values: the flag written in
//! step 2 always has a value and would otherwise hide blank rows.
//!
//! If the featured column is absent from every row, cleaning does not run
//! at all and the input is handed back unchanged with the failure recorded
//! in [`CleanReport::fallback`].

use obras_types::{
    Cell, Field, RawRow, FEATURED_COLUMN, FEATURED_TOKEN, FILE_NUMBER_COLUMN,
    LEGACY_FILE_NUMBER_COLUMN,
};

use crate::error::{ValidationError, ValidationResult};

/// Outcome of cleaning a row sequence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanReport {
    /// Rows that survived cleaning, in source order.
    pub rows: Vec<RawRow>,
    /// Rows dropped because every value was empty.
    pub blank_dropped: usize,
    /// Rows dropped because a required field was missing.
    pub incomplete_dropped: usize,
    /// Set when cleaning could not run and `rows` is the untouched input.
    pub fallback: Option<ValidationError>,
}

impl CleanReport {
    /// Number of rows kept.
    pub fn kept(&self) -> usize {
        self.rows.len()
    }

    /// Total rows dropped by steps 3 and 4.
    pub fn dropped(&self) -> usize {
        self.blank_dropped + self.incomplete_dropped
    }
}

/// Move the legacy file-number column to its canonical name.
///
/// Only `expediente-numero` is renamed. If both spellings are present the
/// legacy value wins.
pub fn rename_legacy_columns(row: &mut RawRow) {
    if let Some(cell) = row.remove(LEGACY_FILE_NUMBER_COLUMN) {
        row.set(FILE_NUMBER_COLUMN, cell);
    }
}

/// Map a featured cell to its flag. Total: missing or unknown is `false`.
pub fn is_featured(cell: Option<&Cell>) -> bool {
    match cell {
        Some(Cell::Text(token)) => token == FEATURED_TOKEN,
        Some(Cell::Bool(flag)) => *flag,
        Some(Cell::Null) | None => false,
    }
}

/// Replace the featured cell with its boolean flag.
pub fn normalize_featured(row: &mut RawRow) {
    let flag = is_featured(row.get(FEATURED_COLUMN));
    row.set(FEATURED_COLUMN, flag);
}

/// First required field without a value, in catalogue order.
pub fn first_missing_field(row: &RawRow) -> Option<Field> {
    Field::ALL.iter().copied().find(|field| !row.has_value(*field))
}

/// Check that a row has every required field.
pub fn validate_required(row: &RawRow) -> ValidationResult<()> {
    match first_missing_field(row) {
        Some(field) => Err(ValidationError::MissingField(field)),
        None => Ok(()),
    }
}

/// Check that the columns the cleaner transforms exist in the source.
///
/// An empty input has nothing to check.
pub fn check_columns(rows: &[RawRow]) -> ValidationResult<()> {
    if rows.is_empty() || rows.iter().any(|row| row.contains(FEATURED_COLUMN)) {
        Ok(())
    } else {
        Err(ValidationError::MissingColumn(FEATURED_COLUMN.to_string()))
    }
}

/// Clean a row sequence. Never fails; see the module docs for the fallback.
pub fn clean_rows(rows: Vec<RawRow>) -> CleanReport {
    if let Err(err) = check_columns(&rows) {
        tracing::warn!(
            error = %err,
            rows = rows.len(),
            "Cleaning skipped, returning source rows unchanged"
        );
        return CleanReport {
            rows,
            fallback: Some(err),
            ..Default::default()
        };
    }

    let mut report = CleanReport::default();

    for (index, mut row) in rows.into_iter().enumerate() {
        rename_legacy_columns(&mut row);
        let blank = row.is_blank();
        normalize_featured(&mut row);

        if blank {
            tracing::debug!(row = index, "Dropping blank row");
            report.blank_dropped += 1;
            continue;
        }

        if let Some(field) = first_missing_field(&row) {
            tracing::debug!(row = index, field = %field, "Dropping row with missing field");
            report.incomplete_dropped += 1;
            continue;
        }

        report.rows.push(row);
    }

    tracing::info!(
        kept = report.kept(),
        blank = report.blank_dropped,
        incomplete = report.incomplete_dropped,
        "Cleaned rows"
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_row(name: &str) -> RawRow {
        RawRow::from_pairs([
            ("nombre", name),
            ("tipo", "Espacio Verde"),
            ("area", "Ministerio de Espacio Publico"),
            ("barrio", "Palermo"),
            ("comuna", "14"),
            ("monto_contrato", "1500000.50"),
            ("etapa", "Finalizada"),
            ("contratacion_tipo", "Licitacion Publica"),
            ("nro_contratacion", "123/2019"),
            ("licitacion_oferta_empresa", "Constructora SA"),
            ("expediente-numero", "EX-2019-1"),
            ("destacada", "SI"),
            ("fecha_inicio", "2019-03-01"),
            ("fecha_fin_inicial", "2020-03-01"),
            ("financiamiento", "GCBA"),
            ("porcentaje_avance", "100"),
            ("plazo_meses", "12"),
            ("mano_obra", "25"),
        ])
    }

    #[test]
    fn test_featured_mapping_is_total() {
        assert!(is_featured(Some(&Cell::from("SI"))));
        assert!(!is_featured(Some(&Cell::from("NO"))));
        assert!(!is_featured(Some(&Cell::from("si"))));
        assert!(!is_featured(Some(&Cell::from(" SI"))));
        assert!(!is_featured(Some(&Cell::from(""))));
        assert!(!is_featured(Some(&Cell::Null)));
        assert!(!is_featured(None));
    }

    #[test]
    fn test_rename_only_legacy_column() {
        let mut row = RawRow::from_pairs([("expediente-numero", "EX-1"), ("nro-contratacion", "9")]);
        rename_legacy_columns(&mut row);
        assert_eq!(row.text("expediente_numero"), Some("EX-1"));
        assert!(!row.contains("expediente-numero"));
        assert!(row.contains("nro-contratacion"));
    }

    #[test]
    fn test_complete_row_kept_with_transformations() {
        let report = clean_rows(vec![complete_row("Plaza Norte")]);
        assert_eq!(report.kept(), 1);
        assert!(report.fallback.is_none());

        let row = &report.rows[0];
        assert_eq!(row.get("destacada"), Some(&Cell::Bool(true)));
        assert_eq!(row.text("expediente_numero"), Some("EX-2019-1"));
        assert_eq!(row.text("nombre"), Some("Plaza Norte"));
    }

    #[test]
    fn test_missing_area_dropped() {
        let mut incomplete = complete_row("Sin Area");
        incomplete.set("area", "");
        let report = clean_rows(vec![incomplete, complete_row("Completa")]);

        assert_eq!(report.kept(), 1);
        assert_eq!(report.rows[0].text("nombre"), Some("Completa"));
        assert_eq!(report.incomplete_dropped, 1);
        assert_eq!(report.blank_dropped, 0);
    }

    #[test]
    fn test_blank_row_counted_separately() {
        let blank = RawRow::from_pairs(Field::ALL.iter().map(|f| (f.column(), "")));
        let mut incomplete = complete_row("X");
        incomplete.remove("mano_obra");

        let report = clean_rows(vec![blank, incomplete, complete_row("Y")]);
        assert_eq!(report.blank_dropped, 1);
        assert_eq!(report.incomplete_dropped, 1);
        assert_eq!(report.kept(), 1);
        assert_eq!(report.dropped(), 2);
    }

    #[test]
    fn test_row_without_legacy_header_still_requires_file_number() {
        let mut row = complete_row("Z");
        row.remove("expediente-numero");
        let report = clean_rows(vec![row]);
        assert_eq!(report.incomplete_dropped, 1);
    }

    #[test]
    fn test_extra_columns_allowed() {
        let row = complete_row("Extra").with("lat", "-34.6").with("imagen_1", "");
        let report = clean_rows(vec![row]);
        assert_eq!(report.kept(), 1);
        assert_eq!(report.rows[0].text("lat"), Some("-34.6"));
    }

    #[test]
    fn test_non_si_featured_becomes_false() {
        let row = complete_row("No destacada").with("destacada", "NO");
        let report = clean_rows(vec![row]);
        assert_eq!(report.rows[0].get("destacada"), Some(&Cell::Bool(false)));
    }

    #[test]
    fn test_empty_featured_keeps_row() {
        let row = complete_row("Vacia").with("destacada", "");
        let report = clean_rows(vec![row]);
        assert_eq!(report.kept(), 1);
        assert_eq!(report.rows[0].get("destacada"), Some(&Cell::Bool(false)));
    }

    #[test]
    fn test_missing_featured_column_falls_back() {
        let mut row = complete_row("Sin destacada");
        row.remove("destacada");
        let input = vec![row.clone(), RawRow::new()];

        let report = clean_rows(input.clone());
        assert_eq!(report.rows, input);
        assert_eq!(
            report.fallback,
            Some(ValidationError::MissingColumn("destacada".to_string()))
        );
        assert_eq!(report.dropped(), 0);
    }

    #[test]
    fn test_empty_input() {
        let report = clean_rows(Vec::new());
        assert_eq!(report, CleanReport::default());
    }

    #[test]
    fn test_validate_required() {
        assert!(validate_required(&clean_rows(vec![complete_row("A")]).rows[0]).is_ok());
        let row = RawRow::from_pairs([("nombre", "A")]);
        assert_eq!(
            validate_required(&row),
            Err(ValidationError::MissingField(Field::WorkType))
        );
    }
}
