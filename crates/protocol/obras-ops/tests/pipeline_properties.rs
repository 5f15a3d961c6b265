//! End-to-end pipeline tests.
//!
//! These tests exercise the pipeline over real files and an on-disk
//! database, and use `FaultyStore` from `obras_test_utils` to check the
//! failure boundaries.

use obras_ops::{IndicatorKind, IndicatorValue, OpsError, Operations};
use obras_store::{ObraStore, SqliteObraStore, StoreConfig};
use obras_test_utils::*;
use obras_types::{Cell, ManualObra};

fn line_with(name: &str, column: &str, value: &str) -> String {
    let mut values = source_values(name);
    if let Some(i) = SOURCE_HEADER.iter().position(|c| *c == column) {
        values[i] = value.to_string();
    }
    csv_line(&values)
}

// =========================================================================
// Cleaning
// =========================================================================

#[test]
fn test_featured_si_maps_to_true() {
    let (ops, _temp) = create_test_ops();
    let cleaned = ops.clean(vec![complete_row("Plaza Norte")]);

    assert_eq!(cleaned.kept(), 1);
    let row = &cleaned.rows[0];
    assert_eq!(row.get("destacada"), Some(&Cell::Bool(true)));
    assert_eq!(row.text("expediente_numero"), Some("EX-2019-1"));
    assert!(!row.contains("expediente-numero"));
}

#[test]
fn test_row_missing_area_excluded() {
    let (ops, _temp) = create_test_ops();
    let incomplete = complete_row("Sin Area").with("area", "");
    let cleaned = ops.clean(vec![incomplete, complete_row("Completa")]);

    assert_eq!(cleaned.kept(), 1);
    assert_eq!(cleaned.rows[0].text("nombre"), Some("Completa"));
}

#[test]
fn test_featured_mapping_over_file() {
    let (mut ops, temp) = create_test_ops();
    let path = write_source_csv(
        temp.path(),
        "obras.csv",
        &[
            line_with("Si", "destacada", "SI"),
            line_with("No", "destacada", "NO"),
            line_with("Vacia", "destacada", ""),
            line_with("Minuscula", "destacada", "si"),
        ],
    );

    let report = ops.run_pipeline(&path);
    assert_eq!(report.load.inserted, 4);

    let featured = ops
        .store
        .count_where(&obras_store::Predicate::eq(
            obras_types::Field::Featured,
            true,
        ))
        .unwrap();
    assert_eq!(featured, 1);
}

// =========================================================================
// Loading
// =========================================================================

#[test]
fn test_loading_twice_keeps_one_record() {
    let (mut ops, temp) = create_test_ops();
    let path = write_source_csv(
        temp.path(),
        "obras.csv",
        &[csv_line(&source_values("Plaza Norte"))],
    );

    let first = ops.run_pipeline(&path);
    assert!(first.is_success());
    assert_eq!(first.load.inserted, 1);

    let second = ops.run_pipeline(&path);
    assert!(second.is_success());
    assert_eq!(second.load.inserted, 0);
    assert_eq!(second.load.duplicates, 1);

    assert_eq!(ops.store.count_all().unwrap(), 1);
}

#[test]
fn test_records_survive_reopen() {
    let (mut ops, temp) = create_test_ops();
    let path = write_source_csv(
        temp.path(),
        "obras.csv",
        &[csv_line(&source_values("A")), csv_line(&source_values("B"))],
    );
    ops.run_pipeline(&path);
    ops.close().unwrap();

    let config = StoreConfig::new(temp.path());
    let store = SqliteObraStore::connect(config.database_path()).unwrap();
    assert_eq!(store.count_all().unwrap(), 2);
}

#[test]
fn test_insert_failure_keeps_committed_rows() {
    let mut ops = create_faulty_ops();
    ops.store = FaultyStore::new(memory_store()).with_insert_budget(1);

    let cleaned = ops.clean(vec![
        complete_row("Primera"),
        complete_row("Segunda"),
        complete_row("Tercera"),
    ]);
    let report = ops.load(&cleaned.rows);

    assert!(!report.is_success());
    assert_eq!(report.inserted, 1);
    assert!(matches!(
        report.failure,
        Some(OpsError::Insert { ref name, .. }) if name == "Segunda"
    ));
    assert!(ops.store.inner().exists_by_name("Primera").unwrap());
    assert!(!ops.store.inner().exists_by_name("Tercera").unwrap());
}

#[test]
fn test_unparsed_date_does_not_abort_batch() {
    let (mut ops, temp) = create_test_ops();
    let path = write_source_csv(
        temp.path(),
        "obras.csv",
        &[
            csv_line(&source_values("Primera")),
            line_with("Segunda", "fecha_inicio", "sin fecha"),
            csv_line(&source_values("Tercera")),
        ],
    );

    let report = ops.run_pipeline(&path);
    assert!(report.is_success());
    assert_eq!(report.load.inserted, 3);
    assert!(ops.store.exists_by_name("Tercera").unwrap());
}

#[test]
fn test_existence_check_failure_aborts_batch() {
    let mut ops = create_faulty_ops();
    ops.store.fail(FaultOp::ExistsByName);

    let cleaned = ops.clean(vec![complete_row("A")]);
    let report = ops.load(&cleaned.rows);
    assert!(matches!(report.failure, Some(OpsError::Store(_))));
}

#[test]
fn test_long_record_yields_no_rows() {
    let (mut ops, temp) = create_test_ops();
    let path = write_source_csv(
        temp.path(),
        "obras.csv",
        &[format!("{};extra", csv_line(&source_values("A")))],
    );

    let report = ops.run_pipeline(&path);
    assert_eq!(report.extracted, 0);
    assert!(matches!(
        report.extraction_failure,
        Some(OpsError::ExtraFields { .. })
    ));
    assert!(report.is_success());
    assert_eq!(ops.store.count_all().unwrap(), 0);
}

#[test]
fn test_missing_featured_column_passes_raw_rows() {
    let (mut ops, temp) = create_test_ops();
    let path = temp.path().join("sin_destacada.csv");
    std::fs::write(&path, "nombre;tipo\nPlaza;Escuelas\n").unwrap();

    let report = ops.run_pipeline(&path);
    assert!(report.clean.fallback.is_some());
    assert_eq!(report.clean.kept, 1);
    assert_eq!(report.load.incomplete, 1);
    assert_eq!(report.load.inserted, 0);
}

// =========================================================================
// Indicators
// =========================================================================

#[test]
fn test_stage_counts_and_percentage() {
    let (mut ops, temp) = create_test_ops();
    let path = write_source_csv(
        temp.path(),
        "obras.csv",
        &[
            line_with("A", "etapa", "Finalizada"),
            line_with("B", "etapa", "Finalizada"),
            line_with("C", "etapa", "En curso"),
        ],
    );

    let report = ops.run_pipeline(&path);
    let indicators = report.indicators.unwrap();

    match indicators.value(IndicatorKind::CountByStage) {
        Some(IndicatorValue::Counts(counts)) => {
            assert_eq!(counts.len(), 2);
            assert_eq!(counts.get("Finalizada"), Some(&2));
            assert_eq!(counts.get("En curso"), Some(&1));
        }
        other => panic!("unexpected stage counts: {:?}", other),
    }
    assert_eq!(
        indicators.value(IndicatorKind::FinishedPercentage),
        Some(&IndicatorValue::Percentage(66.67))
    );
}

#[test]
fn test_percentage_zero_on_empty_store() {
    let (ops, _temp) = create_test_ops();
    let report = ops.indicators();
    assert_eq!(
        report.value(IndicatorKind::FinishedPercentage),
        Some(&IndicatorValue::Percentage(0.0))
    );
}

#[test]
fn test_stage_query_failure_is_isolated() {
    let mut ops = create_faulty_ops();
    ops.store.insert(&sample_obra("A", "Finalizada")).unwrap();
    ops.store.fail(FaultOp::CountGroupedBy);

    let report = ops.indicators();
    assert_eq!(report.indicators.len(), 10);
    assert_eq!(report.failed(), 1);
    assert!(!report.get(IndicatorKind::CountByStage).unwrap().is_ok());
    assert_eq!(
        report.value(IndicatorKind::TotalLabor),
        Some(&IndicatorValue::Total(10))
    );
}

#[test]
fn test_manual_obra_counts_in_indicators() {
    let (mut ops, _temp) = create_test_ops();
    ops.store.insert(&sample_obra("A", "Finalizada")).unwrap();
    ops.create_obra(&ManualObra::new(
        "Manual",
        "Escuelas",
        "Educacion",
        "Boedo",
        "Comuna 5",
        500.0,
    ))
    .unwrap();

    let report = ops.indicators();
    assert_eq!(
        report.value(IndicatorKind::TotalInvestment),
        Some(&IndicatorValue::Sum(1500.0))
    );
    assert_eq!(
        report.value(IndicatorKind::FinishedPercentage),
        Some(&IndicatorValue::Percentage(50.0))
    );
}

#[test]
fn test_schema_failure_surfaces() {
    let mut ops = create_faulty_ops();
    ops.store.fail(FaultOp::EnsureSchema);
    let err = ops.ensure_schema().unwrap_err();
    assert!(matches!(err, OpsError::Schema(_)));
}
