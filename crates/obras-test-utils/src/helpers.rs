//! Helper functions for creating test fixtures.
//!
//! Provides convenience functions for generating source rows, typed
//! records, CSV files and pre-configured `ObrasOperations`.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use obras_ops::{CsvSource, DefaultObrasOperations, ObrasOperations};
use obras_store::{ObraStore, SqliteObraStore, StoreConfig};
use obras_types::{Obra, RawRow};
use obras_valid::DefaultValidator;
use tempfile::TempDir;

use crate::FaultyStore;

/// Source header in the published column order, with the legacy
/// `expediente-numero` spelling.
pub const SOURCE_HEADER: [&str; 18] = [
    "nombre",
    "tipo",
    "area",
    "barrio",
    "comuna",
    "monto_contrato",
    "etapa",
    "contratacion_tipo",
    "nro_contratacion",
    "licitacion_oferta_empresa",
    "expediente-numero",
    "destacada",
    "fecha_inicio",
    "fecha_fin_inicial",
    "financiamiento",
    "porcentaje_avance",
    "plazo_meses",
    "mano_obra",
];

/// Source values for a complete row, aligned with [`SOURCE_HEADER`].
pub fn source_values(name: &str) -> Vec<String> {
    [
        name,
        "Espacio Verde",
        "Ministerio de Espacio Publico",
        "Palermo",
        "Comuna 14",
        "1500000.50",
        "Finalizada",
        "Licitacion Publica",
        "123/2019",
        "Constructora SA",
        "EX-2019-1",
        "SI",
        "2019-03-01",
        "2020-03-01",
        "GCBA",
        "100",
        "12",
        "25",
    ]
    .iter()
    .map(|v| v.to_string())
    .collect()
}

/// A complete source row, as an extractor would produce it.
pub fn complete_row(name: &str) -> RawRow {
    RawRow::from_pairs(SOURCE_HEADER.iter().copied().zip(source_values(name)))
}

/// A typed record with the given name and stage.
pub fn sample_obra(name: &str, stage: &str) -> Obra {
    Obra {
        name: name.to_string(),
        work_type: "Escuelas".to_string(),
        responsible_area: "Ministerio de Educacion".to_string(),
        neighborhood: "Boedo".to_string(),
        district: "Comuna 5".to_string(),
        contract_amount: 1000.0,
        stage: stage.to_string(),
        contracting_type: "Licitacion Publica".to_string(),
        contracting_number: "1/2020".to_string(),
        bidding_company: "Constructora SA".to_string(),
        file_number: "EX-2020-1".to_string(),
        featured: false,
        start_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap().into(),
        initial_end_date: NaiveDate::from_ymd_opt(2021, 1, 1).unwrap().into(),
        funding_source: "GCBA".to_string(),
        progress_percentage: 100.0,
        term_months: 12,
        labor_count: 10,
    }
}

/// Join values into one semicolon-delimited line.
pub fn csv_line<S: AsRef<str>>(values: &[S]) -> String {
    values
        .iter()
        .map(|v| v.as_ref())
        .collect::<Vec<_>>()
        .join(";")
}

/// Write a source file with [`SOURCE_HEADER`] followed by `lines`.
pub fn write_source_csv(dir: &Path, file_name: &str, lines: &[String]) -> PathBuf {
    let path = dir.join(file_name);
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "{}", csv_line(&SOURCE_HEADER)).unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    path
}

/// An in-memory store with the schema in place.
pub fn memory_store() -> SqliteObraStore {
    let mut store = SqliteObraStore::open_in_memory().unwrap();
    store.ensure_schema().unwrap();
    store
}

/// Create test ops over an on-disk database in a temp directory.
///
/// Returns the ops instance and the temp directory (must be kept alive
/// for the duration of the test).
pub fn create_test_ops() -> (DefaultObrasOperations, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let config = StoreConfig::new(temp_dir.path());
    let ops = DefaultObrasOperations::open(&config).unwrap();
    (ops, temp_dir)
}

/// Create test ops over a fault-injecting in-memory store.
pub fn create_faulty_ops() -> ObrasOperations<FaultyStore, DefaultValidator, CsvSource> {
    ObrasOperations::with_defaults(FaultyStore::new(memory_store()))
}
