//! Main ObrasOperations implementation.
//!
//! This module provides the `ObrasOperations` struct that implements the
//! `Operations` trait, sequencing extraction, cleaning, loading and the
//! indicator battery over one owned store handle.

use std::path::Path;

use obras_store::{ObraStore, SqliteObraStore, StoreConfig};
use obras_types::{ManualObra, RawRow};
use obras_valid::{CleanReport, DefaultValidator, Validator};

use crate::config::OpsConfig;
use crate::error::{OpsError, OpsResult};
use crate::extraction::{CsvSource, Extraction, ObraSource};
use crate::indicators::{compute_indicators, IndicatorReport};
use crate::loader::{load_rows, LoadReport};
use crate::ops::{CleanSummary, Operations, PipelineReport};

/// Main operations implementation.
///
/// Generic over:
/// - `S`: the store
/// - `V`: the validator
/// - `X`: the source format
pub struct ObrasOperations<S, V, X>
where
    S: ObraStore,
    V: Validator,
    X: ObraSource,
{
    /// The store, owned for the lifetime of the operations.
    pub store: S,
    /// Cleaning and conversion rules.
    pub validator: V,
    /// Source reader.
    pub source: X,
    /// Operations configuration.
    pub config: OpsConfig,
}

/// Operations over SQLite with the standard rules and CSV input.
pub type DefaultObrasOperations = ObrasOperations<SqliteObraStore, DefaultValidator, CsvSource>;

impl<S, V, X> ObrasOperations<S, V, X>
where
    S: ObraStore,
    V: Validator,
    X: ObraSource,
{
    /// Create operations from their parts.
    pub fn new(store: S, validator: V, source: X, config: OpsConfig) -> Self {
        Self {
            store,
            validator,
            source,
            config,
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: OpsConfig) -> Self {
        self.config = config;
        self
    }
}

impl<S: ObraStore> ObrasOperations<S, DefaultValidator, CsvSource> {
    /// Create operations with the standard rules and CSV input.
    pub fn with_defaults(store: S) -> Self {
        Self::new(store, DefaultValidator::new(), CsvSource::new(), OpsConfig::default())
    }
}

impl DefaultObrasOperations {
    /// Connect to the configured database and ensure its schema.
    pub fn open(config: &StoreConfig) -> OpsResult<Self> {
        Ok(Self::with_defaults(open_store(config)?))
    }

    /// Close the store.
    pub fn close(self) -> OpsResult<()> {
        self.store.close().map_err(OpsError::Store)
    }
}

/// Connect to the configured database and ensure its schema.
///
/// Connection and schema failures are reported separately.
pub fn open_store(config: &StoreConfig) -> OpsResult<SqliteObraStore> {
    let mut store =
        SqliteObraStore::connect(config.database_path()).map_err(OpsError::Connection)?;
    store.ensure_schema().map_err(OpsError::Schema)?;
    Ok(store)
}

impl<S, V, X> Operations for ObrasOperations<S, V, X>
where
    S: ObraStore,
    V: Validator,
    X: ObraSource,
{
    fn ensure_schema(&mut self) -> OpsResult<()> {
        self.store.ensure_schema().map_err(OpsError::Schema)?;
        tracing::info!("Schema ready");
        Ok(())
    }

    fn extract(&self, path: &Path) -> Extraction {
        self.source.extract(path)
    }

    fn clean(&self, rows: Vec<RawRow>) -> CleanReport {
        self.validator.clean(rows)
    }

    fn load(&mut self, rows: &[RawRow]) -> LoadReport {
        load_rows(&mut self.store, &self.validator, rows)
    }

    fn create_obra(&mut self, obra: &ManualObra) -> OpsResult<()> {
        if obra.name.trim().is_empty() {
            return Err(OpsError::EmptyName);
        }
        if self.store.exists_by_name(&obra.name)? {
            return Err(OpsError::DuplicateName(obra.name.clone()));
        }

        self.store
            .insert_manual(obra)
            .map_err(|e| OpsError::insert(&obra.name, e))?;
        tracing::info!(name = %obra.name, "Created obra");
        Ok(())
    }

    fn indicators(&self) -> IndicatorReport {
        compute_indicators(&self.store)
    }

    fn run_pipeline(&mut self, path: &Path) -> PipelineReport {
        let Extraction { rows, failure } = self.extract(path);
        let extracted = rows.len();

        let cleaned = self.clean(rows);
        let clean = CleanSummary::from(&cleaned);

        let load = self.load(&cleaned.rows);

        let indicators = if self.config.compute_indicators {
            Some(self.indicators())
        } else {
            None
        };

        PipelineReport {
            source: path.to_path_buf(),
            extracted,
            extraction_failure: failure,
            clean,
            load,
            indicators,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_ops() -> (DefaultObrasOperations, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config = StoreConfig::new(temp_dir.path());
        let ops = DefaultObrasOperations::open(&config).unwrap();
        (ops, temp_dir)
    }

    fn manual(name: &str) -> ManualObra {
        ManualObra::new(name, "Escuelas", "Educacion", "Boedo", "Comuna 5", 1000.0)
    }

    #[test]
    fn test_open_creates_database() {
        let (ops, temp) = create_test_ops();
        assert!(temp.path().join("obras.db").exists());
        ops.close().unwrap();
    }

    #[test]
    fn test_create_obra() {
        let (mut ops, _temp) = create_test_ops();
        ops.create_obra(&manual("Escuela Nueva")).unwrap();
        assert!(ops.store.exists_by_name("Escuela Nueva").unwrap());
    }

    #[test]
    fn test_create_obra_rejects_duplicate() {
        let (mut ops, _temp) = create_test_ops();
        ops.create_obra(&manual("Repetida")).unwrap();
        let err = ops.create_obra(&manual("Repetida")).unwrap_err();
        assert!(matches!(err, OpsError::DuplicateName(ref name) if name == "Repetida"));
        assert_eq!(ops.store.count_all().unwrap(), 1);
    }

    #[test]
    fn test_create_obra_rejects_empty_name() {
        let (mut ops, _temp) = create_test_ops();
        let err = ops.create_obra(&manual("  ")).unwrap_err();
        assert!(matches!(err, OpsError::EmptyName));
    }

    #[test]
    fn test_pipeline_on_missing_file() {
        let (mut ops, temp) = create_test_ops();
        let report = ops.run_pipeline(&temp.path().join("nada.csv"));

        assert_eq!(report.extracted, 0);
        assert!(matches!(
            report.extraction_failure,
            Some(OpsError::SourceNotFound(_))
        ));
        assert!(report.is_success());
        assert_eq!(report.load.processed(), 0);
        assert_eq!(report.indicators.map(|r| r.indicators.len()), Some(10));
    }

    #[test]
    fn test_pipeline_without_indicators() {
        let (ops, temp) = create_test_ops();
        let mut ops = ops.with_config(OpsConfig::new().with_indicators(false));
        let report = ops.run_pipeline(&temp.path().join("nada.csv"));
        assert!(report.indicators.is_none());
    }

    #[test]
    fn test_open_fails_on_unwritable_path() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("file");
        std::fs::write(&blocker, b"x").unwrap();
        let config = StoreConfig::new(temp.path()).with_database_path(blocker.join("obras.db"));

        let err = open_store(&config).unwrap_err();
        assert!(matches!(err, OpsError::Connection(_)));
    }
}
