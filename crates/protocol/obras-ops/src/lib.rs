//! Pipeline operations for obras records.
//!
//! This crate provides the orchestration layer that combines the foundation
//! crates (types, store, valid) into the ingestion pipeline:
//!
//! ```text
//! source file -> extract -> clean -> load -> store -> indicators -> report
//! ```
//!
//! # Module Organization
//!
//! - [`error`] - Operation error types
//! - [`config`] - Operations configuration
//! - [`extraction`] - Source trait and the CSV reader
//! - [`loader`] - Deduplicating loader
//! - [`indicators`] - The fixed indicator battery
//! - [`ops`] - Main Operations trait definition
//! - [`obras_ops`] - ObrasOperations implementation
//!
//! # Example
//!
//! ```no_run
//! use obras_ops::{DefaultObrasOperations, Operations};
//! use obras_store::StoreConfig;
//! use std::path::Path;
//!
//! let config = StoreConfig::new("/tmp/obras");
//! let mut ops = DefaultObrasOperations::open(&config).expect("open store");
//!
//! let report = ops.run_pipeline(Path::new("observatorio-de-obras-urbanas.csv"));
//! println!("inserted {} obras", report.load.inserted);
//!
//! ops.close().expect("close store");
//! ```
//!
//! # Failure Boundaries
//!
//! - Extraction failures yield zero rows and are reported.
//! - Cleaning never fails; if it cannot run, the raw rows pass through.
//! - A conversion or insert failure aborts the rest of the load batch.
//! - Each indicator fails on its own without affecting the others.
//!
//! # Design Notes
//!
//! `ObrasOperations` is generic over the store, the `Validator` and the
//! `ObraSource`, so tests can swap in a fault-injecting store and new
//! source formats plug in without touching the sequencing.

pub mod config;
pub mod error;
pub mod extraction;
pub mod indicators;
pub mod loader;
pub mod obras_ops;
pub mod ops;

// Error types
pub use error::{OpsError, OpsResult};

// Configuration
pub use config::OpsConfig;

// Extraction
pub use extraction::{CsvSource, Extraction, ObraSource};

// Pipeline steps
pub use indicators::{
    compute_indicator, compute_indicators, finished_percentage, Indicator, IndicatorKind,
    IndicatorReport, IndicatorValue,
};
pub use loader::{load_rows, LoadReport};

// Operations trait and implementation
pub use obras_ops::{open_store, DefaultObrasOperations, ObrasOperations};
pub use ops::{CleanSummary, Operations, PipelineReport};

#[cfg(test)]
mod tests {
    use super::*;
    use obras_store::{ObraStore, StoreConfig};
    use std::io::Write;
    use tempfile::TempDir;

    const HEADER: &str = "nombre;tipo;area;barrio;comuna;monto_contrato;etapa;contratacion_tipo;nro_contratacion;licitacion_oferta_empresa;expediente-numero;destacada;fecha_inicio;fecha_fin_inicial;financiamiento;porcentaje_avance;plazo_meses;mano_obra";

    fn line(name: &str, area: &str, stage: &str) -> String {
        format!(
            "{name};Espacio Verde;{area};Palermo;Comuna 14;1000;{stage};Licitacion Publica;1/2020;Constructora SA;EX-1;SI;2020-01-01;2020-12-31;GCBA;100;12;5"
        )
    }

    /// Integration test: the full pipeline over a real file
    #[test]
    fn test_full_pipeline() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("obras.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "{}", HEADER).unwrap();
        writeln!(file, "{}", line("Plaza Norte", "Espacio Publico", "Finalizada")).unwrap();
        writeln!(file, "{}", line("Sin Area", "", "Finalizada")).unwrap();
        writeln!(file, ";;;;;;;;;;;;;;;;;").unwrap();
        writeln!(file, "{}", line("Parque Sur", "Espacio Publico", "En curso")).unwrap();
        drop(file);

        let config = StoreConfig::new(temp.path());
        let mut ops = DefaultObrasOperations::open(&config).unwrap();
        let report = ops.run_pipeline(&path);

        assert!(report.extraction_failure.is_none());
        assert_eq!(report.extracted, 4);
        assert_eq!(report.clean.kept, 2);
        assert_eq!(report.clean.blank_dropped, 1);
        assert_eq!(report.clean.incomplete_dropped, 1);
        assert!(report.is_success());
        assert_eq!(report.load.inserted, 2);

        let indicators = report.indicators.unwrap();
        assert_eq!(
            indicators.value(IndicatorKind::FinishedPercentage),
            Some(&IndicatorValue::Percentage(50.0))
        );
        assert_eq!(
            indicators.value(IndicatorKind::TotalLabor),
            Some(&IndicatorValue::Total(10))
        );

        // Running again skips every row.
        let again = ops.run_pipeline(&path);
        assert_eq!(again.load.inserted, 0);
        assert_eq!(again.load.duplicates, 2);
        assert_eq!(ops.store.count_all().unwrap(), 2);
        ops.close().unwrap();
    }
}
