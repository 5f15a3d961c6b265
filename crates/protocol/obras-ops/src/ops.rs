//! Operations trait definition.
//!
//! This module defines the `Operations` trait that provides the pipeline
//! interface: extract, clean, load, single-record creation and indicators.

use std::path::{Path, PathBuf};

use obras_types::{ManualObra, RawRow};
use obras_valid::{CleanReport, ValidationError};

use crate::error::{OpsError, OpsResult};
use crate::extraction::Extraction;
use crate::indicators::IndicatorReport;
use crate::loader::LoadReport;

/// Row counts of a cleaning pass, without the rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanSummary {
    /// Rows kept.
    pub kept: usize,
    /// Rows dropped because every value was empty.
    pub blank_dropped: usize,
    /// Rows dropped because a required field was missing.
    pub incomplete_dropped: usize,
    /// Set when cleaning was skipped and the raw rows were passed on.
    pub fallback: Option<ValidationError>,
}

impl From<&CleanReport> for CleanSummary {
    fn from(report: &CleanReport) -> Self {
        Self {
            kept: report.kept(),
            blank_dropped: report.blank_dropped,
            incomplete_dropped: report.incomplete_dropped,
            fallback: report.fallback.clone(),
        }
    }
}

/// Everything one pipeline run did.
#[derive(Debug)]
pub struct PipelineReport {
    /// Source that was read.
    pub source: PathBuf,
    /// Rows produced by extraction.
    pub extracted: usize,
    /// Why extraction produced nothing, if it failed.
    pub extraction_failure: Option<OpsError>,
    /// Cleaning counts.
    pub clean: CleanSummary,
    /// Load counts and outcome.
    pub load: LoadReport,
    /// Indicators, unless disabled.
    pub indicators: Option<IndicatorReport>,
}

impl PipelineReport {
    /// Returns true unless the load batch was aborted.
    pub fn is_success(&self) -> bool {
        self.load.is_success()
    }
}

/// Main operations trait for the obras pipeline.
///
/// Steps run sequentially and each one reports instead of failing, except
/// schema setup and single-record creation.
pub trait Operations {
    /// Create the store schema if it is missing.
    fn ensure_schema(&mut self) -> OpsResult<()>;

    /// Read raw rows from a source. Failures yield zero rows.
    fn extract(&self, path: &Path) -> Extraction;

    /// Normalize and filter raw rows.
    fn clean(&self, rows: Vec<RawRow>) -> CleanReport;

    /// Insert rows whose names are not stored yet.
    fn load(&mut self, rows: &[RawRow]) -> LoadReport;

    /// Insert one hand-entered record.
    ///
    /// Rejects an empty name and a name that already exists.
    fn create_obra(&mut self, obra: &ManualObra) -> OpsResult<()>;

    /// Run the indicator battery over the stored records.
    fn indicators(&self) -> IndicatorReport;

    /// Extract, clean, load and, if enabled, compute indicators.
    fn run_pipeline(&mut self, path: &Path) -> PipelineReport;
}
