//! Source extraction module.
//!
//! This module turns a source file into an ordered sequence of raw rows.
//!
//! # Design
//!
//! The module uses a trait-based design (`ObraSource`) so new source
//! formats can be added without touching the pipeline:
//!
//! - `CsvSource`: semicolon-delimited text with a header row

mod csv_source;

pub use csv_source::CsvSource;

use std::path::Path;

use obras_types::RawRow;

use crate::error::{OpsError, OpsResult};

/// Rows produced by an extraction attempt.
///
/// Extraction never fails past this point: a failed attempt yields no
/// rows and records the failure.
#[derive(Debug, Default)]
pub struct Extraction {
    /// Rows in source order.
    pub rows: Vec<RawRow>,
    /// Why extraction produced nothing, if it failed.
    pub failure: Option<OpsError>,
}

impl Extraction {
    /// Returns true if the source was read successfully.
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }
}

/// Trait for reading raw rows from a source.
pub trait ObraSource {
    /// Read every row from `path`, preserving order and column names.
    fn try_extract(&self, path: &Path) -> OpsResult<Vec<RawRow>>;

    /// Read every row from `path`, turning any failure into zero rows.
    fn extract(&self, path: &Path) -> Extraction {
        match self.try_extract(path) {
            Ok(rows) => {
                tracing::info!(
                    path = %path.display(),
                    rows = rows.len(),
                    "Extracted rows"
                );
                Extraction {
                    rows,
                    failure: None,
                }
            }
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "Extraction failed, continuing with no rows"
                );
                Extraction {
                    rows: Vec::new(),
                    failure: Some(err),
                }
            }
        }
    }
}
