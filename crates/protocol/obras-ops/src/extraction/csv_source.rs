//! Semicolon-delimited source reader.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use obras_types::{RawRow, SOURCE_DELIMITER};

use super::ObraSource;
use crate::error::{OpsError, OpsResult};

/// Reads a delimited text file with a header row.
///
/// - Header names are kept verbatim.
/// - An empty field is a null cell.
/// - A record shorter than the header gets null trailing cells.
/// - A record longer than the header is an error.
/// - Input must be valid UTF-8.
#[derive(Debug, Clone, Default)]
pub struct CsvSource;

impl CsvSource {
    /// Create a reader for the semicolon-delimited source format.
    pub fn new() -> Self {
        Self
    }

    /// Read rows from any reader.
    pub fn read<R: Read>(&self, reader: R) -> OpsResult<Vec<RawRow>> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(SOURCE_DELIMITER)
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let mut rows = Vec::new();

        for record in reader.records() {
            let record = record?;
            if record.len() > headers.len() {
                return Err(OpsError::ExtraFields {
                    line: record.position().map(|p| p.line()).unwrap_or(0),
                    expected: headers.len(),
                    found: record.len(),
                });
            }

            let row = RawRow::from_pairs(
                headers
                    .iter()
                    .enumerate()
                    .map(|(i, column)| (column, record.get(i).unwrap_or(""))),
            );
            rows.push(row);
        }

        Ok(rows)
    }
}

impl ObraSource for CsvSource {
    fn try_extract(&self, path: &Path) -> OpsResult<Vec<RawRow>> {
        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => OpsError::SourceNotFound(path.to_path_buf()),
            _ => OpsError::Io(e),
        })?;
        self.read(file)
    }
}
