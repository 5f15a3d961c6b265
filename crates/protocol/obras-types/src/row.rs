//! Untyped rows as produced by an extractor.
//!
//! A [`RawRow`] maps column names, verbatim from the source header, to
//! [`Cell`] values. Empty source values are [`Cell::Null`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::field::Field;

/// A single raw value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// Missing or empty value.
    Null,
    /// Boolean produced by normalization.
    Bool(bool),
    /// Source text.
    Text(String),
}

impl Cell {
    /// Returns true for a missing or empty value.
    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    /// Text content, if this is a text cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            Cell::Null
        } else {
            Cell::Text(value.to_string())
        }
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        if value.is_empty() {
            Cell::Null
        } else {
            Cell::Text(value)
        }
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Cell::Bool(value)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Cell::Null)
    }
}

/// One source row: column name to value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRow {
    cells: BTreeMap<String, Cell>,
}

impl RawRow {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a row from `(column, value)` pairs.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<Cell>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            cells: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Set a column, replacing any previous value.
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<Cell>) {
        self.cells.insert(column.into(), value.into());
    }

    /// Builder form of [`RawRow::set`].
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Cell>) -> Self {
        self.set(column, value);
        self
    }

    /// Remove a column, returning its value.
    pub fn remove(&mut self, column: &str) -> Option<Cell> {
        self.cells.remove(column)
    }

    /// Value of a column, if the column is present.
    pub fn get(&self, column: &str) -> Option<&Cell> {
        self.cells.get(column)
    }

    /// Value of a field's canonical column.
    pub fn field(&self, field: Field) -> Option<&Cell> {
        self.get(field.column())
    }

    /// Text of a column, if present and textual.
    pub fn text(&self, column: &str) -> Option<&str> {
        self.get(column).and_then(Cell::as_text)
    }

    /// Returns true if the column is present (possibly null).
    pub fn contains(&self, column: &str) -> bool {
        self.cells.contains_key(column)
    }

    /// Returns true if the field's column is present and non-null.
    pub fn has_value(&self, field: Field) -> bool {
        self.field(field).is_some_and(|c| !c.is_null())
    }

    /// Returns true if every cell is null (or the row has no cells).
    pub fn is_blank(&self) -> bool {
        self.cells.values().all(Cell::is_null)
    }

    /// Column names in this row.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if the row has no columns.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
