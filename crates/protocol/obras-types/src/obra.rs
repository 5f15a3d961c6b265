//! Typed obra records.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A date field value.
///
/// Source text that matches no known date format is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ObraDate {
    /// A recognized calendar date.
    Date(NaiveDate),
    /// Unrecognized source text.
    Text(String),
}

impl ObraDate {
    /// The calendar date, if the source was recognized.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            ObraDate::Date(date) => Some(*date),
            ObraDate::Text(_) => None,
        }
    }
}

impl From<NaiveDate> for ObraDate {
    fn from(date: NaiveDate) -> Self {
        ObraDate::Date(date)
    }
}

/// ISO `YYYY-MM-DD` for dates, the source text otherwise.
impl fmt::Display for ObraDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObraDate::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            ObraDate::Text(text) => f.write_str(text),
        }
    }
}

/// A complete obra, with every required field set.
///
/// This is what the loader persists. The `name` is the identity key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obra {
    pub name: String,
    pub work_type: String,
    pub responsible_area: String,
    pub neighborhood: String,
    pub district: String,
    pub contract_amount: f64,
    pub stage: String,
    pub contracting_type: String,
    pub contracting_number: String,
    pub bidding_company: String,
    pub file_number: String,
    pub featured: bool,
    pub start_date: ObraDate,
    pub initial_end_date: ObraDate,
    pub funding_source: String,
    pub progress_percentage: f64,
    pub term_months: i64,
    pub labor_count: i64,
}

/// A hand-entered obra carrying only the values asked for interactively.
///
/// Stored with every other field null, so it does not satisfy the full
/// required-field set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManualObra {
    pub name: String,
    pub work_type: String,
    pub responsible_area: String,
    pub neighborhood: String,
    pub district: String,
    pub contract_amount: f64,
}

impl ManualObra {
    /// Create a manual obra.
    pub fn new(
        name: impl Into<String>,
        work_type: impl Into<String>,
        responsible_area: impl Into<String>,
        neighborhood: impl Into<String>,
        district: impl Into<String>,
        contract_amount: f64,
    ) -> Self {
        Self {
            name: name.into(),
            work_type: work_type.into(),
            responsible_area: responsible_area.into(),
            neighborhood: neighborhood.into(),
            district: district.into(),
            contract_amount,
        }
    }
}
