//! Conversion of cleaned rows into typed [`Obra`] records.
//!
//! Numbers accept a leading `$`, a trailing `%`, and either `.` or `,` as
//! decimal separator. When both appear, the last one is the decimal
//! separator and the other groups thousands. Integers accept a zero
//! fraction (`"12.0"`). Dates accept ISO, day-first and slash-separated
//! forms, with or without a time part; any other date text is kept as is.

use chrono::{NaiveDate, NaiveDateTime};
use obras_types::{Cell, Field, Obra, ObraDate, RawRow};

use crate::clean::is_featured;
use crate::error::{ValidationError, ValidationResult};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d", "%d-%m-%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%d/%m/%Y %H:%M"];

/// Convert a cleaned row into an [`Obra`].
///
/// Fails on the first field that is missing or whose number does not parse.
pub fn obra_from_row(row: &RawRow) -> ValidationResult<Obra> {
    Ok(Obra {
        name: text(row, Field::Name)?,
        work_type: text(row, Field::WorkType)?,
        responsible_area: text(row, Field::ResponsibleArea)?,
        neighborhood: text(row, Field::Neighborhood)?,
        district: text(row, Field::District)?,
        contract_amount: decimal(row, Field::ContractAmount)?,
        stage: text(row, Field::Stage)?,
        contracting_type: text(row, Field::ContractingType)?,
        contracting_number: text(row, Field::ContractingNumber)?,
        bidding_company: text(row, Field::BiddingCompany)?,
        file_number: text(row, Field::FileNumber)?,
        featured: featured(row)?,
        start_date: date(row, Field::StartDate)?,
        initial_end_date: date(row, Field::InitialEndDate)?,
        funding_source: text(row, Field::FundingSource)?,
        progress_percentage: decimal(row, Field::ProgressPercentage)?,
        term_months: integer(row, Field::TermMonths)?,
        labor_count: integer(row, Field::LaborCount)?,
    })
}

fn required(row: &RawRow, field: Field) -> ValidationResult<&Cell> {
    match row.field(field) {
        Some(cell) if !cell.is_null() => Ok(cell),
        _ => Err(ValidationError::MissingField(field)),
    }
}

fn raw_text(row: &RawRow, field: Field) -> ValidationResult<&str> {
    match required(row, field)? {
        Cell::Text(value) => Ok(value),
        Cell::Bool(flag) => Err(ValidationError::InvalidNumber {
            field,
            value: flag.to_string(),
        }),
        Cell::Null => Err(ValidationError::MissingField(field)),
    }
}

fn text(row: &RawRow, field: Field) -> ValidationResult<String> {
    match required(row, field)? {
        Cell::Text(value) => Ok(value.clone()),
        Cell::Bool(flag) => Ok(flag.to_string()),
        Cell::Null => Err(ValidationError::MissingField(field)),
    }
}

fn decimal(row: &RawRow, field: Field) -> ValidationResult<f64> {
    let value = raw_text(row, field)?;
    parse_decimal(value).ok_or_else(|| ValidationError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

fn integer(row: &RawRow, field: Field) -> ValidationResult<i64> {
    let value = raw_text(row, field)?;
    parse_integer(value).ok_or_else(|| ValidationError::InvalidInteger {
        field,
        value: value.to_string(),
    })
}

fn date(row: &RawRow, field: Field) -> ValidationResult<ObraDate> {
    let value = raw_text(row, field)?;
    Ok(match parse_date(value) {
        Some(date) => ObraDate::Date(date),
        None => {
            tracing::debug!(%field, value, "Keeping unrecognized date text");
            ObraDate::Text(value.to_string())
        }
    })
}

fn featured(row: &RawRow) -> ValidationResult<bool> {
    let cell = required(row, Field::Featured)?;
    Ok(is_featured(Some(cell)))
}

/// Parse a decimal amount.
pub fn parse_decimal(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    let trimmed = trimmed.strip_prefix('$').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
    if trimmed.is_empty() {
        return None;
    }

    let last_dot = trimmed.rfind('.');
    let last_comma = trimmed.rfind(',');
    let normalized = match (last_dot, last_comma) {
        (Some(dot), Some(comma)) if dot > comma => trimmed.replace(',', ""),
        (Some(_), Some(_)) => trimmed.replace('.', "").replace(',', "."),
        (None, Some(_)) => {
            if trimmed.matches(',').count() == 1 {
                trimmed.replace(',', ".")
            } else {
                trimmed.replace(',', "")
            }
        }
        (Some(_), None) if trimmed.matches('.').count() > 1 => trimmed.replace('.', ""),
        _ => trimmed.to_string(),
    };

    normalized.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Parse an integer, accepting a zero fractional part.
pub fn parse_integer(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if let Ok(n) = trimmed.parse::<i64>() {
        return Some(n);
    }
    let n = parse_decimal(trimmed)?;
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        Some(n as i64)
    } else {
        None
    }
}

/// Parse a calendar date.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
                .map(|dt| dt.date())
        })
}
