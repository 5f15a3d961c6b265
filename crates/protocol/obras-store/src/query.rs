//! Query building blocks for aggregate store operations.
//!
//! A [`Predicate`] is rendered to a SQL `WHERE` fragment with positional
//! parameters. Column names only ever come from the fixed [`Field`]
//! catalogue, never from caller-supplied strings.

use rusqlite::types::{ToSql, ToSqlOutput};
use serde::Serialize;

use obras_types::Field;

/// A literal compared against a column.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Integer(i64),
    Real(f64),
    Bool(bool),
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Real(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self {
            Value::Text(s) => s.to_sql(),
            Value::Integer(i) => i.to_sql(),
            Value::Real(r) => r.to_sql(),
            Value::Bool(b) => b.to_sql(),
        }
    }
}

/// Row filter for aggregate queries.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Every row.
    All,
    /// `field = value`.
    Eq(Field, Value),
    /// `field IN (values...)`. An empty list matches nothing.
    In(Field, Vec<Value>),
    /// `field <= value`.
    AtMost(Field, Value),
    /// Conjunction of predicates. An empty list matches every row.
    And(Vec<Predicate>),
}

impl Predicate {
    /// `field = value`.
    pub fn eq(field: Field, value: impl Into<Value>) -> Self {
        Predicate::Eq(field, value.into())
    }

    /// `field IN (values...)`.
    pub fn one_of<V: Into<Value>>(field: Field, values: impl IntoIterator<Item = V>) -> Self {
        Predicate::In(field, values.into_iter().map(Into::into).collect())
    }

    /// `field <= value`.
    pub fn at_most(field: Field, value: impl Into<Value>) -> Self {
        Predicate::AtMost(field, value.into())
    }

    /// Combine with another predicate.
    pub fn and(self, other: Predicate) -> Self {
        match self {
            Predicate::All => other,
            Predicate::And(mut parts) => {
                parts.push(other);
                Predicate::And(parts)
            }
            first => Predicate::And(vec![first, other]),
        }
    }

    /// Render to a SQL boolean expression, appending bound values to `params`.
    pub fn to_sql(&self, params: &mut Vec<Value>) -> String {
        match self {
            Predicate::All => "1 = 1".to_string(),
            Predicate::Eq(field, value) => {
                params.push(value.clone());
                format!("{} = ?", field.column())
            }
            Predicate::In(_, values) if values.is_empty() => "1 = 0".to_string(),
            Predicate::In(field, values) => {
                params.extend(values.iter().cloned());
                let placeholders = vec!["?"; values.len()].join(", ");
                format!("{} IN ({})", field.column(), placeholders)
            }
            Predicate::AtMost(field, value) => {
                params.push(value.clone());
                format!("{} <= ?", field.column())
            }
            Predicate::And(parts) if parts.is_empty() => "1 = 1".to_string(),
            Predicate::And(parts) => parts
                .iter()
                .map(|p| format!("({})", p.to_sql(params)))
                .collect::<Vec<_>>()
                .join(" AND "),
        }
    }
}

/// Row count paired with a sum over the same rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CountSum {
    pub count: u64,
    pub sum: f64,
}

impl CountSum {
    /// Create a count/sum pair.
    pub fn new(count: u64, sum: f64) -> Self {
        Self { count, sum }
    }
}
