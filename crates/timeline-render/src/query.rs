//! Host query results to raw rows
//!
//! The host describes its result columns in `fields` and sends one map per
//! row keyed by field name. A timeline query has one label dimension, one
//! measure, and a start/end date pair that sits either among the dimensions
//! or among the measures, depending on how the query was built:
//!
//! | `dimension_like` | `measure_like` | start / end |
//! |------------------|----------------|-------------|
//! | 3 fields | any | `dimension_like[1]`, `dimension_like[2]` |
//! | not 3 | 3 fields | `measure_like[1]`, `measure_like[2]` |
//!
//! Dates are parsed here, at the boundary, and the resulting rows are checked
//! with [`validate_rows`] before they reach the transform.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use timeline_core::{validate_rows, Instant, RawRow, RenderError};
use tracing::debug;

/// Column description
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Field {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: None,
        }
    }
}

/// Result columns split the way the host groups them
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryFields {
    #[serde(default)]
    pub dimension_like: Vec<Field>,
    #[serde(default)]
    pub measure_like: Vec<Field>,
}

/// One cell of a result row
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rendered: Option<String>,
}

/// A result row keyed by field name
pub type Row = HashMap<String, Cell>;

/// A full query result: schema plus data
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct QueryResponse {
    pub fields: QueryFields,
    #[serde(default)]
    pub data: Vec<Row>,
}

impl QueryResponse {
    pub fn from_json_str(source: &str) -> Result<Self, RenderError> {
        serde_json::from_str(source)
            .map_err(|e| RenderError::Format(format!("invalid query response: {}", e)))
    }

    /// Resolve the field mapping and convert every row
    pub fn to_rows(&self) -> Result<Vec<RawRow>, RenderError> {
        let mapping = FieldMapping::resolve(&self.fields)?;
        rows_from_query(&self.data, &mapping)
    }
}

/// Which field feeds each part of a row
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldMapping {
    pub dimension: String,
    pub start: String,
    pub end: String,
    pub measure: String,
}

impl FieldMapping {
    pub fn resolve(fields: &QueryFields) -> Result<Self, RenderError> {
        let dimension = fields
            .dimension_like
            .first()
            .ok_or_else(|| RenderError::InvalidData("query has no dimension".into()))?;
        let measure = fields
            .measure_like
            .first()
            .ok_or_else(|| RenderError::InvalidData("query has no measure".into()))?;

        let dates = if fields.dimension_like.len() == 3 {
            &fields.dimension_like[1..3]
        } else if fields.measure_like.len() == 3 {
            &fields.measure_like[1..3]
        } else {
            return Err(RenderError::InvalidData(format!(
                "expected a start and end date as the 2nd and 3rd dimension or measure, \
                 got {} dimensions and {} measures",
                fields.dimension_like.len(),
                fields.measure_like.len()
            )));
        };

        let mapping = Self {
            dimension: dimension.name.clone(),
            start: dates[0].name.clone(),
            end: dates[1].name.clone(),
            measure: measure.name.clone(),
        };
        debug!(
            dimension = %mapping.dimension,
            start = %mapping.start,
            end = %mapping.end,
            measure = %mapping.measure,
            "resolved field mapping"
        );
        Ok(mapping)
    }
}

/// Convert result rows, failing on the first row that cannot be read
pub fn rows_from_query(data: &[Row], mapping: &FieldMapping) -> Result<Vec<RawRow>, RenderError> {
    let rows = data
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let cell = |key: &str| {
                row.get(key).map(|c| &c.value).ok_or_else(|| {
                    RenderError::InvalidData(format!("row {}: field '{}' is missing", i, key))
                })
            };

            let label = label_text(cell(&mapping.dimension)?);
            let start = parse_instant(cell(&mapping.start)?).ok_or_else(|| {
                RenderError::InvalidData(format!("row {}: unreadable start date", i))
            })?;
            let end = parse_instant(cell(&mapping.end)?).ok_or_else(|| {
                RenderError::InvalidData(format!("row {}: unreadable end date", i))
            })?;
            let value = parse_measure(cell(&mapping.measure)?).ok_or_else(|| {
                RenderError::InvalidData(format!("row {}: measure is not numeric", i))
            })?;

            Ok(RawRow::new(label, start, end, value))
        })
        .collect::<Result<Vec<_>, RenderError>>()?;

    validate_rows(&rows)?;
    Ok(rows)
}

/// Text of a dimension value: strings verbatim, anything else as JSON text
pub fn label_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Read a date cell.
///
/// Accepts epoch milliseconds, RFC 3339, `YYYY-MM-DD[ T]HH:MM[:SS[.fff]]`,
/// `YYYY-MM-DD` and `YYYY-MM`. Values without an offset are taken as UTC.
pub fn parse_instant(value: &Value) -> Option<Instant> {
    match value {
        Value::Number(n) => {
            let millis = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?;
            DateTime::from_timestamp_millis(millis)
        }
        Value::String(s) => parse_instant_str(s.trim()),
        _ => None,
    }
}

fn parse_instant_str(s: &str) -> Option<Instant> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    const DATETIME_FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ];
    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }

    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d"))
        .ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc())
}

/// Read a measure cell; `null` counts as zero
pub fn parse_measure(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        Value::Null => Some(0.0),
        _ => None,
    }
}
