//! # timeline-core
//!
//! Core row model and display transform for the timeline-viz chart pipeline.
//!
//! This crate provides:
//! - Domain types: `RawRow`, `DisplayRecord`, `Color`, `Extents`
//! - The row transform: label deduplication and deterministic palette colors
//! - Boundary validation and axis extents
//! - The `Renderer` trait implemented by output backends
//! - Error types
//!
//! ## Example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use timeline_core::{build_display_records, Color, RawRow};
//!
//! let rows = vec![
//!     RawRow::new(
//!         "Alpha",
//!         Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
//!         Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap(),
//!         3.0,
//!     ),
//!     RawRow::new(
//!         "Alpha",
//!         Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap(),
//!         Utc.with_ymd_and_hms(2024, 2, 10, 0, 0, 0).unwrap(),
//!         7.0,
//!     ),
//! ];
//! let palette = vec![Color::new("#111"), Color::new("#222")];
//!
//! let records = build_display_records(&rows, &palette).unwrap();
//! assert_eq!(records[0].label, "Alpha");
//! assert_eq!(records[1].label, "Alpha (2)");
//! assert_eq!(records[1].original_label, "Alpha");
//! ```

pub mod extents;
pub mod transform;

pub use extents::{compute_extents, validate_rows, Extents};
pub use transform::{
    build_display_records, color_for, decimal_hash, deduplicate_labels, find_label_collisions,
    seed_key, Enumerated,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// ============================================================================
// Type Aliases
// ============================================================================

/// Interval bound as delivered by the host (always normalized to UTC)
pub type Instant = DateTime<Utc>;

// ============================================================================
// Color
// ============================================================================

/// A CSS color string taken verbatim from the palette (`#62bad4`, `rgb(...)`)
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Color {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Color {
    fn from(value: String) -> Self {
        Self(value)
    }
}

// ============================================================================
// Rows
// ============================================================================

/// One input row: a category label, an interval, and a measure
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawRow {
    /// Category name (not unique across rows)
    pub label: String,
    /// Interval start
    pub start: Instant,
    /// Interval end
    pub end: Instant,
    /// Magnitude shown in the tooltip
    pub value: f64,
}

impl RawRow {
    pub fn new(label: impl Into<String>, start: Instant, end: Instant, value: f64) -> Self {
        Self {
            label: label.into(),
            start,
            end,
            value,
        }
    }
}

/// A display-ready interval: deduplicated label plus its palette color
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DisplayRecord {
    /// Label with an occurrence suffix on repeats, e.g. `Foo (2)`
    pub label: String,
    /// The label exactly as it arrived
    pub original_label: String,
    pub start: Instant,
    pub end: Instant,
    pub value: f64,
    pub color: Color,
}

impl DisplayRecord {
    /// Whether the label carries an occurrence suffix
    pub fn is_repeat(&self) -> bool {
        self.label != self.original_label
    }
}

// ============================================================================
// Traits
// ============================================================================

/// Output rendering
pub trait Renderer {
    type Output;

    /// Render display records; `extents` covers the raw rows they came from
    fn render(
        &self,
        records: &[DisplayRecord],
        extents: Option<Extents>,
    ) -> Result<Self::Output, RenderError>;
}

// ============================================================================
// Errors
// ============================================================================

/// Transform error
#[derive(Debug, Error, PartialEq)]
pub enum TimelineError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Rendering error
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error(transparent)]
    Timeline(#[from] TimelineError),
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(year: i32, month: u32, day: u32) -> Instant {
        Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
    }

    #[test]
    fn color_serializes_as_plain_string() {
        let color = Color::new("#62bad4");
        assert_eq!(serde_json::to_string(&color).unwrap(), "\"#62bad4\"");
        let back: Color = serde_json::from_str("\"#1f3e5a\"").unwrap();
        assert_eq!(back.as_str(), "#1f3e5a");
        assert_eq!(back.to_string(), "#1f3e5a");
    }

    #[test]
    fn raw_row_new() {
        let row = RawRow::new("Build", at(2024, 1, 1), at(2024, 1, 5), 3.0);
        assert_eq!(row.label, "Build");
        assert_eq!(row.end, at(2024, 1, 5));
    }

    #[test]
    fn display_record_repeat_flag() {
        let record = DisplayRecord {
            label: "Build (2)".into(),
            original_label: "Build".into(),
            start: at(2024, 1, 1),
            end: at(2024, 1, 2),
            value: 1.0,
            color: "#111".into(),
        };
        assert!(record.is_repeat());

        let first = DisplayRecord {
            label: "Build".into(),
            ..record
        };
        assert!(!first.is_repeat());
    }

    #[test]
    fn error_message() {
        let err = TimelineError::InvalidArgument("palette is empty".into());
        assert_eq!(err.to_string(), "Invalid argument: palette is empty");

        let wrapped = RenderError::from(err);
        assert_eq!(wrapped.to_string(), "Invalid argument: palette is empty");
    }
}
