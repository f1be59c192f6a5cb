//! # timeline-render
//!
//! Turns dashboard query results into timeline chart configuration.
//!
//! This crate provides:
//! - Query adapter: field mapping and row conversion from host results
//! - Visualization config with the default palette
//! - Chart options for an inverted column-range timeline
//! - Text table output for inspecting display records
//!
//! ## Example
//!
//! ```rust,ignore
//! use timeline_render::{QueryResponse, TimelineChart, VisConfig};
//!
//! let response = QueryResponse::from_json_str(&source)?;
//! let rows = response.to_rows()?;
//!
//! let options = TimelineChart::new()
//!     .container(1200, 700)
//!     .build(&rows, &VisConfig::default())?;
//! println!("{}", options.to_json_pretty()?);
//! ```

pub mod chart;
pub mod config;
pub mod format;
pub mod query;
pub mod text;

pub use chart::{Category, ChartOptions, SeriesPoint, TimelineChart};
pub use config::{VisConfig, DEFAULT_COLOR_RANGE};
pub use query::{Cell, Field, FieldMapping, QueryFields, QueryResponse, Row};
pub use text::TableRenderer;

use timeline_core::{build_display_records, DisplayRecord, RenderError};

/// Query result straight to display records.
///
/// Unlike [`TimelineChart::build`], a config without colors is an error here.
pub fn display_records(
    response: &QueryResponse,
    config: &VisConfig,
) -> Result<Vec<DisplayRecord>, RenderError> {
    let rows = response.to_rows()?;
    Ok(build_display_records(&rows, &config.color_range)?)
}
