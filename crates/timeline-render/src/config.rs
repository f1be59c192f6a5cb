//! Visualization settings supplied by the dashboard host
//!
//! The host sends these as JSON with each update; the CLI reads the same
//! shape from a TOML file:
//!
//! ```toml
//! color_range = ["#62bad4", "#a9c574", "#929292"]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use timeline_core::{Color, RenderError};

/// Palette offered by the host when the user has not picked one
pub const DEFAULT_COLOR_RANGE: [&str; 12] = [
    "#62bad4", "#a9c574", "#929292", "#9fdee0", "#1f3e5a", "#90c8ae", "#92818d", "#c5c6a6",
    "#82c2ca", "#cee0a0", "#928fb4", "#9fc190",
];

fn default_color_range() -> Vec<Color> {
    DEFAULT_COLOR_RANGE.iter().map(|c| Color::new(*c)).collect()
}

/// User-facing options of the timeline visualization
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VisConfig {
    /// Palette rows are colored from. Empty means the host has not sent one
    /// yet and the chart is drawn without data.
    #[serde(default = "default_color_range")]
    pub color_range: Vec<Color>,
}

impl Default for VisConfig {
    fn default() -> Self {
        Self {
            color_range: default_color_range(),
        }
    }
}

impl VisConfig {
    pub fn new(color_range: Vec<Color>) -> Self {
        Self { color_range }
    }

    /// Whether a palette is available to color rows with
    pub fn is_ready(&self) -> bool {
        !self.color_range.is_empty()
    }

    pub fn from_toml_str(source: &str) -> Result<Self, RenderError> {
        toml::from_str(source).map_err(|e| RenderError::Format(format!("invalid TOML config: {}", e)))
    }

    pub fn from_json_str(source: &str) -> Result<Self, RenderError> {
        serde_json::from_str(source)
            .map_err(|e| RenderError::Format(format!("invalid JSON config: {}", e)))
    }

    /// Load from a file, picking the parser by extension (`.json`, else TOML)
    pub fn load(path: &Path) -> Result<Self, RenderError> {
        let source = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&source),
            _ => Self::from_toml_str(&source),
        }
    }
}
