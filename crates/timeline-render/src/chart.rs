//! Timeline chart configuration
//!
//! Builds the declarative options object for an inverted `columnrange`
//! chart: one horizontal bar per display record on a category axis, a
//! datetime value axis spanning the data, and a dashed reference line at
//! the current time. Keys serialize in the camelCase the charting library
//! reads.
//!
//! Sizing follows the host container:
//! - chart box is the container minus a 10px/50px margin
//! - the plot keeps 100px for axes and labels
//! - only as many rows as fit at `min_item_height` are shown at once; the
//!   category axis scrolls through the rest

use chrono::Utc;
use serde::Serialize;
use timeline_core::{
    build_display_records, compute_extents, find_label_collisions, Color, DisplayRecord, Extents,
    Instant, RawRow, RenderError, Renderer,
};
use tracing::{debug, warn};

use crate::config::VisConfig;
use crate::format::{format_long_date, tooltip_text};

const WIDTH_MARGIN: u32 = 10;
const HEIGHT_MARGIN: u32 = 50;
const AXIS_RESERVE: f64 = 100.0;
const MIN_POINT_WIDTH: f64 = 15.0;
const TODAY_LINE_COLOR: &str = "rgb(102 102 102 / 60%)";

/// Timeline chart builder
#[derive(Clone, Debug)]
pub struct TimelineChart {
    /// Host container width in pixels
    pub container_width: u32,
    /// Host container height in pixels
    pub container_height: u32,
    /// Smallest row height before the category axis starts scrolling
    pub min_item_height: u32,
    /// Reference line position (current time when unset)
    pub today: Option<Instant>,
}

impl Default for TimelineChart {
    fn default() -> Self {
        Self {
            container_width: 800,
            container_height: 600,
            min_item_height: 30,
            today: None,
        }
    }
}

impl TimelineChart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Size of the host container
    pub fn container(mut self, width: u32, height: u32) -> Self {
        self.container_width = width;
        self.container_height = height;
        self
    }

    pub fn min_item_height(mut self, height: u32) -> Self {
        self.min_item_height = height.max(1);
        self
    }

    /// Pin the reference line instead of reading the clock
    pub fn today(mut self, today: Instant) -> Self {
        self.today = Some(today);
        self
    }

    /// Chart box width
    pub fn chart_width(&self) -> u32 {
        self.container_width.saturating_sub(WIDTH_MARGIN)
    }

    /// Chart box height
    pub fn chart_height(&self) -> u32 {
        self.container_height.saturating_sub(HEIGHT_MARGIN)
    }

    /// Height left for bars once axes are drawn (never negative)
    pub fn plot_height(&self) -> f64 {
        (self.chart_height() as f64 - AXIS_RESERVE).max(0.0)
    }

    /// How many rows are visible without scrolling
    pub fn items_in_view(&self, count: usize) -> usize {
        let plot_height = self.plot_height();
        let min_item_height = self.min_item_height.max(1) as f64;
        if plot_height > min_item_height * count as f64 {
            count
        } else {
            (plot_height / min_item_height).floor() as usize
        }
    }

    /// Bar thickness: half a row's share of the plot, at least 15px
    pub fn point_width(&self, items_in_view: usize) -> f64 {
        if items_in_view == 0 {
            return MIN_POINT_WIDTH;
        }
        (self.plot_height() / (items_in_view as f64 * 2.0)).max(MIN_POINT_WIDTH)
    }

    /// Run the full pipeline: color and deduplicate `rows`, then lay out.
    ///
    /// Without a palette the chart is still produced, with an empty series.
    pub fn build(&self, rows: &[RawRow], config: &VisConfig) -> Result<ChartOptions, RenderError> {
        let extents = compute_extents(rows);

        let records = if config.is_ready() {
            let records = build_display_records(rows, &config.color_range)?;
            let collisions = find_label_collisions(&records);
            if !collisions.is_empty() {
                warn!(labels = ?collisions, "deduplicated labels collide with raw labels");
            }
            records
        } else {
            warn!("no color range configured; rendering without data");
            Vec::new()
        };

        self.render(&records, extents)
    }

    fn today_line(&self) -> PlotLine {
        let today = self.today.unwrap_or_else(Utc::now);
        PlotLine {
            value: today.timestamp_millis(),
            color: TODAY_LINE_COLOR.into(),
            dash_style: "shortdash".into(),
            z_index: 10,
            width: 1,
            label: PlotLineLabel {
                text: format_long_date(today.date_naive()),
                style: LabelStyle {
                    font_size: 11,
                    color: TODAY_LINE_COLOR.into(),
                    font_style: "italic".into(),
                },
            },
        }
    }
}

impl Renderer for TimelineChart {
    type Output = ChartOptions;

    fn render(
        &self,
        records: &[DisplayRecord],
        extents: Option<Extents>,
    ) -> Result<ChartOptions, RenderError> {
        let width = self.chart_width();
        let height = self.chart_height();
        let items_in_view = self.items_in_view(records.len());
        let point_width = self.point_width(items_in_view);

        debug!(
            records = records.len(),
            repeats = records.iter().filter(|r| r.is_repeat()).count(),
            items_in_view,
            point_width,
            "laying out timeline chart"
        );

        let data = records
            .iter()
            .enumerate()
            .map(|(x, r)| SeriesPoint {
                x,
                name: r.label.clone(),
                original_name: r.original_label.clone(),
                low: r.start.timestamp_millis(),
                high: r.end.timestamp_millis(),
                value: r.value,
                color: r.color.clone(),
                tooltip: tooltip_text(&r.label, r.start, r.end, r.value),
            })
            .collect();

        Ok(ChartOptions {
            chart: ChartSection {
                width,
                height,
                kind: "columnrange".into(),
                inverted: true,
                scrollable_plot_area: ScrollablePlotArea {
                    min_width: width,
                    scroll_position_x: 0,
                },
            },
            title: Title::default(),
            x_axis: CategoryAxis {
                kind: "category".into(),
                categories: records
                    .iter()
                    .map(|r| Category {
                        name: r.label.clone(),
                        original_name: r.original_label.clone(),
                    })
                    .collect(),
                max: items_in_view,
                scrollbar: Toggle { enabled: true },
            },
            y_axis: DatetimeAxis {
                kind: "datetime".into(),
                opposite: true,
                min: extents.map(|e| e.min_millis()),
                max: extents.map(|e| e.max_millis()),
                title: Title::default(),
                labels: AxisLabels {
                    rotation: -45,
                    format: "{value:%Y-%m-%d}".into(),
                },
                plot_lines: vec![self.today_line()],
            },
            plot_options: PlotOptions {
                series: SeriesOptions {
                    point_width,
                    cursor: "pointer".into(),
                },
                columnrange: ColumnRangeOptions {
                    border_radius: 4,
                    min_point_length: 5,
                    data_labels: DataLabels {
                        enabled: false,
                        format: "{y:%Y-%m-%d}".into(),
                    },
                },
            },
            series: vec![Series {
                name: "ranges".into(),
                data,
            }],
            legend: Toggle { enabled: false },
            credits: Toggle { enabled: false },
        })
    }
}

// ============================================================================
// Options
// ============================================================================

/// Complete chart options
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub chart: ChartSection,
    pub title: Title,
    pub x_axis: CategoryAxis,
    pub y_axis: DatetimeAxis,
    pub plot_options: PlotOptions,
    pub series: Vec<Series>,
    pub legend: Toggle,
    pub credits: Toggle,
}

impl ChartOptions {
    /// Points of the single range series
    pub fn points(&self) -> &[SeriesPoint] {
        self.series
            .first()
            .map(|s| s.data.as_slice())
            .unwrap_or_default()
    }

    pub fn to_json_pretty(&self) -> Result<String, RenderError> {
        serde_json::to_string_pretty(self).map_err(|e| RenderError::Format(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, RenderError> {
        serde_json::to_string(self).map_err(|e| RenderError::Format(e.to_string()))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSection {
    pub width: u32,
    pub height: u32,
    #[serde(rename = "type")]
    pub kind: String,
    pub inverted: bool,
    pub scrollable_plot_area: ScrollablePlotArea,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollablePlotArea {
    pub min_width: u32,
    pub scroll_position_x: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Toggle {
    pub enabled: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAxis {
    #[serde(rename = "type")]
    pub kind: String,
    /// One entry per record, in record order
    pub categories: Vec<Category>,
    /// Last category index shown before scrolling
    pub max: usize,
    pub scrollbar: Toggle,
}

/// Category axis entry.
///
/// `name` is the deduplicated label, so every entry is distinct and a point
/// finds its own row by name. Tick labels read `original_name`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Category {
    pub name: String,
    pub original_name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatetimeAxis {
    #[serde(rename = "type")]
    pub kind: String,
    pub opposite: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
    pub title: Title,
    pub labels: AxisLabels,
    pub plot_lines: Vec<PlotLine>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AxisLabels {
    pub rotation: i32,
    pub format: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotLine {
    /// Epoch milliseconds
    pub value: i64,
    pub color: String,
    pub dash_style: String,
    pub z_index: i32,
    pub width: u32,
    pub label: PlotLineLabel,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlotLineLabel {
    pub text: String,
    pub style: LabelStyle,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelStyle {
    pub font_size: u32,
    pub color: String,
    pub font_style: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlotOptions {
    pub series: SeriesOptions,
    pub columnrange: ColumnRangeOptions,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesOptions {
    pub point_width: f64,
    pub cursor: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnRangeOptions {
    pub border_radius: u32,
    pub min_point_length: u32,
    pub data_labels: DataLabels,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DataLabels {
    pub enabled: bool,
    pub format: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub data: Vec<SeriesPoint>,
}

/// One bar of the range series
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SeriesPoint {
    /// Row index on the category axis
    pub x: usize,
    /// Deduplicated label
    pub name: String,
    pub original_name: String,
    /// Start, epoch milliseconds
    pub low: i64,
    /// End, epoch milliseconds
    pub high: i64,
    pub value: f64,
    pub color: Color,
    pub tooltip: String,
}
