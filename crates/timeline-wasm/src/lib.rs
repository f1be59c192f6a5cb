//! WebAssembly bindings for the timeline-viz chart pipeline
//!
//! The dashboard plugin passes the host's query result and visualization
//! config as JSON strings and gets chart options back as JSON, ready to hand
//! to the charting library.

use chrono::DateTime;
use timeline_render::{
    display_records as records_for, QueryResponse, TimelineChart, VisConfig, DEFAULT_COLOR_RANGE,
};
use wasm_bindgen::prelude::*;

/// Initialize panic hook for better error messages in console
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Build chart options JSON for a container of the given size.
///
/// `config_json` may be empty to use the default palette. `today_millis`
/// pins the reference line; the browser clock is used otherwise.
#[wasm_bindgen]
pub fn build_chart(
    query_json: &str,
    config_json: &str,
    width: u32,
    height: u32,
    today_millis: Option<f64>,
) -> Result<String, JsValue> {
    build_chart_internal(query_json, config_json, width, height, today_millis)
        .map_err(|e| JsValue::from_str(&e))
}

/// Display records (deduplicated labels and colors) as a JSON array
#[wasm_bindgen]
pub fn display_records(query_json: &str, config_json: &str) -> Result<String, JsValue> {
    display_records_internal(query_json, config_json).map_err(|e| JsValue::from_str(&e))
}

/// The default palette as a JSON array of color strings
#[wasm_bindgen]
pub fn default_palette() -> String {
    serde_json::to_string(&DEFAULT_COLOR_RANGE).unwrap_or_else(|_| "[]".into())
}

fn parse_config(config_json: &str) -> Result<VisConfig, String> {
    if config_json.trim().is_empty() {
        return Ok(VisConfig::default());
    }
    VisConfig::from_json_str(config_json).map_err(|e| e.to_string())
}

fn build_chart_internal(
    query_json: &str,
    config_json: &str,
    width: u32,
    height: u32,
    today_millis: Option<f64>,
) -> Result<String, String> {
    let response = QueryResponse::from_json_str(query_json).map_err(|e| e.to_string())?;
    let config = parse_config(config_json)?;
    let rows = response.to_rows().map_err(|e| e.to_string())?;

    let mut chart = TimelineChart::new().container(width, height);
    if let Some(millis) = today_millis {
        let today = DateTime::from_timestamp_millis(millis as i64)
            .ok_or_else(|| format!("Invalid today timestamp: {}", millis))?;
        chart = chart.today(today);
    }

    chart
        .build(&rows, &config)
        .and_then(|options| options.to_json())
        .map_err(|e| e.to_string())
}

fn display_records_internal(query_json: &str, config_json: &str) -> Result<String, String> {
    let response = QueryResponse::from_json_str(query_json).map_err(|e| e.to_string())?;
    let config = parse_config(config_json)?;
    let records = records_for(&response, &config).map_err(|e| e.to_string())?;
    serde_json::to_string(&records).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    const QUERY: &str = r#"{
        "fields": {
            "dimension_like": [{"name": "n"}],
            "measure_like": [{"name": "m"}, {"name": "s"}, {"name": "e"}]
        },
        "data": [
            {"n": {"value": "Alpha"}, "m": {"value": 3},
             "s": {"value": "2024-01-01"}, "e": {"value": "2024-01-05"}},
            {"n": {"value": "Alpha"}, "m": {"value": 7},
             "s": {"value": "2024-02-01"}, "e": {"value": "2024-02-10"}}
        ]
    }"#;

    #[test]
    fn test_build_chart() {
        let json = build_chart_internal(QUERY, "", 810, 450, Some(1_704_067_200_000.0)).unwrap();
        let options: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(options["series"][0]["data"][1]["name"], "Alpha (2)");
        assert_eq!(options["yAxis"]["plotLines"][0]["value"], 1_704_067_200_000_i64);
        assert_eq!(
            options["yAxis"]["plotLines"][0]["label"]["text"],
            "Monday, January 1, 2024"
        );
    }

    #[test]
    fn test_display_records_with_config() {
        let json =
            display_records_internal(QUERY, r##"{"color_range": ["#111", "#222"]}"##).unwrap();
        let records: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(records[0]["label"], "Alpha");
        assert_eq!(records[1]["label"], "Alpha (2)");
        assert_eq!(records[0]["color"], "#111");
    }

    #[test]
    fn test_empty_palette_records_error() {
        let err = display_records_internal(QUERY, r#"{"color_range": []}"#).unwrap_err();
        assert!(err.contains("palette"), "{}", err);
    }

    #[test]
    fn test_bad_query_json() {
        let err = build_chart_internal("not json", "", 800, 600, None).unwrap_err();
        assert!(err.contains("invalid query response"), "{}", err);
    }

    #[test]
    fn test_default_palette() {
        let palette: Vec<String> = serde_json::from_str(&default_palette()).unwrap();
        assert_eq!(palette.len(), 12);
    }
}
