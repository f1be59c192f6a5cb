//! CLI integration tests
//!
//! Run the built `timeline-viz` binary against the fixtures and check its
//! output and exit status.

use std::path::PathBuf;
use std::process::{Command, Output};

use serde_json::Value;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_timeline-viz"))
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("TIMELINE_VIZ_CONFIG")
        .output()
        .expect("failed to execute timeline-viz")
}

fn path_arg(path: &PathBuf) -> &str {
    path.to_str().unwrap()
}

#[test]
fn palette_lists_default_colors() {
    let out = run(&["palette"]);
    assert!(out.status.success());

    let stdout = String::from_utf8(out.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 12);
    assert_eq!(lines[0], "#62bad4");
    assert_eq!(lines[11], "#9fc190");
}

#[test]
fn records_text_table() {
    let query = fixture("campaigns.json");
    let config = fixture("palette.toml");
    let out = run(&["records", path_arg(&query), "--config", path_arg(&config)]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let stdout = String::from_utf8(out.stdout).unwrap();
    assert_eq!(
        stdout,
        "Label      Start       End         Value  Color\n\
         Alpha      2024-01-01  2024-01-05  3      #111\n\
         Alpha (2)  2024-02-01  2024-02-10  7      #111\n\
         Range: 2024-01-01 - 2024-02-10\n"
    );
}

#[test]
fn records_json() {
    let query = fixture("campaigns.json");
    let out = run(&["records", path_arg(&query), "--format", "json"]);
    assert!(out.status.success());

    let records: Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(records[0]["label"], "Alpha");
    assert_eq!(records[1]["label"], "Alpha (2)");
    assert_eq!(records[1]["original_label"], "Alpha");
    assert_eq!(records[1]["value"], 7.0);
}

#[test]
fn chart_to_stdout() {
    let query = fixture("campaigns.json");
    let out = run(&[
        "chart",
        path_arg(&query),
        "--width",
        "1010",
        "--height",
        "650",
        "--today",
        "2024-01-20",
    ]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let options: Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(options["chart"]["width"], 1000);
    assert_eq!(options["chart"]["height"], 600);
    assert_eq!(options["series"][0]["data"][1]["name"], "Alpha (2)");
    assert_eq!(
        options["yAxis"]["plotLines"][0]["label"]["text"],
        "Saturday, January 20, 2024"
    );
}

#[test]
fn chart_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("chart.json");
    let query = fixture("campaigns.json");

    let out = run(&[
        "chart",
        path_arg(&query),
        "--output",
        output.to_str().unwrap(),
    ]);
    assert!(out.status.success());
    assert!(out.stdout.is_empty());

    let written = std::fs::read_to_string(&output).unwrap();
    let options: Value = serde_json::from_str(&written).unwrap();
    let category = &options["xAxis"]["categories"][1];
    assert_eq!(category["name"], "Alpha (2)");
    assert_eq!(category["original_name"], "Alpha");
    assert_eq!(options["series"][0]["data"][1]["x"], 1);
}

#[test]
fn inverted_interval_fails() {
    let query = fixture("inverted.json");
    let out = run(&["chart", path_arg(&query)]);
    assert!(!out.status.success());

    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("end"), "{}", stderr);
}

#[test]
fn missing_file_fails() {
    let out = run(&["records", "/nonexistent/query.json"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("failed to read"));
}
