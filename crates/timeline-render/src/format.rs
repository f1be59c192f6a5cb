//! Text formatting for tooltips and axis labels
//!
//! English only: ISO days, long weekday dates, and compact numbers
//! (`1K`, `3M`) with no fraction digits.

use chrono::NaiveDate;
use timeline_core::Instant;

/// Compact suffixes in ascending order
const COMPACT_UNITS: [(f64, &str); 4] = [(1e3, "K"), (1e6, "M"), (1e9, "B"), (1e12, "T")];

/// `YYYY-MM-DD` in UTC
pub fn format_date(instant: Instant) -> String {
    instant.format("%Y-%m-%d").to_string()
}

/// `Weekday, Month D, YYYY`, e.g. `Sunday, October 18, 2026`
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// Short-scale compact notation rounded to a whole number.
///
/// Rounds half away from zero in the chosen unit; a result that rounds up to
/// 1000 moves to the next unit (`999_999` is `1M`, not `1000K`).
pub fn format_compact(value: f64) -> String {
    if value.is_nan() {
        return "NaN".into();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-∞" } else { "∞" }.into();
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();
    let mut unit = COMPACT_UNITS.iter().rposition(|(threshold, _)| abs >= *threshold);

    loop {
        let (divisor, suffix) = unit.map_or((1.0, ""), |i| COMPACT_UNITS[i]);
        let scaled = (abs / divisor).round();
        let next = unit.map_or(0, |i| i + 1);

        if scaled >= 1000.0 && next < COMPACT_UNITS.len() {
            unit = Some(next);
            continue;
        }
        return format!("{}{}{}", sign, scaled, suffix);
    }
}

/// Tooltip line for one interval: `name: start - end (value)`
pub fn tooltip_text(name: &str, start: Instant, end: Instant, value: f64) -> String {
    format!(
        "{}: {} - {} ({})",
        name,
        format_date(start),
        format_date(end),
        format_compact(value)
    )
}
