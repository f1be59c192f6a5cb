//! Axis extents and boundary checks over raw rows

use serde::{Deserialize, Serialize};

use crate::{Instant, RawRow, TimelineError};

/// Earliest start and latest end over a set of rows
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extents {
    pub min: Instant,
    pub max: Instant,
}

impl Extents {
    /// Lower bound in epoch milliseconds
    pub fn min_millis(&self) -> i64 {
        self.min.timestamp_millis()
    }

    /// Upper bound in epoch milliseconds
    pub fn max_millis(&self) -> i64 {
        self.max.timestamp_millis()
    }
}

/// Compute the time extents of `rows`, or `None` if there are none.
///
/// `min` is taken over starts and `max` over ends, independently.
pub fn compute_extents(rows: &[RawRow]) -> Option<Extents> {
    let min = rows.iter().map(|r| r.start).min()?;
    let max = rows.iter().map(|r| r.end).max()?;
    Some(Extents { min, max })
}

/// Reject rows that would draw as nonsense: inverted intervals and
/// non-finite measures.
pub fn validate_rows(rows: &[RawRow]) -> Result<(), TimelineError> {
    for (i, row) in rows.iter().enumerate() {
        if row.end < row.start {
            return Err(TimelineError::InvalidArgument(format!(
                "row {} ('{}'): end {} is before start {}",
                i,
                row.label,
                row.end.to_rfc3339(),
                row.start.to_rfc3339()
            )));
        }
        if !row.value.is_finite() {
            return Err(TimelineError::InvalidArgument(format!(
                "row {} ('{}'): value {} is not finite",
                i, row.label, row.value
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn at(month: u32, day: u32) -> Instant {
        Utc.with_ymd_and_hms(2024, month, day, 0, 0, 0).unwrap()
    }

    #[test]
    fn extents_of_empty_rows() {
        assert_eq!(compute_extents(&[]), None);
    }

    #[test]
    fn extents_take_min_start_and_max_end() {
        let rows = vec![
            RawRow::new("a", at(3, 1), at(3, 20), 1.0),
            RawRow::new("b", at(1, 15), at(2, 1), 1.0),
            RawRow::new("c", at(2, 10), at(4, 2), 1.0),
        ];
        let extents = compute_extents(&rows).unwrap();
        assert_eq!(extents.min, at(1, 15));
        assert_eq!(extents.max, at(4, 2));
        assert_eq!(extents.min_millis(), 1_705_276_800_000);
    }

    #[test]
    fn validate_accepts_zero_length_interval() {
        let rows = vec![RawRow::new("m", at(1, 1), at(1, 1), 0.0)];
        assert!(validate_rows(&rows).is_ok());
    }

    #[test]
    fn validate_rejects_inverted_interval() {
        let rows = vec![
            RawRow::new("ok", at(1, 1), at(1, 2), 1.0),
            RawRow::new("bad", at(2, 1), at(1, 2), 1.0),
        ];
        let err = validate_rows(&rows).unwrap_err();
        let TimelineError::InvalidArgument(msg) = err;
        assert!(msg.starts_with("row 1 ('bad')"), "{}", msg);
    }

    #[test]
    fn validate_rejects_nan_value() {
        let rows = vec![RawRow::new("x", at(1, 1), at(1, 2), f64::NAN)];
        assert!(validate_rows(&rows).is_err());
    }
}
