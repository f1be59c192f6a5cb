//! Plain-text table of display records
//!
//! Used by the CLI to inspect what the chart will draw:
//!
//! ```text
//! Label      Start       End         Value  Color
//! Alpha      2024-01-01  2024-01-05  3      #111
//! Alpha (2)  2024-02-01  2024-02-10  7      #111
//! ```

use timeline_core::{DisplayRecord, Extents, RenderError, Renderer};

use crate::format::{format_compact, format_date};

const HEADERS: [&str; 5] = ["Label", "Start", "End", "Value", "Color"];

/// Column-aligned text renderer
#[derive(Clone, Debug, Default)]
pub struct TableRenderer {
    /// Append a line with the overall date range
    pub show_extents: bool,
}

impl TableRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_extents(mut self) -> Self {
        self.show_extents = true;
        self
    }
}

impl Renderer for TableRenderer {
    type Output = String;

    fn render(
        &self,
        records: &[DisplayRecord],
        extents: Option<Extents>,
    ) -> Result<String, RenderError> {
        let rows: Vec<[String; 5]> = records
            .iter()
            .map(|r| {
                [
                    r.label.clone(),
                    format_date(r.start),
                    format_date(r.end),
                    format_compact(r.value),
                    r.color.to_string(),
                ]
            })
            .collect();

        let mut widths = HEADERS.map(|h| h.chars().count());
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        push_line(&mut out, &HEADERS.map(String::from), &widths);
        for row in &rows {
            push_line(&mut out, row, &widths);
        }

        if self.show_extents {
            match extents {
                Some(e) => out.push_str(&format!(
                    "Range: {} - {}\n",
                    format_date(e.min),
                    format_date(e.max)
                )),
                None => out.push_str("Range: (no rows)\n"),
            }
        }

        Ok(out)
    }
}

fn push_line(out: &mut String, cells: &[String; 5], widths: &[usize; 5]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = width))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use timeline_core::{build_display_records, compute_extents, Color, RawRow};

    #[test]
    fn renders_aligned_table() {
        let rows = vec![
            RawRow::new(
                "Alpha",
                Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap(),
                3.0,
            ),
            RawRow::new(
                "Alpha",
                Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2024, 2, 10, 0, 0, 0).unwrap(),
                7.0,
            ),
        ];
        let palette = vec![Color::new("#111"), Color::new("#222")];
        let records = build_display_records(&rows, &palette).unwrap();

        let table = TableRenderer::new()
            .with_extents()
            .render(&records, compute_extents(&rows))
            .unwrap();

        assert_eq!(
            table,
            "Label      Start       End         Value  Color\n\
             Alpha      2024-01-01  2024-01-05  3      #111\n\
             Alpha (2)  2024-02-01  2024-02-10  7      #111\n\
             Range: 2024-01-01 - 2024-02-10\n"
        );
    }

    #[test]
    fn empty_records_render_header_only() {
        let table = TableRenderer::new().render(&[], None).unwrap();
        assert_eq!(table, "Label  Start  End  Value  Color\n");
    }
}
