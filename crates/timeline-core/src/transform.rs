//! Row transform: occurrence-suffixed labels and palette colors
//!
//! Turns host rows into display records in two passes:
//! 1. Each row gets a color picked by hashing `label + index` into the palette
//! 2. Repeated labels get an occurrence suffix (`Foo`, `Foo (2)`, `Foo (3)`)
//!
//! Both passes are pure. The occurrence counters live in a map scoped to a
//! single call.

use std::collections::HashMap;

use crate::{Color, DisplayRecord, RawRow, TimelineError};

/// An item paired with its deduplicated label and the label it arrived with
#[derive(Clone, Debug, PartialEq)]
pub struct Enumerated<T> {
    pub label: String,
    pub original_label: String,
    pub item: T,
}

/// Suffix repeated labels with their occurrence number.
///
/// The first sighting of a value keeps it unchanged; the n-th sighting
/// (n >= 2) becomes `"<value> (<n>)"`. Output has the input's length and
/// order. A raw label already shaped like `"Foo (2)"` can collide with a
/// generated one; see [`find_label_collisions`].
pub fn deduplicate_labels<T, I, F>(items: I, key: F) -> Vec<Enumerated<T>>
where
    I: IntoIterator<Item = T>,
    F: Fn(&T) -> &str,
{
    let mut occurrences: HashMap<String, usize> = HashMap::new();

    items
        .into_iter()
        .map(|item| {
            let original_label = key(&item).to_owned();
            let count = occurrences.entry(original_label.clone()).or_insert(0);
            *count += 1;

            let label = if *count > 1 {
                format!("{} ({})", original_label, count)
            } else {
                original_label.clone()
            };

            Enumerated {
                label,
                original_label,
                item,
            }
        })
        .collect()
}

/// Fractional character-weighted hash in `[0, 1)`.
///
/// Sums `(position + 1) * code_point / 256` over the UTF-16 code units of
/// `key` and keeps the fractional part. At a high surrogate followed by a low
/// surrogate the full code point is used; the low surrogate is then counted
/// again at its own position. Not collision resistant.
pub fn decimal_hash(key: &str) -> f64 {
    let units: Vec<u16> = key.encode_utf16().collect();
    let mut sum = 0.0_f64;

    for (i, &unit) in units.iter().enumerate() {
        let code_point = match (unit, units.get(i + 1)) {
            (0xD800..=0xDBFF, Some(&low)) if (0xDC00..=0xDFFF).contains(&low) => {
                0x10000 + ((u32::from(unit) - 0xD800) << 10) + (u32::from(low) - 0xDC00)
            }
            _ => u32::from(unit),
        };
        sum += (i + 1) as f64 * f64::from(code_point) / 256.0;
    }

    sum % 1.0
}

/// Seed used to pick a row's color: its label followed by its position
pub fn seed_key(label: &str, index: usize) -> String {
    format!("{}{}", label, index)
}

/// Pick the palette entry for `seed_key`.
///
/// Same palette and seed always give the same entry.
pub fn color_for<'a>(palette: &'a [Color], seed_key: &str) -> Result<&'a Color, TimelineError> {
    if palette.is_empty() {
        return Err(TimelineError::InvalidArgument(
            "color palette must contain at least one color".into(),
        ));
    }

    let index = (decimal_hash(seed_key) * palette.len() as f64).floor() as usize;
    // h < 1, but h * len can still round up to len
    Ok(&palette[index.min(palette.len() - 1)])
}

/// Color every row, then deduplicate the labels.
///
/// Fails with `InvalidArgument` on an empty palette before producing any
/// output, even when `rows` is empty.
pub fn build_display_records(
    rows: &[RawRow],
    palette: &[Color],
) -> Result<Vec<DisplayRecord>, TimelineError> {
    if palette.is_empty() {
        return Err(TimelineError::InvalidArgument(
            "color palette must contain at least one color".into(),
        ));
    }

    let colored = rows
        .iter()
        .enumerate()
        .map(|(i, row)| color_for(palette, &seed_key(&row.label, i)).map(|color| (row, color)))
        .collect::<Result<Vec<_>, _>>()?;

    let records = deduplicate_labels(colored, |(row, _)| row.label.as_str())
        .into_iter()
        .map(|entry| {
            let (row, color) = entry.item;
            DisplayRecord {
                label: entry.label,
                original_label: entry.original_label,
                start: row.start,
                end: row.end,
                value: row.value,
                color: color.clone(),
            }
        })
        .collect();

    Ok(records)
}

/// Labels that appear on more than one record, in order of first appearance.
///
/// Happens when a raw label already looks like a generated one, e.g. a row
/// named `Foo (2)` next to a second `Foo`.
pub fn find_label_collisions(records: &[DisplayRecord]) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order = Vec::new();

    for record in records {
        let count = counts.entry(record.label.as_str()).or_insert(0);
        *count += 1;
        if *count == 2 {
            order.push(record.label.clone());
        }
    }

    order
}
