//! Presentation-neutral labels for feed cards.
//!
//! These helpers produce values, not markup.

use crate::model::project::ProjectRecord;

const COMPACT_UNITS: [(u64, &str); 4] = [
    (1_000_000_000_000, "T"),
    (1_000_000_000, "B"),
    (1_000_000, "M"),
    (1_000, "K"),
];

/// Date slot of a project card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBadge {
    /// Unix epoch milliseconds.
    Dated(i64),
    /// No date yet; shown as an upcoming project.
    Soon,
}

impl DateBadge {
    pub fn for_record(record: &ProjectRecord) -> Self {
        record.date.map_or(Self::Soon, Self::Dated)
    }
}

/// Formats a view count in en-US compact notation (`950`, `1.2K`, `15K`, `1M`).
pub fn format_compact_count(count: u64) -> String {
    let Some(position) = COMPACT_UNITS.iter().position(|(unit, _)| count >= *unit) else {
        return count.to_string();
    };
    let (unit, suffix) = COMPACT_UNITS[position];
    let count = u128::from(count);
    let unit = u128::from(unit);

    let tenths = (count * 10 + unit / 2) / unit;
    if tenths < 100 {
        return if tenths % 10 == 0 {
            format!("{}{suffix}", tenths / 10)
        } else {
            format!("{}.{}{suffix}", tenths / 10, tenths % 10)
        };
    }

    let whole = (count + unit / 2) / unit;
    if whole >= 1_000 && position > 0 {
        let (larger, larger_suffix) = COMPACT_UNITS[position - 1];
        let larger_tenths = (count * 10 + u128::from(larger) / 2) / u128::from(larger);
        if larger_tenths % 10 == 0 {
            return format!("{}{larger_suffix}", larger_tenths / 10);
        }
        return format!("{}.{}{larger_suffix}", larger_tenths / 10, larger_tenths % 10);
    }
    format!("{whole}{suffix}")
}
