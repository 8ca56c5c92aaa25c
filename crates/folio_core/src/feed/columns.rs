//! Round-robin column distribution for the grid remainder.
//!
//! # Invariants
//! - Item `i` lands in column `i % columns`.
//! - Within a column, items keep their input order.
//! - Interleaving the columns row by row reproduces the input exactly.

/// Spreads `items` across `columns` buckets.
///
/// `columns == 0` yields no buckets; `FeedConfig` rejects a zero count.
pub fn distribute<T>(items: Vec<T>, columns: usize) -> Vec<Vec<T>> {
    if columns == 0 {
        return Vec::new();
    }
    let mut buckets: Vec<Vec<T>> = (0..columns)
        .map(|_| Vec::with_capacity(items.len() / columns + 1))
        .collect();
    for (index, item) in items.into_iter().enumerate() {
        buckets[index % columns].push(item);
    }
    buckets
}

/// Reads `columns` back row by row: `c0[0], c1[0], c2[0], c0[1], ...`.
pub fn interleave<T: Clone>(columns: &[Vec<T>]) -> Vec<T> {
    let depth = columns.iter().map(Vec::len).max().unwrap_or(0);
    let mut items = Vec::with_capacity(columns.iter().map(Vec::len).sum());
    for row in 0..depth {
        for column in columns {
            if let Some(item) = column.get(row) {
                items.push(item.clone());
            }
        }
    }
    items
}
