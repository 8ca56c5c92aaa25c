//! Feed shaping: ranking, partitioning, view-count overlay, grid columns.
//!
//! # Responsibility
//! - Turn a catalog snapshot into featured, secondary and column slots.
//! - Keep every step pure except the single batched overlay read.
//!
//! # Invariants
//! - All feed values are derived per request and never persisted.

pub mod assembler;
pub mod columns;
pub mod display;
pub mod overlay;

pub use assembler::{FeedAssembler, Partition, SECONDARY_SLOTS};
pub use columns::{distribute, interleave};
pub use display::{format_compact_count, DateBadge};
pub use overlay::{view_count_key, ViewCountOverlay, ViewCounts};
