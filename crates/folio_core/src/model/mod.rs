//! Domain model for portfolio project records.
//!
//! # Responsibility
//! - Define the raw catalog entry and the normalized record used by the feed.
//!
//! # Invariants
//! - Every record carries exactly one resolved slug.
//! - Records are read-only views; the feed never mutates them.

pub mod project;
