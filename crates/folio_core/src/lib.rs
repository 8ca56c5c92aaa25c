//! Core feed logic for the portfolio projects page.
//! Ranks catalog records, overlays best-effort view counts and lays the
//! remainder out in grid columns.

pub mod catalog;
pub mod config;
pub mod db;
pub mod feed;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use catalog::sqlite::SqliteProjectCatalog;
pub use catalog::{CatalogError, CatalogResult, ContentCatalog, StaticCatalog};
pub use config::{ConfigError, FeedConfig, StoreConfig};
pub use feed::{
    distribute, format_compact_count, interleave, view_count_key, DateBadge, FeedAssembler,
    Partition, ViewCountOverlay, ViewCounts,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::project::{resolve_slug, CatalogEntry, ProjectRecord, ProjectValidationError};
pub use service::feed_service::{FeedError, FeedItem, FeedService, ProjectFeed};
pub use store::{StoreError, StoreResult, UpstashRestStore, ViewCountBackend, ViewCountStore};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
