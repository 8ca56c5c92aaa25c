//! Project feed use-case service.
//!
//! # Responsibility
//! - Load a catalog snapshot and shape it into the projects page feed.
//! - Attach one view count per ranked record.
//!
//! # Invariants
//! - The store is contacted at most once per `load_feed`, and not at all when
//!   the ranked feed is empty.
//! - Catalog failure is the only error surfaced; store failure reads as zero
//!   counts.
//! - `columns.len()` always equals the configured column count (minimum 1).

use crate::catalog::{CatalogError, ContentCatalog};
use crate::config::FeedConfig;
use crate::feed::{
    distribute, format_compact_count, interleave, DateBadge, FeedAssembler, ViewCountOverlay,
};
use crate::logging::sanitize_message;
use crate::model::project::ProjectRecord;
use crate::store::ViewCountBackend;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{Duration, Instant};

const MAX_LOGGED_ERROR_CHARS: usize = 200;

/// Feed load errors.
#[derive(Debug)]
pub enum FeedError {
    Catalog(CatalogError),
}

impl Display for FeedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Catalog(err) => write!(f, "failed to list projects: {err}"),
        }
    }
}

impl Error for FeedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Catalog(err) => Some(err),
        }
    }
}

impl From<CatalogError> for FeedError {
    fn from(value: CatalogError) -> Self {
        Self::Catalog(value)
    }
}

/// One project card with its resolved view count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    pub record: ProjectRecord,
    pub views: u64,
}

impl FeedItem {
    pub fn slug(&self) -> &str {
        &self.record.slug
    }

    pub fn date_badge(&self) -> DateBadge {
        DateBadge::for_record(&self.record)
    }

    /// Compact view label, e.g. `1.2K`.
    pub fn views_label(&self) -> String {
        format_compact_count(self.views)
    }
}

/// Assembled projects page feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFeed {
    pub featured: Option<FeedItem>,
    pub secondary: Vec<FeedItem>,
    /// Remainder spread round-robin; column `c` holds ranks `3 + c + k*N`.
    pub columns: Vec<Vec<FeedItem>>,
    /// Serving-layer recompute hint.
    pub revalidate: Duration,
}

impl ProjectFeed {
    fn empty(columns: usize, revalidate: Duration) -> Self {
        Self {
            featured: None,
            secondary: Vec::new(),
            columns: distribute(Vec::new(), columns),
            revalidate,
        }
    }

    /// `true` means the caller should render the "no projects yet" state.
    pub fn is_empty(&self) -> bool {
        self.featured.is_none()
    }

    pub fn len(&self) -> usize {
        usize::from(self.featured.is_some())
            + self.secondary.len()
            + self.columns.iter().map(Vec::len).sum::<usize>()
    }

    /// Remainder items back in rank order.
    pub fn remainder(&self) -> Vec<FeedItem> {
        interleave(&self.columns)
    }

    /// Every item in rank order.
    pub fn ranked(&self) -> Vec<FeedItem> {
        self.featured
            .iter()
            .chain(self.secondary.iter())
            .cloned()
            .chain(self.remainder())
            .collect()
    }
}

/// Feed facade over a content catalog and a view-count overlay.
pub struct FeedService<C: ContentCatalog> {
    catalog: C,
    overlay: ViewCountOverlay,
    columns: usize,
    revalidate: Duration,
}

impl<C: ContentCatalog> FeedService<C> {
    /// Creates a service with an explicit overlay.
    pub fn new(catalog: C, overlay: ViewCountOverlay, config: &FeedConfig) -> Self {
        Self {
            catalog,
            overlay,
            columns: config.columns.max(1),
            revalidate: config.revalidate,
        }
    }

    /// Creates a service whose overlay follows `config.store`.
    pub fn from_config(catalog: C, config: &FeedConfig) -> Self {
        let overlay = ViewCountOverlay::new(ViewCountBackend::from_config(config));
        Self::new(catalog, overlay, config)
    }

    /// Lists the catalog and assembles the feed.
    ///
    /// # Errors
    /// - `FeedError::Catalog` when the catalog cannot be read.
    pub fn load_feed(&self) -> Result<ProjectFeed, FeedError> {
        let records = self.catalog.list_projects().map_err(|err| {
            error!(
                "event=feed_load module=service status=error error_code=catalog_failed error={}",
                sanitize_message(&err.to_string(), MAX_LOGGED_ERROR_CHARS)
            );
            err
        })?;
        Ok(self.build_feed(records))
    }

    /// Assembles a feed from an already-listed catalog snapshot.
    pub fn build_feed(&self, records: Vec<ProjectRecord>) -> ProjectFeed {
        let started_at = Instant::now();
        let catalog_size = records.len();
        let ranked = FeedAssembler::rank(records);

        if ranked.is_empty() {
            info!(
                "event=feed_build module=service status=empty catalog={catalog_size} duration_ms={}",
                started_at.elapsed().as_millis()
            );
            return ProjectFeed::empty(self.columns, self.revalidate);
        }

        let counts = {
            let slugs: Vec<&str> = ranked.iter().map(|record| record.slug.as_str()).collect();
            self.overlay.resolve(&slugs)
        };

        let partition = FeedAssembler::partition(ranked).map(|record| FeedItem {
            views: counts.get(&record.slug),
            record,
        });
        let columns = distribute(partition.remainder, self.columns);

        let feed = ProjectFeed {
            featured: partition.featured,
            secondary: partition.secondary,
            columns,
            revalidate: self.revalidate,
        };
        info!(
            "event=feed_build module=service status=ok catalog={catalog_size} ranked={} overlay={} counted={} duration_ms={}",
            feed.len(),
            if self.overlay.is_enabled() { "enabled" } else { "disabled" },
            counts.len(),
            started_at.elapsed().as_millis()
        );
        feed
    }
}
