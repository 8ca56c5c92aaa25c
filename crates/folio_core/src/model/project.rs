//! Project domain model.
//!
//! # Responsibility
//! - Define the raw catalog entry shape and the normalized project record.
//! - Resolve the stable slug identity once, at ingestion.
//!
//! # Invariants
//! - `ProjectRecord::slug` is always the resolved identity (explicit slug,
//!   else catalog source path).
//! - `published == None` means the record is visible.
//! - Slug uniqueness is assumed but not enforced; duplicates make view-count
//!   attribution ambiguous.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Raw project entry as stored by a content catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Content path inside the catalog, e.g. `projects/rover`.
    pub source_path: String,
    /// Explicit slug. Falls back to `source_path` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Unix epoch milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
}

impl CatalogEntry {
    /// Creates an undated, visible entry addressed only by its source path.
    pub fn new(source_path: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            source_path: source_path.into(),
            slug: None,
            title: title.into(),
            description: None,
            date: None,
            published: None,
        }
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_date(mut self, epoch_ms: i64) -> Self {
        self.date = Some(epoch_ms);
        self
    }

    pub fn with_published(mut self, published: bool) -> Self {
        self.published = Some(published);
        self
    }

    /// Validates catalog-level invariants before persistence.
    ///
    /// # Errors
    /// - `EmptySourcePath` when `source_path` is blank.
    /// - `EmptySlug` when an explicit slug is present but blank.
    /// - `EmptyTitle` when `title` is blank.
    pub fn validate(&self) -> Result<(), ProjectValidationError> {
        if self.source_path.trim().is_empty() {
            return Err(ProjectValidationError::EmptySourcePath);
        }
        if let Some(slug) = self.slug.as_deref() {
            if slug.trim().is_empty() {
                return Err(ProjectValidationError::EmptySlug {
                    source_path: self.source_path.clone(),
                });
            }
        }
        if self.title.trim().is_empty() {
            return Err(ProjectValidationError::EmptyTitle {
                source_path: self.source_path.clone(),
            });
        }
        Ok(())
    }
}

/// Catalog entry validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectValidationError {
    EmptySourcePath,
    EmptySlug { source_path: String },
    EmptyTitle { source_path: String },
}

impl Display for ProjectValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptySourcePath => write!(f, "project source_path cannot be empty"),
            Self::EmptySlug { source_path } => {
                write!(f, "project `{source_path}` has an empty explicit slug")
            }
            Self::EmptyTitle { source_path } => {
                write!(f, "project `{source_path}` has an empty title")
            }
        }
    }
}

impl Error for ProjectValidationError {}

/// Normalized project record consumed by feed assembly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    /// Unix epoch milliseconds; `None` ranks after every dated record.
    pub date: Option<i64>,
    pub published: Option<bool>,
}

impl ProjectRecord {
    /// Normalizes one catalog entry, resolving its slug.
    pub fn from_entry(entry: CatalogEntry) -> Self {
        let slug = resolve_slug(&entry).to_string();
        Self {
            slug,
            title: entry.title,
            description: entry.description,
            date: entry.date,
            published: entry.published,
        }
    }

    /// Returns whether the record belongs in the public feed.
    ///
    /// Only an explicit `published = false` hides a record.
    pub fn is_visible(&self) -> bool {
        self.published.unwrap_or(true)
    }
}

impl From<CatalogEntry> for ProjectRecord {
    fn from(value: CatalogEntry) -> Self {
        Self::from_entry(value)
    }
}

/// Resolves the stable identity of a catalog entry.
///
/// The explicit slug wins; otherwise the catalog source path is used.
pub fn resolve_slug(entry: &CatalogEntry) -> &str {
    entry.slug.as_deref().unwrap_or(entry.source_path.as_str())
}
