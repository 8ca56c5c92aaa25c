//! Content catalog contracts and implementations.
//!
//! # Responsibility
//! - Define the read contract the feed depends on (`ContentCatalog`).
//! - Provide an in-memory catalog and a SQLite-backed catalog.
//!
//! # Invariants
//! - `list_projects` returns records in catalog order with slugs resolved.
//! - Feed assembly never writes through this contract.

use crate::db::DbError;
use crate::model::project::{CatalogEntry, ProjectRecord, ProjectValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod sqlite;

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog access errors.
#[derive(Debug)]
pub enum CatalogError {
    Validation(ProjectValidationError),
    Db(DbError),
    InvalidData(String),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid catalog data: {message}"),
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<ProjectValidationError> for CatalogError {
    fn from(value: ProjectValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for CatalogError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for CatalogError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Read-only source of project records.
pub trait ContentCatalog {
    /// Lists every project, published or not, in catalog order.
    fn list_projects(&self) -> CatalogResult<Vec<ProjectRecord>>;
}

impl<C: ContentCatalog + ?Sized> ContentCatalog for &C {
    fn list_projects(&self) -> CatalogResult<Vec<ProjectRecord>> {
        (**self).list_projects()
    }
}

/// Catalog snapshot held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    entries: Vec<CatalogEntry>,
}

impl StaticCatalog {
    /// Builds a catalog, rejecting entries that fail validation.
    pub fn try_new(entries: Vec<CatalogEntry>) -> CatalogResult<Self> {
        for entry in &entries {
            entry.validate()?;
        }
        Ok(Self { entries })
    }

    /// Parses a JSON array of entries, e.g. a build-time catalog manifest.
    pub fn from_json(manifest: &str) -> CatalogResult<Self> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(manifest)
            .map_err(|err| CatalogError::InvalidData(format!("invalid catalog manifest: {err}")))?;
        Self::try_new(entries)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ContentCatalog for StaticCatalog {
    fn list_projects(&self) -> CatalogResult<Vec<ProjectRecord>> {
        Ok(self
            .entries
            .iter()
            .cloned()
            .map(ProjectRecord::from_entry)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::{CatalogError, ContentCatalog, StaticCatalog};
    use crate::model::project::CatalogEntry;

    #[test]
    fn static_catalog_preserves_order_and_resolves_slugs() {
        let catalog = StaticCatalog::try_new(vec![
            CatalogEntry::new("projects/b", "B"),
            CatalogEntry::new("projects/a", "A").with_slug("alpha"),
        ])
        .unwrap();
        assert!(!catalog.is_empty());
        assert!(StaticCatalog::default().is_empty());

        let slugs: Vec<String> = catalog
            .list_projects()
            .unwrap()
            .into_iter()
            .map(|record| record.slug)
            .collect();
        assert_eq!(slugs, vec!["projects/b".to_string(), "alpha".to_string()]);
    }

    #[test]
    fn json_manifest_loads_optional_fields() {
        let catalog = StaticCatalog::from_json(
            r#"[
                {"source_path": "projects/rover", "slug": "rover", "title": "Rover", "date": 1704067200000},
                {"source_path": "projects/draft", "title": "Draft", "published": false}
            ]"#,
        )
        .unwrap();
        assert_eq!(catalog.len(), 2);

        let records = catalog.list_projects().unwrap();
        assert_eq!(records[0].slug, "rover");
        assert_eq!(records[0].date, Some(1_704_067_200_000));
        assert_eq!(records[1].slug, "projects/draft");
        assert_eq!(records[1].published, Some(false));
        assert_eq!(records[1].description, None);
    }

    #[test]
    fn json_manifest_with_wrong_shape_is_invalid_data() {
        let err = StaticCatalog::from_json(r#"{"projects": []}"#).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidData(_)));
    }

    #[test]
    fn static_catalog_rejects_invalid_entries() {
        let err = StaticCatalog::try_new(vec![CatalogEntry::new("", "untitled")]).unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
    }
}
