//! SQLite-backed project catalog.
//!
//! # Responsibility
//! - Persist catalog entries for authoring tools and fixtures.
//! - Serve `ContentCatalog::list_projects` in insertion order.
//!
//! # Invariants
//! - `source_path` is the storage key; re-upserting keeps the original
//!   catalog position.
//! - Entries are validated before every write.
//! - Rows with an out-of-range `published` value are reported, not masked.

use crate::catalog::{CatalogError, CatalogResult, ContentCatalog};
use crate::model::project::{CatalogEntry, ProjectRecord};
use log::debug;
use rusqlite::{params, Connection, Row};

const PROJECT_SELECT_SQL: &str = "SELECT
    source_path,
    slug,
    title,
    description,
    date_ms,
    published
FROM projects";

/// Catalog over a migrated SQLite connection.
pub struct SqliteProjectCatalog<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProjectCatalog<'conn> {
    /// Wraps a connection returned by `open_db` / `open_db_in_memory`.
    ///
    /// # Errors
    /// - `InvalidData` when the `projects` table is missing.
    pub fn try_new(conn: &'conn Connection) -> CatalogResult<Self> {
        if !projects_table_exists(conn)? {
            return Err(CatalogError::InvalidData(
                "missing required table `projects`; open the catalog via open_db".to_string(),
            ));
        }
        Ok(Self { conn })
    }

    /// Inserts or replaces one entry keyed by `source_path`.
    pub fn upsert_entry(&self, entry: &CatalogEntry) -> CatalogResult<()> {
        entry.validate()?;

        self.conn.execute(
            "INSERT INTO projects (
                source_path,
                slug,
                title,
                description,
                date_ms,
                published
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT(source_path) DO UPDATE SET
                slug = excluded.slug,
                title = excluded.title,
                description = excluded.description,
                date_ms = excluded.date_ms,
                published = excluded.published;",
            params![
                entry.source_path.as_str(),
                entry.slug.as_deref(),
                entry.title.as_str(),
                entry.description.as_deref(),
                entry.date,
                entry.published.map(i64::from),
            ],
        )?;

        debug!(
            "event=catalog_upsert module=catalog status=ok source_path={}",
            entry.source_path
        );
        Ok(())
    }

    /// Removes one entry. Returns `false` when nothing matched.
    pub fn remove_entry(&self, source_path: &str) -> CatalogResult<bool> {
        let changed = self.conn.execute(
            "DELETE FROM projects WHERE source_path = ?1;",
            [source_path],
        )?;
        Ok(changed > 0)
    }

    /// Lists raw entries in catalog order.
    pub fn list_entries(&self) -> CatalogResult<Vec<CatalogEntry>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROJECT_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            entries.push(parse_entry_row(row)?);
        }
        Ok(entries)
    }
}

impl ContentCatalog for SqliteProjectCatalog<'_> {
    fn list_projects(&self) -> CatalogResult<Vec<ProjectRecord>> {
        Ok(self
            .list_entries()?
            .into_iter()
            .map(ProjectRecord::from_entry)
            .collect())
    }
}

fn parse_entry_row(row: &Row<'_>) -> CatalogResult<CatalogEntry> {
    let source_path: String = row.get("source_path")?;
    let published = match row.get::<_, Option<i64>>("published")? {
        None => None,
        Some(0) => Some(false),
        Some(1) => Some(true),
        Some(other) => {
            return Err(CatalogError::InvalidData(format!(
                "invalid published value `{other}` for project `{source_path}`"
            )));
        }
    };

    Ok(CatalogEntry {
        slug: row.get("slug")?,
        title: row.get("title")?,
        description: row.get("description")?,
        date: row.get("date_ms")?,
        published,
        source_path,
    })
}

fn projects_table_exists(conn: &Connection) -> CatalogResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = 'projects'
        );",
        [],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
