use folio_core::db::open_db_in_memory;
use folio_core::{CatalogEntry, CatalogError, ContentCatalog, SqliteProjectCatalog};

#[test]
fn list_projects_returns_insertion_order_with_resolved_slugs() {
    let conn = open_db_in_memory().unwrap();
    let catalog = SqliteProjectCatalog::try_new(&conn).unwrap();
    catalog
        .upsert_entry(
            &CatalogEntry::new("projects/rover", "Rover")
                .with_slug("rover")
                .with_date(1_704_067_200_000)
                .with_description("Six-wheel rover"),
        )
        .unwrap();
    catalog
        .upsert_entry(&CatalogEntry::new("projects/arm", "Arm").with_published(false))
        .unwrap();

    let records = catalog.list_projects().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].slug, "rover");
    assert_eq!(records[0].date, Some(1_704_067_200_000));
    assert_eq!(records[0].description.as_deref(), Some("Six-wheel rover"));
    assert_eq!(records[0].published, None);
    assert_eq!(records[1].slug, "projects/arm");
    assert_eq!(records[1].published, Some(false));
}

#[test]
fn upsert_replaces_fields_but_keeps_catalog_position() {
    let conn = open_db_in_memory().unwrap();
    let catalog = SqliteProjectCatalog::try_new(&conn).unwrap();
    catalog.upsert_entry(&CatalogEntry::new("a", "A")).unwrap();
    catalog.upsert_entry(&CatalogEntry::new("b", "B")).unwrap();
    catalog
        .upsert_entry(&CatalogEntry::new("a", "A v2").with_slug("alpha"))
        .unwrap();

    let entries = catalog.list_entries().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].title, "A v2");
    assert_eq!(entries[0].slug.as_deref(), Some("alpha"));
    assert_eq!(entries[1].source_path, "b");
}

#[test]
fn remove_entry_reports_whether_a_row_matched() {
    let conn = open_db_in_memory().unwrap();
    let catalog = SqliteProjectCatalog::try_new(&conn).unwrap();
    catalog.upsert_entry(&CatalogEntry::new("a", "A")).unwrap();

    assert!(catalog.remove_entry("a").unwrap());
    assert!(!catalog.remove_entry("a").unwrap());
    assert!(catalog.list_projects().unwrap().is_empty());
}

#[test]
fn upsert_rejects_invalid_entries() {
    let conn = open_db_in_memory().unwrap();
    let catalog = SqliteProjectCatalog::try_new(&conn).unwrap();

    let err = catalog
        .upsert_entry(&CatalogEntry::new("a", "   "))
        .unwrap_err();
    assert!(matches!(err, CatalogError::Validation(_)));
}

#[test]
fn unmigrated_connection_is_rejected() {
    let conn = rusqlite::Connection::open_in_memory().unwrap();
    let err = SqliteProjectCatalog::try_new(&conn).err().unwrap();
    assert!(matches!(err, CatalogError::InvalidData(_)));
}
