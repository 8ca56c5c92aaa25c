use folio_core::db::open_db_in_memory;
use folio_core::{
    CatalogEntry, DateBadge, FeedConfig, FeedService, SqliteProjectCatalog, StaticCatalog,
    StoreConfig, StoreResult, ViewCountBackend, ViewCountOverlay, ViewCountStore,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Counts batches and answers `slug.len() * 100` for every key.
#[derive(Clone, Default)]
struct CountingStore {
    calls: Arc<AtomicUsize>,
}

impl ViewCountStore for CountingStore {
    fn batch_get(&self, keys: &[String]) -> StoreResult<Vec<Option<u64>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(keys
            .iter()
            .map(|key| {
                let slug = key.trim_start_matches("pageviews:projects:");
                Some(slug.len() as u64 * 100)
            })
            .collect())
    }
}

fn entry(slug: &str, date: Option<i64>) -> CatalogEntry {
    let mut entry = CatalogEntry::new(format!("projects/{slug}"), slug).with_slug(slug);
    entry.date = date;
    entry
}

#[test]
fn empty_catalog_renders_empty_state_without_contacting_store() {
    let store = CountingStore::default();
    let service = FeedService::new(
        StaticCatalog::default(),
        ViewCountOverlay::new(ViewCountBackend::configured(store.clone())),
        &FeedConfig::default(),
    );

    let feed = service.load_feed().unwrap();

    assert!(feed.is_empty());
    assert_eq!(feed.len(), 0);
    assert_eq!(feed.columns.len(), 3);
    assert!(feed.columns.iter().all(Vec::is_empty));
    assert_eq!(store.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn unpublished_only_catalog_is_also_empty() {
    let catalog = StaticCatalog::try_new(vec![entry("draft", Some(1)).with_published(false)])
        .unwrap();
    let service = FeedService::from_config(catalog, &FeedConfig::default());

    assert!(service.load_feed().unwrap().is_empty());
}

#[test]
fn feed_partitions_overlays_and_spreads_columns() {
    let catalog = StaticCatalog::try_new(vec![
        entry("a", Some(60)),
        entry("bb", Some(50)),
        entry("ccc", Some(40)),
        entry("dddd", Some(30)),
        entry("eeeee", Some(20)),
        entry("f", Some(10)),
        entry("soon", None),
    ])
    .unwrap();
    let store = CountingStore::default();
    let service = FeedService::new(
        catalog,
        ViewCountOverlay::new(ViewCountBackend::configured(store.clone())),
        &FeedConfig::default(),
    );

    let feed = service.load_feed().unwrap();

    assert_eq!(store.calls.load(Ordering::SeqCst), 1);
    let featured = feed.featured.as_ref().unwrap();
    assert_eq!(featured.slug(), "a");
    assert_eq!(featured.views, 100);
    assert_eq!(
        feed.secondary
            .iter()
            .map(|item| (item.slug(), item.views))
            .collect::<Vec<_>>(),
        vec![("bb", 200), ("ccc", 300)]
    );
    let columns: Vec<Vec<&str>> = feed
        .columns
        .iter()
        .map(|column| column.iter().map(|item| item.slug()).collect())
        .collect();
    assert_eq!(
        columns,
        vec![vec!["dddd", "soon"], vec!["eeeee"], vec!["f"]]
    );
    let remainder: Vec<String> = feed
        .remainder()
        .iter()
        .map(|item| item.slug().to_string())
        .collect();
    assert_eq!(remainder, vec!["dddd", "eeeee", "f", "soon"]);
    assert_eq!(feed.ranked().len(), 7);
    assert_eq!(feed.revalidate, Duration::from_secs(60));

    let soon = &feed.columns[0][1];
    assert_eq!(soon.date_badge(), DateBadge::Soon);
    assert_eq!(soon.views_label(), "400");
}

#[test]
fn unreachable_store_renders_feed_with_zero_counts() {
    let catalog = StaticCatalog::try_new(vec![
        entry("a", Some(5)),
        entry("b", Some(4)),
        entry("c", Some(3)),
        entry("d", Some(2)),
        entry("e", Some(1)),
    ])
    .unwrap();
    let mut config = FeedConfig::default().with_store(StoreConfig::new(
        "http://127.0.0.1:1",
        "token",
    ));
    config.store_timeout = Duration::from_millis(500);
    let service = FeedService::from_config(catalog, &config);

    let feed = service.load_feed().unwrap();

    assert_eq!(feed.len(), 5);
    assert!(feed.ranked().iter().all(|item| item.views == 0));
}

#[test]
fn custom_column_count_is_respected() {
    let catalog = StaticCatalog::try_new(
        (0..8)
            .map(|idx| entry(&format!("p{idx}"), Some(100 - idx)))
            .collect(),
    )
    .unwrap();
    let config = FeedConfig {
        columns: 2,
        ..FeedConfig::default()
    };
    let service = FeedService::from_config(catalog, &config);

    let feed = service.load_feed().unwrap();

    assert_eq!(feed.columns.len(), 2);
    assert_eq!(feed.columns[0].len(), 3);
    assert_eq!(feed.columns[1].len(), 2);
}

#[test]
fn sqlite_catalog_feeds_the_service() {
    let conn = open_db_in_memory().unwrap();
    let catalog = SqliteProjectCatalog::try_new(&conn).unwrap();
    catalog.upsert_entry(&entry("older", Some(1))).unwrap();
    catalog.upsert_entry(&entry("newer", Some(2))).unwrap();
    catalog
        .upsert_entry(&CatalogEntry::new("projects/pathonly", "Path only"))
        .unwrap();

    let service = FeedService::from_config(&catalog, &FeedConfig::default());
    let feed = service.load_feed().unwrap();

    let ranked: Vec<String> = feed
        .ranked()
        .iter()
        .map(|item| item.slug().to_string())
        .collect();
    assert_eq!(ranked, vec!["newer", "older", "projects/pathonly"]);
    assert!(feed.ranked().iter().all(|item| item.views == 0));
}
