//! CLI probe for the project feed.
//!
//! # Responsibility
//! - Verify `folio_core` linkage and print the core version.
//! - Optionally assemble the feed from a SQLite catalog with environment
//!   configuration and print it as plain text.

use clap::Parser;
use folio_core::db::open_db;
use folio_core::{
    core_version, default_log_level, init_logging, DateBadge, FeedConfig, FeedItem, FeedService,
    ProjectFeed, SqliteProjectCatalog,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "folio", version, about = "Print the ranked project feed")]
struct Args {
    /// SQLite catalog file; omit to only print the core version.
    #[arg(long)]
    db: Option<PathBuf>,
    /// Absolute directory for rolling log files.
    #[arg(long)]
    log_dir: Option<String>,
    /// Log level (trace|debug|info|warn|error).
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    println!("folio_core version={}", core_version());

    if let Some(log_dir) = args.log_dir.as_deref() {
        let level = args.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(err) = init_logging(level, log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let Some(db_path) = args.db else {
        return ExitCode::SUCCESS;
    };

    match print_feed(&db_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn print_feed(db_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = FeedConfig::from_env()?;
    let conn = open_db(db_path)?;
    let catalog = SqliteProjectCatalog::try_new(&conn)?;
    let service = FeedService::from_config(catalog, &config);
    let feed = service.load_feed()?;
    render(&feed);
    Ok(())
}

fn render(feed: &ProjectFeed) {
    if feed.is_empty() {
        println!("No projects yet.");
        return;
    }
    if let Some(item) = &feed.featured {
        println!("featured:  {}", line(item));
    }
    for item in &feed.secondary {
        println!("secondary: {}", line(item));
    }
    for (index, column) in feed.columns.iter().enumerate() {
        for item in column {
            println!("column {index}:  {}", line(item));
        }
    }
}

fn line(item: &FeedItem) -> String {
    let date = match item.date_badge() {
        DateBadge::Dated(epoch_ms) => epoch_ms.to_string(),
        DateBadge::Soon => "SOON".to_string(),
    };
    format!(
        "{} [{}] views={} date={}",
        item.record.title,
        item.slug(),
        item.views_label(),
        date
    )
}
