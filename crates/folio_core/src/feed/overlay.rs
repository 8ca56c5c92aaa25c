//! Best-effort view-count overlay.
//!
//! # Responsibility
//! - Build one counter key per slug and read them in a single batch.
//! - Absorb every store failure at this boundary.
//!
//! # Invariants
//! - At most one store round-trip per `resolve` call, regardless of batch size.
//! - `resolve` never returns an error; failure yields an empty mapping.
//! - `ViewCounts::get` is total: unknown slugs read as zero.
//! - Duplicate slugs produce duplicate keys; both read the same value.

use crate::logging::sanitize_message;
use crate::store::{StoreError, StoreResult, ViewCountBackend};
use log::{debug, warn};
use std::collections::HashMap;
use std::time::Instant;

/// Key namespace for project page views.
pub const VIEW_KEY_NAMESPACE: [&str; 2] = ["pageviews", "projects"];

const MAX_LOGGED_ERROR_CHARS: usize = 160;

/// Builds the counter key for one slug: `pageviews:projects:<slug>`.
pub fn view_count_key(slug: &str) -> String {
    let [scope, kind] = VIEW_KEY_NAMESPACE;
    [scope, kind, slug].join(":")
}

/// Slug to view-count mapping with zero default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewCounts {
    counts: HashMap<String, u64>,
}

impl ViewCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the count for `slug`, or zero when unknown.
    pub fn get(&self, slug: &str) -> u64 {
        self.counts.get(slug).copied().unwrap_or(0)
    }

    pub fn insert(&mut self, slug: impl Into<String>, count: u64) {
        self.counts.insert(slug.into(), count);
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(slug, count)| (slug.as_str(), *count))
    }
}

impl FromIterator<(String, u64)> for ViewCounts {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        Self {
            counts: iter.into_iter().collect(),
        }
    }
}

/// Overlays external view counts onto ranked slugs.
#[derive(Debug)]
pub struct ViewCountOverlay {
    backend: ViewCountBackend,
}

impl ViewCountOverlay {
    pub fn new(backend: ViewCountBackend) -> Self {
        Self { backend }
    }

    /// Overlay that never contacts a store.
    pub fn disabled() -> Self {
        Self::new(ViewCountBackend::Disabled)
    }

    pub fn is_enabled(&self) -> bool {
        self.backend.is_configured()
    }

    /// Resolves counts for `slugs`, degrading to an empty mapping on failure.
    ///
    /// # Side effects
    /// - One batched store read when the backend is configured and `slugs`
    ///   is non-empty.
    /// - Emits a `view_overlay` warning when the read fails.
    pub fn resolve<S: AsRef<str>>(&self, slugs: &[S]) -> ViewCounts {
        if !self.is_enabled() {
            debug!(
                "event=view_overlay module=feed status=skipped reason=store_unconfigured keys={}",
                slugs.len()
            );
            return ViewCounts::new();
        }
        let started_at = Instant::now();
        match self.try_resolve(slugs) {
            Ok(counts) => {
                debug!(
                    "event=view_overlay module=feed status=ok keys={} duration_ms={}",
                    slugs.len(),
                    started_at.elapsed().as_millis()
                );
                counts
            }
            Err(err) => {
                warn!(
                    "event=view_overlay module=feed status=degraded reason={} keys={} duration_ms={} error={}",
                    err.reason(),
                    slugs.len(),
                    started_at.elapsed().as_millis(),
                    sanitize_message(&err.to_string(), MAX_LOGGED_ERROR_CHARS)
                );
                ViewCounts::new()
            }
        }
    }

    /// Fallible batched read; `resolve` is the public, non-failing wrapper.
    pub fn try_resolve<S: AsRef<str>>(&self, slugs: &[S]) -> StoreResult<ViewCounts> {
        let store = match &self.backend {
            ViewCountBackend::Configured(store) => store,
            ViewCountBackend::Disabled => return Ok(ViewCounts::new()),
        };
        if slugs.is_empty() {
            return Ok(ViewCounts::new());
        }

        let keys: Vec<String> = slugs
            .iter()
            .map(|slug| view_count_key(slug.as_ref()))
            .collect();
        let values = store.batch_get(&keys)?;
        if values.len() != keys.len() {
            return Err(StoreError::Malformed(format!(
                "expected {} values, got {}",
                keys.len(),
                values.len()
            )));
        }

        Ok(slugs
            .iter()
            .zip(values)
            .map(|(slug, value)| (slug.as_ref().to_string(), value.unwrap_or(0)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::{view_count_key, ViewCountOverlay, ViewCounts};

    #[test]
    fn key_uses_colon_joined_namespace() {
        assert_eq!(view_count_key("rover"), "pageviews:projects:rover");
        assert_eq!(view_count_key("projects/arm"), "pageviews:projects:projects/arm");
    }

    #[test]
    fn unknown_slug_reads_as_zero() {
        let mut counts = ViewCounts::new();
        counts.insert("rover", 42);
        assert_eq!(counts.get("rover"), 42);
        assert_eq!(counts.get("missing"), 0);
        assert_eq!(counts.iter().collect::<Vec<_>>(), vec![("rover", 42)]);
    }

    #[test]
    fn disabled_overlay_returns_empty_mapping() {
        let overlay = ViewCountOverlay::disabled();
        assert!(!overlay.is_enabled());
        let counts = overlay.resolve(&["a", "b"]);
        assert!(counts.is_empty());
        assert_eq!(counts.get("a"), 0);
    }
}
