//! Process-start configuration for feed assembly.
//!
//! # Responsibility
//! - Collect the view-count store endpoint/credential and feed tuning knobs
//!   into one explicit structure.
//! - Keep environment access at the edge: build once, pass by reference.
//!
//! # Invariants
//! - A missing store endpoint or credential is a valid "store disabled"
//!   state, never an error.
//! - Numeric overrides that are present but unusable are rejected.
//! - `Debug` output never contains the store credential.

use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::time::Duration;

/// REST endpoint of the view-count store.
pub const ENV_STORE_URL: &str = "UPSTASH_REDIS_REST_URL";
/// Bearer token for the view-count store.
pub const ENV_STORE_TOKEN: &str = "UPSTASH_REDIS_REST_TOKEN";
/// Optional whole-request timeout override in milliseconds.
pub const ENV_STORE_TIMEOUT_MS: &str = "FOLIO_STORE_TIMEOUT_MS";
/// Optional grid column count override.
pub const ENV_FEED_COLUMNS: &str = "FOLIO_FEED_COLUMNS";

pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_millis(2_000);
pub const DEFAULT_FEED_COLUMNS: usize = 3;
/// Serving-layer recompute hint. Not enforced by the core.
pub const REVALIDATE_INTERVAL: Duration = Duration::from_secs(60);

/// Configuration load errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidNumber { key: &'static str, value: String },
    ZeroValue { key: &'static str },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidNumber { key, value } => {
                write!(f, "`{key}` must be a positive integer, got `{value}`")
            }
            Self::ZeroValue { key } => write!(f, "`{key}` must be greater than zero"),
        }
    }
}

impl Error for ConfigError {}

/// Connection settings for the optional view-count store.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct StoreConfig {
    pub endpoint: Option<String>,
    pub credential: Option<String>,
}

impl StoreConfig {
    pub fn new(endpoint: impl Into<String>, credential: impl Into<String>) -> Self {
        Self {
            endpoint: Some(endpoint.into()),
            credential: Some(credential.into()),
        }
    }

    /// Store with no endpoint; every overlay resolves to zero counts.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Returns endpoint and credential when both are present and non-blank.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let endpoint = non_blank(self.endpoint.as_deref())?;
        let credential = non_blank(self.credential.as_deref())?;
        Some((endpoint, credential))
    }

    pub fn is_configured(&self) -> bool {
        self.credentials().is_some()
    }
}

impl Debug for StoreConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("endpoint", &self.endpoint)
            .field(
                "credential",
                &self.credential.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

/// Feed configuration built once per process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedConfig {
    pub store: StoreConfig,
    /// Upper bound for the single batched store round-trip.
    pub store_timeout: Duration,
    /// Number of grid columns for the remainder. Always > 0.
    pub columns: usize,
    pub revalidate: Duration,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::disabled(),
            store_timeout: DEFAULT_STORE_TIMEOUT,
            columns: DEFAULT_FEED_COLUMNS,
            revalidate: REVALIDATE_INTERVAL,
        }
    }
}

impl FeedConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    /// - Returns `ConfigError` when a numeric override is malformed or zero.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store = StoreConfig {
            endpoint: lookup(ENV_STORE_URL).map(|value| value.trim().to_string()),
            credential: lookup(ENV_STORE_TOKEN).map(|value| value.trim().to_string()),
        };

        let timeout_ms = parse_positive(ENV_STORE_TIMEOUT_MS, lookup(ENV_STORE_TIMEOUT_MS))?;
        let store_timeout = timeout_ms.map_or(DEFAULT_STORE_TIMEOUT, Duration::from_millis);
        let columns = match parse_positive(ENV_FEED_COLUMNS, lookup(ENV_FEED_COLUMNS))? {
            Some(value) => usize::try_from(value).map_err(|_| ConfigError::InvalidNumber {
                key: ENV_FEED_COLUMNS,
                value: value.to_string(),
            })?,
            None => DEFAULT_FEED_COLUMNS,
        };

        Ok(Self {
            store,
            store_timeout,
            columns,
            revalidate: REVALIDATE_INTERVAL,
        })
    }

    /// Returns a copy with the given store settings.
    pub fn with_store(mut self, store: StoreConfig) -> Self {
        self.store = store;
        self
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn parse_positive(key: &'static str, raw: Option<String>) -> Result<Option<u64>, ConfigError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let value = trimmed
        .parse::<u64>()
        .map_err(|_| ConfigError::InvalidNumber {
            key,
            value: trimmed.to_string(),
        })?;
    if value == 0 {
        return Err(ConfigError::ZeroValue { key });
    }
    Ok(Some(value))
}
