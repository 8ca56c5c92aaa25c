//! View-count store contracts.
//!
//! # Responsibility
//! - Define the batched read contract for the external counter service.
//! - Model store availability as an explicit capability, not a nullable.
//!
//! # Invariants
//! - `batch_get` output is positionally aligned with its input keys.
//! - Implementations never retry; one call is one round-trip.

use crate::config::{FeedConfig, StoreConfig};
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::time::Duration;

pub mod upstash;

pub use upstash::UpstashRestStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure of a single batched store read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Transport failure: DNS, connect, TLS, timeout.
    Unreachable(String),
    /// Store answered with a non-success HTTP status.
    Status { code: u16, body: String },
    /// Store answered, but not with a usable batch payload.
    Malformed(String),
}

impl StoreError {
    /// Stable reason code for logging.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Unreachable(_) => "store_unreachable",
            Self::Status { .. } => "store_status",
            Self::Malformed(_) => "store_malformed_response",
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unreachable(message) => write!(f, "view-count store unreachable: {message}"),
            Self::Status { code, body } => {
                write!(f, "view-count store returned status {code}: {body}")
            }
            Self::Malformed(message) => {
                write!(f, "view-count store returned malformed data: {message}")
            }
        }
    }
}

impl Error for StoreError {}

/// Batched key-value counter reads.
pub trait ViewCountStore: Send + Sync {
    /// Reads every key in one round-trip.
    ///
    /// Returns one slot per key; `None` means the key has no counter yet.
    fn batch_get(&self, keys: &[String]) -> StoreResult<Vec<Option<u64>>>;
}

/// Store capability resolved at configuration time.
pub enum ViewCountBackend {
    Configured(Box<dyn ViewCountStore>),
    Disabled,
}

impl ViewCountBackend {
    pub fn configured(store: impl ViewCountStore + 'static) -> Self {
        Self::Configured(Box::new(store))
    }

    /// Builds the REST-backed store when endpoint and credential are present.
    pub fn from_config(config: &FeedConfig) -> Self {
        Self::from_store_config(&config.store, config.store_timeout)
    }

    pub fn from_store_config(store: &StoreConfig, timeout: Duration) -> Self {
        match store.credentials() {
            Some((endpoint, credential)) => {
                Self::configured(UpstashRestStore::new(endpoint, credential, timeout))
            }
            None => Self::Disabled,
        }
    }

    pub fn is_configured(&self) -> bool {
        matches!(self, Self::Configured(_))
    }
}

impl Debug for ViewCountBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configured(_) => f.write_str("ViewCountBackend::Configured"),
            Self::Disabled => f.write_str("ViewCountBackend::Disabled"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{StoreError, ViewCountBackend};
    use crate::config::{FeedConfig, StoreConfig};

    #[test]
    fn backend_is_disabled_without_credentials() {
        let backend = ViewCountBackend::from_config(&FeedConfig::default());
        assert!(!backend.is_configured());
    }

    #[test]
    fn backend_is_configured_with_endpoint_and_credential() {
        let config =
            FeedConfig::default().with_store(StoreConfig::new("https://kv.example", "token"));
        assert!(ViewCountBackend::from_config(&config).is_configured());
    }

    #[test]
    fn reason_codes_are_stable() {
        assert_eq!(
            StoreError::Unreachable("refused".into()).reason(),
            "store_unreachable"
        );
        assert_eq!(
            StoreError::Malformed("x".into()).reason(),
            "store_malformed_response"
        );
    }
}
