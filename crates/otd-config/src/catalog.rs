//! Photo catalog (Wikimedia Commons) configuration.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Largest page size the catalog API accepts for anonymous clients.
pub const MAX_PAGE_SIZE: u32 = 500;

fn default_endpoint() -> String {
    String::from("https://commons.wikimedia.org/w/api.php")
}

fn default_search() -> String {
    String::from("\"Feyenoord\" \"Nationaal Archief\"")
}

/// File namespace on Commons.
const fn default_namespace() -> u32 {
    6
}

const fn default_page_size() -> u32 {
    MAX_PAGE_SIZE
}

fn default_user_agent() -> String {
    format!("otd/{}", env!("CARGO_PKG_VERSION"))
}

const fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// MediaWiki action API endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Full-text search expression selecting the archive's files.
    #[serde(default = "default_search")]
    pub search: String,

    #[serde(default = "default_namespace")]
    pub namespace: u32,

    /// Results per page (`gsrlimit`), 1..=500.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            search: default_search(),
            namespace: default_namespace(),
            page_size: default_page_size(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl CatalogConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.endpoint.is_empty() && !self.search.is_empty()
    }

    /// Reject values the catalog API would refuse.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for an out-of-range page size,
    /// a zero timeout, or an empty endpoint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_PAGE_SIZE).contains(&self.page_size) {
            return Err(ConfigError::InvalidValue {
                field: "catalog.page_size".into(),
                reason: format!("must be between 1 and {MAX_PAGE_SIZE}, got {}", self.page_size),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "catalog.timeout_secs".into(),
                reason: "must be greater than zero".into(),
            });
        }
        if self.endpoint.is_empty() {
            return Err(ConfigError::NotConfigured {
                section: "catalog".into(),
            });
        }
        Ok(())
    }
}
