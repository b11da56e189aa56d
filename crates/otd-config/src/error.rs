//! Configuration error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment could not merge or extract a provider.
    #[error("configuration error: {0}")]
    Figment(#[from] figment::Error),

    /// A section lacks a field it cannot work without.
    #[error("configuration section '{section}' is not configured")]
    NotConfigured { section: String },

    #[error("invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}
