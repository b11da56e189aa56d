//! Catalog error types.

use thiserror::Error;

/// Errors from walking the photo catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Transport failure or undecodable body.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status, or a MediaWiki `error` object in a 200 body.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code; 200 for in-body MediaWiki errors.
        status: u16,
        message: String,
    },

    /// A response could not be turned into request parameters or records.
    #[error("parse error: {0}")]
    Parse(String),

    /// 429 Too Many Requests.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds the server asked us to wait.
        retry_after_secs: u64,
    },
}
