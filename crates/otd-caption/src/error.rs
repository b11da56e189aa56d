//! Caption error types.

use thiserror::Error;

/// Any of these fails the whole enrichment; there are no partial captions.
#[derive(Debug, Error)]
pub enum CaptionError {
    /// No API key after config layering and env fallback.
    #[error("caption service API key is not configured")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// The response carried no candidate text.
    #[error("caption service returned no text")]
    EmptyResponse,

    /// Candidate text is not JSON, or validated JSON did not deserialize.
    #[error("parse error: {0}")]
    Parse(String),

    /// Candidate JSON does not match the caption schema.
    #[error("caption output failed schema validation: {errors:?}")]
    SchemaViolation { errors: Vec<String> },

    /// The caption schema itself could not be compiled.
    #[error("schema error: {0}")]
    Schema(String),
}
