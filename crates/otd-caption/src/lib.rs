//! # otd-caption
//!
//! Turns event groups into headlines and match lines with one call to a
//! generative language model.
//!
//! The request carries each group's date and its cleaned photo descriptions.
//! The model is asked for JSON constrained by [`schema::response_schema`];
//! the reply is validated against the `schemars` schema of
//! `Vec<CaptionResult>` before it is trusted. Any failure fails the batch.

mod error;
pub mod prompt;
pub mod schema;
pub mod wire;

pub use error::CaptionError;

use std::time::Duration;

use otd_config::CaptionConfig;
use otd_core::entities::{CaptionResult, EventGroup};
use otd_core::errors::SourceError;
use otd_core::source::Captioner;

use crate::prompt::{build_prompt, caption_payload};
use crate::schema::{CaptionSchema, response_schema};
use crate::wire::{ErrorEnvelope, GenerateContentRequest, GenerateContentResponse};

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-goog-api-key";

/// Client for the `generateContent` endpoint.
pub struct CaptionClient {
    http: reqwest::Client,
    url: String,
    model: String,
    api_key: Option<String>,
    schema: CaptionSchema,
}

impl CaptionClient {
    /// Build a client. A missing API key is accepted here and reported on use.
    ///
    /// # Errors
    ///
    /// Returns [`CaptionError::Http`] if the HTTP client cannot be built and
    /// [`CaptionError::Schema`] if the caption schema does not compile.
    pub fn new(config: &CaptionConfig) -> Result<Self, CaptionError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("otd/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        let api_key = config
            .is_configured()
            .then(|| config.api_key.trim().to_string());
        if api_key.is_none() {
            tracing::warn!("no caption API key configured; caption requests will fail");
        }
        Ok(Self {
            http,
            url: generate_content_url(&config.endpoint, &config.model),
            model: config.model.clone(),
            api_key,
            schema: CaptionSchema::new()?,
        })
    }

    /// Whether an API key is available.
    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Caption every group in one model call.
    ///
    /// An empty slice returns an empty batch without a request.
    ///
    /// # Errors
    ///
    /// Returns [`CaptionError`] for a missing key, transport or status
    /// failure, empty model output, malformed JSON, or a schema violation.
    pub async fn caption_groups(
        &self,
        groups: &[EventGroup],
    ) -> Result<Vec<CaptionResult>, CaptionError> {
        if groups.is_empty() {
            return Ok(Vec::new());
        }
        let api_key = self.api_key.as_deref().ok_or(CaptionError::MissingApiKey)?;

        let prompt = build_prompt(&caption_payload(groups))?;
        let request = GenerateContentRequest::json_prompt(prompt, response_schema());
        tracing::debug!(model = %self.model, groups = groups.len(), "requesting captions");

        let resp = self
            .http
            .post(&self.url)
            .header(API_KEY_HEADER, api_key)
            .json(&request)
            .send()
            .await?;
        let resp = check_response(resp).await?;
        let body: GenerateContentResponse = resp.json().await?;

        let text = body.text().ok_or(CaptionError::EmptyResponse)?;
        let captions = self.schema.parse_captions(&text)?;
        tracing::debug!(captions = captions.len(), "captions received");
        Ok(captions)
    }
}

impl Captioner for CaptionClient {
    async fn caption(&self, groups: &[EventGroup]) -> Result<Vec<CaptionResult>, SourceError> {
        self.caption_groups(groups).await.map_err(Into::into)
    }
}

/// `{endpoint}/models/{model}:generateContent`.
#[must_use]
pub fn generate_content_url(endpoint: &str, model: &str) -> String {
    format!(
        "{}/models/{}:generateContent",
        endpoint.trim_end_matches('/'),
        model
    )
}

/// Map 429 and other non-success statuses, preferring the service's own
/// error message over the raw body.
async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, CaptionError> {
    let status = resp.status();
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        let retry_after_secs = resp
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(60);
        return Err(CaptionError::RateLimited { retry_after_secs });
    }
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorEnvelope>(&body)
            .map(|e| format!("{}: {}", e.error.status, e.error.message))
            .unwrap_or(body);
        return Err(CaptionError::Api {
            status: status.as_u16(),
            message,
        });
    }
    Ok(resp)
}
