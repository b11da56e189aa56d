//! # otd-catalog
//!
//! Client for the Wikimedia Commons action API that walks the archive's
//! search results page by page and turns each dated file into a
//! [`PhotoRecord`](otd_core::entities::PhotoRecord).
//!
//! Pagination echoes the server's `continue` object verbatim on top of the
//! fixed search parameters and stops when a response carries none. There is
//! no retry. A failure on the first page is an error; a failure on a later
//! page ends the walk and returns what was collected, marked incomplete.

mod error;
mod http;
pub mod page;
pub mod params;

pub use error::CatalogError;

use std::time::Duration;

use otd_config::CatalogConfig;
use otd_core::errors::SourceError;
use otd_core::source::{CatalogFetch, PhotoSource};
use serde_json::{Map, Value};

use crate::http::read_json;
use crate::page::QueryResponse;
use crate::params::{Params, base_params, build_url, merge_continuation};

/// One successfully decoded catalog page.
#[derive(Debug)]
struct FetchedPage {
    photos: Vec<otd_core::entities::PhotoRecord>,
    continuation: Option<Map<String, Value>>,
}

/// HTTP client for the photo catalog.
pub struct CatalogClient {
    http: reqwest::Client,
    endpoint: String,
    base: Params,
}

impl CatalogClient {
    /// Build a client from catalog configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Http`] if the underlying `reqwest::Client`
    /// cannot be built (for example an invalid user agent).
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            base: base_params(config),
        })
    }

    /// Walk every page of the archive search.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] only when the first page fails. Later
    /// failures yield `Ok` with `complete: false`.
    pub async fn fetch_catalog(&self) -> Result<CatalogFetch, CatalogError> {
        let mut photos = Vec::new();
        let mut pages = 0usize;
        let mut continuation: Option<Map<String, Value>> = None;

        loop {
            match self.fetch_page(continuation.as_ref()).await {
                Ok(page) => {
                    pages += 1;
                    tracing::debug!(
                        page = pages,
                        photos = page.photos.len(),
                        "catalog page received"
                    );
                    photos.extend(page.photos);
                    match page.continuation {
                        Some(next) => continuation = Some(next),
                        None => break,
                    }
                }
                Err(error) if pages == 0 => return Err(error),
                Err(error) => {
                    tracing::warn!(
                        pages,
                        photos = photos.len(),
                        %error,
                        "catalog page failed; returning partial catalog"
                    );
                    return Ok(CatalogFetch {
                        photos,
                        pages,
                        complete: false,
                    });
                }
            }
        }

        tracing::info!(pages, photos = photos.len(), "catalog fetched");
        Ok(CatalogFetch {
            photos,
            pages,
            complete: true,
        })
    }

    /// URL of the page that follows `continuation` (or the first page).
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] for a non-scalar continuation value.
    pub fn page_url(
        &self,
        continuation: Option<&Map<String, Value>>,
    ) -> Result<String, CatalogError> {
        let params = match continuation {
            Some(continuation) => merge_continuation(&self.base, continuation)?,
            None => self.base.clone(),
        };
        Ok(build_url(&self.endpoint, &params))
    }

    async fn fetch_page(
        &self,
        continuation: Option<&Map<String, Value>>,
    ) -> Result<FetchedPage, CatalogError> {
        let url = self.page_url(continuation)?;
        tracing::trace!(%url, "requesting catalog page");
        let data: QueryResponse = read_json(self.http.get(&url).send().await?).await?;

        if let Some(error) = data.error {
            return Err(CatalogError::Api {
                status: 200,
                message: format!("{}: {}", error.code, error.info),
            });
        }

        Ok(FetchedPage {
            photos: data.photos(),
            continuation: data.continuation,
        })
    }
}

impl PhotoSource for CatalogClient {
    async fn fetch_photos(&self) -> Result<CatalogFetch, SourceError> {
        self.fetch_catalog().await.map_err(Into::into)
    }
}
