//! Seams between the pipeline and its network collaborators.

use std::future::Future;

use crate::entities::{CaptionResult, EventGroup, PhotoRecord};
use crate::errors::SourceError;

/// Result of walking the whole photo catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFetch {
    /// Photos with a verified date, in page order.
    pub photos: Vec<PhotoRecord>,
    /// Number of pages received successfully.
    pub pages: usize,
    /// `false` when pagination stopped on an error after the first page.
    pub complete: bool,
}

/// Provides the full photo catalog.
pub trait PhotoSource: Send + Sync {
    /// Fetch every photo. Called at most once per session cache epoch.
    fn fetch_photos(&self) -> impl Future<Output = Result<CatalogFetch, SourceError>> + Send;
}

/// Produces one caption per event group.
pub trait Captioner: Send + Sync {
    /// Caption all groups in one call. Any failure fails the whole batch.
    fn caption(
        &self,
        groups: &[EventGroup],
    ) -> impl Future<Output = Result<Vec<CaptionResult>, SourceError>> + Send;
}
