//! Error types for the core pipeline.
//!
//! Client crates define their own errors (`CatalogError`, `CaptionError`).
//! The session only sees them as boxed [`SourceError`]s, wrapped in a
//! [`PipelineError`] that records which stage failed.

use thiserror::Error;

/// Boxed error returned by [`crate::source`] implementations.
pub type SourceError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised by core validation.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A month name or number was not recognised.
    #[error("Unknown month: {0}")]
    UnknownMonth(String),

    /// A day does not exist in the given month (leap reference year).
    #[error("Invalid day {day} for month {month}")]
    InvalidDay { month: u32, day: u32 },

    /// Data failed validation (format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),
}

/// A query pipeline failure.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Fetching the photo catalog failed before any page was received.
    #[error("photo catalog fetch failed: {0}")]
    Fetch(#[source] SourceError),

    /// The caption service failed; no partial captions are kept.
    #[error("processing failed: {0}")]
    Processing(#[source] SourceError),
}
