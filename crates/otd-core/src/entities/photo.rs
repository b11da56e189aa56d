use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::date::CanonicalDate;

/// Placeholder used when a catalog record carries no description.
pub const NO_DESCRIPTION: &str = "Geen beschrijving beschikbaar.";

/// One photo from the catalog, with a verified date.
///
/// Records whose date metadata does not normalize are never built.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PhotoRecord {
    /// Catalog page id.
    pub id: u64,
    pub title: String,
    pub image_url: String,
    /// Catalog page describing the file (license, uploader, full metadata).
    pub source_page_url: String,
    /// Raw description; may contain markup.
    pub description: String,
    pub date: CanonicalDate,
}
