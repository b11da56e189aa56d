//! Wire shape of one `action=query` response and its mapping to photos.

use std::collections::BTreeMap;

use otd_core::date::normalize_date;
use otd_core::entities::{NO_DESCRIPTION, PhotoRecord};
use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Default, Deserialize)]
pub struct QueryResponse {
    #[serde(rename = "continue")]
    pub continuation: Option<Map<String, Value>>,
    pub query: Option<QueryBody>,
    pub error: Option<ApiErrorBody>,
}

#[derive(Debug, Default, Deserialize)]
pub struct QueryBody {
    #[serde(default)]
    pub pages: BTreeMap<String, ApiPage>,
}

/// MediaWiki reports request errors in a 200 body.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub info: String,
}

/// One entry of `query.pages`. Missing or invalid titles come back
/// under negative keys without a `pageid`.
#[derive(Debug, Deserialize)]
pub struct ApiPage {
    pub pageid: Option<u64>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub imageinfo: Vec<ImageInfo>,
}

#[derive(Debug, Deserialize)]
pub struct ImageInfo {
    pub url: Option<String>,
    pub descriptionurl: Option<String>,
    #[serde(default)]
    pub extmetadata: ExtMetadata,
}

#[derive(Debug, Default, Deserialize)]
pub struct ExtMetadata {
    #[serde(rename = "DateTimeOriginal")]
    pub date_time_original: Option<MetadataField>,
    #[serde(rename = "ImageDescription")]
    pub image_description: Option<MetadataField>,
}

#[derive(Debug, Deserialize)]
pub struct MetadataField {
    #[serde(default)]
    pub value: Value,
}

impl MetadataField {
    fn text(&self) -> Option<String> {
        match &self.value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

impl QueryResponse {
    /// Photos on this page that carry an image and a full date, in map key order.
    #[must_use]
    pub fn photos(&self) -> Vec<PhotoRecord> {
        self.query
            .iter()
            .flat_map(|q| q.pages.values())
            .filter_map(ApiPage::to_photo)
            .collect()
    }
}

impl ApiPage {
    /// First `imageinfo` entry as a record, or `None` when the page is
    /// missing, has no image URL, or its original date does not normalize.
    #[must_use]
    pub fn to_photo(&self) -> Option<PhotoRecord> {
        let Some(pageid) = self.pageid else {
            tracing::debug!(title = %self.title, "skipping page without id");
            return None;
        };
        let info = self.imageinfo.first()?;
        let (Some(image_url), Some(source_page_url)) = (&info.url, &info.descriptionurl) else {
            tracing::debug!(pageid, "skipping page without image urls");
            return None;
        };

        let raw_date = info
            .extmetadata
            .date_time_original
            .as_ref()
            .and_then(MetadataField::text);
        let Some(date) = normalize_date(raw_date.as_deref()) else {
            tracing::trace!(pageid, raw = ?raw_date, "skipping page without full date");
            return None;
        };

        let description = info
            .extmetadata
            .image_description
            .as_ref()
            .and_then(MetadataField::text)
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| NO_DESCRIPTION.to_string());

        Some(PhotoRecord {
            id: pageid,
            title: self.title.clone(),
            image_url: image_url.clone(),
            source_page_url: source_page_url.clone(),
            description,
            date,
        })
    }
}
