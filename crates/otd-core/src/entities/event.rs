use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::date::CanonicalDate;
use crate::entities::PhotoRecord;

/// Photos sharing one historical date, all on the queried day-of-year.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct EventGroup {
    pub date: CanonicalDate,
    pub photos: Vec<PhotoRecord>,
}

/// A captioned event ready for presentation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DisplayEvent {
    pub date: CanonicalDate,
    pub headline: String,
    /// `"Feyenoord - Telstar, 2-1"` style line, or empty.
    pub match_info: String,
    /// Representative photo picked from the group.
    pub image: PhotoRecord,
    pub source_url: String,
    pub photo_count: usize,
}
