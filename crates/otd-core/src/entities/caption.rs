use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One group as sent to the caption service.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CaptionRequestItem {
    pub date: String,
    pub descriptions: Vec<String>,
}

/// Caption service output for one group.
///
/// `date` is kept verbatim and matched exactly against group dates.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CaptionResult {
    pub date: String,
    pub headline: String,
    /// Match and score, or an empty string.
    pub match_info: String,
}
