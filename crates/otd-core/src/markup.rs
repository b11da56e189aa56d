//! Markup stripping for catalog metadata.
//!
//! Wikimedia `extmetadata` values are HTML fragments. Tags are removed
//! without interpreting them; entities are left as-is.

use std::sync::LazyLock;

use regex::Regex;

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid markup tag regex"));

/// Remove every `<...>` tag and trim surrounding whitespace.
#[must_use]
pub fn strip_tags(raw: &str) -> String {
    TAG_RE.replace_all(raw, "").trim().to_string()
}
