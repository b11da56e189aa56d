//! Query-string construction for the MediaWiki action API.

use otd_config::CatalogConfig;
use serde_json::{Map, Value};

use crate::error::CatalogError;

/// Ordered request parameters. Later duplicates never occur; merging
/// replaces in place.
pub type Params = Vec<(String, String)>;

/// Fixed parameters of the archive search.
#[must_use]
pub fn base_params(config: &CatalogConfig) -> Params {
    [
        ("action", "query".to_string()),
        ("format", "json".to_string()),
        ("origin", "*".to_string()),
        ("generator", "search".to_string()),
        ("gsrnamespace", config.namespace.to_string()),
        ("gsrlimit", config.page_size.to_string()),
        ("gsrsearch", config.search.clone()),
        ("prop", "imageinfo".to_string()),
        ("iiprop", "url|extmetadata".to_string()),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

/// Overlay a continuation object on `base`.
///
/// Keys already present take the continuation value; new keys are appended
/// in the continuation's order. Scalars are echoed as their JSON text.
///
/// # Errors
///
/// Returns [`CatalogError::Parse`] when a continuation value is an array,
/// object, or null.
pub fn merge_continuation(
    base: &Params,
    continuation: &Map<String, Value>,
) -> Result<Params, CatalogError> {
    let mut merged = base.clone();
    for (key, value) in continuation {
        let value = match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            other => {
                return Err(CatalogError::Parse(format!(
                    "continuation key '{key}' has non-scalar value {other}"
                )));
            }
        };
        match merged.iter_mut().find(|(k, _)| k == key) {
            Some(slot) => slot.1 = value,
            None => merged.push((key.clone(), value)),
        }
    }
    Ok(merged)
}

/// Append `params` to `endpoint` as a percent-encoded query string.
#[must_use]
pub fn build_url(endpoint: &str, params: &Params) -> String {
    let query = params
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    let separator = if endpoint.contains('?') { '&' } else { '?' };
    format!("{endpoint}{separator}{query}")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn lookup<'a>(params: &'a Params, key: &str) -> Option<&'a str> {
        params.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    #[test]
    fn base_params_match_archive_search() {
        let params = base_params(&CatalogConfig::default());
        assert_eq!(lookup(&params, "action"), Some("query"));
        assert_eq!(lookup(&params, "origin"), Some("*"));
        assert_eq!(lookup(&params, "generator"), Some("search"));
        assert_eq!(lookup(&params, "gsrnamespace"), Some("6"));
        assert_eq!(lookup(&params, "gsrlimit"), Some("500"));
        assert_eq!(
            lookup(&params, "gsrsearch"),
            Some("\"Feyenoord\" \"Nationaal Archief\"")
        );
        assert_eq!(lookup(&params, "iiprop"), Some("url|extmetadata"));
    }

    #[test]
    fn continuation_overrides_and_extends() {
        let base = base_params(&CatalogConfig::default());
        let continuation =
            json!({ "gsroffset": 500, "continue": "gsroffset||", "gsrlimit": "250" });
        let merged = merge_continuation(&base, continuation.as_object().unwrap()).unwrap();

        assert_eq!(merged.len(), base.len() + 2);
        assert_eq!(lookup(&merged, "gsrlimit"), Some("250"));
        assert_eq!(lookup(&merged, "gsroffset"), Some("500"));
        assert_eq!(lookup(&merged, "continue"), Some("gsroffset||"));
        // Base keys keep their position.
        assert_eq!(merged[0].0, "action");
    }

    #[test]
    fn nested_continuation_value_is_rejected() {
        let base = base_params(&CatalogConfig::default());
        let continuation = json!({ "gsroffset": { "x": 1 } });
        let err = merge_continuation(&base, continuation.as_object().unwrap()).unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn url_is_percent_encoded() {
        let params: Params = vec![
            ("gsrsearch".into(), "\"Feyenoord\" \"Nationaal Archief\"".into()),
            ("iiprop".into(), "url|extmetadata".into()),
            ("origin".into(), "*".into()),
        ];
        let url = build_url("https://commons.wikimedia.org/w/api.php", &params);
        assert_eq!(
            url,
            "https://commons.wikimedia.org/w/api.php?gsrsearch=%22Feyenoord%22%20%22Nationaal%20Archief%22&iiprop=url%7Cextmetadata&origin=%2A"
        );
    }

    #[test]
    fn url_respects_existing_query() {
        let params: Params = vec![("action".into(), "query".into())];
        assert_eq!(
            build_url("http://localhost/api.php?debug=1", &params),
            "http://localhost/api.php?debug=1&action=query"
        );
    }
}
