//! Turning a raw api.php reply into a decoded page.

use reqwest::{Response, StatusCode, header};
use serde::de::DeserializeOwned;

use crate::error::CatalogError;

/// Wait suggested to the caller when a 429 carries no usable `Retry-After`.
pub const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Decode a successful reply as JSON.
///
/// Throttling becomes [`CatalogError::RateLimited`]; any other non-2xx
/// status becomes [`CatalogError::Api`] with the body, or the status
/// reason when the body is empty.
pub async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, CatalogError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp.json().await?);
    }
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(CatalogError::RateLimited {
            retry_after_secs: retry_after_secs(&resp),
        });
    }

    let body = resp.text().await.unwrap_or_default();
    Err(CatalogError::Api {
        status: status.as_u16(),
        message: failure_message(status, body),
    })
}

fn failure_message(status: StatusCode, body: String) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return status.canonical_reason().unwrap_or("unknown status").to_string();
    }
    trimmed.to_string()
}

fn retry_after_secs(resp: &Response) -> u64 {
    resp.headers()
        .get(header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    use super::*;

    fn reply(status: u16, retry_after: Option<&str>, body: &'static str) -> Response {
        let mut builder = ::http::Response::builder().status(status);
        if let Some(value) = retry_after {
            builder = builder.header("Retry-After", value);
        }
        Response::from(builder.body(body).unwrap())
    }

    #[tokio::test]
    async fn decodes_success_body() {
        let value: Value = read_json(reply(200, None, r#"{"batchcomplete":""}"#))
            .await
            .unwrap();
        assert_eq!(value["batchcomplete"], "");
    }

    #[tokio::test]
    async fn throttling_honours_retry_after() {
        let err = read_json::<Value>(reply(429, Some(" 120 "), ""))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::RateLimited {
                retry_after_secs: 120
            }
        ));
    }

    #[tokio::test]
    async fn throttling_without_usable_header_uses_default() {
        for header in [None, Some("Wed, 21 Oct 2026 07:28:00 GMT")] {
            let err = read_json::<Value>(reply(429, header, "")).await.unwrap_err();
            assert!(matches!(
                err,
                CatalogError::RateLimited { retry_after_secs }
                    if retry_after_secs == DEFAULT_RETRY_AFTER_SECS
            ));
        }
    }

    #[tokio::test]
    async fn server_error_without_body_uses_reason() {
        let err = read_json::<Value>(reply(503, None, "  ")).await.unwrap_err();
        match err {
            CatalogError::Api { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "Service Unavailable");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn server_error_keeps_body() {
        let err = read_json::<Value>(reply(502, None, "upstream down\n"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("upstream down"));
    }

    #[tokio::test]
    async fn html_on_success_is_a_decode_error() {
        let err = read_json::<Value>(reply(200, None, "<html>maintenance</html>"))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Http(_)));
    }
}
