//! Mapping of non-success `generateContent` replies to [`ModelError`].
//!
//! Google APIs report failures as
//! `{"error": {"code": 429, "message": "...", "status": "RESOURCE_EXHAUSTED", "details": [...]}}`.
//! Quota errors carry a `google.rpc.RetryInfo` detail with a `retryDelay`
//! such as `"37s"`, which takes precedence over the `Retry-After` header.

use serde::Deserialize;

use crate::error::ModelError;

const DEFAULT_RETRY_AFTER_SECS: u64 = 60;
const RETRY_INFO_TYPE: &str = "type.googleapis.com/google.rpc.RetryInfo";

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    status: Option<String>,
    #[serde(default)]
    details: Vec<ErrorDetail>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorDetail {
    #[serde(rename = "@type")]
    type_url: Option<String>,
    retry_delay: Option<String>,
}

/// Pass a successful response through; turn anything else into a
/// [`ModelError`].
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ModelError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let header_retry = header_retry_after(&resp);
    let text = resp.text().await.unwrap_or_default();
    let body = serde_json::from_str::<ErrorEnvelope>(&text)
        .ok()
        .map(|envelope| envelope.error);

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        let retry_after_secs = body
            .as_ref()
            .and_then(retry_delay_secs)
            .or(header_retry)
            .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
        return Err(ModelError::RateLimited { retry_after_secs });
    }

    let message = match body {
        Some(ErrorBody {
            message,
            status: Some(code),
            ..
        }) => format!("{code}: {message}"),
        Some(body) if !body.message.is_empty() => body.message,
        _ => text.trim().to_string(),
    };
    Err(ModelError::Api {
        status: status.as_u16(),
        message,
    })
}

fn header_retry_after(resp: &reqwest::Response) -> Option<u64> {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}

/// `retryDelay` is a protobuf duration string: decimal seconds with an `s`
/// suffix. Fractions round up.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn retry_delay_secs(body: &ErrorBody) -> Option<u64> {
    body.details
        .iter()
        .filter(|d| d.type_url.as_deref() == Some(RETRY_INFO_TYPE))
        .find_map(|d| d.retry_delay.as_deref())
        .and_then(|delay| delay.strip_suffix('s'))
        .and_then(|secs| secs.parse::<f64>().ok())
        .filter(|secs| secs.is_finite() && *secs >= 0.0)
        .map(|secs| secs.ceil() as u64)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const INVALID_KEY: &str = r#"{
        "error": {
            "code": 400,
            "message": "API key not valid. Please pass a valid API key.",
            "status": "INVALID_ARGUMENT",
            "details": [
                {
                    "@type": "type.googleapis.com/google.rpc.ErrorInfo",
                    "reason": "API_KEY_INVALID",
                    "domain": "googleapis.com"
                }
            ]
        }
    }"#;

    const QUOTA_EXCEEDED: &str = r#"{
        "error": {
            "code": 429,
            "message": "You exceeded your current quota.",
            "status": "RESOURCE_EXHAUSTED",
            "details": [
                {"@type": "type.googleapis.com/google.rpc.QuotaFailure", "violations": []},
                {"@type": "type.googleapis.com/google.rpc.RetryInfo", "retryDelay": "36.5s"}
            ]
        }
    }"#;

    fn response(status: u16, body: &'static str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body(body)
                .unwrap(),
        )
    }

    fn response_with_retry_after(status: u16, value: &str, body: &'static str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .header("Retry-After", value)
                .body(body)
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn success_passes_through() {
        let resp = check_response(response(200, "{}")).await.unwrap();
        assert_eq!(resp.status(), 200);
    }

    #[tokio::test]
    async fn google_error_body_becomes_status_and_message() {
        let err = check_response(response(400, INVALID_KEY)).await.unwrap_err();
        match err {
            ModelError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(
                    message,
                    "INVALID_ARGUMENT: API key not valid. Please pass a valid API key."
                );
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_json_error_body_is_kept_as_text() {
        let err = check_response(response(502, "  Bad Gateway\n")).await.unwrap_err();
        match err {
            ModelError::Api { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "Bad Gateway");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn quota_error_uses_retry_info_over_header() {
        let err = check_response(response_with_retry_after(429, "5", QUOTA_EXCEEDED))
            .await
            .unwrap_err();
        assert!(matches!(err, ModelError::RateLimited { retry_after_secs: 37 }));
    }

    #[tokio::test]
    async fn rate_limit_falls_back_to_header_then_default() {
        let err = check_response(response_with_retry_after(429, "7", ""))
            .await
            .unwrap_err();
        assert!(matches!(err, ModelError::RateLimited { retry_after_secs: 7 }));

        let err = check_response(response_with_retry_after(
            429,
            "Wed, 21 Oct 2026 07:28:00 GMT",
            "",
        ))
        .await
        .unwrap_err();
        assert!(matches!(err, ModelError::RateLimited { retry_after_secs: 60 }));
    }
}
