//! HTTP error classification.
//!
//! Providers disagree on where they put the human readable message of a
//! failed request (`error.message`, `message`, or just a text body), so every
//! client funnels non-2xx responses through here.

use serde::de::DeserializeOwned;

use super::types::LlmError;

/// Map an HTTP failure onto an [`LlmError`] variant.
pub fn classify_http_error(provider_id: &str, status: u16, body_text: &str) -> LlmError {
    let details = serde_json::from_str::<serde_json::Value>(body_text).ok();
    let message = details
        .as_ref()
        .and_then(extract_error_message)
        .unwrap_or_else(|| {
            let sample: String = body_text.chars().take(200).collect();
            if sample.is_empty() {
                format!("HTTP {status}")
            } else {
                sample
            }
        });

    match status {
        401 | 403 => LlmError::AuthenticationError(format!("{provider_id}: {message}")),
        429 => LlmError::RateLimitError(format!("{provider_id}: {message}")),
        _ => LlmError::ApiError {
            code: status,
            message,
            details,
        },
    }
}

fn extract_error_message(body: &serde_json::Value) -> Option<String> {
    let error = body.get("error");
    error
        .and_then(|e| e.get("message"))
        .or_else(|| body.get("message"))
        .or_else(|| error.filter(|e| e.is_string()))
        .and_then(|m| m.as_str())
        .map(str::to_string)
}

/// Read the body of a failed response and classify it.
pub async fn classify_error_response(provider_id: &str, response: reqwest::Response) -> LlmError {
    let status = response.status().as_u16();
    let text = response.text().await.unwrap_or_default();
    tracing::debug!(provider = provider_id, status, "request rejected by provider");
    classify_http_error(provider_id, status, &text)
}

/// Return the JSON body of a successful response, or the classified error.
pub async fn read_json_response<T: DeserializeOwned>(
    provider_id: &str,
    response: reqwest::Response,
) -> Result<T, LlmError> {
    if !response.status().is_success() {
        return Err(classify_error_response(provider_id, response).await);
    }
    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|e| {
        tracing::warn!(provider = provider_id, error = %e, "unexpected response body");
        LlmError::ParseError(format!("{provider_id} response: {e}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openai_style_error_body() {
        let body = r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error"}}"#;
        match classify_http_error("openai", 401, body) {
            LlmError::AuthenticationError(msg) => {
                assert_eq!(msg, "openai: Incorrect API key provided")
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn anthropic_overloaded_keeps_details() {
        let body = r#"{"type":"error","error":{"type":"overloaded_error","message":"Overloaded"}}"#;
        match classify_http_error("anthropic", 529, body) {
            LlmError::ApiError {
                code,
                message,
                details,
            } => {
                assert_eq!(code, 529);
                assert_eq!(message, "Overloaded");
                assert!(details.is_some());
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn plain_text_and_empty_bodies() {
        assert!(matches!(
            classify_http_error("cohere", 429, "too many"),
            LlmError::RateLimitError(m) if m == "cohere: too many"
        ));
        assert!(matches!(
            classify_http_error("openai", 500, ""),
            LlmError::ApiError { code: 500, ref message, details: None } if message == "HTTP 500"
        ));
    }
}
