//! Core error types.

use thiserror::Error;

use crate::types::FinishReason;

/// Every failure a call can produce.
///
/// Failures are local to one call; nothing here is retried by the library.
/// Use [`LlmError::is_retryable`] and [`LlmError::category`] to decide policy.
#[derive(Debug, Clone, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("Request timed out: {0}")]
    TimeoutError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimitError(String),

    /// Non-2xx response that is neither an auth nor a rate limit failure.
    #[error("API error {code}: {message}")]
    ApiError {
        code: u16,
        message: String,
        details: Option<serde_json::Value>,
    },

    /// An `error` event delivered inside an otherwise healthy stream.
    #[error("{provider} error: {message}")]
    ProviderError {
        provider: String,
        message: String,
        error_type: Option<String>,
    },

    /// SSE decoding or transport failure after the handshake.
    #[error("Stream error: {0}")]
    StreamError(String),

    /// A frame or response body did not have the expected shape.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The stream closed without the provider's canonical stop reason.
    #[error(
        "stream ended without completion (finish reason: {})",
        .finish_reason.as_ref().map(FinishReason::as_str).unwrap_or("none")
    )]
    StreamIncomplete {
        finish_reason: Option<FinishReason>,
        partial_text: String,
    },

    #[error("Missing API key: {0}")]
    MissingApiKey(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("JSON error: {0}")]
    JsonError(String),
}

/// Coarse grouping of [`LlmError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Network,
    Authentication,
    RateLimit,
    Client,
    Server,
    Stream,
    Parsing,
    Configuration,
}

impl LlmError {
    pub fn api_error(code: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::HttpError(_) | Self::TimeoutError(_) | Self::ConnectionError(_) => {
                ErrorCategory::Network
            }
            Self::AuthenticationError(_) | Self::MissingApiKey(_) => ErrorCategory::Authentication,
            Self::RateLimitError(_) => ErrorCategory::RateLimit,
            Self::ApiError { code, .. } if *code >= 500 => ErrorCategory::Server,
            Self::ApiError { .. } => ErrorCategory::Client,
            Self::ProviderError { .. } => ErrorCategory::Server,
            Self::StreamError(_) | Self::StreamIncomplete { .. } => ErrorCategory::Stream,
            Self::ParseError(_) | Self::JsonError(_) => ErrorCategory::Parsing,
            Self::ConfigurationError(_)
            | Self::InvalidParameter(_)
            | Self::UnsupportedOperation(_) => ErrorCategory::Configuration,
        }
    }

    /// Whether repeating the same call could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::HttpError(_)
            | Self::TimeoutError(_)
            | Self::ConnectionError(_)
            | Self::RateLimitError(_)
            | Self::StreamError(_) => true,
            Self::ApiError { code, .. } => matches!(code, 408 | 409 | 500..=599),
            _ => false,
        }
    }

    /// HTTP status behind this error, when there was one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::ApiError { code, .. } => Some(*code),
            Self::RateLimitError(_) => Some(429),
            _ => None,
        }
    }

    /// Text received before a stream failed, if the failure carries any.
    pub fn partial_text(&self) -> Option<&str> {
        match self {
            Self::StreamIncomplete { partial_text, .. } => Some(partial_text),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_follow_status_codes() {
        assert_eq!(LlmError::api_error(404, "nope").category(), ErrorCategory::Client);
        assert_eq!(LlmError::api_error(503, "down").category(), ErrorCategory::Server);
        assert_eq!(
            LlmError::RateLimitError("slow down".into()).category(),
            ErrorCategory::RateLimit
        );
    }

    #[test]
    fn retryability() {
        assert!(LlmError::TimeoutError("t".into()).is_retryable());
        assert!(LlmError::api_error(502, "bad gateway").is_retryable());
        assert!(!LlmError::api_error(400, "bad request").is_retryable());
        assert!(!LlmError::AuthenticationError("no".into()).is_retryable());
        assert!(
            !LlmError::StreamIncomplete {
                finish_reason: Some(FinishReason::Length),
                partial_text: String::new(),
            }
            .is_retryable()
        );
    }

    #[test]
    fn stream_incomplete_message_names_the_reason() {
        let err = LlmError::StreamIncomplete {
            finish_reason: Some(FinishReason::Length),
            partial_text: "Hel".into(),
        };
        assert_eq!(
            err.to_string(),
            "stream ended without completion (finish reason: length)"
        );
        assert_eq!(err.partial_text(), Some("Hel"));

        let err = LlmError::StreamIncomplete {
            finish_reason: None,
            partial_text: String::new(),
        };
        assert!(err.to_string().ends_with("(finish reason: none)"));
    }
}
