//! HTTP Headers Utility

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use crate::defaults;
use crate::error::LlmError;

/// HTTP header builder for API requests
#[derive(Debug, Default)]
pub struct HttpHeaderBuilder {
    headers: HeaderMap,
}

impl HttpHeaderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bearer_auth(self, token: &SecretString) -> Result<Self, LlmError> {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
            .map_err(|e| LlmError::ConfigurationError(format!("Invalid API key format: {e}")))?;
        value.set_sensitive(true);
        Ok(self.with_value(AUTHORIZATION, value))
    }

    /// Authorization through a named header (Anthropic `x-api-key`).
    pub fn with_key_header(self, name: &'static str, token: &SecretString) -> Result<Self, LlmError> {
        let mut value = HeaderValue::from_str(token.expose_secret())
            .map_err(|e| LlmError::ConfigurationError(format!("Invalid API key format: {e}")))?;
        value.set_sensitive(true);
        Ok(self.with_value(HeaderName::from_static(name), value))
    }

    pub fn with_json_content_type(self) -> Self {
        self.with_value(CONTENT_TYPE, HeaderValue::from_static("application/json"))
    }

    pub fn with_event_stream_accept(self) -> Self {
        self.with_value(ACCEPT, HeaderValue::from_static("text/event-stream"))
    }

    pub fn with_static(self, name: &'static str, value: &'static str) -> Self {
        self.with_value(HeaderName::from_static(name), HeaderValue::from_static(value))
    }

    fn with_value(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn build(self) -> HeaderMap {
        self.headers
    }
}

/// Provider-specific header sets.
pub struct ProviderHeaders;

impl ProviderHeaders {
    /// Bearer-authenticated JSON (OpenAI protocol, Cohere).
    pub fn bearer(api_key: &SecretString, stream: bool) -> Result<HeaderMap, LlmError> {
        let builder = HttpHeaderBuilder::new()
            .with_bearer_auth(api_key)?
            .with_json_content_type();
        Ok(Self::maybe_stream(builder, stream).build())
    }

    pub fn anthropic(api_key: &SecretString, stream: bool) -> Result<HeaderMap, LlmError> {
        let builder = HttpHeaderBuilder::new()
            .with_key_header("x-api-key", api_key)?
            .with_static("anthropic-version", defaults::anthropic::API_VERSION)
            .with_json_content_type();
        Ok(Self::maybe_stream(builder, stream).build())
    }

    fn maybe_stream(builder: HttpHeaderBuilder, stream: bool) -> HttpHeaderBuilder {
        if stream {
            builder.with_event_stream_accept()
        } else {
            builder
        }
    }
}
