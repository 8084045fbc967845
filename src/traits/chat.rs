//! Chat capability.

use async_trait::async_trait;

use crate::error::LlmError;
use crate::streaming::PromptStream;
use crate::types::{ChatRequest, PromptResponse};

/// A fully mapped native request, ready to send.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRequest {
    pub url: String,
    pub body: serde_json::Value,
}

#[async_trait]
pub trait ChatCapability: Send + Sync {
    /// Provider identifier used in logs and error messages.
    fn provider_id(&self) -> &str;

    /// Map `request` to the provider's wire format without sending it.
    fn build_request(&self, request: &ChatRequest) -> Result<ProviderRequest, LlmError>;

    async fn chat(&self, request: ChatRequest) -> Result<PromptResponse, LlmError>;

    /// Stream a completion. Failures, including ones before the first byte,
    /// arrive as the stream's terminal `Error` event.
    fn chat_stream(&self, request: ChatRequest) -> PromptStream;
}
