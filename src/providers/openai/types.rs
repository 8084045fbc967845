//! OpenAI protocol response bodies.

use serde::Deserialize;

use crate::types::{Embedding, Usage};

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiChatResponse {
    #[serde(default)]
    pub choices: Vec<OpenAiChoice>,
    pub usage: Option<OpenAiUsage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiChoice {
    pub message: OpenAiResponseMessage,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiResponseMessage {
    pub content: Option<String>,
}

/// Token counts as reported by the OpenAI protocol.
///
/// The reported `total_tokens` is ignored; [`Usage`] recomputes it.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct OpenAiUsage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
}

impl From<OpenAiUsage> for Usage {
    fn from(usage: OpenAiUsage) -> Self {
        Usage::new(usage.prompt_tokens, usage.completion_tokens)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiEmbeddingResponse {
    pub data: Vec<Embedding>,
    #[serde(default)]
    pub usage: OpenAiEmbeddingUsage,
}

/// VoyageAI reports only `total_tokens`; OpenAI and Mixedbread report both.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct OpenAiEmbeddingUsage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

impl From<OpenAiEmbeddingUsage> for Usage {
    fn from(usage: OpenAiEmbeddingUsage) -> Self {
        Usage::flat(usage.total_tokens.max(usage.prompt_tokens))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiErrorBody {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: Option<String>,
}
