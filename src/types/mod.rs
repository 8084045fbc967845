//! Shared request and response types.

pub mod chat;
pub mod common;
pub mod embedding;
pub mod options;

pub use chat::{ChatMessage, ChatRequest, MessageRole, PromptResponse, split_system_instruction};
pub use common::{FinishReason, Price, Usage};
pub use embedding::{
    Embedding, EmbeddingInput, EmbeddingInputType, EmbeddingParams, EmbeddingRequest,
    EmbeddingResponse, EncodingFormat,
};
pub use options::{ApiOptions, PromptOptions, ResponseFormat};
