//! Request transformation
//!
//! Converts unified request structs into provider-specific JSON bodies.

use crate::error::LlmError;
use crate::types::{ChatRequest, EmbeddingRequest};

pub trait RequestTransformer: Send + Sync {
    fn provider_id(&self) -> &str;

    fn transform_chat(&self, req: &ChatRequest) -> Result<serde_json::Value, LlmError>;

    fn transform_embedding(&self, _req: &EmbeddingRequest) -> Result<serde_json::Value, LlmError> {
        Err(LlmError::UnsupportedOperation(format!(
            "{} does not support embeddings",
            self.provider_id()
        )))
    }
}
