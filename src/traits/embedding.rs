//! Embedding capability.

use async_trait::async_trait;

use crate::error::LlmError;
use crate::types::{EmbeddingRequest, EmbeddingResponse};

#[async_trait]
pub trait EmbeddingCapability: Send + Sync {
    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, LlmError>;
}
