//! Embedding entry point.

use crate::error::LlmError;
use crate::providers::openai::OpenAiClient;
use crate::providers::{EmbeddingProvider, mixedbread, voyageai};
use crate::traits::EmbeddingCapability;
use crate::types::{ApiOptions, EmbeddingInput, EmbeddingParams, EmbeddingRequest, EmbeddingResponse};

fn embedding_client(
    provider: &EmbeddingProvider,
    api: &ApiOptions,
) -> Result<Box<dyn EmbeddingCapability>, LlmError> {
    Ok(match provider {
        EmbeddingProvider::OpenAi | EmbeddingProvider::Unknown(_) => {
            Box::new(OpenAiClient::from_api_options(api)?)
        }
        EmbeddingProvider::VoyageAi => Box::new(voyageai::client(api)?),
        EmbeddingProvider::MixedbreadAi => Box::new(mixedbread::client(api)?),
    })
}

/// Embed one text, several texts, or pre-tokenized input.
///
/// Unknown provider names are served by OpenAI.
pub async fn embed(
    input: impl Into<EmbeddingInput>,
    provider: impl Into<EmbeddingProvider>,
    params: EmbeddingParams,
    api: &ApiOptions,
) -> Result<EmbeddingResponse, LlmError> {
    let provider = provider.into();
    let input = input.into();
    tracing::debug!(
        provider = %provider,
        resolved = %provider.resolved(),
        inputs = input.len(),
        hosting_location = ?api.hosting_location,
        "dispatching embedding"
    );
    let client = embedding_client(&provider, api)?;
    client.embed(EmbeddingRequest::new(input).with_params(params)).await
}
