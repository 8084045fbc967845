//! VoyageAI embeddings
//!
//! OpenAI-compatible `/embeddings`, flat-billed under the `voyageai` identity.

use crate::defaults;
use crate::error::LlmError;
use crate::pricing::Billing;
use crate::providers::openai::{OpenAiClient, OpenAiRequestTransformer};
use crate::types::ApiOptions;

pub fn client(api: &ApiOptions) -> Result<OpenAiClient, LlmError> {
    let api_key = api.resolve_api_key("voyageai", defaults::voyageai::API_KEY_ENV)?;
    Ok(OpenAiClient::new(api_key, api.http_client()?)
        .with_base_url(api.base_url_or(defaults::voyageai::BASE_URL))
        .with_price_identity(defaults::voyageai::PRICE_IDENTITY)
        .with_embedding_billing(Billing::Flat)
        .with_transformer(OpenAiRequestTransformer::new(
            "voyageai",
            defaults::openai::CHAT_MODEL,
            defaults::voyageai::EMBEDDING_MODEL,
        )))
}
