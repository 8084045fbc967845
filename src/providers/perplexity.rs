//! Perplexity
//!
//! OpenAI protocol at api.perplexity.ai, priced under the `perplexity`
//! catalog identity. Provider-specific fields such as `return_citations`
//! travel in `PromptOptions::extra`.

use crate::defaults;
use crate::error::LlmError;
use crate::providers::openai::{OpenAiClient, OpenAiRequestTransformer};
use crate::types::ApiOptions;

pub fn client(api: &ApiOptions) -> Result<OpenAiClient, LlmError> {
    let api_key = api.resolve_api_key("perplexity", defaults::perplexity::API_KEY_ENV)?;
    Ok(OpenAiClient::new(api_key, api.http_client()?)
        .with_base_url(api.base_url_or(defaults::perplexity::BASE_URL))
        .with_price_identity("perplexity")
        .with_transformer(OpenAiRequestTransformer::new(
            "perplexity",
            defaults::perplexity::CHAT_MODEL,
            defaults::openai::EMBEDDING_MODEL,
        )))
}
