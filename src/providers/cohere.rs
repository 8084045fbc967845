//! Cohere
//!
//! Non-streaming `generate` endpoint. The chat history is flattened into a
//! single prompt; streaming callers get the whole completion as one chunk.

use async_trait::async_trait;
use secrecy::SecretString;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::defaults;
use crate::error::{LlmError, read_json_response};
use crate::pricing::PricingContext;
use crate::streaming::{PromptStream, StreamFactory};
use crate::traits::{ChatCapability, ProviderRequest, RequestTransformer};
use crate::types::{ApiOptions, ChatRequest, FinishReason, PromptResponse, Usage};
use crate::utils::{ProviderHeaders, RequestClock, join_url};

#[derive(Debug, Clone, Deserialize)]
struct CohereGenerateResponse {
    #[serde(default)]
    generations: Vec<CohereGeneration>,
    meta: Option<CohereMeta>,
}

#[derive(Debug, Clone, Deserialize)]
struct CohereGeneration {
    text: String,
}

#[derive(Debug, Clone, Deserialize)]
struct CohereMeta {
    tokens: Option<CohereTokens>,
    billed_units: Option<CohereTokens>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct CohereTokens {
    input_tokens: Option<f64>,
    output_tokens: Option<f64>,
}

impl CohereMeta {
    fn usage(&self) -> Usage {
        // counts arrive as JSON numbers that may be floats
        let count = |n: Option<f64>| n.unwrap_or(0.0).max(0.0) as u32;
        self.tokens
            .or(self.billed_units)
            .map(|t| Usage::new(count(t.input_tokens), count(t.output_tokens)))
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct CohereRequestTransformer;

impl RequestTransformer for CohereRequestTransformer {
    fn provider_id(&self) -> &str {
        "cohere"
    }

    fn transform_chat(&self, req: &ChatRequest) -> Result<Value, LlmError> {
        let options = &req.options;
        let prompt = req
            .messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        let mut body = json!({
            "model": req.model_or(defaults::cohere::CHAT_MODEL),
            "prompt": prompt,
            "max_tokens": options.max_tokens.unwrap_or(defaults::cohere::MAX_TOKENS),
            "temperature": options.temperature.unwrap_or(defaults::cohere::TEMPERATURE),
        });
        if let Some(p) = options.top_p {
            body["p"] = json!(p);
        }
        if let Some(penalty) = options.frequency_penalty {
            body["frequency_penalty"] = json!(penalty);
        }
        if let Some(penalty) = options.presence_penalty {
            body["presence_penalty"] = json!(penalty);
        }
        if let Some(seed) = options.seed {
            body["seed"] = json!(seed);
        }
        if let Some(stop) = &options.stop {
            body["stop_sequences"] = json!(stop);
        }
        Ok(body)
    }
}

#[derive(Clone)]
pub struct CohereClient {
    http_client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    transformer: CohereRequestTransformer,
}

impl std::fmt::Debug for CohereClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CohereClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl CohereClient {
    pub fn new(api_key: SecretString, http_client: reqwest::Client) -> Self {
        Self {
            http_client,
            api_key,
            base_url: defaults::cohere::BASE_URL.to_string(),
            transformer: CohereRequestTransformer,
        }
    }

    pub fn from_api_options(api: &ApiOptions) -> Result<Self, LlmError> {
        let api_key = api.resolve_api_key("cohere", defaults::cohere::API_KEY_ENV)?;
        Ok(Self::new(api_key, api.http_client()?)
            .with_base_url(api.base_url_or(defaults::cohere::BASE_URL)))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn generate(&self, request: ChatRequest, clock: RequestClock) -> Result<PromptResponse, LlmError> {
        let native = self.build_request(&request)?;
        tracing::debug!(provider = "cohere", url = %native.url, "sending generate request");

        let response = self
            .http_client
            .post(&native.url)
            .headers(ProviderHeaders::bearer(&self.api_key, false)?)
            .json(&native.body)
            .send()
            .await?;
        let completion: CohereGenerateResponse = read_json_response("cohere", response).await?;

        let usage = completion.meta.as_ref().map(CohereMeta::usage).unwrap_or_default();
        let price = PricingContext::new("cohere", request.model_or(defaults::cohere::CHAT_MODEL))
            .price(&usage);
        Ok(PromptResponse {
            message: completion.generations.into_iter().map(|g| g.text).collect(),
            usage,
            finish_reason: Some(FinishReason::from(defaults::cohere::FINISH_REASON)),
            elapsed_ms: clock.elapsed_ms(),
            price,
        })
    }
}

#[async_trait]
impl ChatCapability for CohereClient {
    fn provider_id(&self) -> &str {
        "cohere"
    }

    fn build_request(&self, request: &ChatRequest) -> Result<ProviderRequest, LlmError> {
        Ok(ProviderRequest {
            url: join_url(&self.base_url, "/generate"),
            body: self.transformer.transform_chat(request)?,
        })
    }

    async fn chat(&self, request: ChatRequest) -> Result<PromptResponse, LlmError> {
        self.generate(request, RequestClock::start()).await
    }

    /// `generate` has no streaming mode: one chunk with the full text, then stop.
    fn chat_stream(&self, request: ChatRequest) -> PromptStream {
        let clock = RequestClock::start();
        let client = self.clone();
        StreamFactory::single_chunk_stream(
            async move { client.generate(request, clock).await },
            clock,
        )
    }
}
