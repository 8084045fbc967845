//! OpenAI protocol client.
//!
//! Serves OpenAI itself and every provider that speaks the same protocol
//! (Perplexity for chat, VoyageAI and Mixedbread for embeddings) through a
//! different base URL, provider id and price identity.

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use secrecy::SecretString;

use crate::defaults;
use crate::error::{LlmError, read_json_response};
use crate::pricing::{Billing, PricingContext};
use crate::streaming::{PromptStream, StreamFactory};
use crate::traits::{ChatCapability, EmbeddingCapability, ProviderRequest, RequestTransformer};
use crate::types::{
    ApiOptions, ChatRequest, EmbeddingRequest, EmbeddingResponse, FinishReason, PromptResponse,
    Usage,
};
use crate::utils::{ProviderHeaders, RequestClock, join_url};

use super::streaming::OpenAiEventConverter;
use super::transformers::OpenAiRequestTransformer;
use super::types::{OpenAiChatResponse, OpenAiEmbeddingResponse};

#[derive(Clone)]
pub struct OpenAiClient {
    http_client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    price_identity: String,
    embedding_billing: Billing,
    transformer: OpenAiRequestTransformer,
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("provider_id", &self.transformer.provider_id())
            .field("base_url", &self.base_url)
            .field("price_identity", &self.price_identity)
            .field("default_chat_model", &self.transformer.default_chat_model())
            .finish()
    }
}

impl OpenAiClient {
    /// A client for api.openai.com with OpenAI defaults.
    pub fn new(api_key: SecretString, http_client: reqwest::Client) -> Self {
        Self {
            http_client,
            api_key,
            base_url: defaults::openai::BASE_URL.to_string(),
            price_identity: "openai".to_string(),
            embedding_billing: Billing::PerDirection,
            transformer: OpenAiRequestTransformer::new(
                "openai",
                defaults::openai::CHAT_MODEL,
                defaults::openai::EMBEDDING_MODEL,
            ),
        }
    }

    /// OpenAI configured from call options and the environment.
    pub fn from_api_options(api: &ApiOptions) -> Result<Self, LlmError> {
        let api_key = api.resolve_api_key("openai", defaults::openai::API_KEY_ENV)?;
        let mut client = Self::new(api_key, api.http_client()?)
            .with_base_url(api.base_url_or(defaults::openai::BASE_URL));
        if let Some(identity) = &api.override_provider {
            client = client.with_price_identity(identity.clone());
        }
        Ok(client)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Catalog identity used to price calls.
    pub fn with_price_identity(mut self, identity: impl Into<String>) -> Self {
        self.price_identity = identity.into();
        self
    }

    pub fn with_embedding_billing(mut self, billing: Billing) -> Self {
        self.embedding_billing = billing;
        self
    }

    /// Replace the provider id and default models used for request mapping.
    pub fn with_transformer(mut self, transformer: OpenAiRequestTransformer) -> Self {
        self.transformer = transformer;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn price_identity(&self) -> &str {
        &self.price_identity
    }

    fn headers(&self, stream: bool) -> Result<HeaderMap, LlmError> {
        ProviderHeaders::bearer(&self.api_key, stream)
    }

    fn chat_pricing(&self, request: &ChatRequest) -> PricingContext {
        PricingContext::new(
            self.price_identity.clone(),
            request.model_or(self.transformer.default_chat_model()),
        )
    }

    fn stream_request(&self, request: &ChatRequest) -> Result<reqwest::RequestBuilder, LlmError> {
        let native = self.build_request(request)?;
        Ok(self
            .http_client
            .post(native.url)
            .headers(self.headers(true)?)
            .json(&native.body))
    }
}

#[async_trait]
impl ChatCapability for OpenAiClient {
    fn provider_id(&self) -> &str {
        self.transformer.provider_id()
    }

    fn build_request(&self, request: &ChatRequest) -> Result<ProviderRequest, LlmError> {
        Ok(ProviderRequest {
            url: join_url(&self.base_url, "/chat/completions"),
            body: self.transformer.transform_chat(request)?,
        })
    }

    async fn chat(&self, request: ChatRequest) -> Result<PromptResponse, LlmError> {
        let clock = RequestClock::start();
        let request = request.with_streaming(false);
        let native = self.build_request(&request)?;
        tracing::debug!(provider = %self.provider_id(), url = %native.url, "sending chat request");

        let response = self
            .http_client
            .post(&native.url)
            .headers(self.headers(false)?)
            .json(&native.body)
            .send()
            .await?;
        let completion: OpenAiChatResponse = read_json_response(self.provider_id(), response).await?;

        let choice = completion.choices.into_iter().next().ok_or_else(|| {
            LlmError::ParseError(format!("{} returned no choices", self.provider_id()))
        })?;
        let usage = completion.usage.map(Usage::from).unwrap_or_default();
        let price = self.chat_pricing(&request).price(&usage);
        Ok(PromptResponse {
            message: choice.message.content.unwrap_or_default(),
            usage,
            finish_reason: choice.finish_reason.map(FinishReason::from),
            elapsed_ms: clock.elapsed_ms(),
            price,
        })
    }

    fn chat_stream(&self, request: ChatRequest) -> PromptStream {
        let clock = RequestClock::start();
        let request = request.with_streaming(true);
        match self.stream_request(&request) {
            Ok(builder) => {
                tracing::debug!(provider = %self.provider_id(), "opening chat stream");
                StreamFactory::create_prompt_stream(
                    self.provider_id(),
                    builder,
                    OpenAiEventConverter::new(self.provider_id()),
                    self.chat_pricing(&request),
                    clock,
                )
            }
            Err(error) => StreamFactory::failed(error, clock),
        }
    }
}

#[async_trait]
impl EmbeddingCapability for OpenAiClient {
    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, LlmError> {
        let clock = RequestClock::start();
        let body = self.transformer.transform_embedding(&request)?;
        let url = join_url(&self.base_url, "/embeddings");
        tracing::debug!(provider = %self.provider_id(), url = %url, "sending embedding request");

        let response = self
            .http_client
            .post(&url)
            .headers(self.headers(false)?)
            .json(&body)
            .send()
            .await?;
        let embeddings: OpenAiEmbeddingResponse =
            read_json_response(self.provider_id(), response).await?;

        let usage = Usage::from(embeddings.usage);
        let price = PricingContext::new(
            self.price_identity.clone(),
            request.model_or(self.transformer.default_embedding_model()),
        )
        .with_billing(self.embedding_billing)
        .price(&usage);
        Ok(EmbeddingResponse {
            data: embeddings.data,
            usage,
            elapsed_ms: clock.elapsed_ms(),
            price,
        })
    }
}
