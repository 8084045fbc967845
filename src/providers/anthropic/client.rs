//! Anthropic Messages API client.

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use secrecy::SecretString;

use crate::defaults;
use crate::error::{LlmError, read_json_response};
use crate::pricing::PricingContext;
use crate::streaming::{PromptStream, StreamFactory};
use crate::traits::{ChatCapability, ProviderRequest, RequestTransformer};
use crate::types::{ApiOptions, ChatRequest, FinishReason, PromptResponse, Usage};
use crate::utils::{ProviderHeaders, RequestClock, join_url};

use super::streaming::AnthropicEventConverter;
use super::transformers::AnthropicRequestTransformer;
use super::types::AnthropicChatResponse;

#[derive(Clone)]
pub struct AnthropicClient {
    http_client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    price_identity: String,
    transformer: AnthropicRequestTransformer,
}

impl std::fmt::Debug for AnthropicClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnthropicClient")
            .field("base_url", &self.base_url)
            .field("price_identity", &self.price_identity)
            .field("default_model", &self.transformer.default_model())
            .finish()
    }
}

impl AnthropicClient {
    pub fn new(api_key: SecretString, http_client: reqwest::Client) -> Self {
        Self {
            http_client,
            api_key,
            base_url: defaults::anthropic::BASE_URL.to_string(),
            price_identity: "anthropic".to_string(),
            transformer: AnthropicRequestTransformer::default(),
        }
    }

    pub fn from_api_options(api: &ApiOptions) -> Result<Self, LlmError> {
        let api_key = api.resolve_api_key("anthropic", defaults::anthropic::API_KEY_ENV)?;
        let mut client = Self::new(api_key, api.http_client()?)
            .with_base_url(api.base_url_or(defaults::anthropic::BASE_URL));
        if let Some(identity) = &api.override_provider {
            client.price_identity = identity.clone();
        }
        Ok(client)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn headers(&self, stream: bool) -> Result<HeaderMap, LlmError> {
        ProviderHeaders::anthropic(&self.api_key, stream)
    }

    fn pricing(&self, request: &ChatRequest) -> PricingContext {
        PricingContext::new(
            self.price_identity.clone(),
            request.model_or(self.transformer.default_model()),
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
impl ChatCapability for AnthropicClient {
    fn provider_id(&self) -> &str {
        "anthropic"
    }

    fn build_request(&self, request: &ChatRequest) -> Result<ProviderRequest, LlmError> {
        Ok(ProviderRequest {
            url: join_url(&self.base_url, "/v1/messages"),
            body: self.transformer.transform_chat(request)?,
        })
    }

    async fn chat(&self, request: ChatRequest) -> Result<PromptResponse, LlmError> {
        let clock = RequestClock::start();
        let request = request.with_streaming(false);
        let native = self.build_request(&request)?;
        tracing::debug!(provider = "anthropic", url = %native.url, "sending chat request");

        let response = self
            .http_client
            .post(&native.url)
            .headers(self.headers(false)?)
            .json(&native.body)
            .send()
            .await?;
        let message: AnthropicChatResponse = read_json_response("anthropic", response).await?;

        let usage = message
            .usage
            .map(|u| Usage::new(u.input_tokens.unwrap_or(0), u.output_tokens.unwrap_or(0)))
            .unwrap_or_default();
        let price = self.pricing(&request).price(&usage);
        Ok(PromptResponse {
            message: message.text(),
            usage,
            finish_reason: message.stop_reason.map(FinishReason::from),
            elapsed_ms: clock.elapsed_ms(),
            price,
        })
    }

    fn chat_stream(&self, request: ChatRequest) -> PromptStream {
        let clock = RequestClock::start();
        let request = request.with_streaming(true);
        match self.stream_request(&request) {
            Ok(builder) => {
                tracing::debug!(provider = "anthropic", "opening chat stream");
                StreamFactory::create_prompt_stream(
                    "anthropic",
                    builder,
                    AnthropicEventConverter::new(),
                    self.pricing(&request),
                    clock,
                )
            }
            Err(error) => StreamFactory::failed(error, clock),
        }
    }
}
