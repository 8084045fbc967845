//! Dispatch router.
//!
//! Picks the provider client, applies the auto-tuner for the provider's
//! family, and hands the request over. Unknown providers are served by OpenAI.

use crate::error::LlmError;
use crate::params::auto_tune;
use crate::providers::anthropic::AnthropicClient;
use crate::providers::cohere::CohereClient;
use crate::providers::openai::OpenAiClient;
use crate::providers::{Provider, perplexity};
use crate::streaming::{PromptStream, StreamFactory};
use crate::traits::{ChatCapability, ProviderRequest};
use crate::types::{ApiOptions, ChatMessage, ChatRequest, PromptResponse};
use crate::utils::RequestClock;

pub struct Router;

impl Router {
    /// The client serving `provider`.
    pub fn client(provider: &Provider, api: &ApiOptions) -> Result<Box<dyn ChatCapability>, LlmError> {
        Ok(match provider {
            Provider::OpenAi | Provider::Unknown(_) => Box::new(OpenAiClient::from_api_options(api)?),
            Provider::Anthropic => Box::new(AnthropicClient::from_api_options(api)?),
            Provider::Perplexity => Box::new(perplexity::client(api)?),
            Provider::Cohere => Box::new(CohereClient::from_api_options(api)?),
        })
    }

    /// Fill unset sampling fields from the auto-tune knobs.
    pub fn tune(provider: &Provider, mut request: ChatRequest, api: &ApiOptions) -> ChatRequest {
        request.options = auto_tune(provider.tuning_family(), request.options, &api.knobs());
        request
    }

    /// The native request `provider` would receive, without sending it.
    pub fn build_request(
        provider: &Provider,
        request: &ChatRequest,
        api: &ApiOptions,
    ) -> Result<ProviderRequest, LlmError> {
        let client = Self::client(provider, api)?;
        client.build_request(&Self::tune(provider, request.clone(), api))
    }

    pub async fn chat(
        provider: &Provider,
        request: ChatRequest,
        api: &ApiOptions,
    ) -> Result<PromptResponse, LlmError> {
        Self::log_dispatch(provider, api, false);
        let client = Self::client(provider, api)?;
        client.chat(Self::tune(provider, request, api)).await
    }

    /// Always returns a stream; setup failures become its only event.
    pub fn chat_stream(provider: &Provider, request: ChatRequest, api: &ApiOptions) -> PromptStream {
        Self::log_dispatch(provider, api, true);
        if !provider.supports_streaming() {
            tracing::debug!(provider = %provider, "no streaming support; replaying full response as one chunk");
        }
        match Self::client(provider, api) {
            Ok(client) => client.chat_stream(Self::tune(provider, request, api)),
            Err(error) => StreamFactory::failed(error, RequestClock::start()),
        }
    }

    /// Shape a lone instruction the way each provider expects it.
    ///
    /// OpenAI takes it as a system message, Anthropic and Perplexity need a
    /// user turn as well, Cohere takes it as the prompt.
    pub fn system_prompt_messages(provider: &Provider, text: &str) -> Vec<ChatMessage> {
        match provider {
            Provider::OpenAi | Provider::Unknown(_) => vec![ChatMessage::system(text)],
            Provider::Anthropic | Provider::Perplexity => {
                vec![ChatMessage::system(text), ChatMessage::user(text)]
            }
            Provider::Cohere => vec![ChatMessage::user(text)],
        }
    }

    fn log_dispatch(provider: &Provider, api: &ApiOptions, stream: bool) {
        tracing::debug!(
            provider = %provider,
            resolved = %provider.resolved(),
            hosting_location = ?api.hosting_location,
            stream,
            "dispatching prompt"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PromptOptions;

    fn api() -> ApiOptions {
        ApiOptions::new().with_api_key("sk-test")
    }

    #[test]
    fn unknown_provider_builds_the_openai_request() {
        let request = ChatRequest::new(vec![ChatMessage::user("Hi")])
            .with_options(PromptOptions::new().with_temperature(0.4));
        let api = api().with_creativity(0.2).with_focus(0.5);
        let openai = Router::build_request(&Provider::OpenAi, &request, &api).unwrap();
        let unknown = Router::build_request(&Provider::parse("acme-llm"), &request, &api).unwrap();
        assert_eq!(openai, unknown);
    }

    #[test]
    fn anthropic_request_splits_system() {
        let request = ChatRequest::new(vec![ChatMessage::system("Be concise"), ChatMessage::user("Hi")]);
        let native = Router::build_request(&Provider::Anthropic, &request, &api()).unwrap();
        assert_eq!(native.url, "https://api.anthropic.com/v1/messages");
        assert_eq!(native.body["system"], "Be concise");
        assert_eq!(native.body["messages"], serde_json::json!([{ "role": "user", "content": "Hi" }]));
    }

    #[test]
    fn knobs_are_applied_per_family() {
        let request = ChatRequest::new(vec![ChatMessage::user("Hi")]);
        let api = api().with_creativity(0.8).with_word_variety(0.4);

        let openai = Router::build_request(&Provider::OpenAi, &request, &api).unwrap();
        assert_eq!(openai.body["temperature"], 0.8);
        assert!(openai.body.get("frequency_penalty").is_some());

        let anthropic = Router::build_request(&Provider::Anthropic, &request, &api).unwrap();
        assert!((anthropic.body["temperature"].as_f64().unwrap() - 0.6).abs() < 1e-9);

        let perplexity = Router::build_request(&Provider::Perplexity, &request, &api).unwrap();
        assert!(perplexity.body.get("temperature").is_none());
    }

    #[test]
    fn system_prompt_shapes() {
        assert_eq!(
            Router::system_prompt_messages(&Provider::OpenAi, "x"),
            vec![ChatMessage::system("x")]
        );
        assert_eq!(
            Router::system_prompt_messages(&Provider::Perplexity, "x"),
            vec![ChatMessage::system("x"), ChatMessage::user("x")]
        );
        assert_eq!(
            Router::system_prompt_messages(&Provider::Cohere, "x"),
            vec![ChatMessage::user("x")]
        );

        let messages = Router::system_prompt_messages(&Provider::Anthropic, "Summarise");
        let native = Router::build_request(&Provider::Anthropic, &ChatRequest::new(messages), &api()).unwrap();
        assert_eq!(native.body["system"], "Summarise");
        assert_eq!(native.body["messages"], serde_json::json!([{ "role": "user", "content": "Summarise" }]));
    }

    #[tokio::test]
    async fn missing_key_surfaces_as_single_stream_error() {
        use futures_util::StreamExt;

        if std::env::var("OPENAI_API_KEY").is_ok() || std::env::var("openai_api_key").is_ok() {
            return;
        }
        let api = ApiOptions::new().with_base_url("http://127.0.0.1:9");
        let provider = Provider::Unknown("unillm-test".into());
        let events: Vec<_> = Router::chat_stream(&provider, ChatRequest::default(), &api).collect().await;
        assert_eq!(events.len(), 1);
        assert!(matches!(
            &events[0],
            crate::streaming::PromptStreamEvent::Error { error: LlmError::MissingApiKey(_), .. }
        ));
    }
}
