//! Prompt entry points.
//!
//! Every call takes a provider name (anything `Into<Provider>`, so `"openai"`
//! works), the messages or a single text, and the per-call options.

use crate::dispatch::Router;
use crate::error::LlmError;
use crate::providers::Provider;
use crate::streaming::{PromptStream, PromptStreamHandler, drive_stream};
use crate::types::{ApiOptions, ChatMessage, ChatRequest, PromptOptions, PromptResponse};

/// Send `messages` and wait for the full completion.
pub async fn prompt(
    messages: Vec<ChatMessage>,
    provider: impl Into<Provider>,
    options: PromptOptions,
    api: &ApiOptions,
) -> Result<PromptResponse, LlmError> {
    let request = ChatRequest::new(messages).with_options(options);
    Router::chat(&provider.into(), request, api).await
}

/// Stream `messages`: zero or more chunks, then exactly one `Stop` or `Error`.
///
/// Providers without streaming still go through here and yield the whole
/// text as a single chunk.
pub fn prompt_stream(
    messages: Vec<ChatMessage>,
    provider: impl Into<Provider>,
    options: PromptOptions,
    api: &ApiOptions,
) -> PromptStream {
    let request = ChatRequest::new(messages)
        .with_options(options)
        .with_streaming(true);
    Router::chat_stream(&provider.into(), request, api)
}

/// [`prompt_stream`] delivered to a handler.
pub async fn prompt_streaming<H>(
    messages: Vec<ChatMessage>,
    provider: impl Into<Provider>,
    handler: &mut H,
    options: PromptOptions,
    api: &ApiOptions,
) where
    H: PromptStreamHandler + ?Sized,
{
    drive_stream(prompt_stream(messages, provider, options, api), handler).await
}

pub async fn system_prompt(
    text: &str,
    provider: impl Into<Provider>,
    options: PromptOptions,
    api: &ApiOptions,
) -> Result<PromptResponse, LlmError> {
    let provider = provider.into();
    let messages = Router::system_prompt_messages(&provider, text);
    prompt(messages, provider, options, api).await
}

pub fn system_prompt_stream(
    text: &str,
    provider: impl Into<Provider>,
    options: PromptOptions,
    api: &ApiOptions,
) -> PromptStream {
    let provider = provider.into();
    let messages = Router::system_prompt_messages(&provider, text);
    prompt_stream(messages, provider, options, api)
}

pub async fn system_prompt_streaming<H>(
    text: &str,
    provider: impl Into<Provider>,
    handler: &mut H,
    options: PromptOptions,
    api: &ApiOptions,
) where
    H: PromptStreamHandler + ?Sized,
{
    drive_stream(system_prompt_stream(text, provider, options, api), handler).await
}
