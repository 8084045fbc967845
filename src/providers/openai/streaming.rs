//! OpenAI protocol streaming
//!
//! Chat completion chunks carry the text delta and finish reason in
//! `choices[0]`; with `stream_options.include_usage` a final chunk with empty
//! `choices` carries the usage block.

use eventsource_stream::Event;
use serde::Deserialize;

use crate::error::LlmError;
use crate::streaming::{SseEventConverter, StreamFrame};
use crate::types::{FinishReason, Usage};

use super::types::{OpenAiErrorBody, OpenAiUsage};

#[derive(Debug, Clone, Deserialize)]
struct OpenAiStreamEvent {
    #[serde(default)]
    choices: Vec<OpenAiStreamChoice>,
    usage: Option<OpenAiUsage>,
    error: Option<OpenAiErrorBody>,
}

#[derive(Debug, Clone, Deserialize)]
struct OpenAiStreamChoice {
    delta: Option<OpenAiStreamDelta>,
    finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct OpenAiStreamDelta {
    content: Option<String>,
}

#[derive(Debug, Clone)]
pub struct OpenAiEventConverter {
    provider_id: String,
}

impl OpenAiEventConverter {
    pub fn new(provider_id: impl Into<String>) -> Self {
        Self {
            provider_id: provider_id.into(),
        }
    }

    fn convert_chunk(&self, chunk: OpenAiStreamEvent) -> Result<StreamFrame, LlmError> {
        if let Some(error) = chunk.error {
            return Err(LlmError::ProviderError {
                provider: self.provider_id.clone(),
                message: error.message,
                error_type: error.error_type,
            });
        }

        let mut frame = StreamFrame::default();
        if let Some(choice) = chunk.choices.into_iter().next() {
            frame.delta = choice.delta.and_then(|d| d.content);
            frame.finish_reason = choice.finish_reason.map(FinishReason::from);
        }
        frame.usage = chunk.usage.map(Usage::from);
        Ok(frame)
    }
}

impl SseEventConverter for OpenAiEventConverter {
    fn convert_event(&mut self, event: &Event) -> Vec<Result<StreamFrame, LlmError>> {
        let chunk = match serde_json::from_str::<OpenAiStreamEvent>(&event.data) {
            Ok(chunk) => chunk,
            Err(e) => {
                tracing::warn!(provider = %self.provider_id, error = %e, "malformed stream chunk");
                return vec![Err(LlmError::ParseError(format!(
                    "{} stream chunk: {e}",
                    self.provider_id
                )))];
            }
        };
        match self.convert_chunk(chunk) {
            Ok(frame) if frame.is_empty() => Vec::new(),
            result => vec![result],
        }
    }
}
