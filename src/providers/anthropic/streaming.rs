//! Anthropic streaming
//!
//! The Messages API streams typed events: `message_start` carries the input
//! token count, `content_block_delta` the text, `message_delta` the stop
//! reason and cumulative output tokens, and `error` a provider failure.

use eventsource_stream::Event;
use serde::Deserialize;

use crate::error::LlmError;
use crate::streaming::{SseEventConverter, StreamFrame};
use crate::types::{FinishReason, Usage};

use super::types::{AnthropicErrorBody, AnthropicUsage};

#[derive(Debug, Clone, Deserialize)]
struct AnthropicStreamEvent {
    #[serde(rename = "type")]
    event_type: String,
    message: Option<AnthropicStreamMessage>,
    delta: Option<AnthropicDelta>,
    usage: Option<AnthropicUsage>,
    error: Option<AnthropicErrorBody>,
}

#[derive(Debug, Clone, Deserialize)]
struct AnthropicStreamMessage {
    usage: Option<AnthropicUsage>,
}

#[derive(Debug, Clone, Deserialize)]
struct AnthropicDelta {
    text: Option<String>,
    stop_reason: Option<String>,
}

/// Tracks token counts across events; one converter per stream.
#[derive(Debug, Clone, Default)]
pub struct AnthropicEventConverter {
    input_tokens: u32,
    output_tokens: u32,
}

impl AnthropicEventConverter {
    pub fn new() -> Self {
        Self::default()
    }

    fn record_usage(&mut self, usage: AnthropicUsage) -> Usage {
        if let Some(input) = usage.input_tokens {
            self.input_tokens = input;
        }
        if let Some(output) = usage.output_tokens {
            self.output_tokens = output;
        }
        Usage::new(self.input_tokens, self.output_tokens)
    }

    fn convert_anthropic_event(&mut self, event: AnthropicStreamEvent) -> Result<StreamFrame, LlmError> {
        let mut frame = StreamFrame::default();
        match event.event_type.as_str() {
            "message_start" => {
                if let Some(usage) = event.message.and_then(|m| m.usage) {
                    frame.usage = Some(self.record_usage(usage));
                }
            }
            "content_block_delta" => {
                frame.delta = event.delta.and_then(|d| d.text);
            }
            "message_delta" => {
                frame.finish_reason = event
                    .delta
                    .and_then(|d| d.stop_reason)
                    .map(FinishReason::from);
                if let Some(usage) = event.usage {
                    frame.usage = Some(self.record_usage(usage));
                }
            }
            "error" => {
                let (message, error_type) = match event.error {
                    Some(error) => (error.message, error.error_type),
                    None => ("unknown error".to_string(), None),
                };
                return Err(LlmError::ProviderError {
                    provider: "anthropic".to_string(),
                    message,
                    error_type,
                });
            }
            // ping, content_block_start/stop, message_stop
            _ => {}
        }
        Ok(frame)
    }
}

impl SseEventConverter for AnthropicEventConverter {
    fn convert_event(&mut self, event: &Event) -> Vec<Result<StreamFrame, LlmError>> {
        let parsed = match serde_json::from_str::<AnthropicStreamEvent>(&event.data) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(error = %e, "malformed Anthropic stream event");
                return vec![Err(LlmError::ParseError(format!(
                    "anthropic stream event: {e}"
                )))];
            }
        };
        match self.convert_anthropic_event(parsed) {
            Ok(frame) if frame.is_empty() => Vec::new(),
            result => vec![result],
        }
    }

    fn is_stop(reason: &FinishReason) -> bool {
        matches!(reason, FinishReason::EndTurn) || reason.as_str() == "stop_sequence"
    }
}
