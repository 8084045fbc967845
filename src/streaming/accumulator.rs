//! Frame state machine.
//!
//! Folds provider frames into the uniform event sequence: one `Chunk` per
//! non-empty delta, then a single terminal `Stop` or `Error`.

use async_stream::stream;
use futures_util::StreamExt;

use crate::error::LlmError;
use crate::pricing::PricingContext;
use crate::types::{FinishReason, Price, PromptResponse, Usage};
use crate::utils::RequestClock;

use super::converters::StopCondition;
use super::types::{FrameStream, PromptStream, PromptStreamEvent, StreamFrame};

#[derive(Debug)]
pub struct StreamAccumulator {
    text: String,
    finish_reason: Option<FinishReason>,
    usage: Option<Usage>,
    price: Option<Price>,
    pricing: PricingContext,
    clock: RequestClock,
}

impl StreamAccumulator {
    pub fn new(pricing: PricingContext, clock: RequestClock) -> Self {
        Self {
            text: String::new(),
            finish_reason: None,
            usage: None,
            price: None,
            pricing,
            clock,
        }
    }

    /// Record a frame. Returns the chunk to emit when it carried text.
    pub fn push(&mut self, frame: StreamFrame) -> Option<PromptStreamEvent> {
        if let Some(reason) = frame.finish_reason {
            self.finish_reason = Some(reason);
        }
        if let Some(usage) = frame.usage {
            self.price = Some(self.pricing.price(&usage));
            self.usage = Some(usage);
        }
        match frame.delta {
            Some(delta) if !delta.is_empty() => {
                self.text.push_str(&delta);
                Some(PromptStreamEvent::Chunk {
                    delta,
                    elapsed_ms: self.clock.elapsed_ms(),
                })
            }
            _ => None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn finish_reason(&self) -> Option<&FinishReason> {
        self.finish_reason.as_ref()
    }

    pub fn usage(&self) -> Option<Usage> {
        self.usage
    }

    /// Terminal event for a failed stream.
    pub fn fail(self, error: LlmError) -> PromptStreamEvent {
        tracing::debug!(error = %error, received = self.text.len(), "stream failed");
        PromptStreamEvent::Error {
            error,
            elapsed_ms: self.clock.elapsed_ms(),
        }
    }

    /// Terminal event for a closed stream.
    pub fn finish(self, is_stop: StopCondition) -> PromptStreamEvent {
        let elapsed_ms = self.clock.elapsed_ms();
        match self.finish_reason {
            Some(reason) if is_stop(&reason) => {
                let usage = self.usage.unwrap_or_default();
                let price = self.price.unwrap_or_default();
                PromptStreamEvent::Stop(PromptResponse {
                    message: self.text,
                    usage,
                    finish_reason: Some(reason),
                    elapsed_ms,
                    price,
                })
            }
            finish_reason => {
                tracing::debug!(
                    finish_reason = ?finish_reason,
                    "stream closed without a stop reason"
                );
                PromptStreamEvent::Error {
                    error: LlmError::StreamIncomplete {
                        finish_reason,
                        partial_text: self.text,
                    },
                    elapsed_ms,
                }
            }
        }
    }
}

/// Drive `frames` to completion through a fresh [`StreamAccumulator`].
///
/// The first frame error ends the stream; nothing follows the terminal event.
pub fn normalize_frames(
    frames: FrameStream,
    pricing: PricingContext,
    clock: RequestClock,
    is_stop: StopCondition,
) -> PromptStream {
    Box::pin(stream! {
        let mut frames = frames;
        let mut accumulator = StreamAccumulator::new(pricing, clock);
        while let Some(item) = frames.next().await {
            match item {
                Ok(frame) => {
                    if let Some(chunk) = accumulator.push(frame) {
                        yield chunk;
                    }
                }
                Err(error) => {
                    yield accumulator.fail(error);
                    return;
                }
            }
        }
        yield accumulator.finish(is_stop);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    fn is_openai_stop(reason: &FinishReason) -> bool {
        matches!(reason, FinishReason::Stop)
    }

    fn frames(items: Vec<Result<StreamFrame, LlmError>>) -> FrameStream {
        Box::pin(stream::iter(items))
    }

    async fn run(items: Vec<Result<StreamFrame, LlmError>>) -> Vec<PromptStreamEvent> {
        normalize_frames(
            frames(items),
            PricingContext::new("openai", "gpt-4-turbo"),
            RequestClock::start(),
            is_openai_stop,
        )
        .collect()
        .await
    }

    #[tokio::test]
    async fn hello_world_stops_with_aggregate() {
        let events = run(vec![
            Ok(StreamFrame::delta("Hello")),
            Ok(StreamFrame::delta(" world")),
            Ok(StreamFrame::finish("stop").with_usage(Usage::new(10, 2))),
        ])
        .await;

        assert_eq!(events.len(), 3);
        assert!(matches!(&events[0], PromptStreamEvent::Chunk { delta, .. } if delta == "Hello"));
        assert!(matches!(&events[1], PromptStreamEvent::Chunk { delta, .. } if delta == " world"));
        match &events[2] {
            PromptStreamEvent::Stop(response) => {
                assert_eq!(response.message, "Hello world");
                assert_eq!(response.usage, Usage::new(10, 2));
                assert_eq!(response.usage.total_tokens, 12);
                assert_eq!(response.finish_reason, Some(FinishReason::Stop));
                assert!(response.price.total > 0.0);
                assert_eq!(response.price.total, response.price.input + response.price.output);
            }
            other => panic!("expected stop, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn length_finish_is_an_error_with_partial_text() {
        let events = run(vec![
            Ok(StreamFrame::delta("Hel")),
            Ok(StreamFrame::finish("length")),
        ])
        .await;

        assert_eq!(events.len(), 2);
        assert!(!events.iter().any(|e| matches!(e, PromptStreamEvent::Stop(_))));
        match &events[1] {
            PromptStreamEvent::Error {
                error:
                    LlmError::StreamIncomplete {
                        finish_reason,
                        partial_text,
                    },
                ..
            } => {
                assert_eq!(finish_reason, &Some(FinishReason::Length));
                assert_eq!(partial_text, "Hel");
            }
            other => panic!("expected incomplete, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn frame_error_terminates_immediately() {
        let events = run(vec![
            Ok(StreamFrame::delta("a")),
            Err(LlmError::ParseError("bad frame".into())),
            Ok(StreamFrame::delta("never")),
            Ok(StreamFrame::finish("stop")),
        ])
        .await;

        assert_eq!(events.len(), 2);
        assert!(matches!(
            &events[1],
            PromptStreamEvent::Error { error: LlmError::ParseError(_), .. }
        ));
    }

    #[tokio::test]
    async fn empty_stream_is_incomplete() {
        let events = run(Vec::new()).await;
        assert_eq!(events.len(), 1);
        assert!(matches!(
            &events[0],
            PromptStreamEvent::Error {
                error: LlmError::StreamIncomplete { finish_reason: None, .. },
                ..
            }
        ));
    }

    #[test]
    fn empty_deltas_are_not_chunks() {
        let mut accumulator =
            StreamAccumulator::new(PricingContext::new("openai", "gpt-4-turbo"), RequestClock::start());
        assert!(accumulator.push(StreamFrame::delta("")).is_none());
        assert!(accumulator.push(StreamFrame::usage(Usage::new(1, 1))).is_none());
        assert_eq!(accumulator.usage(), Some(Usage::new(1, 1)));
        assert_eq!(accumulator.text(), "");
    }

    #[test]
    fn last_usage_wins() {
        let mut accumulator =
            StreamAccumulator::new(PricingContext::new("openai", "gpt-4-turbo"), RequestClock::start());
        accumulator.push(StreamFrame::usage(Usage::new(5, 1)));
        accumulator.push(StreamFrame::delta("x").with_finish_reason("stop").with_usage(Usage::new(5, 9)));
        match accumulator.finish(is_openai_stop) {
            PromptStreamEvent::Stop(response) => assert_eq!(response.usage, Usage::new(5, 9)),
            other => panic!("expected stop, got {other:?}"),
        }
    }
}
