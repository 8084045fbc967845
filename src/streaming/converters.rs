//! SSE event converters.

use eventsource_stream::Event;

use crate::error::LlmError;
use crate::types::FinishReason;

use super::types::StreamFrame;

/// Decides whether a recorded finish reason counts as a graceful stop.
pub type StopCondition = fn(&FinishReason) -> bool;

/// Turns one provider's SSE events into [`StreamFrame`]s.
///
/// A converter is owned by a single stream and may keep state between events
/// (Anthropic reports input tokens at the start and output tokens at the end).
pub trait SseEventConverter: Send {
    /// Convert one SSE event into zero or more frames.
    fn convert_event(&mut self, event: &Event) -> Vec<Result<StreamFrame, LlmError>>;

    /// Frames to emit when the connection closes.
    fn handle_stream_end(&mut self) -> Vec<Result<StreamFrame, LlmError>> {
        Vec::new()
    }

    /// The provider's canonical stop value. OpenAI protocol: `stop`.
    fn is_stop(reason: &FinishReason) -> bool
    where
        Self: Sized,
    {
        matches!(reason, FinishReason::Stop)
    }
}
