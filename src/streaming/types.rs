//! Streaming types.

use std::pin::Pin;

use futures::Stream;

use crate::error::LlmError;
use crate::types::{FinishReason, PromptResponse, Usage};

/// One incremental unit decoded from a provider stream.
///
/// A frame may carry any combination of a text delta, a finish reason and a
/// usage block. Frames with none of the three are never produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreamFrame {
    pub delta: Option<String>,
    pub finish_reason: Option<FinishReason>,
    pub usage: Option<Usage>,
}

impl StreamFrame {
    pub fn delta(text: impl Into<String>) -> Self {
        Self {
            delta: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn finish(reason: impl Into<FinishReason>) -> Self {
        Self {
            finish_reason: Some(reason.into()),
            ..Default::default()
        }
    }

    pub fn usage(usage: Usage) -> Self {
        Self {
            usage: Some(usage),
            ..Default::default()
        }
    }

    pub fn with_finish_reason(mut self, reason: impl Into<FinishReason>) -> Self {
        self.finish_reason = Some(reason.into());
        self
    }

    pub fn with_usage(mut self, usage: Usage) -> Self {
        self.usage = Some(usage);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.delta.as_deref().is_none_or(str::is_empty)
            && self.finish_reason.is_none()
            && self.usage.is_none()
    }
}

/// Provider frames, before normalization.
pub type FrameStream = Pin<Box<dyn Stream<Item = Result<StreamFrame, LlmError>> + Send>>;

/// What a caller of a streaming prompt observes.
///
/// Zero or more `Chunk`s, then exactly one of `Stop` or `Error`.
#[derive(Debug, Clone)]
pub enum PromptStreamEvent {
    /// Newly generated text; only the delta, never the accumulated text.
    Chunk { delta: String, elapsed_ms: u64 },
    Stop(PromptResponse),
    Error { error: LlmError, elapsed_ms: u64 },
}

impl PromptStreamEvent {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Chunk { .. })
    }

    pub fn elapsed_ms(&self) -> u64 {
        match self {
            Self::Chunk { elapsed_ms, .. } | Self::Error { elapsed_ms, .. } => *elapsed_ms,
            Self::Stop(response) => response.elapsed_ms,
        }
    }
}

/// Normalized event stream returned by the streaming facade.
pub type PromptStream = Pin<Box<dyn Stream<Item = PromptStreamEvent> + Send>>;

static_assertions::assert_impl_all!(StreamFrame: Send, Sync);
static_assertions::assert_impl_all!(PromptStreamEvent: Send, Sync);
static_assertions::assert_impl_all!(LlmError: Send, Sync, Clone);
