//! Streaming Module
//!
//! Provider SSE events are decoded by [`StreamFactory`] and a per-provider
//! [`SseEventConverter`] into [`StreamFrame`]s, which the
//! [`StreamAccumulator`] folds into the uniform [`PromptStreamEvent`]
//! sequence.

pub mod accumulator;
pub mod converters;
pub mod factory;
pub mod handler;
pub mod types;

pub use accumulator::{StreamAccumulator, normalize_frames};
pub use converters::{SseEventConverter, StopCondition};
pub use factory::StreamFactory;
pub use handler::{PromptStreamHandler, StreamCallbacks, drive_stream};
pub use types::{FrameStream, PromptStream, PromptStreamEvent, StreamFrame};
