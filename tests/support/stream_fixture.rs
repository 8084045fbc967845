//! Test fixtures utilities: load SSE fixtures and drive them through the
//! converters and the stream normalizer.
#![allow(dead_code)]

use std::path::PathBuf;

use futures_util::StreamExt;
use unillm::LlmError;
use unillm::pricing::PricingContext;
use unillm::streaming::{
    PromptStreamEvent, SseEventConverter, StreamFactory, StreamFrame, normalize_frames,
};
use unillm::utils::RequestClock;

pub fn fixture_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(relative)
}

pub fn read_fixture(relative: &str) -> String {
    std::fs::read_to_string(fixture_path(relative)).expect("fixture exists")
}

/// Split an `.sse` fixture into one byte chunk per event, the way a server
/// would flush them.
pub fn load_sse_fixture_as_bytes(relative: &str) -> Vec<Result<Vec<u8>, LlmError>> {
    let normalized = read_fixture(relative).replace("\r\n", "\n");
    normalized
        .split("\n\n")
        .map(|chunk| chunk.trim_end_matches('\n'))
        .filter(|chunk| !chunk.is_empty())
        .map(|chunk| Ok(format!("{chunk}\n\n").into_bytes()))
        .collect()
}

/// Frames produced by `converter` for a fixture.
pub async fn collect_frames<C>(relative: &str, converter: C) -> Vec<Result<StreamFrame, LlmError>>
where
    C: SseEventConverter + 'static,
{
    let bytes = futures_util::stream::iter(load_sse_fixture_as_bytes(relative));
    StreamFactory::sse_frames(bytes, converter).collect().await
}

/// Public events a caller would observe for a fixture.
pub async fn collect_prompt_events<C>(
    relative: &str,
    converter: C,
    pricing: PricingContext,
) -> Vec<PromptStreamEvent>
where
    C: SseEventConverter + 'static,
{
    let bytes = futures_util::stream::iter(load_sse_fixture_as_bytes(relative));
    let frames = StreamFactory::sse_frames(bytes, converter);
    normalize_frames(frames, pricing, RequestClock::start(), C::is_stop)
        .collect()
        .await
}

/// Concatenated chunk deltas.
pub fn chunk_text(events: &[PromptStreamEvent]) -> String {
    events
        .iter()
        .filter_map(|event| match event {
            PromptStreamEvent::Chunk { delta, .. } => Some(delta.as_str()),
            _ => None,
        })
        .collect()
}

pub fn assert_single_terminal_last(events: &[PromptStreamEvent]) {
    let terminals = events.iter().filter(|e| e.is_terminal()).count();
    assert_eq!(terminals, 1, "exactly one terminal event: {events:?}");
    assert!(events.last().is_some_and(|e| e.is_terminal()), "terminal event is last");
}
