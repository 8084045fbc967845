//! OpenAI streaming fixtures tests

use unillm::LlmError;
use unillm::pricing::PricingContext;
use unillm::providers::openai::OpenAiEventConverter;
use unillm::streaming::PromptStreamEvent;
use unillm::types::{FinishReason, Usage};

#[path = "../support/stream_fixture.rs"]
mod support;

fn pricing() -> PricingContext {
    PricingContext::new("openai", "gpt-4-turbo")
}

#[tokio::test]
async fn openai_hello_world_fixture() {
    let events = support::collect_prompt_events(
        "openai/hello_world_stop.sse",
        OpenAiEventConverter::new("openai"),
        pricing(),
    )
    .await;

    support::assert_single_terminal_last(&events);
    assert_eq!(events.len(), 3, "two chunks then stop: {events:?}");
    let PromptStreamEvent::Stop(response) = events.last().unwrap() else {
        panic!("expected stop, got {:?}", events.last());
    };
    assert_eq!(response.message, "Hello world");
    assert_eq!(support::chunk_text(&events), response.message);
    assert_eq!(response.usage, Usage::new(10, 2));
    assert_eq!(response.usage.total_tokens, 12);
    assert_eq!(response.finish_reason, Some(FinishReason::Stop));
    assert!((response.price.input - 10.0 * 0.00001).abs() < 1e-12);
    assert!((response.price.output - 2.0 * 0.00003).abs() < 1e-12);
    assert!((response.price.total - (response.price.input + response.price.output)).abs() < 1e-12);
}

#[tokio::test]
async fn openai_length_fixture_ends_in_error() {
    let events = support::collect_prompt_events(
        "openai/length_truncated.sse",
        OpenAiEventConverter::new("openai"),
        pricing(),
    )
    .await;

    support::assert_single_terminal_last(&events);
    assert!(!events.iter().any(|e| matches!(e, PromptStreamEvent::Stop(_))));
    match events.last().unwrap() {
        PromptStreamEvent::Error {
            error: LlmError::StreamIncomplete { finish_reason, partial_text },
            ..
        } => {
            assert_eq!(finish_reason, &Some(FinishReason::Length));
            assert_eq!(partial_text, "Once upon a time");
        }
        other => panic!("expected incomplete stream, got {other:?}"),
    }
}

#[tokio::test]
async fn openai_error_chunk_stops_the_stream() {
    let events = support::collect_prompt_events(
        "openai/error_chunk.sse",
        OpenAiEventConverter::new("openai"),
        pricing(),
    )
    .await;

    support::assert_single_terminal_last(&events);
    assert_eq!(support::chunk_text(&events), "Partial");
    assert!(matches!(
        events.last().unwrap(),
        PromptStreamEvent::Error { error: LlmError::ProviderError { error_type: Some(t), .. }, .. } if t == "server_error"
    ));
}

#[tokio::test]
async fn openai_role_and_done_events_produce_no_frame() {
    let frames = support::collect_frames(
        "openai/hello_world_stop.sse",
        OpenAiEventConverter::new("openai"),
    )
    .await;
    // Hello, world, finish, usage
    assert_eq!(frames.len(), 4);
    assert!(frames.iter().all(Result::is_ok));
}
