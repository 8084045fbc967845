//! Anthropic streaming fixtures tests

use unillm::LlmError;
use unillm::pricing::PricingContext;
use unillm::providers::anthropic::AnthropicEventConverter;
use unillm::streaming::PromptStreamEvent;
use unillm::types::{FinishReason, Usage};

#[path = "../support/stream_fixture.rs"]
mod support;

fn pricing() -> PricingContext {
    PricingContext::new("anthropic", "claude-3-5-sonnet-20240620")
}

#[tokio::test]
async fn anthropic_message_start_deltas_stop_fixture() {
    let events = support::collect_prompt_events(
        "anthropic/message_start_deltas_stop.sse",
        AnthropicEventConverter::new(),
        pricing(),
    )
    .await;

    support::assert_single_terminal_last(&events);
    let PromptStreamEvent::Stop(response) = events.last().unwrap() else {
        panic!("expected stop, got {:?}", events.last());
    };
    assert_eq!(response.message, "Hello world");
    assert_eq!(support::chunk_text(&events), "Hello world");
    assert_eq!(response.usage, Usage::new(10, 2));
    assert_eq!(response.finish_reason, Some(FinishReason::EndTurn));
    assert!(response.price.total > 0.0);
}

#[tokio::test]
async fn anthropic_max_tokens_fixture() {
    let events = support::collect_prompt_events(
        "anthropic/max_tokens.sse",
        AnthropicEventConverter::new(),
        pricing(),
    )
    .await;

    support::assert_single_terminal_last(&events);
    match events.last().unwrap() {
        PromptStreamEvent::Error { error, .. } => {
            assert_eq!(error.partial_text(), Some("The first"));
            assert!(matches!(
                error,
                LlmError::StreamIncomplete { finish_reason: Some(FinishReason::Other(r)), .. } if r == "max_tokens"
            ));
        }
        other => panic!("expected error, got {other:?}"),
    }
}

#[tokio::test]
async fn anthropic_error_event_fixture() {
    let events = support::collect_prompt_events(
        "anthropic/error_event.sse",
        AnthropicEventConverter::new(),
        pricing(),
    )
    .await;

    assert_eq!(events.len(), 1);
    assert!(matches!(
        &events[0],
        PromptStreamEvent::Error { error: LlmError::ProviderError { message, .. }, .. } if message == "Overloaded"
    ));
}
