//! Callback-style consumption of a [`PromptStream`].

use futures_util::StreamExt;

use crate::error::LlmError;
use crate::types::PromptResponse;

use super::types::{PromptStream, PromptStreamEvent};

/// Receives the events of one streaming call.
///
/// `on_chunk` may be called any number of times; exactly one of `on_stop`
/// and `on_error` is called last.
pub trait PromptStreamHandler {
    fn on_chunk(&mut self, delta: &str, elapsed_ms: u64);
    fn on_stop(&mut self, response: PromptResponse);
    fn on_error(&mut self, error: LlmError, elapsed_ms: u64);
}

/// Adapts three closures to [`PromptStreamHandler`].
pub struct StreamCallbacks<C, S, E> {
    on_chunk: C,
    on_stop: S,
    on_error: E,
}

impl<C, S, E> StreamCallbacks<C, S, E>
where
    C: FnMut(&str, u64),
    S: FnMut(PromptResponse),
    E: FnMut(LlmError, u64),
{
    pub fn new(on_chunk: C, on_stop: S, on_error: E) -> Self {
        Self {
            on_chunk,
            on_stop,
            on_error,
        }
    }
}

impl<C, S, E> PromptStreamHandler for StreamCallbacks<C, S, E>
where
    C: FnMut(&str, u64),
    S: FnMut(PromptResponse),
    E: FnMut(LlmError, u64),
{
    fn on_chunk(&mut self, delta: &str, elapsed_ms: u64) {
        (self.on_chunk)(delta, elapsed_ms)
    }

    fn on_stop(&mut self, response: PromptResponse) {
        (self.on_stop)(response)
    }

    fn on_error(&mut self, error: LlmError, elapsed_ms: u64) {
        (self.on_error)(error, elapsed_ms)
    }
}

/// Feed `stream` into `handler` until the terminal event.
pub async fn drive_stream<H>(mut stream: PromptStream, handler: &mut H)
where
    H: PromptStreamHandler + ?Sized,
{
    while let Some(event) = stream.next().await {
        match event {
            PromptStreamEvent::Chunk { delta, elapsed_ms } => handler.on_chunk(&delta, elapsed_ms),
            PromptStreamEvent::Stop(response) => {
                handler.on_stop(response);
                return;
            }
            PromptStreamEvent::Error { error, elapsed_ms } => {
                handler.on_error(error, elapsed_ms);
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FinishReason, Price, Usage};

    fn events(items: Vec<PromptStreamEvent>) -> PromptStream {
        Box::pin(futures::stream::iter(items))
    }

    #[tokio::test]
    async fn callbacks_see_chunks_then_stop() {
        let mut chunks = Vec::new();
        let mut stopped = None;
        let mut errors = 0;
        {
            let mut handler = StreamCallbacks::new(
                |delta: &str, _| chunks.push(delta.to_string()),
                |response| stopped = Some(response),
                |_, _| errors += 1,
            );
            drive_stream(
                events(vec![
                    PromptStreamEvent::Chunk { delta: "a".into(), elapsed_ms: 1 },
                    PromptStreamEvent::Chunk { delta: "b".into(), elapsed_ms: 2 },
                    PromptStreamEvent::Stop(PromptResponse {
                        message: "ab".into(),
                        usage: Usage::new(1, 2),
                        finish_reason: Some(FinishReason::Stop),
                        elapsed_ms: 3,
                        price: Price::zero(),
                    }),
                ]),
                &mut handler,
            )
            .await;
        }
        assert_eq!(chunks, vec!["a", "b"]);
        assert_eq!(stopped.map(|r| r.message), Some("ab".to_string()));
        assert_eq!(errors, 0);
    }

    #[tokio::test]
    async fn nothing_is_delivered_after_the_terminal_event() {
        let calls = std::cell::RefCell::new(Vec::new());
        let mut handler = StreamCallbacks::new(
            |_: &str, _| calls.borrow_mut().push("chunk"),
            |_| calls.borrow_mut().push("stop"),
            |_, _| calls.borrow_mut().push("error"),
        );
        drive_stream(
            events(vec![
                PromptStreamEvent::Error {
                    error: LlmError::StreamError("gone".into()),
                    elapsed_ms: 1,
                },
                PromptStreamEvent::Chunk { delta: "late".into(), elapsed_ms: 2 },
            ]),
            &mut handler,
        )
        .await;
        drop(handler);
        assert_eq!(calls.into_inner(), vec!["error"]);
    }
}
