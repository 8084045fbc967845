//! Stream Factory
//!
//! Builds [`PromptStream`]s from HTTP responses (SSE) or from a single
//! non-streaming call.

use std::future::Future;

use async_stream::stream;
use eventsource_stream::Eventsource;
use futures::Stream;
use futures_util::StreamExt;

use crate::error::{LlmError, classify_error_response};
use crate::pricing::PricingContext;
use crate::types::PromptResponse;
use crate::utils::RequestClock;

use super::accumulator::normalize_frames;
use super::converters::SseEventConverter;
use super::types::{FrameStream, PromptStream, PromptStreamEvent};

pub struct StreamFactory;

impl StreamFactory {
    /// Decode SSE bytes and run every event through `converter`.
    ///
    /// `[DONE]` sentinels and empty data lines are skipped. The first decode
    /// failure is yielded as an error and ends the frame stream.
    pub fn sse_frames<S, B, C>(bytes: S, mut converter: C) -> FrameStream
    where
        S: Stream<Item = Result<B, LlmError>> + Send + 'static,
        B: AsRef<[u8]> + Send + 'static,
        C: SseEventConverter + 'static,
    {
        Box::pin(stream! {
            let mut events = std::pin::pin!(bytes.eventsource());
            while let Some(event) = events.next().await {
                match event {
                    Ok(event) => {
                        let data = event.data.trim();
                        if data.is_empty() || data == "[DONE]" {
                            continue;
                        }
                        tracing::trace!(event = %event.event, data = %event.data, "sse event");
                        for frame in converter.convert_event(&event) {
                            let failed = frame.is_err();
                            yield frame;
                            if failed {
                                return;
                            }
                        }
                    }
                    Err(e) => {
                        yield Err(LlmError::StreamError(format!("SSE parsing error: {e}")));
                        return;
                    }
                }
            }
            for frame in converter.handle_stream_end() {
                yield frame;
            }
        })
    }

    /// Send `request` and normalize its SSE response into a [`PromptStream`].
    ///
    /// Handshake failures (transport errors and non-2xx statuses) are
    /// delivered as the stream's single `Error` event.
    pub fn create_prompt_stream<C>(
        provider_id: &str,
        request: reqwest::RequestBuilder,
        converter: C,
        pricing: PricingContext,
        clock: RequestClock,
    ) -> PromptStream
    where
        C: SseEventConverter + 'static,
    {
        let provider_id = provider_id.to_string();
        Box::pin(stream! {
            let response = match request.send().await {
                Ok(response) => response,
                Err(e) => {
                    yield PromptStreamEvent::Error {
                        error: LlmError::from(e),
                        elapsed_ms: clock.elapsed_ms(),
                    };
                    return;
                }
            };
            if !response.status().is_success() {
                let error = classify_error_response(&provider_id, response).await;
                yield PromptStreamEvent::Error {
                    error,
                    elapsed_ms: clock.elapsed_ms(),
                };
                return;
            }

            let bytes = response
                .bytes_stream()
                .map(|chunk| chunk.map_err(|e| LlmError::StreamError(format!("Stream error: {e}"))));
            let frames = Self::sse_frames(bytes, converter);
            let mut events = normalize_frames(frames, pricing, clock, C::is_stop);
            while let Some(event) = events.next().await {
                yield event;
            }
        })
    }

    /// Present a non-streaming call as a stream: one chunk with the full text,
    /// then the stop event.
    pub fn single_chunk_stream<F>(call: F, clock: RequestClock) -> PromptStream
    where
        F: Future<Output = Result<PromptResponse, LlmError>> + Send + 'static,
    {
        Box::pin(stream! {
            match call.await {
                Ok(response) => {
                    yield PromptStreamEvent::Chunk {
                        delta: response.message.clone(),
                        elapsed_ms: response.elapsed_ms,
                    };
                    yield PromptStreamEvent::Stop(response);
                }
                Err(error) => {
                    yield PromptStreamEvent::Error {
                        error,
                        elapsed_ms: clock.elapsed_ms(),
                    };
                }
            }
        })
    }

    /// A stream holding only `error`.
    pub fn failed(error: LlmError, clock: RequestClock) -> PromptStream {
        Box::pin(futures::stream::once(async move {
            PromptStreamEvent::Error {
                error,
                elapsed_ms: clock.elapsed_ms(),
            }
        }))
    }
}
