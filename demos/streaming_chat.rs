//! Streaming chat
//!
//! Streams a completion and prints chunks as they arrive, then the usage and
//! cost. The provider comes from the first argument (default `openai`).
//!
//! Run with: cargo run --example streaming_chat -- anthropic

use futures_util::StreamExt;
use unillm::observability::{TracingConfig, init_tracing};
use unillm::prelude::*;

#[tokio::main]
async fn main() -> Result<(), LlmError> {
    let _guard = init_tracing(TracingConfig::from_env()?)?;
    let provider = std::env::args().nth(1).unwrap_or_else(|| "openai".to_string());

    let messages = vec![
        ChatMessage::system("You are a concise assistant."),
        ChatMessage::user("Explain what a B-tree is in three sentences."),
    ];
    let api = ApiOptions::new().with_creativity(0.3).with_focus(0.6);

    let mut stream = prompt_stream(messages, provider.as_str(), PromptOptions::new(), &api);
    while let Some(event) = stream.next().await {
        match event {
            PromptStreamEvent::Chunk { delta, .. } => print!("{delta}"),
            PromptStreamEvent::Stop(response) => {
                println!(
                    "\n\n[{} tokens in {} ms, ${:.6}]",
                    response.usage.total_tokens, response.elapsed_ms, response.price.total
                );
            }
            PromptStreamEvent::Error { error, elapsed_ms } => {
                eprintln!("\n\nfailed after {elapsed_ms} ms: {error}");
                if let Some(partial) = error.partial_text() {
                    eprintln!("received before failure: {} chars", partial.len());
                }
            }
        }
    }
    Ok(())
}
