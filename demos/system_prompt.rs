//! System prompt
//!
//! Sends one instruction to a provider and prints the answer with its cost.
//!
//! Run with: cargo run --example system_prompt -- perplexity "Who wrote Dune?"

use unillm::prelude::*;

#[tokio::main]
async fn main() -> Result<(), LlmError> {
    let mut args = std::env::args().skip(1);
    let provider = args.next().unwrap_or_else(|| "openai".to_string());
    let text = args
        .next()
        .unwrap_or_else(|| "List three prime numbers greater than 100.".to_string());

    let options = PromptOptions::new().with_max_tokens(256);
    let response = system_prompt(&text, provider.as_str(), options, &ApiOptions::new()).await?;

    println!("{}", response.message);
    println!(
        "finish: {}, usage: {}/{} tokens, cost: ${:.6}",
        response
            .finish_reason
            .as_ref()
            .map(FinishReason::as_str)
            .unwrap_or("none"),
        response.usage.input_tokens,
        response.usage.output_tokens,
        response.price.total
    );
    Ok(())
}
