//! Embeddings
//!
//! Embeds two sentences and prints their cosine similarity.
//!
//! Run with: cargo run --example embedding -- voyageai

use unillm::prelude::*;

fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm = |v: &[f32]| v.iter().map(|x| x * x).sum::<f32>().sqrt();
    dot / (norm(a) * norm(b))
}

#[tokio::main]
async fn main() -> Result<(), LlmError> {
    let provider = std::env::args().nth(1).unwrap_or_else(|| "openai".to_string());
    let input = vec![
        "The cat sat on the mat.",
        "A feline was resting on the rug.",
    ];

    let params = EmbeddingParams::new().with_input_type(EmbeddingInputType::Document);
    let response = embed(input, provider.as_str(), params, &ApiOptions::new()).await?;

    if let [first, second] = response.data.as_slice() {
        println!("dimensions: {}", first.embedding.len());
        println!("similarity: {:.4}", cosine(&first.embedding, &second.embedding));
    }
    println!(
        "{} tokens, ${:.8}, {} ms",
        response.usage.total_tokens, response.price.total, response.elapsed_ms
    );
    Ok(())
}
