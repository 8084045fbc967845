//! Mock API tests for the embedding path.

use serde_json::json;
use unillm::prelude::*;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn embedding_response(model: &str, count: usize, dims: usize, prompt_tokens: u32) -> serde_json::Value {
    let data: Vec<_> = (0..count)
        .map(|index| {
            json!({
                "object": "embedding",
                "index": index,
                "embedding": vec![0.25_f32; dims]
            })
        })
        .collect();
    json!({
        "object": "list",
        "data": data,
        "model": model,
        "usage": { "prompt_tokens": prompt_tokens, "total_tokens": prompt_tokens }
    })
}

fn api(server: &MockServer) -> ApiOptions {
    ApiOptions::new().with_api_key("emb-test").with_base_url(server.uri())
}

#[tokio::test]
async fn openai_embeds_two_texts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .and(header("Authorization", "Bearer emb-test"))
        .and(body_partial_json(json!({
            "model": "text-embedding-3-small",
            "input": ["first text", "second text"]
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(embedding_response("text-embedding-3-small", 2, 1536, 6)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let response = embed(
        vec!["first text", "second text"],
        "openai",
        EmbeddingParams::default(),
        &api(&server),
    )
    .await
    .unwrap();

    let indices: Vec<_> = response.data.iter().map(|e| e.index).collect();
    assert_eq!(indices, vec![0, 1]);
    let dims = unillm::pricing::ModelCatalog::global()
        .get("openai", "text-embedding-3-small")
        .and_then(|m| m.dimensions)
        .unwrap() as usize;
    assert!(response.data.iter().all(|e| e.embedding.len() == dims));
    assert_eq!(response.usage.total_tokens, 6);
    assert!((response.price.total - 6.0 * 0.00000002).abs() < 1e-15);
}

#[tokio::test]
async fn voyageai_is_flat_billed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .and(body_partial_json(json!({
            "model": "voyage-large-2-instruct",
            "input": "a single query",
            "input_type": "query"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(embedding_response("voyage-large-2-instruct", 1, 1024, 10)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let params = EmbeddingParams::default().with_input_type(EmbeddingInputType::Query);
    let response = embed("a single query", "voyageai", params, &api(&server))
        .await
        .unwrap();

    assert_eq!(response.usage.input_tokens, 10);
    assert_eq!(response.usage.output_tokens, 0);
    assert_eq!(response.price.output, 0.0);
    assert!((response.price.input - 10.0 * 0.00000012).abs() < 1e-15);
    assert_eq!(response.price.total, response.price.input);
}

#[tokio::test]
async fn mixedbread_uses_its_own_price_identity() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .and(body_partial_json(json!({ "model": "mixedbread-ai/mxbai-embed-large-v1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(embedding_response(
            "mixedbread-ai/mxbai-embed-large-v1",
            1,
            1024,
            5,
        )))
        .mount(&server)
        .await;

    let response = embed("hello", "mixedbread-ai", EmbeddingParams::default(), &api(&server))
        .await
        .unwrap();
    assert_eq!(response.data[0].embedding.len(), 1024);
    assert!((response.price.total - 5.0 * 0.0000001).abs() < 1e-15);
}

#[tokio::test]
async fn base64_encoding_is_rejected_before_sending() {
    let server = MockServer::start().await;
    let params = EmbeddingParams::default().with_encoding_format(EncodingFormat::Base64);
    let error = embed("hello", "openai", params, &api(&server)).await.unwrap_err();
    assert!(matches!(error, LlmError::InvalidParameter(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}
