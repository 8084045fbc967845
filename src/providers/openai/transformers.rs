//! OpenAI protocol request mapping.

use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::error::LlmError;
use crate::traits::RequestTransformer;
use crate::types::{ChatRequest, EmbeddingRequest, EncodingFormat};

/// Keys in `PromptOptions::extra` that the mapper owns.
const RESERVED_KEYS: &[&str] = &["model", "messages", "stream", "stream_options", "input"];

/// Builds OpenAI protocol bodies for every provider speaking it.
#[derive(Debug, Clone)]
pub struct OpenAiRequestTransformer {
    provider_id: String,
    default_chat_model: String,
    default_embedding_model: String,
}

impl OpenAiRequestTransformer {
    pub fn new(
        provider_id: impl Into<String>,
        default_chat_model: impl Into<String>,
        default_embedding_model: impl Into<String>,
    ) -> Self {
        Self {
            provider_id: provider_id.into(),
            default_chat_model: default_chat_model.into(),
            default_embedding_model: default_embedding_model.into(),
        }
    }

    pub fn default_chat_model(&self) -> &str {
        &self.default_chat_model
    }

    pub fn default_embedding_model(&self) -> &str {
        &self.default_embedding_model
    }
}

fn insert_opt<T: Serialize>(
    body: &mut Map<String, Value>,
    key: &str,
    value: &Option<T>,
) -> Result<(), LlmError> {
    if let Some(value) = value {
        body.insert(key.to_string(), serde_json::to_value(value)?);
    }
    Ok(())
}

impl RequestTransformer for OpenAiRequestTransformer {
    fn provider_id(&self) -> &str {
        &self.provider_id
    }

    fn transform_chat(&self, req: &ChatRequest) -> Result<Value, LlmError> {
        let options = &req.options;
        let mut body: Map<String, Value> = options
            .extra
            .iter()
            .filter(|(key, _)| !RESERVED_KEYS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        body.insert("model".into(), json!(req.model_or(&self.default_chat_model)));
        body.insert("messages".into(), serde_json::to_value(&req.messages)?);
        body.insert("n".into(), json!(options.n.unwrap_or(1)));
        insert_opt(&mut body, "temperature", &options.temperature)?;
        insert_opt(&mut body, "max_tokens", &options.max_tokens)?;
        insert_opt(&mut body, "response_format", &options.response_format)?;
        insert_opt(&mut body, "frequency_penalty", &options.frequency_penalty)?;
        insert_opt(&mut body, "presence_penalty", &options.presence_penalty)?;
        insert_opt(&mut body, "top_p", &options.top_p)?;
        insert_opt(&mut body, "seed", &options.seed)?;
        insert_opt(&mut body, "stop", &options.stop)?;

        if req.stream {
            body.insert("stream".into(), json!(true));
            body.insert("stream_options".into(), json!({ "include_usage": true }));
        }
        Ok(Value::Object(body))
    }

    fn transform_embedding(&self, req: &EmbeddingRequest) -> Result<Value, LlmError> {
        if req.params.encoding_format == Some(EncodingFormat::Base64) {
            return Err(LlmError::InvalidParameter(
                "encoding_format=base64 is not supported; embeddings are decoded as floats".into(),
            ));
        }
        let mut body = match serde_json::to_value(&req.params)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        body.insert("model".into(), json!(req.model_or(&self.default_embedding_model)));
        body.insert("input".into(), serde_json::to_value(&req.input)?);
        Ok(Value::Object(body))
    }
}
