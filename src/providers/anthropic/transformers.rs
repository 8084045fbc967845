//! Anthropic request mapping.
//!
//! Only `model`, `max_tokens`, `temperature` and `top_p` are forwarded; the
//! system instruction moves out of the turn history into `system`.

use serde_json::{Value, json};

use crate::defaults;
use crate::error::LlmError;
use crate::traits::RequestTransformer;
use crate::types::{ChatRequest, split_system_instruction};

#[derive(Debug, Clone)]
pub struct AnthropicRequestTransformer {
    default_model: String,
}

impl AnthropicRequestTransformer {
    pub fn new(default_model: impl Into<String>) -> Self {
        Self {
            default_model: default_model.into(),
        }
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }
}

impl Default for AnthropicRequestTransformer {
    fn default() -> Self {
        Self::new(defaults::anthropic::CHAT_MODEL)
    }
}

impl RequestTransformer for AnthropicRequestTransformer {
    fn provider_id(&self) -> &str {
        "anthropic"
    }

    fn transform_chat(&self, req: &ChatRequest) -> Result<Value, LlmError> {
        let options = &req.options;
        let (system, turns) = split_system_instruction(&req.messages);

        let mut body = json!({
            "model": req.model_or(&self.default_model),
            "max_tokens": options.max_tokens.unwrap_or(defaults::anthropic::MAX_TOKENS),
            "temperature": options.temperature.unwrap_or(defaults::anthropic::TEMPERATURE),
            "messages": turns,
        });
        if !system.is_empty() {
            body["system"] = json!(system);
        }
        if let Some(top_p) = options.top_p {
            body["top_p"] = json!(top_p);
        }
        if req.stream {
            body["stream"] = json!(true);
        }
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ChatMessage, PromptOptions};

    #[test]
    fn system_message_moves_to_system_field() {
        let req = ChatRequest::new(vec![ChatMessage::system("Be concise"), ChatMessage::user("Hi")]);
        let body = AnthropicRequestTransformer::default().transform_chat(&req).unwrap();
        assert_eq!(body["system"], "Be concise");
        assert_eq!(body["messages"], json!([{ "role": "user", "content": "Hi" }]));
        assert_eq!(body["max_tokens"], 4096);
        assert_eq!(body["temperature"], 0.7);
        assert_eq!(body["model"], "claude-3-5-sonnet-20240620");
    }

    #[test]
    fn unsupported_options_are_dropped() {
        let options = PromptOptions::new()
            .with_temperature(0.0)
            .with_top_p(0.8)
            .with_seed(1)
            .with_frequency_penalty(1.0)
            .with_max_tokens(100);
        let req = ChatRequest::new(vec![ChatMessage::user("Hi")])
            .with_options(options)
            .with_streaming(true);
        let body = AnthropicRequestTransformer::default().transform_chat(&req).unwrap();
        assert_eq!(body["temperature"], 0.0);
        assert_eq!(body["top_p"], 0.8);
        assert_eq!(body["max_tokens"], 100);
        assert_eq!(body["stream"], true);
        assert!(body.get("seed").is_none());
        assert!(body.get("frequency_penalty").is_none());
        assert!(body.get("system").is_none());
    }
}
