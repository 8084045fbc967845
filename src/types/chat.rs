//! Chat messages, requests and the aggregated response.

use serde::{Deserialize, Serialize};

use super::common::{FinishReason, Price, Usage};
use super::options::PromptOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }
}

/// Split a history into the system instruction and the remaining turns.
///
/// The instruction is the content of the first system message (empty when
/// there is none); every system message is removed from the turns.
pub fn split_system_instruction(messages: &[ChatMessage]) -> (String, Vec<ChatMessage>) {
    let system = messages
        .iter()
        .find(|m| m.role == MessageRole::System)
        .map(|m| m.content.clone())
        .unwrap_or_default();
    let turns = messages
        .iter()
        .filter(|m| m.role != MessageRole::System)
        .cloned()
        .collect();
    (system, turns)
}

/// Everything a provider client needs to build one chat call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub options: PromptOptions,
    pub stream: bool,
}

impl ChatRequest {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            ..Default::default()
        }
    }

    pub fn with_options(mut self, options: PromptOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_streaming(mut self, stream: bool) -> Self {
        self.stream = stream;
        self
    }

    /// The requested model, or `default` when the caller left it unset.
    pub fn model_or(&self, default: &str) -> String {
        self.options
            .model
            .clone()
            .unwrap_or_else(|| default.to_string())
    }
}

/// The aggregated result of a completed call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptResponse {
    /// Full generated text; empty when the provider returned none.
    pub message: String,
    pub usage: Usage,
    pub finish_reason: Option<FinishReason>,
    pub elapsed_ms: u64,
    pub price: Price,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_takes_first_system_and_drops_all() {
        let messages = vec![
            ChatMessage::system("Be concise"),
            ChatMessage::user("Hi"),
            ChatMessage::system("ignored"),
            ChatMessage::assistant("Hello"),
        ];
        let (system, turns) = split_system_instruction(&messages);
        assert_eq!(system, "Be concise");
        assert_eq!(
            turns,
            vec![ChatMessage::user("Hi"), ChatMessage::assistant("Hello")]
        );
    }

    #[test]
    fn split_without_system_is_empty() {
        let (system, turns) = split_system_instruction(&[ChatMessage::user("Hi")]);
        assert!(system.is_empty());
        assert_eq!(turns.len(), 1);
    }
}
