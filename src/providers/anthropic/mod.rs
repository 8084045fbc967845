//! Anthropic Provider

pub mod client;
pub mod streaming;
pub mod transformers;
pub mod types;

pub use client::AnthropicClient;
pub use streaming::AnthropicEventConverter;
pub use transformers::AnthropicRequestTransformer;
