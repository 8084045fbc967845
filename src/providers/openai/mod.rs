//! OpenAI Provider

pub mod client;
pub mod streaming;
pub mod transformers;
pub mod types;

pub use client::OpenAiClient;
pub use streaming::OpenAiEventConverter;
pub use transformers::OpenAiRequestTransformer;
