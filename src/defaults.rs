//! Default Configuration Values
//!
//! Every default used by the providers, the auto-tuner and the HTTP layer
//! lives here so request mapping code stays free of magic numbers.

use std::time::Duration;

/// HTTP client defaults, used when the caller does not inject a `reqwest::Client`.
pub mod http {
    use super::*;

    /// Request timeout for a whole call, including long streaming responses.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

    /// Timeout for establishing a connection.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    pub const USER_AGENT: &str = concat!("unillm/", env!("CARGO_PKG_VERSION"));
}

pub mod openai {
    pub const BASE_URL: &str = "https://api.openai.com/v1";
    pub const CHAT_MODEL: &str = "gpt-4-turbo";
    pub const EMBEDDING_MODEL: &str = "text-embedding-3-small";
    pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
}

pub mod anthropic {
    pub const BASE_URL: &str = "https://api.anthropic.com";
    pub const CHAT_MODEL: &str = "claude-3-5-sonnet-20240620";
    pub const API_VERSION: &str = "2023-06-01";
    pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

    /// The Messages API requires `max_tokens`; this fills it when the caller does not.
    pub const MAX_TOKENS: u32 = 4096;

    /// Applied only when neither the caller nor the auto-tuner set a temperature.
    pub const TEMPERATURE: f64 = 0.7;
}

pub mod perplexity {
    pub const BASE_URL: &str = "https://api.perplexity.ai";
    pub const CHAT_MODEL: &str = "llama-3-sonar-small-32k-chat";
    pub const API_KEY_ENV: &str = "PERPLEXITY_API_KEY";
}

pub mod cohere {
    pub const BASE_URL: &str = "https://api.cohere.ai/v1";
    pub const CHAT_MODEL: &str = "command-r-plus";
    pub const API_KEY_ENV: &str = "COHERE_API_KEY";
    pub const MAX_TOKENS: u32 = 128_000;
    pub const TEMPERATURE: f64 = 0.3;

    /// `generate` reports no finish reason of its own.
    pub const FINISH_REASON: &str = "completed";
}

pub mod voyageai {
    pub const BASE_URL: &str = "https://api.voyageai.com/v1";
    pub const EMBEDDING_MODEL: &str = "voyage-large-2-instruct";
    pub const PRICE_IDENTITY: &str = "voyageai";
    pub const API_KEY_ENV: &str = "VOYAGE_API_KEY";
}

pub mod mixedbread {
    pub const BASE_URL: &str = "https://api.mixedbread.ai/v1";
    pub const EMBEDDING_MODEL: &str = "mixedbread-ai/mxbai-embed-large-v1";
    pub const PRICE_IDENTITY: &str = "mixedbread-ai";
    pub const API_KEY_ENV: &str = "MXBAI_API_KEY";
}

/// Auto-tuner constants.
pub mod auto_tune {
    /// Temperatures below this are treated as "deterministic" and get a fixed seed.
    pub const DETERMINISTIC_THRESHOLD: f64 = 0.05;

    pub const DETERMINISTIC_SEED: i64 = 1337;
}
