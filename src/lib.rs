//! # unillm - One prompt API over several LLM providers
//!
//! Send the same messages to OpenAI, Anthropic, Perplexity or Cohere and get
//! the same response back: the text, token usage, the finish reason, elapsed
//! time and a priced cost. Streaming calls yield a uniform sequence of chunks
//! ending in exactly one `Stop` or `Error`.
//!
#![deny(unsafe_code)]

//! ## Quick Start
//!
//! ```rust,no_run
//! use unillm::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), LlmError> {
//!     let api = ApiOptions::new().with_api_key("your-api-key");
//!     let response = system_prompt("Name three rivers.", "openai", PromptOptions::new(), &api).await?;
//!     println!("{} (${:.5})", response.message, response.price.total);
//!     Ok(())
//! }
//! ```
//!
//! ## Auto-tuning
//!
//! `ApiOptions::with_creativity`, `with_word_variety` and `with_focus` take
//! values in `[0, 1]` and fill in whichever sampling fields the target
//! provider understands. Explicit `PromptOptions` values always win.

pub mod defaults;
pub mod dispatch;
pub mod embed;
pub mod error;
pub mod observability;
pub mod params;
pub mod pricing;
pub mod prompt;
pub mod providers;
pub mod streaming;
pub mod traits;
pub mod types;
pub mod utils;

pub use embed::embed;
pub use error::{ErrorCategory, LlmError};
pub use prompt::{
    prompt, prompt_stream, prompt_streaming, system_prompt, system_prompt_stream,
    system_prompt_streaming,
};
pub use providers::{EmbeddingProvider, Provider};
pub use streaming::{PromptStream, PromptStreamEvent, PromptStreamHandler, StreamCallbacks};

/// Everything a typical caller needs.
pub mod prelude {
    pub use crate::embed::embed;
    pub use crate::error::{ErrorCategory, LlmError};
    pub use crate::prompt::{
        prompt, prompt_stream, prompt_streaming, system_prompt, system_prompt_stream,
        system_prompt_streaming,
    };
    pub use crate::providers::{EmbeddingProvider, Provider};
    pub use crate::streaming::{
        PromptStream, PromptStreamEvent, PromptStreamHandler, StreamCallbacks,
    };
    pub use crate::types::{
        ApiOptions, ChatMessage, Embedding, EmbeddingInput, EmbeddingInputType, EmbeddingParams,
        EmbeddingResponse, EncodingFormat, FinishReason, MessageRole, Price, PromptOptions,
        PromptResponse, ResponseFormat, Usage,
    };
}
