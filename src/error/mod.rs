//! Error Handling Module
//!
//! - `LlmError` and `ErrorCategory`
//! - HTTP status classification shared by every provider client
//! - conversions from `reqwest` and `serde_json` errors

mod conversions;
pub mod helpers;
pub mod types;

pub use helpers::{classify_error_response, classify_http_error, read_json_response};
pub use types::*;
