//! Usage, price and finish reason.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Token accounting for one call.
///
/// `total_tokens` is always `input_tokens + output_tokens`; construct through
/// [`Usage::new`] so that holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub total_tokens: u32,
}

impl Usage {
    pub const fn new(input_tokens: u32, output_tokens: u32) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens: input_tokens.saturating_add(output_tokens),
        }
    }

    /// Flat-billed usage: everything counts as input.
    pub const fn flat(total_tokens: u32) -> Self {
        Self::new(total_tokens, 0)
    }
}

/// Cost of a call in USD. `total` is always `input + output`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Price {
    pub input: f64,
    pub output: f64,
    pub total: f64,
}

impl Price {
    pub fn new(input: f64, output: f64) -> Self {
        Self {
            input,
            output,
            total: input + output,
        }
    }

    pub const fn zero() -> Self {
        Self {
            input: 0.0,
            output: 0.0,
            total: 0.0,
        }
    }
}

/// Why a provider stopped generating.
///
/// Well-known values get their own variant; anything else is carried verbatim
/// in `Other`. Serializes as the provider's string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FinishReason {
    Stop,
    Length,
    ToolCalls,
    ContentFilter,
    FunctionCall,
    EndTurn,
    Other(String),
}

impl FinishReason {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Stop => "stop",
            Self::Length => "length",
            Self::ToolCalls => "tool_calls",
            Self::ContentFilter => "content_filter",
            Self::FunctionCall => "function_call",
            Self::EndTurn => "end_turn",
            Self::Other(s) => s,
        }
    }
}

impl From<&str> for FinishReason {
    fn from(value: &str) -> Self {
        match value {
            "stop" => Self::Stop,
            "length" => Self::Length,
            "tool_calls" => Self::ToolCalls,
            "content_filter" => Self::ContentFilter,
            "function_call" => Self::FunctionCall,
            "end_turn" => Self::EndTurn,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for FinishReason {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<FinishReason> for String {
    fn from(value: FinishReason) -> Self {
        match value {
            FinishReason::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for FinishReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
