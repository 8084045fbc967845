//! Provider Implementations
//!
//! [`Provider`] and [`EmbeddingProvider`] are closed: every name parses, and
//! names nobody recognises land in `Unknown`, which is served exactly like
//! OpenAI.

pub mod anthropic;
pub mod cohere;
pub mod mixedbread;
pub mod openai;
pub mod perplexity;
pub mod voyageai;

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::params::TuningFamily;

/// Chat completion backends.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Provider {
    OpenAi,
    Anthropic,
    Perplexity,
    Cohere,
    Unknown(String),
}

impl Provider {
    /// Case-insensitive; never fails.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "openai" => Self::OpenAi,
            "anthropic" => Self::Anthropic,
            "perplexity" => Self::Perplexity,
            "cohere" => Self::Cohere,
            _ => Self::Unknown(name.to_string()),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
            Self::Perplexity => "perplexity",
            Self::Cohere => "cohere",
            Self::Unknown(name) => name,
        }
    }

    /// The provider that actually serves requests.
    pub fn resolved(&self) -> Provider {
        match self {
            Self::Unknown(_) => Self::OpenAi,
            known => known.clone(),
        }
    }

    pub fn supports_streaming(&self) -> bool {
        !matches!(self, Self::Cohere)
    }

    pub fn tuning_family(&self) -> TuningFamily {
        match self {
            Self::OpenAi | Self::Unknown(_) => TuningFamily::OpenAi,
            Self::Anthropic => TuningFamily::Anthropic,
            Self::Perplexity | Self::Cohere => TuningFamily::Untuned,
        }
    }
}

impl FromStr for Provider {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for Provider {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<String> for Provider {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Embedding backends.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EmbeddingProvider {
    OpenAi,
    VoyageAi,
    MixedbreadAi,
    Unknown(String),
}

impl EmbeddingProvider {
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "openai" => Self::OpenAi,
            "voyageai" | "voyage" => Self::VoyageAi,
            "mixedbread-ai" | "mixedbread" | "mxbai" => Self::MixedbreadAi,
            _ => Self::Unknown(name.to_string()),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::OpenAi => "openai",
            Self::VoyageAi => "voyageai",
            Self::MixedbreadAi => "mixedbread-ai",
            Self::Unknown(name) => name,
        }
    }

    pub fn resolved(&self) -> EmbeddingProvider {
        match self {
            Self::Unknown(_) => Self::OpenAi,
            known => known.clone(),
        }
    }
}

impl FromStr for EmbeddingProvider {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for EmbeddingProvider {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<String> for EmbeddingProvider {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl fmt::Display for EmbeddingProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsing_never_fails() {
        assert_eq!(Provider::parse("Anthropic"), Provider::Anthropic);
        assert_eq!(" cohere ".parse::<Provider>().unwrap(), Provider::Cohere);
        let unknown = Provider::from("llamafile");
        assert_eq!(unknown, Provider::Unknown("llamafile".into()));
        assert_eq!(unknown.resolved(), Provider::OpenAi);
        assert_eq!(unknown.tuning_family(), TuningFamily::OpenAi);
        assert_eq!(unknown.to_string(), "llamafile");
    }

    #[test]
    fn only_cohere_lacks_streaming() {
        assert!(Provider::OpenAi.supports_streaming());
        assert!(Provider::Perplexity.supports_streaming());
        assert!(!Provider::Cohere.supports_streaming());
    }

    #[test]
    fn embedding_aliases() {
        assert_eq!(EmbeddingProvider::parse("mixedbread-ai"), EmbeddingProvider::MixedbreadAi);
        assert_eq!(EmbeddingProvider::parse("voyageai"), EmbeddingProvider::VoyageAi);
        assert_eq!(
            EmbeddingProvider::parse("other").resolved(),
            EmbeddingProvider::OpenAi
        );
    }
}
