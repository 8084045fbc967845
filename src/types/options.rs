//! Sampling options and transport overrides.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::error::LlmError;
use crate::params::AutoTuneKnobs;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseFormat {
    Text,
    JsonObject,
}

/// Provider-opaque sampling parameters.
///
/// Every field is optional. Each provider's request mapper picks the fields
/// its API understands and drops the rest; `extra` carries provider-specific
/// fields (e.g. Perplexity's `return_citations`) to the OpenAI-protocol body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PromptOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl PromptOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_response_format(mut self, format: ResponseFormat) -> Self {
        self.response_format = Some(format);
        self
    }

    pub fn with_frequency_penalty(mut self, penalty: f64) -> Self {
        self.frequency_penalty = Some(penalty);
        self
    }

    pub fn with_presence_penalty(mut self, penalty: f64) -> Self {
        self.presence_penalty = Some(penalty);
        self
    }

    pub fn with_top_p(mut self, top_p: f64) -> Self {
        self.top_p = Some(top_p);
        self
    }

    pub fn with_seed(mut self, seed: i64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_n(mut self, n: u32) -> Self {
        self.n = Some(n);
        self
    }

    pub fn with_stop(mut self, stop: Vec<String>) -> Self {
        self.stop = Some(stop);
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

/// Transport-level overrides for one call.
///
/// Anything left unset falls back to the provider defaults in
/// [`crate::defaults`]; the API key falls back to the provider's environment
/// variable.
#[derive(Debug, Clone, Default)]
pub struct ApiOptions {
    pub api_key: Option<SecretString>,
    pub base_url: Option<String>,
    /// Regional deployment hint. Recorded on the dispatch span; the built-in
    /// providers serve a single global endpoint.
    pub hosting_location: Option<String>,
    /// Identity used for price lookup only; routing is unaffected.
    pub override_provider: Option<String>,
    pub http_client: Option<reqwest::Client>,
    pub auto_tune_creativity: Option<f64>,
    pub auto_tune_word_variety: Option<f64>,
    pub auto_tune_focus: Option<f64>,
}

impl ApiOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(api_key.into()));
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_hosting_location(mut self, location: impl Into<String>) -> Self {
        self.hosting_location = Some(location.into());
        self
    }

    pub fn with_override_provider(mut self, provider: impl Into<String>) -> Self {
        self.override_provider = Some(provider.into());
        self
    }

    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn with_creativity(mut self, creativity: f64) -> Self {
        self.auto_tune_creativity = Some(creativity);
        self
    }

    pub fn with_word_variety(mut self, word_variety: f64) -> Self {
        self.auto_tune_word_variety = Some(word_variety);
        self
    }

    pub fn with_focus(mut self, focus: f64) -> Self {
        self.auto_tune_focus = Some(focus);
        self
    }

    pub fn knobs(&self) -> AutoTuneKnobs {
        AutoTuneKnobs {
            creativity: self.auto_tune_creativity,
            word_variety: self.auto_tune_word_variety,
            focus: self.auto_tune_focus,
        }
    }

    /// The explicit key, else `env_var`, else the lowercase `{provider}_api_key`.
    pub fn resolve_api_key(
        &self,
        provider_id: &str,
        env_var: &str,
    ) -> Result<SecretString, LlmError> {
        if let Some(key) = &self.api_key {
            return Ok(key.clone());
        }
        std::env::var(env_var)
            .or_else(|_| std::env::var(format!("{provider_id}_api_key")))
            .ok()
            .filter(|key| !key.trim().is_empty())
            .map(SecretString::from)
            .ok_or_else(|| {
                LlmError::MissingApiKey(format!(
                    "{provider_id}: pass ApiOptions::api_key or set {env_var}"
                ))
            })
    }

    pub fn base_url_or(&self, default: &str) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| default.to_string())
    }

    /// The injected client, or a fresh one with the library's timeouts.
    pub fn http_client(&self) -> Result<reqwest::Client, LlmError> {
        if let Some(client) = &self.http_client {
            return Ok(client.clone());
        }
        reqwest::Client::builder()
            .timeout(defaults::http::REQUEST_TIMEOUT)
            .connect_timeout(defaults::http::CONNECT_TIMEOUT)
            .user_agent(defaults::http::USER_AGENT)
            .build()
            .map_err(|e| LlmError::ConfigurationError(format!("HTTP client: {e}")))
    }
}
