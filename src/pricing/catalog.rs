//! Static model catalog.
//!
//! Records are keyed `"{provider}-{model_id}"`. The bundled table is parsed
//! once on first use and is read-only afterwards.

use std::collections::HashMap;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::error::LlmError;

/// Catalog record for one model.
///
/// `input` and `output` are USD per token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    pub id: String,
    pub label: String,
    pub provider: String,
    pub input: f64,
    pub output: f64,
    pub max_context_tokens: u32,
    pub max_input_tokens: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    /// Per-request fee some search-backed models charge. Informational; not
    /// part of the per-token price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flat_fee: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cutoff: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_dimensions: Option<u32>,
}

#[derive(Debug, Clone, Default)]
pub struct ModelCatalog {
    models: HashMap<String, Model>,
}

lazy_static! {
    static ref BUNDLED: ModelCatalog = ModelCatalog::from_json(include_str!("models.json"))
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, "bundled model catalog is invalid; pricing disabled");
            ModelCatalog::default()
        });
}

impl ModelCatalog {
    /// The process-wide catalog bundled with the crate.
    pub fn global() -> &'static ModelCatalog {
        &BUNDLED
    }

    /// Parse a catalog from a JSON object of `"{provider}-{id}": Model` entries.
    pub fn from_json(json: &str) -> Result<Self, LlmError> {
        let models: HashMap<String, Model> = serde_json::from_str(json)
            .map_err(|e| LlmError::ConfigurationError(format!("model catalog: {e}")))?;
        Ok(Self { models })
    }

    /// Load a catalog file in the bundled format.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, LlmError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            LlmError::ConfigurationError(format!("model catalog {}: {e}", path.display()))
        })?;
        Self::from_json(&json)
    }

    pub fn from_models(models: impl IntoIterator<Item = Model>) -> Self {
        let models = models
            .into_iter()
            .map(|m| (Self::key(&m.provider, &m.id), m))
            .collect();
        Self { models }
    }

    pub fn key(provider: &str, model_id: &str) -> String {
        format!("{provider}-{model_id}")
    }

    pub fn get(&self, provider: &str, model_id: &str) -> Option<&Model> {
        self.models.get(&Self::key(provider, model_id))
    }

    /// Models for one provider, sorted by id.
    pub fn models_for<'a>(&'a self, provider: &str) -> Vec<&'a Model> {
        let mut models: Vec<_> = self
            .models
            .values()
            .filter(|m| m.provider == provider)
            .collect();
        models.sort_by(|a, b| a.id.cmp(&b.id));
        models
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults;

    #[test]
    fn bundled_catalog_covers_default_models() {
        let catalog = ModelCatalog::global();
        assert!(!catalog.is_empty());
        for (provider, model) in [
            ("openai", defaults::openai::CHAT_MODEL),
            ("openai", defaults::openai::EMBEDDING_MODEL),
            ("anthropic", defaults::anthropic::CHAT_MODEL),
            ("perplexity", defaults::perplexity::CHAT_MODEL),
            ("cohere", defaults::cohere::CHAT_MODEL),
            (defaults::voyageai::PRICE_IDENTITY, defaults::voyageai::EMBEDDING_MODEL),
            (defaults::mixedbread::PRICE_IDENTITY, defaults::mixedbread::EMBEDDING_MODEL),
        ] {
            assert!(
                catalog.get(provider, model).is_some(),
                "missing {provider}-{model}"
            );
        }
    }

    #[test]
    fn bundled_keys_match_records() {
        let catalog = ModelCatalog::global();
        for (key, model) in &catalog.models {
            assert_eq!(key, &ModelCatalog::key(&model.provider, &model.id));
            assert!(model.input >= 0.0 && model.output >= 0.0);
        }
    }

    #[test]
    fn embedding_dimensions() {
        let small = ModelCatalog::global()
            .get("openai", "text-embedding-3-small")
            .unwrap();
        assert_eq!(small.dimensions, Some(1536));
    }

    #[test]
    fn from_file_loads_custom_rates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("models.json");
        std::fs::write(
            &path,
            r#"{"acme-tiny":{"id":"tiny","label":"Tiny","provider":"acme","input":0.001,"output":0.002,"maxContextTokens":2048,"maxInputTokens":2048}}"#,
        )
        .unwrap();

        let catalog = ModelCatalog::from_file(&path).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("acme", "tiny").map(|m| m.output), Some(0.002));
        assert!(ModelCatalog::from_file(dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn from_json_rejects_garbage() {
        assert!(matches!(
            ModelCatalog::from_json("[1, 2]"),
            Err(LlmError::ConfigurationError(_))
        ));
    }
}
