//! Usage to cost.

use crate::types::{Price, Usage};

use super::catalog::{Model, ModelCatalog};

/// How a model charges for tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Billing {
    /// Separate input and output rates.
    #[default]
    PerDirection,
    /// One rate over all tokens, no output charge (embedding vendors).
    Flat,
}

pub fn calculate_price(model: &Model, usage: &Usage, billing: Billing) -> Price {
    match billing {
        Billing::PerDirection => Price::new(
            model.input * f64::from(usage.input_tokens),
            model.output * f64::from(usage.output_tokens),
        ),
        Billing::Flat => Price::new(model.input * f64::from(usage.total_tokens), 0.0),
    }
}

/// Price lookup bound to one call: which catalog identity, which model, how billed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingContext {
    pub provider: String,
    pub model: String,
    pub billing: Billing,
}

impl PricingContext {
    pub fn new(provider: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            model: model.into(),
            billing: Billing::PerDirection,
        }
    }

    pub fn with_billing(mut self, billing: Billing) -> Self {
        self.billing = billing;
        self
    }

    /// Price `usage` against the global catalog. Unknown models cost nothing.
    pub fn price(&self, usage: &Usage) -> Price {
        self.price_with(ModelCatalog::global(), usage)
    }

    pub fn price_with(&self, catalog: &ModelCatalog, usage: &Usage) -> Price {
        match catalog.get(&self.provider, &self.model) {
            Some(model) => calculate_price(model, usage, self.billing),
            None => {
                tracing::warn!(
                    provider = %self.provider,
                    model = %self.model,
                    "model not in catalog; reporting zero cost"
                );
                Price::zero()
            }
        }
    }
}
