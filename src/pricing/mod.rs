//! Model catalog and cost calculation.

pub mod calculator;
pub mod catalog;

pub use calculator::{Billing, PricingContext, calculate_price};
pub use catalog::{Model, ModelCatalog};
