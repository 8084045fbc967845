//! Capability traits implemented by the provider clients.

mod chat;
mod embedding;
mod transformer;

pub use chat::{ChatCapability, ProviderRequest};
pub use embedding::EmbeddingCapability;
pub use transformer::RequestTransformer;
