//! Utilities shared by the provider clients.

pub mod clock;
pub mod http_headers;
pub mod url;

pub use clock::RequestClock;
pub use http_headers::{HttpHeaderBuilder, ProviderHeaders};
pub use url::join_url;
