//! Remote API access.
//!
//! - [`client`]: the [`ApiClient`] trait the rest of the crate depends on
//! - [`http`]: the `reqwest` implementation of that trait

pub mod client;
pub mod http;

pub use client::ApiClient;
pub use http::HttpApiClient;
