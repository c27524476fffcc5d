//! HTTP module containing HTTP client functionality.
//!
//! - [`client`] - HTTP client creation and middleware configuration
//!
//! Header parsing helpers live in [`crate::utils`].

pub mod client;

pub use client::{create_http_client, HttpClientConfig};
