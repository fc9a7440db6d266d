//! HTTP client for the data virtualisation API.

pub mod api;
pub mod http;
pub mod token;

pub use api::Api;
pub use http::HttpApi;
pub use token::{AuthToken, FileTokenStore, MemoryTokenStore, TokenStore};
