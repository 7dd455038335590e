//! HTTP fetch layer for category pages.

mod http_client;

pub use http_client::HttpClient;
