//! HTTP client for fetching category pages.
//!
//! The site gates category pages behind a store-selection cookie, so
//! every request carries the configured Cookie header verbatim. One
//! client is built per aggregation run and cloned into the category
//! tasks; reqwest clients share their connection pool across clones.

use std::time::Duration;

use reqwest::Client;

/// HTTP client carrying the site cookie, user agent and timeout.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    cookie: String,
}

impl HttpClient {
    /// Build a client. The timeout bounds each request end to end;
    /// there is no retry on top of it.
    pub fn new(user_agent: &str, cookie: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self {
            client,
            cookie: cookie.to_string(),
        })
    }

    /// Fetch a page and return its body as text.
    pub async fn get_text(&self, url: &str) -> Result<String, reqwest::Error> {
        let response = self
            .client
            .get(url)
            .header("Cookie", &self.cookie)
            .send()
            .await?;
        response.text().await
    }
}
