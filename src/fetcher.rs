use crate::config::FetchConfig;
use crate::types::{HubError, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Shared HTTP client for the source adapters.
///
/// There is no retry policy: a failed fetch is final within the request.
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(config: &FetchConfig) -> Self {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client }
    }

    /// GET a URL and return the response body as text, treating any
    /// non-success status as an error.
    pub async fn fetch_text(&self, url: &str) -> Result<String> {
        debug!("Fetching {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(HubError::General(format!(
                "HTTP {}: {}",
                status,
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let body = response.text().await?;
        debug!("Fetched {} ({} bytes)", url, body.len());
        Ok(body)
    }

    /// Start a request with custom headers (used by the social adapter for
    /// its credential headers).
    pub fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.client.get(url)
    }
}
