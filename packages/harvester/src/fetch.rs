//! HTTP fetcher backed by reqwest.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::{FetchError, FetchResult};
use crate::traits::fetcher::{FetchedPage, Fetcher};

/// Synchronous-in-spirit HTTP fetcher: one GET at a time, no caching.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a fetcher with a browser-like User-Agent, a 30s timeout and a
    /// bounded redirect policy.
    pub fn new() -> FetchResult<Self> {
        let user_agent = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| FetchError::Http(Box::new(e)))?;

        Ok(Self { client })
    }

    /// Use a preconfigured reqwest client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<FetchedPage> {
        debug!(url = %url, "fetching page");

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "HTTP request failed");
            FetchError::Http(Box::new(e))
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = %status, "non-success status");
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let html = response
            .text()
            .await
            .map_err(|e| FetchError::Http(Box::new(e)))?;

        Ok(FetchedPage::new(url, html))
    }
}
