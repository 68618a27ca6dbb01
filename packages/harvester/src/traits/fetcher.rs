//! Fetcher trait: retrieve a URL's raw document.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::FetchResult;

/// A fetched page before any processing.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// URL the page was fetched from
    pub url: String,

    /// Raw HTML body
    pub html: String,

    /// When the page was fetched
    pub fetched_at: DateTime<Utc>,
}

impl FetchedPage {
    pub fn new(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            html: html.into(),
            fetched_at: Utc::now(),
        }
    }
}

/// Page retrieval capability.
///
/// The crawl and the page loop both go through this seam so that tests can
/// run against canned documents without a network.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch a single URL.
    ///
    /// A transport failure or a non-2xx status is an error; callers treat
    /// it as non-fatal for the batch.
    async fn fetch(&self, url: &str) -> FetchResult<FetchedPage>;
}
