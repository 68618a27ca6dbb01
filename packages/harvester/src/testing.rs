//! Testing utilities: mock collaborators and HTML fixtures.
//!
//! Useful for exercising the pipeline without a network or a real entity
//! model.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::{FetchError, FetchResult, Result};
use crate::traits::fetcher::{FetchedPage, Fetcher};
use crate::traits::model::EntityModel;
use crate::traits::sink::ResultSink;
use crate::types::entity::{PageResult, RawEntitySpan};

/// A fetcher serving canned HTML from a URL map.
///
/// Unknown URLs fail with an HTTP 404 status error, which exercises the
/// same skip paths a live fetch failure would.
#[derive(Default)]
pub struct MockFetcher {
    pages: HashMap<String, String>,
    fetches: Arc<Mutex<Vec<String>>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `html` for `url`.
    pub fn with_page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.insert(url.into(), html.into());
        self
    }

    /// URLs fetched so far, in order.
    pub fn fetched_urls(&self) -> Vec<String> {
        self.fetches.lock().unwrap().clone()
    }

    /// Number of fetches performed.
    pub fn fetch_count(&self) -> usize {
        self.fetches.lock().unwrap().len()
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<FetchedPage> {
        self.fetches.lock().unwrap().push(url.to_string());
        match self.pages.get(url) {
            Some(html) => Ok(FetchedPage::new(url, html.clone())),
            None => Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}

/// Record of one call made to [`MockModel`].
#[derive(Debug, Clone)]
pub struct ModelCall {
    pub text: String,
    pub labels: Vec<String>,
    pub threshold: f32,
}

/// An entity model returning canned spans per exact input text.
///
/// Texts without a canned answer yield no spans. Calls are recorded for
/// assertions.
#[derive(Default)]
pub struct MockModel {
    spans: HashMap<String, Vec<RawEntitySpan>>,
    calls: Arc<Mutex<Vec<ModelCall>>>,
}

impl MockModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `spans` whenever `text` is predicted.
    pub fn with_spans(mut self, text: impl Into<String>, spans: Vec<RawEntitySpan>) -> Self {
        self.spans.insert(text.into(), spans);
        self
    }

    /// All calls made to this mock, in order.
    pub fn calls(&self) -> Vec<ModelCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl EntityModel for MockModel {
    async fn predict_entities(
        &self,
        text: &str,
        labels: &[&str],
        threshold: f32,
    ) -> Result<Vec<RawEntitySpan>> {
        self.calls.lock().unwrap().push(ModelCall {
            text: text.to_string(),
            labels: labels.iter().map(|l| l.to_string()).collect(),
            threshold,
        });
        Ok(self.spans.get(text).cloned().unwrap_or_default())
    }
}

/// A sink collecting page results in memory.
#[derive(Default)]
pub struct CollectingSink {
    pages: Arc<Mutex<Vec<PageResult>>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pages persisted so far.
    pub fn pages(&self) -> Vec<PageResult> {
        self.pages.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResultSink for CollectingSink {
    async fn persist(&self, page: &PageResult) -> Result<()> {
        self.pages.lock().unwrap().push(page.clone());
        Ok(())
    }
}

/// Build a biography page fixture: a `Biography` heading, the given
/// paragraphs, an `Exhibitions` heading, and anchor links.
pub fn bio_page_html(paragraphs: &[&str], links: &[&str]) -> String {
    let body: String = paragraphs.iter().map(|p| format!("<p>{p}</p>")).collect();
    let anchors: String = links
        .iter()
        .map(|l| format!(r#"<a href="{l}">link</a>"#))
        .collect();
    format!(
        "<html><body>{anchors}<h1>Biography</h1>{body}<h1>Exhibitions</h1>\
         <p>Exhibition list.</p></body></html>"
    )
}

/// Build an index page fixture that only links to other pages.
pub fn index_page_html(links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|l| format!(r#"<a href="{l}">link</a>"#))
        .collect();
    format!("<html><body><h1>Artists</h1>{anchors}</body></html>")
}
