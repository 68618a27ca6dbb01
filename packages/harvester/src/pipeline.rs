//! Pipeline orchestration: crawl, then process each target page.
//!
//! The pipeline is an explicit context object holding its collaborators
//! (fetcher, entity model, result sink, demonym index) and configuration;
//! there is no module-level state. Execution is strictly sequential.

use tracing::{error, info};

use crate::chunk::split_into_chunks;
use crate::count::count_occurrences;
use crate::crawl::crawl;
use crate::demonym::DemonymIndex;
use crate::error::Result;
use crate::extract::extract_entities;
use crate::normalize::normalize;
use crate::segment::{document_text, segment_phrase, segment_structural};
use crate::traits::{fetcher::Fetcher, model::EntityModel, sink::ResultSink};
use crate::types::config::{BoundaryStrategy, CrawlConfig, LanguageMode, PipelineConfig};
use crate::types::entity::PageResult;
use crate::types::language::LanguageProfile;

/// Outcome of a whole run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Target pages the crawl discovered
    pub pages_found: usize,

    /// Pages processed and persisted successfully
    pub pages_processed: usize,

    /// Pages that failed, with the error rendered as text
    pub failed: Vec<(String, String)>,
}

impl RunSummary {
    /// True when every discovered page was processed.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// The crawl-and-extract pipeline.
pub struct Pipeline<F, M, S> {
    fetcher: F,
    model: M,
    sink: S,
    demonyms: DemonymIndex,
    config: PipelineConfig,
}

impl<F, M, S> Pipeline<F, M, S>
where
    F: Fetcher,
    M: EntityModel,
    S: ResultSink,
{
    pub fn new(fetcher: F, model: M, sink: S, config: PipelineConfig) -> Self {
        Self {
            fetcher,
            model,
            sink,
            demonyms: DemonymIndex::empty(),
            config,
        }
    }

    /// Attach a demonym reference table.
    pub fn with_demonyms(mut self, demonyms: DemonymIndex) -> Self {
        self.demonyms = demonyms;
        self
    }

    /// Crawl from the seed and process every target page.
    ///
    /// Per-page failures are logged and collected; they never abort the
    /// batch.
    pub async fn run(&self, crawl_config: &CrawlConfig) -> RunSummary {
        let targets = crawl(&self.fetcher, crawl_config).await;
        self.process_all(&targets).await
    }

    /// Process an explicit list of page URLs (no crawl phase).
    pub async fn process_all(&self, urls: &[String]) -> RunSummary {
        let mut summary = RunSummary {
            pages_found: urls.len(),
            ..Default::default()
        };

        for url in urls {
            match self.process_page(url).await {
                Ok(()) => summary.pages_processed += 1,
                Err(e) => {
                    error!(url = %url, error = %e, "page processing failed");
                    summary.failed.push((url.clone(), e.to_string()));
                }
            }
        }

        info!(
            found = summary.pages_found,
            processed = summary.pages_processed,
            failed = summary.failed.len(),
            "run finished"
        );
        summary
    }

    /// Process one page end to end: fetch, segment, chunk, extract,
    /// normalize, count, persist.
    pub async fn process_page(&self, url: &str) -> Result<()> {
        let profile = self.profile_for(url)?;
        let page = self.fetcher.fetch(url).await?;

        let chunks = self.segment_and_chunk(&page.html)?;
        info!(url = %url, chunks = chunks.len(), language = profile.code, "content segmented");

        let spans = extract_entities(&self.model, &chunks, &profile).await?;
        let entities = normalize(
            &spans,
            &profile,
            &self.demonyms,
            self.config.require_capitalized_persons,
        );
        let records = count_occurrences(&entities, &chunks, url);

        let result = PageResult {
            url: url.to_string(),
            records,
        };
        self.sink.persist(&result).await
    }

    /// Resolve the language profile for a page, applying the configured
    /// threshold override if any.
    fn profile_for(&self, url: &str) -> Result<LanguageProfile> {
        let mut profile = match &self.config.language {
            LanguageMode::Fixed(profile) => profile.clone(),
            LanguageMode::FromUrl => LanguageProfile::from_url(url)?,
        };
        if let Some(threshold) = self.config.threshold {
            profile.threshold = threshold;
        }
        Ok(profile)
    }

    /// Apply the configured boundary strategy and produce content chunks.
    ///
    /// Structural segmentation yields paragraphs, which are already
    /// model-sized content units; over-long paragraphs are still chunked.
    /// Phrase segmentation yields one string that is always chunked.
    fn segment_and_chunk(&self, html: &str) -> Result<Vec<String>> {
        match &self.config.boundary {
            BoundaryStrategy::Structural {
                heading_tag,
                start_marker,
                end_marker,
            } => {
                let paragraphs = segment_structural(html, heading_tag, start_marker, end_marker)?;
                Ok(paragraphs
                    .iter()
                    .flat_map(|p| split_into_chunks(p, self.config.chunk_size))
                    .collect())
            }
            BoundaryStrategy::Phrase {
                start_phrase,
                end_phrase,
            } => {
                let text = document_text(html);
                let region = segment_phrase(&text, start_phrase, end_phrase)?;
                Ok(split_into_chunks(region, self.config.chunk_size))
            }
        }
    }
}
