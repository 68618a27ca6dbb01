//! Biography crawling and named-entity harvesting.
//!
//! Enumerates biography pages on an encyclopedia site, isolates each page's
//! biographical text, runs an external named-entity model over it,
//! normalizes the detections into five categories (person, country, date,
//! place, city), counts entity occurrences in the source text, and hands
//! the per-page frequency table to a result sink (CSV + word cloud).
//!
//! # Usage
//!
//! ```rust,ignore
//! use harvester::{
//!     CrawlConfig, FileSink, HttpFetcher, Pipeline, PipelineConfig, RemoteModel,
//! };
//!
//! let fetcher = HttpFetcher::new()?;
//! let model = RemoteModel::new("http://localhost:8080/predict")?;
//! let sink = FileSink::new("Mathaf Encyclopedia");
//! let pipeline = Pipeline::new(fetcher, model, sink, PipelineConfig::new("Mathaf Encyclopedia"));
//!
//! let crawl = CrawlConfig::new("https://encyclopedia.example.org/", "/bios/Pages");
//! let summary = pipeline.run(&crawl).await;
//! ```
//!
//! # Modules
//!
//! - [`traits`] - capability seams (fetcher, entity model, result sink)
//! - [`crawl`] - breadth-first link discovery
//! - [`segment`] - biography-region extraction
//! - [`chunk`] - word-safe chunking for the bounded-input model
//! - [`extract`] / [`normalize`] / [`count`] - span extraction,
//!   category normalization, frequency counting
//! - [`demonym`] - nationality → country reference table
//! - [`sinks`] - CSV files and word-cloud images
//! - [`testing`] - mock collaborators and fixtures

pub mod chunk;
pub mod count;
pub mod crawl;
pub mod demonym;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod segment;
pub mod sinks;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{FetchError, HarvestError, ReferenceError, Result};
pub use traits::{
    fetcher::{FetchedPage, Fetcher},
    model::EntityModel,
    sink::ResultSink,
};
pub use types::{
    config::{BoundaryStrategy, CrawlConfig, LanguageMode, PipelineConfig, DEFAULT_CHUNK_SIZE},
    entity::{CategorizedEntities, Category, EntityRecord, NormalizedEntity, PageResult,
             RawEntitySpan},
    language::LanguageProfile,
};

// Re-export pipeline components
pub use chunk::split_into_chunks;
pub use count::count_occurrences;
pub use crawl::crawl;
pub use demonym::DemonymIndex;
pub use extract::extract_entities;
pub use fetch::HttpFetcher;
pub use model::RemoteModel;
pub use normalize::normalize;
pub use pipeline::{Pipeline, RunSummary};
pub use segment::{document_text, segment_phrase, segment_structural};
pub use sinks::{FileSink, WordCloudRenderer};
