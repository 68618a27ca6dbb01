//! Typed errors for the harvesting pipeline.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to keep error
//! handling strongly typed and composable.

use thiserror::Error;

/// Errors that can occur while processing a page through the pipeline.
///
/// All of these are caught at the per-page loop boundary: a failing page is
/// logged and skipped, never fatal to the whole run.
#[derive(Debug, Error)]
pub enum HarvestError {
    /// Fetching the page failed
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// A boundary marker could not be located in the page
    #[error("boundary marker not found: {marker:?}")]
    BoundaryNotFound { marker: String },

    /// The entity model call failed or is unavailable
    #[error("entity model error: {0}")]
    Model(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The language of a page could not be determined
    #[error("language not recognized for: {url}")]
    UnknownLanguage { url: String },

    /// Demonym reference table problem
    #[error("reference table error: {0}")]
    Reference(#[from] ReferenceError),

    /// Writing result rows failed
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    /// Word-cloud rendering failed
    #[error("render error: {0}")]
    Render(String),

    /// Filesystem operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur while fetching a URL.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure (DNS, connect, timeout)
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Non-2xx response
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    /// URL could not be parsed
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Errors raised when loading the demonym reference table.
#[derive(Debug, Error)]
pub enum ReferenceError {
    /// A required column is absent from the header row
    #[error("missing required column: {name}")]
    MissingColumn { name: String },

    /// The table could not be read
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    /// The table file could not be opened
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;
