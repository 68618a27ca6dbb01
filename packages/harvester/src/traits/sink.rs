//! Result sink trait: persist a page's entity records.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::entity::PageResult;

/// Destination for per-page results.
///
/// The pipeline computes records once per page and hands them to the sink;
/// what happens after that (CSV files, images, a database) is the sink's
/// concern. See [`crate::sinks::FileSink`] for the file-based
/// implementation.
#[async_trait]
pub trait ResultSink: Send + Sync {
    /// Persist one page's records.
    async fn persist(&self, page: &PageResult) -> Result<()>;
}
