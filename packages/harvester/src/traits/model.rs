//! Entity model trait: the external NER capability.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::entity::RawEntitySpan;

/// Named-entity recognition capability.
///
/// Given a text, a label set and a confidence threshold, return the spans
/// the model detected. Implementations wrap a concrete model service (see
/// [`crate::model::RemoteModel`]); tests use
/// [`crate::testing::MockModel`].
#[async_trait]
pub trait EntityModel: Send + Sync {
    /// Predict entity spans in `text`.
    ///
    /// Spans are returned in detection order. An unavailable or failing
    /// model is fatal to the current page only, never to the run.
    async fn predict_entities(
        &self,
        text: &str,
        labels: &[&str],
        threshold: f32,
    ) -> Result<Vec<RawEntitySpan>>;
}
