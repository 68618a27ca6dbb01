//! Entity extraction: run the model over every chunk and flatten.

use tracing::debug;

use crate::error::Result;
use crate::traits::model::EntityModel;
use crate::types::entity::RawEntitySpan;
use crate::types::language::LanguageProfile;

/// Invoke the entity model once per chunk with the profile's label set and
/// threshold, returning all spans in chunk-then-detection order.
///
/// No cross-chunk deduplication happens here; that is the normalizer's job.
/// A model failure aborts the current page only.
pub async fn extract_entities<M: EntityModel>(
    model: &M,
    chunks: &[String],
    profile: &LanguageProfile,
) -> Result<Vec<RawEntitySpan>> {
    let mut all_spans = Vec::new();

    for chunk in chunks {
        let spans = model
            .predict_entities(chunk, profile.labels(), profile.threshold)
            .await?;
        all_spans.extend(spans);
    }

    debug!(
        chunks = chunks.len(),
        spans = all_spans.len(),
        language = profile.code,
        "entity extraction done"
    );
    Ok(all_spans)
}
