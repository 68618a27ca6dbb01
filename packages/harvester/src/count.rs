//! Frequency counting: literal occurrences of each entity in the source
//! chunks.

use crate::types::entity::{CategorizedEntities, EntityRecord};

/// Count non-overlapping, case-sensitive substring occurrences of each
/// normalized entity across all chunks, summed.
///
/// This is a literal count, not word-boundary aware: an entity that is a
/// substring of another token over-counts (a known, kept limitation of the
/// counting rule). Records come back sorted by `(entity text, category)`.
pub fn count_occurrences(
    entities: &CategorizedEntities,
    chunks: &[String],
    link: &str,
) -> Vec<EntityRecord> {
    let mut records: Vec<EntityRecord> = entities
        .iter()
        .map(|entity| {
            let occurrences = chunks
                .iter()
                .map(|chunk| chunk.matches(entity.text.as_str()).count())
                .sum();
            EntityRecord {
                link: link.to_string(),
                entity: entity.text,
                label: entity.category,
                occurrences,
            }
        })
        .collect();

    records.sort_by(|a, b| (&a.entity, a.label).cmp(&(&b.entity, b.label)));
    records
}
