//! Entity data types flowing through the pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The five semantic buckets entities are sorted into.
///
/// `Ord` follows declaration order and is used as the tie-breaker when
/// result rows are sorted by `(entity text, category)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Person,
    Country,
    Date,
    Place,
    City,
}

impl Category {
    /// All categories, in declaration order.
    pub const ALL: [Category; 5] = [
        Category::Person,
        Category::Country,
        Category::Date,
        Category::Place,
        Category::City,
    ];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Person => "Person",
            Category::Country => "Country",
            Category::Date => "Date",
            Category::Place => "Place",
            Category::City => "City",
        };
        f.write_str(name)
    }
}

/// One detection emitted by the entity model for one chunk.
///
/// `label` is the model's surface label string (profile-dependent, e.g.
/// `"Person"` or `"اسم"`); it is mapped back to a [`Category`] by the
/// normalizer. Ephemeral: produced per chunk, consumed immediately.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEntitySpan {
    /// Detected surface text
    pub text: String,

    /// Label string as returned by the model
    pub label: String,

    /// Model confidence in [0, 1]
    pub score: f32,
}

impl RawEntitySpan {
    /// Create a span with full confidence (useful in tests and fixtures).
    pub fn new(text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
            score: 1.0,
        }
    }

    /// Set the confidence score.
    pub fn with_score(mut self, score: f32) -> Self {
        self.score = score;
        self
    }
}

/// Canonical form of an entity after category-specific normalization.
///
/// Within one page's result set, `(text, category)` pairs are unique; the
/// same surface text under two categories is kept as two entities.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NormalizedEntity {
    pub text: String,
    pub category: Category,
}

impl NormalizedEntity {
    pub fn new(text: impl Into<String>, category: Category) -> Self {
        Self {
            text: text.into(),
            category,
        }
    }
}

/// The five ordered category lists produced by the normalizer.
///
/// Persons, countries, places and cities are sorted lexicographically;
/// dates (years) are sorted in ascending numeric order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorizedEntities {
    pub persons: Vec<String>,
    pub countries: Vec<String>,
    pub dates: Vec<String>,
    pub places: Vec<String>,
    pub cities: Vec<String>,
}

impl CategorizedEntities {
    /// Total number of entities across all categories.
    pub fn len(&self) -> usize {
        self.persons.len()
            + self.countries.len()
            + self.dates.len()
            + self.places.len()
            + self.cities.len()
    }

    /// True when no category holds any entity.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate every entity as a [`NormalizedEntity`], category by category.
    pub fn iter(&self) -> impl Iterator<Item = NormalizedEntity> + '_ {
        let tag = |v: &'_ Vec<String>, c: Category| {
            v.iter()
                .map(move |t| NormalizedEntity::new(t.clone(), c))
                .collect::<Vec<_>>()
        };
        tag(&self.persons, Category::Person)
            .into_iter()
            .chain(tag(&self.countries, Category::Country))
            .chain(tag(&self.dates, Category::Date))
            .chain(tag(&self.places, Category::Place))
            .chain(tag(&self.cities, Category::City))
    }
}

/// One output row: an entity, its category, and how often its literal text
/// occurs in the page's content chunks.
///
/// Computed once per page after normalization, written once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRecord {
    /// URL of the page the entity was harvested from
    pub link: String,

    /// Normalized entity text
    pub entity: String,

    /// Category label
    pub label: Category,

    /// Non-overlapping literal substring occurrences across the page's chunks
    pub occurrences: usize,
}

/// Everything produced for one page, handed to the result sink.
#[derive(Debug, Clone)]
pub struct PageResult {
    /// URL of the processed page
    pub url: String,

    /// Result rows, sorted by `(entity text, category)`
    pub records: Vec<EntityRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_display_matches_english_labels() {
        assert_eq!(Category::Person.to_string(), "Person");
        assert_eq!(Category::City.to_string(), "City");
    }

    #[test]
    fn category_order_follows_declaration() {
        assert!(Category::Person < Category::Country);
        assert!(Category::Place < Category::City);
    }

    #[test]
    fn categorized_entities_iter_tags_categories() {
        let cats = CategorizedEntities {
            persons: vec!["Ayad".into()],
            dates: vec!["1987".into()],
            ..Default::default()
        };
        let all: Vec<_> = cats.iter().collect();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0], NormalizedEntity::new("Ayad", Category::Person));
        assert_eq!(all[1], NormalizedEntity::new("1987", Category::Date));
    }

    #[test]
    fn same_text_under_two_categories_is_two_entities() {
        let a = NormalizedEntity::new("Qatar", Category::Country);
        let b = NormalizedEntity::new("Qatar", Category::Place);
        assert_ne!(a, b);
    }
}
