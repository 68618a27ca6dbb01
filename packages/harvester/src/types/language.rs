//! Language profiles: label sets and normalization rule switches.
//!
//! A profile bundles everything that differs between the English and the
//! localized (Arabic) pipelines so that variant behavior is configuration
//! rather than parallel code paths.

use crate::error::{HarvestError, Result};
use crate::types::entity::Category;

/// A language mode for the pipeline.
///
/// Holds the label strings sent to the entity model, the mapping back from
/// those labels to [`Category`], the confidence threshold, and the switches
/// that select category-specific normalization rules.
#[derive(Debug, Clone)]
pub struct LanguageProfile {
    /// Short identifier used in logs ("en", "ar")
    pub code: &'static str,

    /// Label strings, index-aligned with [`Category::ALL`]
    labels: [&'static str; 5],

    /// Confidence threshold passed to the entity model
    pub threshold: f32,

    /// Drop person spans whose lowercase form is a pronoun
    pub filter_pronouns: bool,

    /// Resolve country spans through the demonym index
    pub resolve_demonyms: bool,

    /// Drop non-date spans that contain no Arabic-script character
    pub require_arabic_script: bool,

    /// Drop city spans whose text is an Arabic country name
    pub exclude_arabic_countries_from_cities: bool,
}

impl LanguageProfile {
    /// English pipeline: pronoun filtering, demonym resolution, threshold 0.5.
    pub fn english() -> Self {
        Self {
            code: "en",
            labels: ["Person", "Country", "Date", "Place", "City"],
            threshold: 0.5,
            filter_pronouns: true,
            resolve_demonyms: true,
            require_arabic_script: false,
            exclude_arabic_countries_from_cities: false,
        }
    }

    /// Arabic pipeline: Arabic-script filtering, city/country cross-check,
    /// threshold 0.6.
    pub fn arabic() -> Self {
        Self {
            code: "ar",
            labels: ["اسم", "دولة", "تاريخ", "مكان", "مدينة"],
            threshold: 0.6,
            filter_pronouns: false,
            resolve_demonyms: false,
            require_arabic_script: true,
            exclude_arabic_countries_from_cities: true,
        }
    }

    /// Pick a profile from a page URL's language path segment.
    ///
    /// `/en/` selects English and `/ar/` selects Arabic; anything else is an
    /// error surfaced to the page loop.
    pub fn from_url(url: &str) -> Result<Self> {
        let lower = url.to_lowercase();
        if lower.contains("/en/") {
            Ok(Self::english())
        } else if lower.contains("/ar/") {
            Ok(Self::arabic())
        } else {
            Err(HarvestError::UnknownLanguage {
                url: url.to_string(),
            })
        }
    }

    /// Label strings sent to the entity model.
    pub fn labels(&self) -> &[&'static str; 5] {
        &self.labels
    }

    /// Map a model label string back to its category.
    pub fn category_for(&self, label: &str) -> Option<Category> {
        self.labels
            .iter()
            .position(|l| *l == label)
            .map(|i| Category::ALL[i])
    }

    /// Label string for a category under this profile.
    pub fn label_for(&self, category: Category) -> &'static str {
        let i = Category::ALL
            .iter()
            .position(|c| *c == category)
            .unwrap_or(0);
        self.labels[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_labels_round_trip() {
        let p = LanguageProfile::english();
        assert_eq!(p.category_for("Person"), Some(Category::Person));
        assert_eq!(p.category_for("City"), Some(Category::City));
        assert_eq!(p.category_for("Banana"), None);
        assert_eq!(p.label_for(Category::Date), "Date");
    }

    #[test]
    fn arabic_labels_map_to_same_categories() {
        let p = LanguageProfile::arabic();
        assert_eq!(p.category_for("اسم"), Some(Category::Person));
        assert_eq!(p.category_for("مدينة"), Some(Category::City));
        assert_eq!(p.threshold, 0.6);
    }

    #[test]
    fn profile_from_url_language_segment() {
        let p = LanguageProfile::from_url("https://example.org/en/bios/Pages/X.aspx").unwrap();
        assert_eq!(p.code, "en");
        let p = LanguageProfile::from_url("https://example.org/AR/bios/Pages/X.aspx").unwrap();
        assert_eq!(p.code, "ar");
        assert!(LanguageProfile::from_url("https://example.org/fr/x").is_err());
    }
}
