//! Entity normalization: classify raw spans into the five categories and
//! apply category-specific rules.
//!
//! Rules per category (selected by the language profile):
//! - Person: pronoun exclusion, optional leading-uppercase heuristic
//! - Country: demonym → country-name resolution
//! - Date: keep only a plausible 4-digit year, drop otherwise
//! - Place: verbatim
//! - City: verbatim, optionally excluding Arabic country names
//!
//! Output is deduplicated per `(text, category)` and ordered:
//! lexicographic everywhere except dates, which sort numerically.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::demonym::DemonymIndex;
use crate::types::entity::{CategorizedEntities, Category, RawEntitySpan};
use crate::types::language::LanguageProfile;

/// Common pronouns excluded from the person category, matched against the
/// lowercased span text.
const PRONOUNS: [&str; 15] = [
    "he", "she", "him", "her", "it", "they", "them", "we", "us", "i", "me", "you", "his", "their",
    "our",
];

/// 18xx/19xx/20xx year inside free-text date spans.
static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(18|19|20)\d{2}\b").expect("year pattern"));

/// At least one Arabic-script character.
static ARABIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\u{0600}-\u{06FF}]").expect("arabic pattern"));

/// Normalize raw spans into the five ordered, deduplicated category lists.
pub fn normalize(
    spans: &[RawEntitySpan],
    profile: &LanguageProfile,
    demonyms: &DemonymIndex,
    require_capitalized_persons: bool,
) -> CategorizedEntities {
    let mut persons = BTreeSet::new();
    let mut countries = BTreeSet::new();
    let mut dates = BTreeSet::new();
    let mut places = BTreeSet::new();
    let mut cities = BTreeSet::new();

    for span in spans {
        let text = span.text.trim();
        if text.is_empty() {
            continue;
        }
        let Some(category) = profile.category_for(&span.label) else {
            continue;
        };

        // Localized mode drops non-date spans without Arabic script.
        if profile.require_arabic_script
            && category != Category::Date
            && !ARABIC_RE.is_match(text)
        {
            continue;
        }

        match category {
            Category::Person => {
                if profile.filter_pronouns && PRONOUNS.contains(&text.to_lowercase().as_str()) {
                    continue;
                }
                if require_capitalized_persons
                    && !text.chars().next().is_some_and(char::is_uppercase)
                {
                    continue;
                }
                persons.insert(text.to_string());
            }
            Category::Country => {
                let country = if profile.resolve_demonyms {
                    demonyms.resolve(text).unwrap_or(text)
                } else {
                    text
                };
                countries.insert(country.to_string());
            }
            Category::Date => {
                // An unparseable date contributes nothing.
                if let Some(year) = YEAR_RE.find(text) {
                    dates.insert(year.as_str().to_string());
                }
            }
            Category::Place => {
                places.insert(text.to_string());
            }
            Category::City => {
                if profile.exclude_arabic_countries_from_cities && demonyms.is_arabic_country(text)
                {
                    continue;
                }
                cities.insert(text.to_string());
            }
        }
    }

    // BTreeSet gives lexicographic order; years are re-sorted numerically.
    // Every date passed the year pattern, so the parse cannot fail.
    let mut dates: Vec<String> = dates.into_iter().collect();
    dates.sort_by_key(|y| y.parse::<u32>().unwrap_or(0));

    let result = CategorizedEntities {
        persons: persons.into_iter().collect(),
        countries: countries.into_iter().collect(),
        dates,
        places: places.into_iter().collect(),
        cities: cities.into_iter().collect(),
    };

    debug!(
        persons = result.persons.len(),
        countries = result.countries.len(),
        dates = result.dates.len(),
        places = result.places.len(),
        cities = result.cities.len(),
        "normalization done"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn english_index() -> DemonymIndex {
        let table = "\
Country,Demonym (Male),Demonym (Female),Country (Arabic)
France,French,French,فرنسا
Lebanon,Lebanese,Lebanese,لبنان
";
        DemonymIndex::from_reader(table.as_bytes()).unwrap()
    }

    fn norm_en(spans: &[RawEntitySpan]) -> CategorizedEntities {
        normalize(spans, &LanguageProfile::english(), &english_index(), false)
    }

    #[test]
    fn pronouns_are_excluded_regardless_of_case() {
        let spans = vec![
            RawEntitySpan::new("He", "Person"),
            RawEntitySpan::new("THEY", "Person"),
            RawEntitySpan::new("Gemayel", "Person"),
        ];
        assert_eq!(norm_en(&spans).persons, vec!["Gemayel"]);
    }

    #[test]
    fn demonyms_resolve_to_country_names() {
        let spans = vec![
            RawEntitySpan::new("French", "Country"),
            RawEntitySpan::new("Atlantis", "Country"),
        ];
        assert_eq!(norm_en(&spans).countries, vec!["Atlantis", "France"]);
    }

    #[test]
    fn dates_keep_only_the_year() {
        let spans = vec![
            RawEntitySpan::new("In 1987, he exhibited...", "Date"),
            RawEntitySpan::new("sometime last year", "Date"),
        ];
        assert_eq!(norm_en(&spans).dates, vec!["1987"]);
    }

    #[test]
    fn dates_sort_numerically_ascending() {
        let spans = vec![
            RawEntitySpan::new("2010", "Date"),
            RawEntitySpan::new("1898", "Date"),
            RawEntitySpan::new("1935", "Date"),
        ];
        assert_eq!(norm_en(&spans).dates, vec!["1898", "1935", "2010"]);
    }

    #[test]
    fn duplicate_spans_collapse() {
        let spans = vec![
            RawEntitySpan::new("Paris", "City"),
            RawEntitySpan::new("Paris", "City"),
            RawEntitySpan::new(" Paris ", "City"),
        ];
        assert_eq!(norm_en(&spans).cities, vec!["Paris"]);
    }

    #[test]
    fn capitalization_heuristic_is_opt_in() {
        let spans = vec![RawEntitySpan::new("van Gogh", "Person")];
        assert_eq!(norm_en(&spans).persons, vec!["van Gogh"]);

        let strict = normalize(&spans, &LanguageProfile::english(), &english_index(), true);
        assert!(strict.persons.is_empty());
    }

    #[test]
    fn normalization_is_idempotent() {
        let spans = vec![
            RawEntitySpan::new("French", "Country"),
            RawEntitySpan::new("In 1930 he left", "Date"),
            RawEntitySpan::new("Gemayel", "Person"),
            RawEntitySpan::new("Paris", "City"),
        ];
        let once = norm_en(&spans);

        // Feed the normalized output back as fresh spans.
        let profile = LanguageProfile::english();
        let again: Vec<RawEntitySpan> = once
            .iter()
            .map(|e| RawEntitySpan::new(e.text, profile.label_for(e.category)))
            .collect();
        assert_eq!(norm_en(&again), once);
    }

    #[test]
    fn arabic_profile_requires_arabic_script() {
        let spans = vec![
            RawEntitySpan::new("Gemayel", "اسم"),
            RawEntitySpan::new("جميل", "اسم"),
            RawEntitySpan::new("In 1930", "تاريخ"),
        ];
        let result = normalize(
            &spans,
            &LanguageProfile::arabic(),
            &english_index(),
            false,
        );
        assert_eq!(result.persons, vec!["جميل"]);
        // Dates are exempt from the script requirement.
        assert_eq!(result.dates, vec!["1930"]);
    }

    #[test]
    fn arabic_country_names_are_dropped_from_cities() {
        let spans = vec![
            RawEntitySpan::new("لبنان", "مدينة"),
            RawEntitySpan::new("بيروت", "مدينة"),
        ];
        let result = normalize(
            &spans,
            &LanguageProfile::arabic(),
            &english_index(),
            false,
        );
        assert_eq!(result.cities, vec!["بيروت"]);
    }

    #[test]
    fn unknown_labels_are_ignored() {
        let spans = vec![RawEntitySpan::new("thing", "Organization")];
        assert!(norm_en(&spans).is_empty());
    }
}
