//! Demonym reference table: nationality → country resolution.
//!
//! Loaded once per run from a CSV keyed by country name with male/female
//! demonym columns (and an optional Arabic country-name column used by the
//! Arabic city cross-check). Read-only for the pipeline's duration.

use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::error::ReferenceError;

const COL_COUNTRY: &str = "Country";
const COL_DEMONYM_MALE: &str = "Demonym (Male)";
const COL_DEMONYM_FEMALE: &str = "Demonym (Female)";
const COL_COUNTRY_ARABIC: &str = "Country (Arabic)";

/// One reference row, lowercased lookup fields precomputed.
#[derive(Debug, Clone)]
struct DemonymRow {
    country: String,
    demonym_male: String,
    demonym_female: String,
    country_arabic: Option<String>,
}

/// In-memory demonym index.
///
/// Queries are case-insensitive substring matches against each row's
/// demonym fields, answering "is X a demonym of some country, and if so
/// which" with a single lookup. Lookup failure means "no match", never an
/// error (fail open).
#[derive(Debug, Clone, Default)]
pub struct DemonymIndex {
    rows: Vec<DemonymRow>,
}

impl DemonymIndex {
    /// Empty index: every lookup misses. Useful when no reference table is
    /// supplied; countries then keep their literal text.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load the index from a CSV file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ReferenceError> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::from_reader(file)
    }

    /// Load the index from any CSV reader.
    ///
    /// The header must carry the `Country` and both demonym columns;
    /// otherwise [`ReferenceError::MissingColumn`] is raised at load time
    /// rather than surfacing mid-run.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ReferenceError> {
        let mut csv_reader = csv::Reader::from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let col = |name: &str| -> Result<usize, ReferenceError> {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| ReferenceError::MissingColumn {
                    name: name.to_string(),
                })
        };

        let country_idx = col(COL_COUNTRY)?;
        let male_idx = col(COL_DEMONYM_MALE)?;
        let female_idx = col(COL_DEMONYM_FEMALE)?;
        let arabic_idx = headers.iter().position(|h| h == COL_COUNTRY_ARABIC);

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            let field = |i: usize| record.get(i).unwrap_or("").trim().to_string();

            rows.push(DemonymRow {
                country: field(country_idx),
                demonym_male: field(male_idx).to_lowercase(),
                demonym_female: field(female_idx).to_lowercase(),
                country_arabic: arabic_idx.map(field).filter(|s| !s.is_empty()),
            });
        }

        debug!(rows = rows.len(), "demonym index loaded");
        Ok(Self { rows })
    }

    /// Resolve a demonym to its country name.
    ///
    /// Returns the first row whose male or female demonym field contains
    /// the query (case-insensitive), or `None`.
    pub fn resolve(&self, query: &str) -> Option<&str> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return None;
        }
        self.rows
            .iter()
            .find(|row| row.demonym_male.contains(&query) || row.demonym_female.contains(&query))
            .map(|row| row.country.as_str())
    }

    /// True when `query` is an Arabic country name in the table.
    pub fn is_arabic_country(&self, query: &str) -> bool {
        let query = query.trim();
        if query.is_empty() {
            return false;
        }
        self.rows
            .iter()
            .any(|row| row.country_arabic.as_deref() == Some(query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "\
Country,Demonym (Male),Demonym (Female),Country (Arabic)
France,French,French,فرنسا
Lebanon,Lebanese,Lebanese,لبنان
Qatar,Qatari,Qatari,قطر
";

    fn index() -> DemonymIndex {
        DemonymIndex::from_reader(TABLE.as_bytes()).unwrap()
    }

    #[test]
    fn resolves_demonym_case_insensitively() {
        assert_eq!(index().resolve("french"), Some("France"));
        assert_eq!(index().resolve("FRENCH"), Some("France"));
        assert_eq!(index().resolve("Lebanese"), Some("Lebanon"));
    }

    #[test]
    fn unknown_query_misses() {
        assert_eq!(index().resolve("xyzzy"), None);
        assert_eq!(index().resolve(""), None);
    }

    #[test]
    fn arabic_country_names_are_recognized() {
        assert!(index().is_arabic_country("قطر"));
        assert!(!index().is_arabic_country("Doha"));
    }

    #[test]
    fn missing_column_is_a_load_error() {
        let bad = "Country,Demonym (Male)\nFrance,French\n";
        let err = DemonymIndex::from_reader(bad.as_bytes()).unwrap_err();
        match err {
            ReferenceError::MissingColumn { name } => assert_eq!(name, "Demonym (Female)"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_index_fails_open() {
        let index = DemonymIndex::empty();
        assert_eq!(index.resolve("french"), None);
        assert!(!index.is_arabic_country("قطر"));
    }
}
