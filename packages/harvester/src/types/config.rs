//! Configuration for crawling and page processing.
//!
//! Pipeline variants (label sets, languages, boundary strategies) are
//! expressed as configuration on these types rather than separate code
//! paths.

use std::path::PathBuf;

use crate::types::language::LanguageProfile;

/// Default maximum chunk length, in characters.
pub const DEFAULT_CHUNK_SIZE: usize = 500;

/// How the biography region of a page is located.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundaryStrategy {
    /// Two heading elements whose text contains the given markers
    /// (case-insensitive); paragraph text between them is collected.
    Structural {
        /// Heading tag to search, e.g. `"h1"`
        heading_tag: String,
        start_marker: String,
        end_marker: String,
    },

    /// Two literal phrases over the whole-document text; the substring
    /// strictly between the first occurrences (end searched after start)
    /// is extracted and then chunked.
    Phrase {
        start_phrase: String,
        end_phrase: String,
    },
}

impl BoundaryStrategy {
    /// Structural strategy over `<h1>` headings.
    pub fn headings(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self::Structural {
            heading_tag: "h1".to_string(),
            start_marker: start.into(),
            end_marker: end.into(),
        }
    }

    /// Phrase-bounded strategy.
    pub fn phrases(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self::Phrase {
            start_phrase: start.into(),
            end_phrase: end.into(),
        }
    }
}

/// Language selection for a run.
#[derive(Debug, Clone)]
pub enum LanguageMode {
    /// One fixed profile for every page
    Fixed(LanguageProfile),

    /// Infer the profile per page from the URL's `/en/` / `/ar/` segment
    FromUrl,
}

/// Configuration for processing a single page.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Language mode (fixed profile or inferred per page)
    pub language: LanguageMode,

    /// How the biography region is located
    pub boundary: BoundaryStrategy,

    /// Maximum chunk length in characters
    pub chunk_size: usize,

    /// Confidence threshold override; `None` keeps the language profile's
    /// own threshold
    pub threshold: Option<f32>,

    /// Require person entities to start with an uppercase letter
    /// (heuristic name filter; off by default)
    pub require_capitalized_persons: bool,

    /// Directory CSV files and word-cloud images are written into
    pub output_dir: PathBuf,
}

impl PipelineConfig {
    /// Config with English language, structural `Biography`/`Exhibitions`
    /// markers and default chunking.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            language: LanguageMode::Fixed(LanguageProfile::english()),
            boundary: BoundaryStrategy::headings("Biography", "Exhibitions"),
            chunk_size: DEFAULT_CHUNK_SIZE,
            threshold: None,
            require_capitalized_persons: false,
            output_dir: output_dir.into(),
        }
    }

    /// Set the language mode.
    pub fn with_language(mut self, language: LanguageMode) -> Self {
        self.language = language;
        self
    }

    /// Set the boundary strategy.
    pub fn with_boundary(mut self, boundary: BoundaryStrategy) -> Self {
        self.boundary = boundary;
        self
    }

    /// Set the maximum chunk length.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Override the language profile's confidence threshold.
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = Some(threshold);
        self
    }

    /// Require person entities to start uppercase.
    pub fn require_capitalized_persons(mut self) -> Self {
        self.require_capitalized_persons = true;
        self
    }
}

/// Configuration for the breadth-first crawl.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Seed URL the frontier starts from
    pub seed: String,

    /// Substring a resolved link must contain to be enqueued.
    /// Discovery casts a wide net; the result filter is `path_filter`.
    pub link_pattern: String,

    /// Substring a visited URL must contain to be included in the results
    pub path_filter: String,

    /// A URL containing any of these markers is excluded from the results
    /// (pagination / default-index pages)
    pub excluded_markers: Vec<String>,
}

impl CrawlConfig {
    /// Crawl config with the default pagination/index exclusions.
    pub fn new(seed: impl Into<String>, path_filter: impl Into<String>) -> Self {
        let path_filter = path_filter.into();
        Self {
            seed: seed.into(),
            link_pattern: path_filter.clone(),
            path_filter,
            excluded_markers: vec!["init=".to_string(), "default".to_string()],
        }
    }

    /// Set the discovery link pattern.
    pub fn with_link_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.link_pattern = pattern.into();
        self
    }

    /// Replace the excluded-marker list.
    pub fn with_excluded_markers(mut self, markers: Vec<String>) -> Self {
        self.excluded_markers = markers;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_structural_markers() {
        let config = PipelineConfig::new("out");
        assert_eq!(
            config.boundary,
            BoundaryStrategy::headings("Biography", "Exhibitions")
        );
        assert_eq!(config.chunk_size, DEFAULT_CHUNK_SIZE);
        assert_eq!(config.threshold, None);
        assert!(!config.require_capitalized_persons);
    }

    #[test]
    fn crawl_config_defaults() {
        let config = CrawlConfig::new("https://example.org/", "/bios/Pages");
        assert_eq!(config.link_pattern, "/bios/Pages");
        assert!(config.excluded_markers.contains(&"init=".to_string()));
    }
}
