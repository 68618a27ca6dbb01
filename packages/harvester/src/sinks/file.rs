//! File-based result sink: one CSV (and optionally one word-cloud PNG) per
//! page.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{info, warn};

use crate::error::Result;
use crate::sinks::cloud::WordCloudRenderer;
use crate::traits::sink::ResultSink;
use crate::types::entity::PageResult;

/// Writes per-page results into an output directory.
///
/// The CSV carries the header `Link,Entity,Label,Occurrences` with the page
/// URL repeated on every row. When a renderer is attached, a
/// `<stem>_wordcloud.png` is written next to the CSV; rendering problems
/// are logged and never fail the page.
pub struct FileSink {
    output_dir: PathBuf,
    renderer: Option<WordCloudRenderer>,
}

impl FileSink {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            renderer: None,
        }
    }

    /// Attach a word-cloud renderer.
    pub fn with_renderer(mut self, renderer: WordCloudRenderer) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Derive a file stem from the page URL's last path segment, with an
    /// `.aspx`-style extension stripped.
    pub fn file_stem(url: &str) -> String {
        let last = url
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or("page");
        let last = last.split(['?', '#']).next().unwrap_or(last);
        let stem = [".aspx", ".html", ".htm", ".php"]
            .iter()
            .find_map(|ext| {
                let split = last.len().checked_sub(ext.len())?;
                if split > 0
                    && last.is_char_boundary(split)
                    && last[split..].eq_ignore_ascii_case(ext)
                {
                    Some(&last[..split])
                } else {
                    None
                }
            })
            .unwrap_or(last);
        if stem.is_empty() {
            "page".to_string()
        } else {
            stem.to_string()
        }
    }

    fn write_csv(&self, page: &PageResult, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(["Link", "Entity", "Label", "Occurrences"])?;
        for record in &page.records {
            let label = record.label.to_string();
            let occurrences = record.occurrences.to_string();
            writer.write_record([
                record.link.as_str(),
                record.entity.as_str(),
                label.as_str(),
                occurrences.as_str(),
            ])?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[async_trait]
impl ResultSink for FileSink {
    async fn persist(&self, page: &PageResult) -> Result<()> {
        std::fs::create_dir_all(&self.output_dir)?;

        let stem = Self::file_stem(&page.url);
        let csv_path = self.output_dir.join(format!("{stem}.csv"));
        self.write_csv(page, &csv_path)?;
        info!(url = %page.url, path = %csv_path.display(), rows = page.records.len(), "results written");

        if let Some(renderer) = &self.renderer {
            let frequencies: Vec<(String, usize)> = page
                .records
                .iter()
                .map(|r| (r.entity.clone(), r.occurrences))
                .collect();
            let png_path = self.output_dir.join(format!("{stem}_wordcloud.png"));
            if let Err(e) = renderer.save_png(&frequencies, &png_path) {
                warn!(url = %page.url, error = %e, "word cloud rendering failed");
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::entity::{Category, EntityRecord};

    fn sample_page() -> PageResult {
        let url = "https://site.test/en/bios/Pages/Cesar-Gemayel.aspx".to_string();
        PageResult {
            url: url.clone(),
            records: vec![
                EntityRecord {
                    link: url.clone(),
                    entity: "1930".into(),
                    label: Category::Date,
                    occurrences: 1,
                },
                EntityRecord {
                    link: url.clone(),
                    entity: "Paris".into(),
                    label: Category::City,
                    occurrences: 2,
                },
            ],
        }
    }

    #[test]
    fn file_stem_strips_extension_and_query() {
        assert_eq!(
            FileSink::file_stem("https://x.test/en/bios/Pages/Cesar-Gemayel.aspx"),
            "Cesar-Gemayel"
        );
        assert_eq!(FileSink::file_stem("https://x.test/bios/Ayad?init=1"), "Ayad");
        assert_eq!(FileSink::file_stem("https://x.test/"), "x.test");
    }

    #[tokio::test]
    async fn persist_writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSink::new(dir.path());
        sink.persist(&sample_page()).await.unwrap();

        let csv_path = dir.path().join("Cesar-Gemayel.csv");
        let contents = std::fs::read_to_string(&csv_path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], "Link,Entity,Label,Occurrences");
        assert_eq!(
            lines[1],
            "https://site.test/en/bios/Pages/Cesar-Gemayel.aspx,1930,Date,1"
        );
        assert_eq!(
            lines[2],
            "https://site.test/en/bios/Pages/Cesar-Gemayel.aspx,Paris,City,2"
        );
    }

    #[tokio::test]
    async fn persist_repeats_the_link_on_every_row() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSink::new(dir.path());
        sink.persist(&sample_page()).await.unwrap();

        let contents =
            std::fs::read_to_string(dir.path().join("Cesar-Gemayel.csv")).unwrap();
        let link_rows = contents
            .lines()
            .skip(1)
            .filter(|l| l.starts_with("https://site.test/en/bios/Pages/Cesar-Gemayel.aspx"))
            .count();
        assert_eq!(link_rows, 2);
    }

    #[tokio::test]
    async fn persist_without_renderer_writes_no_png() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSink::new(dir.path());
        sink.persist(&sample_page()).await.unwrap();
        assert!(!dir.path().join("Cesar-Gemayel_wordcloud.png").exists());
    }
}
