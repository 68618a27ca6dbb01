//! End-to-end pipeline test: crawl a mock site, harvest two biography
//! pages, and check the persisted CSV files.

use harvester::testing::{bio_page_html, index_page_html, MockFetcher, MockModel};
use harvester::{
    CrawlConfig, DemonymIndex, FileSink, Pipeline, PipelineConfig, RawEntitySpan,
};

const SEED: &str = "https://site.test/";
const GEMAYEL: &str = "https://site.test/en/bios/Pages/Cesar-Gemayel.aspx";
const AYAD: &str = "https://site.test/en/bios/Pages/Ragheb-Ayad.aspx";

const GEMAYEL_TEXT: &str = "Gemayel moved to Paris in 1930. The French capital shaped him.";
const AYAD_TEXT: &str = "Ayad studied in Rome in 1925.";

const DEMONYMS: &str = "\
Country,Demonym (Male),Demonym (Female)
France,French,French
Italy,Italian,Italian
";

fn mock_site() -> MockFetcher {
    MockFetcher::new()
        .with_page(
            SEED,
            index_page_html(&[
                "/en/bios/Pages/Cesar-Gemayel.aspx",
                "/en/bios/Pages/Ragheb-Ayad.aspx",
                "/en/bios/Pages/default.aspx",
            ]),
        )
        .with_page(GEMAYEL, bio_page_html(&[GEMAYEL_TEXT], &[]))
        .with_page(AYAD, bio_page_html(&[AYAD_TEXT], &[]))
        .with_page(
            "https://site.test/en/bios/Pages/default.aspx",
            index_page_html(&[]),
        )
}

fn mock_model() -> MockModel {
    MockModel::new()
        .with_spans(
            GEMAYEL_TEXT,
            vec![
                RawEntitySpan::new("Gemayel", "Person").with_score(0.97),
                RawEntitySpan::new("Paris", "City").with_score(0.95),
                RawEntitySpan::new("in 1930", "Date").with_score(0.81),
                RawEntitySpan::new("French", "Country").with_score(0.74),
                RawEntitySpan::new("He", "Person").with_score(0.66),
            ],
        )
        .with_spans(
            AYAD_TEXT,
            vec![
                RawEntitySpan::new("Ayad", "Person").with_score(0.96),
                RawEntitySpan::new("Rome", "City").with_score(0.93),
                RawEntitySpan::new("in 1925", "Date").with_score(0.85),
            ],
        )
}

#[tokio::test]
async fn crawl_and_harvest_two_bio_pages() {
    let out = tempfile::tempdir().unwrap();
    let pipeline = Pipeline::new(
        mock_site(),
        mock_model(),
        FileSink::new(out.path()),
        PipelineConfig::new(out.path()),
    )
    .with_demonyms(DemonymIndex::from_reader(DEMONYMS.as_bytes()).unwrap());

    let crawl = CrawlConfig::new(SEED, "/bios/Pages");
    let summary = pipeline.run(&crawl).await;

    // Two bio pages in discovery order; the default.aspx index is excluded.
    assert_eq!(summary.pages_found, 2);
    assert_eq!(summary.pages_processed, 2);
    assert!(summary.is_complete());

    let gemayel_csv = std::fs::read_to_string(out.path().join("Cesar-Gemayel.csv")).unwrap();
    let lines: Vec<&str> = gemayel_csv.lines().collect();
    assert_eq!(lines[0], "Link,Entity,Label,Occurrences");

    // Rows sorted by (entity, category); pronoun excluded; demonym
    // resolved; year extracted from the free-text date.
    assert_eq!(lines[1], format!("{GEMAYEL},1930,Date,1"));
    assert_eq!(lines[2], format!("{GEMAYEL},France,Country,0"));
    assert_eq!(lines[3], format!("{GEMAYEL},Gemayel,Person,1"));
    assert_eq!(lines[4], format!("{GEMAYEL},Paris,City,1"));
    assert_eq!(lines.len(), 5);

    let ayad_csv = std::fs::read_to_string(out.path().join("Ragheb-Ayad.csv")).unwrap();
    assert!(ayad_csv.contains(&format!("{AYAD},1925,Date,1")));
    assert!(ayad_csv.contains(&format!("{AYAD},Ayad,Person,1")));
    assert!(ayad_csv.contains(&format!("{AYAD},Rome,City,1")));

    // No renderer attached: CSVs only, no images.
    assert!(!out.path().join("Cesar-Gemayel_wordcloud.png").exists());
}

#[tokio::test]
async fn one_broken_page_does_not_abort_the_batch() {
    let fetcher = MockFetcher::new()
        .with_page(
            SEED,
            index_page_html(&[
                "/en/bios/Pages/Cesar-Gemayel.aspx",
                "/en/bios/Pages/Missing.aspx",
            ]),
        )
        .with_page(GEMAYEL, bio_page_html(&[GEMAYEL_TEXT], &[]));

    let out = tempfile::tempdir().unwrap();
    let pipeline = Pipeline::new(
        fetcher,
        mock_model(),
        FileSink::new(out.path()),
        PipelineConfig::new(out.path()),
    );

    let summary = pipeline.run(&CrawlConfig::new(SEED, "/bios/Pages")).await;

    assert_eq!(summary.pages_found, 2);
    assert_eq!(summary.pages_processed, 1);
    assert_eq!(summary.failed.len(), 1);
    assert!(summary.failed[0].0.ends_with("Missing.aspx"));
    assert!(out.path().join("Cesar-Gemayel.csv").exists());
}
