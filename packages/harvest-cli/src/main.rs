//! The `harvest` binary: crawl an encyclopedia site and extract named
//! entities from its biography pages.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use harvester::{
    BoundaryStrategy, CrawlConfig, DemonymIndex, FileSink, HttpFetcher, LanguageMode,
    LanguageProfile, Pipeline, PipelineConfig, RemoteModel, WordCloudRenderer,
    DEFAULT_CHUNK_SIZE,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Strategy {
    /// Two marker headings; paragraph text between them is collected
    Structural,
    /// Two literal phrases over the whole-document text
    Phrase,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Language {
    En,
    Ar,
    /// Infer per page from the URL's /en/ or /ar/ segment
    Auto,
}

#[derive(Parser, Debug)]
#[command(name = "harvest", about = "Crawl biography pages and harvest named entities")]
struct Args {
    /// Seed URL to start from
    url: String,

    /// Substring a page URL must contain to be processed
    #[arg(long, default_value = "/bios/Pages")]
    path_filter: String,

    /// Substring a discovered link must contain to be followed
    /// (defaults to the path filter)
    #[arg(long)]
    link_pattern: Option<String>,

    /// Boundary strategy
    #[arg(long, value_enum, default_value_t = Strategy::Structural)]
    strategy: Strategy,

    /// Start boundary (heading marker or literal phrase)
    #[arg(long, default_value = "Biography")]
    start_marker: String,

    /// End boundary (heading marker or literal phrase)
    #[arg(long, default_value = "Exhibitions")]
    end_marker: String,

    /// Language mode
    #[arg(long, value_enum, default_value_t = Language::En)]
    language: Language,

    /// Maximum chunk length in characters
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,

    /// Override the language profile's confidence threshold
    #[arg(long)]
    threshold: Option<f32>,

    /// Require person entities to start with an uppercase letter
    #[arg(long)]
    capitalized_persons: bool,

    /// Entity-model inference endpoint
    #[arg(long, default_value = "http://localhost:8080/predict")]
    model_url: String,

    /// Demonym reference table (CSV with Country and demonym columns)
    #[arg(long)]
    demonyms: Option<PathBuf>,

    /// TTF font for word-cloud rendering; without it only CSVs are written
    #[arg(long)]
    font: Option<PathBuf>,

    /// Output directory
    #[arg(long, default_value = "harvest-output")]
    out_dir: PathBuf,

    /// Process the seed URL alone instead of crawling the site
    #[arg(long)]
    no_crawl: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();

    let boundary = match args.strategy {
        Strategy::Structural => BoundaryStrategy::headings(&args.start_marker, &args.end_marker),
        Strategy::Phrase => BoundaryStrategy::phrases(&args.start_marker, &args.end_marker),
    };
    let language = match args.language {
        Language::En => LanguageMode::Fixed(LanguageProfile::english()),
        Language::Ar => LanguageMode::Fixed(LanguageProfile::arabic()),
        Language::Auto => LanguageMode::FromUrl,
    };

    let mut config = PipelineConfig::new(&args.out_dir)
        .with_boundary(boundary)
        .with_language(language)
        .with_chunk_size(args.chunk_size);
    if let Some(threshold) = args.threshold {
        config = config.with_threshold(threshold);
    }
    if args.capitalized_persons {
        config = config.require_capitalized_persons();
    }

    let demonyms = match &args.demonyms {
        Some(path) => DemonymIndex::from_path(path)
            .with_context(|| format!("loading demonym table {}", path.display()))?,
        None => {
            warn!("no demonym table supplied; countries keep their literal text");
            DemonymIndex::empty()
        }
    };

    let mut sink = FileSink::new(&args.out_dir);
    match &args.font {
        Some(path) => {
            let renderer = WordCloudRenderer::from_font_file(path)
                .with_context(|| format!("loading font {}", path.display()))?;
            sink = sink.with_renderer(renderer);
        }
        None => warn!("no font supplied; word clouds are skipped"),
    }

    let fetcher = HttpFetcher::new().context("building HTTP client")?;
    let model = RemoteModel::new(&args.model_url).context("building model client")?;
    let pipeline = Pipeline::new(fetcher, model, sink, config).with_demonyms(demonyms);

    let summary = if args.no_crawl {
        pipeline.process_all(&[args.url.clone()]).await
    } else {
        let mut crawl = CrawlConfig::new(&args.url, &args.path_filter);
        if let Some(pattern) = &args.link_pattern {
            crawl = crawl.with_link_pattern(pattern);
        }
        pipeline.run(&crawl).await
    };

    info!(
        found = summary.pages_found,
        processed = summary.pages_processed,
        failed = summary.failed.len(),
        "harvest finished"
    );
    for (url, error) in &summary.failed {
        warn!(url = %url, error = %error, "page failed");
    }

    Ok(())
}
