//! Breadth-first site crawler.
//!
//! Discovers biography pages starting from a seed URL. The frontier is a
//! FIFO queue; a visited set enforces at-most-once visitation and breaks
//! cycles. Fetch errors are logged and treated as "no outgoing links from
//! this page"; they are never fatal to the traversal.

use std::collections::{HashSet, VecDeque};

use scraper::{Html, Selector};
use tracing::{debug, info, warn};
use url::Url;

use crate::traits::fetcher::Fetcher;
use crate::types::config::CrawlConfig;

/// Crawl from the seed and return target page URLs in first-visited order.
///
/// Links are enqueued when their resolved absolute form contains
/// `config.link_pattern`. A visited URL lands in the result when it
/// contains `config.path_filter` and none of the excluded markers.
pub async fn crawl<F: Fetcher>(fetcher: &F, config: &CrawlConfig) -> Vec<String> {
    let mut frontier: VecDeque<String> = VecDeque::new();
    let mut visited: HashSet<String> = HashSet::new();
    let mut targets: Vec<String> = Vec::new();

    frontier.push_back(config.seed.clone());

    while let Some(current) = frontier.pop_front() {
        if visited.contains(&current) {
            continue;
        }
        visited.insert(current.clone());
        debug!(url = %current, "crawling");

        match fetcher.fetch(&current).await {
            Ok(page) => {
                for link in extract_links(&page.html, &current, &config.link_pattern) {
                    if !visited.contains(&link) {
                        frontier.push_back(link);
                    }
                }
            }
            Err(e) => {
                warn!(url = %current, error = %e, "fetch failed during crawl, skipping links");
            }
        }

        if current.contains(&config.path_filter)
            && !config.excluded_markers.iter().any(|m| current.contains(m))
        {
            targets.push(current);
        }
    }

    info!(
        pages_visited = visited.len(),
        targets_found = targets.len(),
        "crawl finished"
    );
    targets
}

/// Extract absolute link targets from a page that match the link pattern.
///
/// Relative hrefs are resolved against the page URL; unparseable hrefs are
/// dropped.
fn extract_links(html: &str, base: &str, link_pattern: &str) -> Vec<String> {
    let base_url = match Url::parse(base) {
        Ok(u) => u,
        Err(e) => {
            warn!(url = %base, error = %e, "unparseable base URL");
            return Vec::new();
        }
    };

    let document = Html::parse_document(html);
    let anchors = match Selector::parse("a[href]") {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };

    document
        .select(&anchors)
        .filter_map(|el| el.value().attr("href"))
        .filter_map(|href| base_url.join(href).ok())
        .map(|u| u.to_string())
        .filter(|u| u.contains(link_pattern))
        .collect()
}
