//! Content segmentation: isolate the biography region of a page.
//!
//! Two strategies are supported (see
//! [`crate::types::config::BoundaryStrategy`]): structural marker headings,
//! and literal phrase boundaries over the whole-document text. Both signal
//! a missing boundary with [`HarvestError::BoundaryNotFound`]; the page
//! loop catches it and skips the page.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::error::{HarvestError, Result};

/// Extract paragraph texts between two marker headings.
///
/// Finds the first `heading_tag` element whose text contains
/// `start_marker` (case-insensitive) and the first containing `end_marker`,
/// then walks the siblings following the start heading in document order,
/// collecting `<p>` text and stopping exactly at the end heading
/// (exclusive).
pub fn segment_structural(
    html: &str,
    heading_tag: &str,
    start_marker: &str,
    end_marker: &str,
) -> Result<Vec<String>> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(heading_tag).map_err(|_| HarvestError::BoundaryNotFound {
        marker: heading_tag.to_string(),
    })?;

    let start = find_heading(&document, &selector, start_marker).ok_or_else(|| {
        HarvestError::BoundaryNotFound {
            marker: start_marker.to_string(),
        }
    })?;
    let end = find_heading(&document, &selector, end_marker).ok_or_else(|| {
        HarvestError::BoundaryNotFound {
            marker: end_marker.to_string(),
        }
    })?;

    let mut paragraphs = Vec::new();
    for sibling in start.next_siblings() {
        if sibling.id() == end.id() {
            break;
        }
        if let Some(el) = ElementRef::wrap(sibling) {
            if el.value().name() == "p" {
                let text = element_text(el);
                if !text.is_empty() {
                    paragraphs.push(text);
                }
            }
        }
    }

    debug!(
        paragraphs = paragraphs.len(),
        start = start_marker,
        end = end_marker,
        "structural segmentation done"
    );
    Ok(paragraphs)
}

/// Extract the text strictly between two literal phrases.
///
/// The end phrase is searched starting from the start phrase's position, so
/// it must appear after the start. The returned slice excludes both phrases
/// and is trimmed.
pub fn segment_phrase<'a>(
    content: &'a str,
    start_phrase: &str,
    end_phrase: &str,
) -> Result<&'a str> {
    let start_idx = content
        .find(start_phrase)
        .ok_or_else(|| HarvestError::BoundaryNotFound {
            marker: start_phrase.to_string(),
        })?;
    let after_start = start_idx + start_phrase.len();

    let end_idx = content[after_start..]
        .find(end_phrase)
        .map(|i| after_start + i)
        .ok_or_else(|| HarvestError::BoundaryNotFound {
            marker: end_phrase.to_string(),
        })?;

    Ok(content[after_start..end_idx].trim())
}

/// Visible text of the whole document, for the phrase-bounded strategy.
pub fn document_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut text = String::new();
    for piece in document.root_element().text() {
        let piece = piece.trim();
        if piece.is_empty() {
            continue;
        }
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(piece);
    }
    text
}

/// First element under `selector` whose text contains `marker`
/// (case-insensitive).
fn find_heading<'a>(
    document: &'a Html,
    selector: &Selector,
    marker: &str,
) -> Option<ElementRef<'a>> {
    let marker = marker.to_lowercase();
    document
        .select(selector)
        .find(|el| element_text(*el).to_lowercase().contains(&marker))
}

/// Element text with surrounding whitespace trimmed.
fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}
