use scraper::Html;

use crate::error::Result;
use crate::extractors::{parse_selector, Candidate, SourceKind};

/// Extract the `href` of every `a` element. Anchors without `href` are skipped.
pub fn extract_linked_images(document: &Html) -> Result<Vec<Candidate>> {
    let selector = parse_selector("a")?;
    let mut candidates = Vec::new();

    for element in document.select(&selector) {
        if let Some(href) = element.value().attr("href") {
            candidates.push(Candidate::new(href, SourceKind::Href));
        }
    }
    Ok(candidates)
}
