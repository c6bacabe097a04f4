use scraper::Html;

use crate::error::Result;
use crate::extractors::{parse_selector, Candidate, SourceKind};

/// Extract the `src` of every `img` element. Elements without `src` are skipped.
pub fn extract_embedded_images(document: &Html) -> Result<Vec<Candidate>> {
    let selector = parse_selector("img")?;
    let mut candidates = Vec::new();

    for element in document.select(&selector) {
        if let Some(src) = element.value().attr("src") {
            candidates.push(Candidate::new(src, SourceKind::Src));
        }
    }
    Ok(candidates)
}
