use scraper::{ElementRef, Html};

use crate::error::{GetimgError, Result};
use crate::extractors::gallery::{extract_gallery_tags, GalleryLayout};
use crate::extractors::{parse_selector, Candidate, SourceKind};

/// Extract the canonical image of a gallery detail page along with its tags.
pub fn extract_gallery_image(
    document: &Html,
    page_url: &str,
    layout: &GalleryLayout,
) -> Result<Candidate> {
    let content_selector = parse_selector(&layout.content)?;
    let content = document
        .select(&content_selector)
        .next()
        .ok_or_else(|| malformed(page_url, "content container", &layout.content))?;

    let thread = select_child(content, &layout.thread)
        .and_then(|found| found.ok_or_else(|| malformed(page_url, "thread container", &layout.thread)))?;

    let image_block = select_child(thread, &layout.image_block)
        .and_then(|found| found.ok_or_else(|| malformed(page_url, "image block", &layout.image_block)))?;

    let href = select_child(image_block, &layout.image_link)?
        .and_then(|link| link.value().attr("href"))
        .ok_or_else(|| malformed(page_url, "image link", &layout.image_link))?;

    let page_tags = extract_gallery_tags(thread, page_url, layout)?;

    Ok(Candidate {
        reference: href.to_string(),
        source: SourceKind::Href,
        page_tags,
    })
}

pub(crate) fn select_child<'a>(parent: ElementRef<'a>, selector: &str) -> Result<Option<ElementRef<'a>>> {
    let selector = parse_selector(selector)?;
    Ok(parent.select(&selector).next())
}

pub(crate) fn malformed(page_url: &str, step: &str, selector: &str) -> GetimgError {
    GetimgError::MalformedPage {
        url: page_url.to_string(),
        missing: format!("{step} `{selector}`"),
    }
}
