use scraper::ElementRef;

use crate::error::Result;
use crate::extractors::gallery::extract_gallery_image::{malformed, select_child};
use crate::extractors::gallery::GalleryLayout;
use crate::extractors::parse_selector;

/// Extract the tag labels of a gallery thread, spaces replaced by underscores.
///
/// The tag list block must exist, an empty list is fine.
pub fn extract_gallery_tags(
    thread: ElementRef<'_>,
    page_url: &str,
    layout: &GalleryLayout,
) -> Result<Vec<String>> {
    let tag_list = select_child(thread, &layout.tag_list)?
        .ok_or_else(|| malformed(page_url, "tag list", &layout.tag_list))?;

    let tag_selector = parse_selector(&layout.tag)?;
    let tags = tag_list
        .select(&tag_selector)
        .map(|span| span.text().collect::<Vec<_>>().join(""))
        .map(|label| label.split_whitespace().collect::<Vec<_>>().join("_"))
        .filter(|label| !label.is_empty())
        .collect();

    Ok(tags)
}
