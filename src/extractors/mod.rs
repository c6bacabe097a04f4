use scraper::{Html, Selector};

use crate::error::{GetimgError, Result};

pub mod extract_embedded_images;
pub mod extract_linked_images;
pub mod gallery;

pub use gallery::GalleryLayout;

/// Where a candidate reference was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Src,
    Href,
    /// A line of the image URL list.
    List,
}

impl SourceKind {
    pub fn label(self) -> &'static str {
        match self {
            SourceKind::Src => "img src",
            SourceKind::Href => "a href",
            SourceKind::List => "URL list",
        }
    }
}

/// A raw image reference before filtering and resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub reference: String,
    pub source: SourceKind,
    /// Tags read from the page itself, appended to the configured tags.
    pub page_tags: Vec<String>,
}

impl Candidate {
    pub fn new(reference: impl Into<String>, source: SourceKind) -> Self {
        Candidate {
            reference: reference.into(),
            source,
            page_tags: Vec::new(),
        }
    }
}

/// How candidates are found on a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryMode {
    /// `src` of every `img` element.
    Embedded,
    /// `href` of every `a` element.
    Linked,
    /// The single image and tag list of a gallery detail page.
    Gallery(GalleryLayout),
}

impl DiscoveryMode {
    /// Collects the candidates of `document` in document order.
    pub fn discover(&self, document: &Html, page_url: &str) -> Result<Vec<Candidate>> {
        match self {
            DiscoveryMode::Embedded => extract_embedded_images::extract_embedded_images(document),
            DiscoveryMode::Linked => extract_linked_images::extract_linked_images(document),
            DiscoveryMode::Gallery(layout) => {
                let candidate = gallery::extract_gallery_image(document, page_url, layout)?;
                Ok(vec![candidate])
            }
        }
    }
}

pub(crate) fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| GetimgError::InvalidSelector {
        selector: selector.to_string(),
        reason: format!("{e:?}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body>
        <img src="a.png"><a href="b.jpg">b</a>
    </body></html>"#;

    #[test]
    fn mode_selects_strategy() {
        let document = Html::parse_document(PAGE);

        let embedded = DiscoveryMode::Embedded.discover(&document, "http://x.org/").unwrap();
        assert_eq!(embedded, vec![Candidate::new("a.png", SourceKind::Src)]);

        let linked = DiscoveryMode::Linked.discover(&document, "http://x.org/").unwrap();
        assert_eq!(linked, vec![Candidate::new("b.jpg", SourceKind::Href)]);
    }

    #[test]
    fn gallery_mode_does_not_fall_back() {
        let document = Html::parse_document(PAGE);
        let err = DiscoveryMode::Gallery(GalleryLayout::default())
            .discover(&document, "http://x.org/")
            .unwrap_err();
        assert!(matches!(err, GetimgError::MalformedPage { .. }));
    }

    #[test]
    fn bad_selector_is_reported() {
        let err = parse_selector("div[").unwrap_err();
        assert!(matches!(err, GetimgError::InvalidSelector { .. }));
    }
}
