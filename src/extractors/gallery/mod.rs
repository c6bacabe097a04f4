//! Gallery detail pages.
//!
//! A detail page holds one canonical image and its tag list at a known place:
//!
//! ```text
//! content container
//! └── thread container
//!     ├── image block ── image link (href = full size image)
//!     └── tag list ── tag span* (display label)
//! ```
//!
//! Every step is located with a CSS selector from [`GalleryLayout`]. A missing
//! step is a `MalformedPage` error; there is no broad-scan fallback.

use serde::Deserialize;

pub mod extract_gallery_image;
pub mod extract_gallery_tags;

pub use extract_gallery_image::extract_gallery_image;
pub use extract_gallery_tags::extract_gallery_tags;

/// CSS selectors for each step of the gallery page structure.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GalleryLayout {
    pub content: String,
    pub thread: String,
    pub image_block: String,
    pub image_link: String,
    pub tag_list: String,
    pub tag: String,
}

impl Default for GalleryLayout {
    fn default() -> Self {
        GalleryLayout {
            content: "#content".to_string(),
            thread: ".thread".to_string(),
            image_block: ".image-block".to_string(),
            image_link: "a[href]".to_string(),
            tag_list: ".tag-list".to_string(),
            tag: "span.tag".to_string(),
        }
    }
}
