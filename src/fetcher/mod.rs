use std::path::Path;

use crate::error::{GetimgError, Result};

pub mod http_fetcher;

pub use http_fetcher::HttpFetcher;

/// A fetched page before decoding.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub body: Vec<u8>,
    /// `charset` parameter of the response `Content-Type`, if any.
    pub charset: Option<String>,
}

/// Network access used by a run.
///
/// Kept as a trait so a run can be driven without touching the network.
pub trait Fetch {
    /// Retrieves the page to scan. Fails with `PageUnreachable`.
    async fn fetch_page(&self, url: &str) -> Result<Page>;

    /// Retrieves the bytes of one image. Fails with `ImageFetchFailed`.
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>>;
}

/// Creates or overwrites `path` with the downloaded bytes.
pub async fn write_image(path: &Path, bytes: &[u8]) -> Result<()> {
    tokio::fs::write(path, bytes)
        .await
        .map_err(|source| GetimgError::ImageWriteFailed {
            path: path.to_path_buf(),
            source,
        })
}
