use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while scraping a page for images.
///
/// Only page-level and setup failures abort a run. `ImageFetchFailed` and
/// `ImageWriteFailed` are reported per candidate and the batch carries on.
#[derive(Debug, Error)]
pub enum GetimgError {
    #[error("failed to retrieve the page: {url} ({reason})")]
    PageUnreachable { url: String, reason: String },

    #[error("failed to retrieve the image: {url} ({reason})")]
    ImageFetchFailed { url: String, reason: String },

    #[error("failed to write the image to {}: {source}", path.display())]
    ImageWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("directory exists: {}", .0.display())]
    DirectoryExists(PathBuf),

    #[error("failed to create directory {}: {source}", path.display())]
    DirectoryCreateFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unexpected page structure at {url}: {missing} not found")]
    MalformedPage { url: String, missing: String },

    #[error("invalid page URL {url}: {reason}")]
    InvalidPageUrl { url: String, reason: String },

    #[error("invalid selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("failed to read image URL list {}: {source}", path.display())]
    InputListUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write log {}: {reason}", path.display())]
    LogWriteFailed { path: PathBuf, reason: String },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, GetimgError>;
