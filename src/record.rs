use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GetimgError, Result};

/// One entry of the image log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    pub url: String,
    pub page_url: String,
    pub tags: String,
}

/// Appends page tags to the configured tag string, one space before each.
///
/// The configured string is kept exactly as given.
pub fn join_tags(configured: &str, page_tags: &[String]) -> String {
    let mut tags = configured.to_string();
    for tag in page_tags {
        if !tags.is_empty() {
            tags.push(' ');
        }
        tags.push_str(tag);
    }
    tags
}

/// Serializes the records as a YAML sequence and writes them to `path`.
pub async fn write_log(path: &Path, records: &[ImageRecord]) -> Result<()> {
    let yaml = serde_yaml::to_string(records).map_err(|e| GetimgError::LogWriteFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    tokio::fs::write(path, yaml)
        .await
        .map_err(|e| GetimgError::LogWriteFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}
