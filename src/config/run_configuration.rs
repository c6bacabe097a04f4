use std::path::PathBuf;

use url::Url;

use crate::cli::Cli;
use crate::config::settings::Settings;
use crate::error::{GetimgError, Result};
use crate::extractors::DiscoveryMode;

pub const DEFAULT_LOG_FILE: &str = "images.yaml";
pub const DEFAULT_USER_AGENT: &str = concat!("getimg/", env!("CARGO_PKG_VERSION"));

/// What happens to a candidate whose download fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Drop the record.
    #[default]
    Skip,
    /// Keep the record, without a file name.
    Record,
}

/// Settings for one run. Built once, never changed afterwards.
#[derive(Debug, Clone)]
pub struct RunConfiguration {
    pub page_url: String,
    pub output_dir: Option<PathBuf>,
    pub tags: String,
    pub mode: DiscoveryMode,
    /// Print resolved URLs only: no download, no records.
    pub dump: bool,
    /// Record images without downloading them.
    pub skip_download: bool,
    pub html_dump: bool,
    pub input_list: Option<PathBuf>,
    pub write_log: bool,
    pub log_file: String,
    pub user_agent: String,
    pub failure_policy: FailurePolicy,
}

impl RunConfiguration {
    /// Merges command-line flags over settings and validates the page URL.
    pub fn from_cli(cli: &Cli, settings: Settings) -> Result<Self> {
        validate_page_url(&cli.url)?;

        let mode = if cli.linked {
            DiscoveryMode::Linked
        } else if cli.gallery {
            DiscoveryMode::Gallery(settings.gallery)
        } else {
            DiscoveryMode::Embedded
        };

        let failure_policy = if cli.keep_failed || settings.keep_failed {
            FailurePolicy::Record
        } else {
            FailurePolicy::Skip
        };

        Ok(RunConfiguration {
            page_url: cli.url.clone(),
            output_dir: cli.dir.clone().filter(|dir| !dir.as_os_str().is_empty()),
            tags: cli.tags.clone().or(settings.tags).unwrap_or_default(),
            mode,
            dump: cli.dump,
            skip_download: cli.no_download,
            html_dump: cli.html_dump,
            input_list: cli.input_url.clone(),
            write_log: cli.sombrero,
            log_file: settings
                .log_file
                .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string()),
            user_agent: cli
                .user_agent
                .clone()
                .or(settings.user_agent)
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            failure_policy,
        })
    }

    #[cfg(test)]
    pub(crate) fn for_page(page_url: &str) -> Self {
        RunConfiguration {
            page_url: page_url.to_string(),
            output_dir: None,
            tags: String::new(),
            mode: DiscoveryMode::Embedded,
            dump: false,
            skip_download: false,
            html_dump: false,
            input_list: None,
            write_log: false,
            log_file: DEFAULT_LOG_FILE.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            failure_policy: FailurePolicy::Skip,
        }
    }
}

fn validate_page_url(page_url: &str) -> Result<()> {
    let url = Url::parse(page_url).map_err(|e| GetimgError::InvalidPageUrl {
        url: page_url.to_string(),
        reason: e.to_string(),
    })?;

    if url.cannot_be_a_base() {
        return Err(GetimgError::InvalidPageUrl {
            url: page_url.to_string(),
            reason: "relative references cannot be resolved against it".to_string(),
        });
    }
    Ok(())
}
