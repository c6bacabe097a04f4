use std::path::Path;

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

use crate::extractors::GalleryLayout;

pub const DEFAULT_SETTINGS_FILE: &str = "getimg.toml";

/// Defaults read from the settings file and `GETIMG_*` environment variables.
/// Command-line flags take precedence over everything here.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub user_agent: Option<String>,
    pub log_file: Option<String>,
    pub tags: Option<String>,
    pub keep_failed: bool,
    pub gallery: GalleryLayout,
}

/// Loads settings. An explicit `path` must exist; the default file is optional.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let file = match path {
        Some(path) => File::new(&path.to_string_lossy(), FileFormat::Toml).required(true),
        None => File::new(DEFAULT_SETTINGS_FILE, FileFormat::Toml).required(false),
    };

    let settings = Config::builder()
        .add_source(file)
        .add_source(
            Environment::with_prefix("GETIMG")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}
