use std::path::{Path, PathBuf};

/// The last URL segment without its query string, or `None` when that is empty
/// (`http://x.org/a.jpg?next=/`, `http://x.org/dir/`).
pub fn image_file_name(resolved_url: &str) -> Option<&str> {
    let file_name = resolved_url.rsplit('/').next().unwrap_or(resolved_url);
    let file_name = file_name.split('?').next().unwrap_or(file_name);

    Some(file_name).filter(|name| !name.is_empty())
}

/// Local path for a downloaded image: [`image_file_name`] placed under
/// `output_dir` when one is given.
pub fn derive_path(resolved_url: &str, output_dir: Option<&Path>) -> Option<PathBuf> {
    let file_name = image_file_name(resolved_url)?;

    match output_dir {
        Some(dir) if !dir.as_os_str().is_empty() => Some(dir.join(file_name)),
        _ => Some(PathBuf::from(file_name)),
    }
}
