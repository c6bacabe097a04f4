use std::path::Path;

use colored::Colorize;

use crate::config::{FailurePolicy, RunConfiguration};
use crate::error::Result;
use crate::extractors::Candidate;
use crate::fetcher::{write_image, Fetch};
use crate::record::{join_tags, ImageRecord};
use crate::utilities::derive_path::{derive_path, image_file_name};
use crate::utilities::is_image::is_image;
use crate::utilities::resolve_url::resolve_url;

/// Outcome of running candidates through the pipeline.
#[derive(Debug, Default)]
pub struct ProcessedImages {
    pub records: Vec<ImageRecord>,
    /// Every resolved URL, in document order, including dump mode.
    pub resolved_urls: Vec<String>,
    /// Candidates whose download or write failed.
    pub failures: usize,
}

/// Runs each candidate through filter, resolution and download, one at a time.
///
/// A failing candidate is reported on stderr and never stops the batch.
pub async fn process_images<F: Fetch>(
    config: &RunConfiguration,
    fetcher: &F,
    candidates: Vec<Candidate>,
) -> ProcessedImages {
    let mut processed = ProcessedImages::default();

    for candidate in candidates {
        if !is_image(&candidate.reference) {
            continue;
        }

        let image_url = resolve_url(&config.page_url, &candidate.reference);
        println!("{}", image_url);
        processed.resolved_urls.push(image_url.clone());

        if config.dump {
            continue;
        }

        let Some(path) = derive_path(&image_url, config.output_dir.as_deref()) else {
            let message = format!("Skipped {} ({}): no file name", image_url, candidate.source.label());
            eprintln!("{}", message.yellow());
            continue;
        };
        let mut file = image_file_name(&image_url).map(str::to_string);

        if !config.skip_download {
            if let Err(e) = download_image(fetcher, &image_url, &path).await {
                eprintln!(
                    "{}",
                    format!("Error: {} ({})", e, candidate.source.label()).red()
                );
                processed.failures += 1;

                match config.failure_policy {
                    FailurePolicy::Skip => continue,
                    FailurePolicy::Record => file = None,
                }
            }
        }

        let tags = join_tags(&config.tags, &candidate.page_tags);

        processed.records.push(ImageRecord {
            file,
            url: image_url,
            page_url: config.page_url.clone(),
            tags,
        });
    }

    processed
}

async fn download_image<F: Fetch>(fetcher: &F, image_url: &str, path: &Path) -> Result<()> {
    let bytes = fetcher.fetch_bytes(image_url).await?;
    write_image(path, &bytes).await
}
