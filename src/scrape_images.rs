use std::path::{Path, PathBuf};

use scraper::Html;

use crate::config::RunConfiguration;
use crate::error::{GetimgError, Result};
use crate::extractors::{Candidate, SourceKind};
use crate::fetcher::Fetch;
use crate::record::{write_log, ImageRecord};
use crate::utilities::decode_page::decode_page;
use crate::utilities::process_images::process_images;

/// What a run produced.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub records: Vec<ImageRecord>,
    pub resolved_urls: Vec<String>,
    pub failures: usize,
    pub log_path: Option<PathBuf>,
}

impl RunSummary {
    /// Records that carry a downloaded (or, with `-n`, would-be) file.
    pub fn downloaded(&self) -> usize {
        self.records.iter().filter(|r| r.file.is_some()).count()
    }
}

/// Scrapes one page (or an image URL list) and returns the ordered image log.
///
/// Fatal errors are returned; per-image failures are only counted.
pub async fn scrape_images<F: Fetch>(config: &RunConfiguration, fetcher: &F) -> Result<RunSummary> {
    if let Some(dir) = config.output_dir.as_deref() {
        if !config.dump {
            prepare_output_dir(dir).await?;
        }
    }

    eprintln!("Download images from {}\n", config.page_url);

    let candidates = match config.input_list.as_deref() {
        Some(path) => read_input_list(path).await?,
        None => {
            let page = fetcher.fetch_page(&config.page_url).await?;
            let document = Html::parse_document(&decode_page(&page.body, page.charset.as_deref()));

            if config.html_dump {
                println!("{}", document.html());
                return Ok(RunSummary::default());
            }

            config.mode.discover(&document, &config.page_url)?
        }
    };

    let processed = process_images(config, fetcher, candidates).await;

    let log_path = if config.write_log {
        let path = log_path(config);
        write_log(&path, &processed.records).await?;
        Some(path)
    } else {
        None
    };

    Ok(RunSummary {
        records: processed.records,
        resolved_urls: processed.resolved_urls,
        failures: processed.failures,
        log_path,
    })
}

/// Creates the download directory. An existing directory is refused.
async fn prepare_output_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        return Err(GetimgError::DirectoryExists(dir.to_path_buf()));
    }

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| GetimgError::DirectoryCreateFailed {
            path: dir.to_path_buf(),
            source,
        })
}

async fn read_input_list(path: &Path) -> Result<Vec<Candidate>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| GetimgError::InputListUnreadable {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(content
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .map(|line| Candidate::new(line, SourceKind::List))
        .collect())
}

fn log_path(config: &RunConfiguration) -> PathBuf {
    match config.output_dir.as_deref() {
        Some(dir) if !config.dump => dir.join(&config.log_file),
        _ => PathBuf::from(&config.log_file),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FailurePolicy;
    use crate::extractors::{DiscoveryMode, GalleryLayout};
    use crate::fetcher::fake::FakeFetcher;

    const PAGE: &str = "http://example.com/photos/index.html";

    const EMBEDDED_PAGE: &str = r#"<html><body>
        <img src="one.jpg">
        <img alt="missing source">
        <img src="/static/two.png?v=3">
    </body></html>"#;

    const LINKED_PAGE: &str = r#"<html><body>
        <a name="anchor">no href</a>
        <a href="photo.bmp">photo</a>
    </body></html>"#;

    fn run_config(out: &Path) -> RunConfiguration {
        RunConfiguration {
            output_dir: Some(out.to_path_buf()),
            tags: "trip".to_string(),
            ..RunConfiguration::for_page(PAGE)
        }
    }

    #[tokio::test]
    async fn embedded_page_downloads_images_with_src() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("out");
        let fetcher = FakeFetcher::default()
            .with_page(PAGE, EMBEDDED_PAGE)
            .with_image("http://example.com/photos/one.jpg", b"one")
            .with_image("http://example.com/static/two.png?v=3", b"two");

        let summary = scrape_images(&run_config(&out), &fetcher).await.unwrap();

        let files: Vec<_> = summary.records.iter().map(|r| r.file.clone().unwrap()).collect();
        assert_eq!(files, ["one.jpg", "two.png"]);
        assert_eq!(summary.failures, 0);
        assert_eq!(std::fs::read(out.join("one.jpg")).unwrap(), b"one");
        assert_eq!(std::fs::read(out.join("two.png")).unwrap(), b"two");
        assert!(summary.records.iter().all(|r| r.page_url == PAGE && r.tags == "trip"));
    }

    #[tokio::test]
    async fn linked_page_resolves_href_against_page() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("out");
        let config = RunConfiguration {
            mode: DiscoveryMode::Linked,
            ..run_config(&out)
        };
        let fetcher = FakeFetcher::default()
            .with_page(PAGE, LINKED_PAGE)
            .with_image("http://example.com/photos/photo.bmp", b"bmp");

        let summary = scrape_images(&config, &fetcher).await.unwrap();

        assert_eq!(summary.records.len(), 1);
        assert_eq!(summary.records[0].url, "http://example.com/photos/photo.bmp");
        assert_eq!(summary.records[0].file.as_deref(), Some("photo.bmp"));
    }

    #[tokio::test]
    async fn failed_image_does_not_abort_the_run() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("out");
        let config = RunConfiguration {
            mode: DiscoveryMode::Linked,
            write_log: true,
            ..run_config(&out)
        };
        let page = r#"<a href="first.jpg">1</a><a href="second.jpg">2</a>"#;
        let fetcher = FakeFetcher::default()
            .with_page(PAGE, page)
            .with_image("http://example.com/photos/second.jpg", b"2");

        let summary = scrape_images(&config, &fetcher).await.unwrap();

        assert_eq!(summary.failures, 1);
        assert_eq!(summary.records.len(), 1);
        assert_eq!(summary.records[0].url, "http://example.com/photos/second.jpg");

        let log_path = summary.log_path.unwrap();
        assert_eq!(log_path, out.join("images.yaml"));
        let logged: Vec<ImageRecord> =
            serde_yaml::from_str(&std::fs::read_to_string(log_path).unwrap()).unwrap();
        assert_eq!(logged, summary.records);
    }

    #[tokio::test]
    async fn dump_mode_writes_empty_log_and_no_images() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("out");
        let log_file = tmp.path().join("dump.yaml");
        let config = RunConfiguration {
            mode: DiscoveryMode::Linked,
            dump: true,
            write_log: true,
            log_file: log_file.to_string_lossy().into_owned(),
            ..run_config(&out)
        };
        let fetcher = FakeFetcher::default().with_page(PAGE, LINKED_PAGE);

        let summary = scrape_images(&config, &fetcher).await.unwrap();

        assert_eq!(summary.resolved_urls, ["http://example.com/photos/photo.bmp"]);
        assert!(summary.records.is_empty());
        assert!(!out.exists());
        assert_eq!(*fetcher.requests.borrow(), [PAGE]);
        let logged: Vec<ImageRecord> =
            serde_yaml::from_str(&std::fs::read_to_string(log_file).unwrap()).unwrap();
        assert!(logged.is_empty());
    }

    #[tokio::test]
    async fn existing_directory_fails_before_fetching() {
        let tmp = tempfile::tempdir().unwrap();
        let fetcher = FakeFetcher::default().with_page(PAGE, EMBEDDED_PAGE);

        let err = scrape_images(&run_config(tmp.path()), &fetcher).await.unwrap_err();

        assert!(matches!(err, GetimgError::DirectoryExists(_)));
        assert!(fetcher.requests.borrow().is_empty());
    }

    #[tokio::test]
    async fn unreachable_page_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        let err = scrape_images(&run_config(&tmp.path().join("out")), &FakeFetcher::default())
            .await
            .unwrap_err();
        assert!(matches!(err, GetimgError::PageUnreachable { .. }));
    }

    #[tokio::test]
    async fn malformed_gallery_page_yields_no_records() {
        let tmp = tempfile::tempdir().unwrap();
        let config = RunConfiguration {
            mode: DiscoveryMode::Gallery(GalleryLayout::default()),
            ..run_config(&tmp.path().join("out"))
        };
        let fetcher = FakeFetcher::default().with_page(PAGE, EMBEDDED_PAGE);

        let err = scrape_images(&config, &fetcher).await.unwrap_err();

        assert!(matches!(err, GetimgError::MalformedPage { .. }));
        assert_eq!(*fetcher.requests.borrow(), [PAGE]);
    }

    #[tokio::test]
    async fn gallery_page_records_page_tags() {
        let tmp = tempfile::tempdir().unwrap();
        let config = RunConfiguration {
            mode: DiscoveryMode::Gallery(GalleryLayout::default()),
            skip_download: true,
            ..run_config(&tmp.path().join("out"))
        };
        let page = r#"<div id="content"><div class="thread">
            <div class="image-block"><a href="/full/77.png"><img src="/thumb/77.png"></a></div>
            <div class="tag-list"><span class="tag">red panda</span><span class="tag">tree</span></div>
        </div></div>"#;
        let fetcher = FakeFetcher::default().with_page(PAGE, page);

        let summary = scrape_images(&config, &fetcher).await.unwrap();

        assert_eq!(
            summary.records,
            vec![ImageRecord {
                file: Some("77.png".to_string()),
                url: "http://example.com/full/77.png".to_string(),
                page_url: PAGE.to_string(),
                tags: "trip red_panda tree".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn input_list_bypasses_page_fetch() {
        let tmp = tempfile::tempdir().unwrap();
        let list = tmp.path().join("urls.txt");
        std::fs::write(
            &list,
            "http://cdn.example.com/a.jpg  \n\nhttp://cdn.example.com/readme.txt\nhttp://cdn.example.com/b.gif\n",
        )
        .unwrap();
        let config = RunConfiguration {
            input_list: Some(list),
            failure_policy: FailurePolicy::Record,
            ..run_config(&tmp.path().join("out"))
        };
        let fetcher = FakeFetcher::default().with_image("http://cdn.example.com/a.jpg", b"a");

        let summary = scrape_images(&config, &fetcher).await.unwrap();

        assert_eq!(
            *fetcher.requests.borrow(),
            ["http://cdn.example.com/a.jpg", "http://cdn.example.com/b.gif"]
        );
        assert_eq!(summary.records.len(), 2);
        assert_eq!(summary.records[0].file.as_deref(), Some("a.jpg"));
        assert_eq!(summary.records[1].file, None);
        assert_eq!(summary.failures, 1);
    }

    #[tokio::test]
    async fn missing_input_list_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        let config = RunConfiguration {
            input_list: Some(tmp.path().join("absent.txt")),
            ..run_config(&tmp.path().join("out"))
        };
        let err = scrape_images(&config, &FakeFetcher::default()).await.unwrap_err();
        assert!(matches!(err, GetimgError::InputListUnreadable { .. }));
    }

    #[tokio::test]
    async fn html_dump_stops_before_discovery() {
        let tmp = tempfile::tempdir().unwrap();
        let config = RunConfiguration {
            html_dump: true,
            write_log: true,
            ..run_config(&tmp.path().join("out"))
        };
        let fetcher = FakeFetcher::default().with_page(PAGE, EMBEDDED_PAGE);

        let summary = scrape_images(&config, &fetcher).await.unwrap();

        assert!(summary.records.is_empty());
        assert!(summary.log_path.is_none());
        assert_eq!(*fetcher.requests.borrow(), [PAGE]);
    }

    #[tokio::test]
    async fn shift_jis_page_is_decoded_from_meta_charset() {
        let tmp = tempfile::tempdir().unwrap();
        let page_url = "http://example.jp/";
        let html = r#"<html><head><meta charset="shift_jis"></head><body><img src="画像.jpg"></body></html>"#;
        let (body, _, _) = encoding_rs::SHIFT_JIS.encode(html);
        let config = RunConfiguration {
            output_dir: Some(tmp.path().join("out")),
            ..RunConfiguration::for_page(page_url)
        };
        let fetcher = FakeFetcher::default()
            .with_encoded_page(page_url, &body, None)
            .with_image("http://example.jp/%E7%94%BB%E5%83%8F.jpg", b"jpg");

        let summary = scrape_images(&config, &fetcher).await.unwrap();

        assert_eq!(summary.failures, 0);
        assert_eq!(summary.records.len(), 1);
        assert_eq!(summary.records[0].url, "http://example.jp/%E7%94%BB%E5%83%8F.jpg");
    }

    #[tokio::test]
    async fn header_charset_decodes_page_without_declaration() {
        let page_url = "http://example.jp/";
        let (body, _, _) = encoding_rs::SHIFT_JIS.encode(r#"<img src="写真.png">"#);
        let config = RunConfiguration {
            dump: true,
            ..RunConfiguration::for_page(page_url)
        };
        let fetcher = FakeFetcher::default().with_encoded_page(page_url, &body, Some("Shift_JIS"));

        let summary = scrape_images(&config, &fetcher).await.unwrap();

        assert_eq!(summary.resolved_urls, ["http://example.jp/%E5%86%99%E7%9C%9F.png"]);
    }

    #[tokio::test]
    async fn downloaded_count_excludes_kept_failures() {
        let tmp = tempfile::tempdir().unwrap();
        let config = RunConfiguration {
            mode: DiscoveryMode::Linked,
            failure_policy: FailurePolicy::Record,
            ..run_config(&tmp.path().join("out"))
        };
        let page = r#"<a href="first.jpg">1</a><a href="second.jpg">2</a>"#;
        let fetcher = FakeFetcher::default()
            .with_page(PAGE, page)
            .with_image("http://example.com/photos/second.jpg", b"2");

        let summary = scrape_images(&config, &fetcher).await.unwrap();

        assert_eq!(summary.records.len(), 2);
        assert_eq!(summary.failures, 1);
        assert_eq!(summary.downloaded(), 1);
    }
}
