use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};

use crate::error::{GetimgError, Result};
use crate::fetcher::{Fetch, Page};
use crate::utilities::decode_page::charset_from_content_type;

/// Fetcher backed by a single reqwest client.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str) -> Result<Self> {
        let client = Client::builder().user_agent(user_agent).build()?;
        Ok(HttpFetcher { client })
    }

    async fn get(&self, url: &str) -> std::result::Result<Page, String> {
        let response: Response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if !response.status().is_success() {
            return Err(format!("status {}", response.status()));
        }

        let charset = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(charset_from_content_type);

        let bytes = response.bytes().await.map_err(|e| e.to_string())?;
        Ok(Page {
            body: bytes.to_vec(),
            charset,
        })
    }
}

impl Fetch for HttpFetcher {
    async fn fetch_page(&self, url: &str) -> Result<Page> {
        self.get(url)
            .await
            .map_err(|reason| GetimgError::PageUnreachable {
                url: url.to_string(),
                reason,
            })
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        self.get(url)
            .await
            .map(|page| page.body)
            .map_err(|reason| GetimgError::ImageFetchFailed {
                url: url.to_string(),
                reason,
            })
    }
}
