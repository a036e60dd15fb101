use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};

use crate::cookies;
use crate::error::AppError;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Retrieves the raw body of a job board page or API response.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// GET `url`, sending the cookie export at `cookies` when given.
    async fn fetch(&self, url: &str, cookies: Option<&Path>) -> Result<String, AppError>;
}

/// Fetcher backed by one shared reqwest client with browser-like headers.
#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(browser_headers())
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Transport(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str, cookies: Option<&Path>) -> Result<String, AppError> {
        let mut request = self.client.get(url);
        if let Some(path) = cookies {
            request = request.header(header::COOKIE, cookies::load(path).await?);
        }

        tracing::debug!("GET {url}");
        let resp = request.send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(AppError::Transport(format!(
                "Request failed with status code {}",
                status.as_u16()
            )));
        }

        Ok(resp.text().await?)
    }
}

fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_static("en-US,en;q=0.9,id;q=0.8"),
    );
    headers.insert(header::UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
    headers.insert("sec-fetch-dest", HeaderValue::from_static("document"));
    headers.insert("sec-fetch-mode", HeaderValue::from_static("navigate"));
    headers.insert("sec-fetch-site", HeaderValue::from_static("none"));
    headers
}
