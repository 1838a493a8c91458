//! Async HTTP client wrapping reqwest.
//!
//! Not a browser, just HTTP requests. One GET for the entry page and an
//! optional `/products.json` probe. No retries: a transport failure on the
//! entry page aborts the scan.

use super::{FetchedPage, PageFetcher};
use crate::compliance::types::Platform;
use crate::config::{is_valid_user_agent, ScanConfig, DEFAULT_USER_AGENT};
use crate::error::ScanError;
use async_trait::async_trait;
use std::time::Duration;

/// Maximum redirect hops followed on any request.
const MAX_REDIRECTS: usize = 10;

/// HTTP client for the scanner.
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    timeout_ms: u64,
    probe_timeout_ms: u64,
}

impl HttpClient {
    /// Create a client with the configured user-agent and timeouts.
    ///
    /// An unusable user-agent is replaced by [`DEFAULT_USER_AGENT`] so no
    /// request ever goes out without one.
    pub fn new(config: &ScanConfig) -> Self {
        let user_agent = if is_valid_user_agent(&config.user_agent) {
            config.user_agent.as_str()
        } else {
            tracing::warn!(
                "invalid user agent {:?}, using the default",
                config.user_agent
            );
            DEFAULT_USER_AGENT
        };

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent(user_agent)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("HTTP client setup failed ({e}), using reqwest defaults");
                reqwest::Client::new()
            });

        Self {
            client,
            timeout_ms: config.timeout_ms,
            probe_timeout_ms: config.probe_timeout_ms,
        }
    }

    /// Perform the single GET for the entry page.
    pub async fn get(&self, url: &str) -> Result<FetchedPage, ScanError> {
        let resp = self
            .client
            .get(url)
            .timeout(Duration::from_millis(self.timeout_ms))
            .send()
            .await
            .map_err(|e| ScanError::connect(url, e))?;

        let status = resp.status().as_u16();
        let final_url = resp.url().to_string();
        let body = resp.text().await.map_err(|e| ScanError::connect(url, e))?;

        Ok(FetchedPage {
            url: url.to_string(),
            final_url,
            status,
            body,
        })
    }

    /// Ask `/products.json` whether this is a Shopify storefront.
    async fn probe_products_json(&self, url: &str) -> Result<bool, reqwest::Error> {
        let probe_url = products_json_url(url);
        let resp = self
            .client
            .get(&probe_url)
            .timeout(Duration::from_millis(self.probe_timeout_ms))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Ok(false);
        }

        let body: serde_json::Value = resp.json().await?;
        Ok(looks_like_products_feed(&body))
    }
}

#[async_trait]
impl PageFetcher for HttpClient {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, ScanError> {
        self.get(url).await
    }

    async fn probe_platform(&self, url: &str) -> Option<Platform> {
        match self.probe_products_json(url).await {
            Ok(true) => Some(Platform::Shopify),
            Ok(false) => None,
            Err(e) => {
                tracing::debug!("platform probe failed for {url}: {e}");
                None
            }
        }
    }
}

/// `{url}/products.json` with any trailing slash collapsed.
pub fn products_json_url(url: &str) -> String {
    format!("{}/products.json", url.trim_end_matches('/'))
}

/// A Shopify products feed is an object with a `products` array.
fn looks_like_products_feed(body: &serde_json::Value) -> bool {
    body.get("products").map(|p| p.is_array()).unwrap_or(false)
}
