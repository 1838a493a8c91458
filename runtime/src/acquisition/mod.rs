//! Page acquisition: URL normalization, HTTP fetching, and HTML extraction.
//!
//! The fetch side sits behind the [`PageFetcher`] trait so the scanner can
//! run against a live network ([`http_client::HttpClient`]) or a canned page
//! in tests. Extraction is synchronous because `scraper`'s DOM is `!Send`.

pub mod http_client;
pub mod normalize;
pub mod structured;

use crate::compliance::types::Platform;
use crate::error::ScanError;
use async_trait::async_trait;

/// A fetched entry page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// Requested URL.
    pub url: String,
    /// Final URL after redirects.
    pub final_url: String,
    /// HTTP status code. Non-2xx pages are still scanned.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

/// Source of store pages.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the entry page. Fails only on transport errors.
    async fn fetch(&self, url: &str) -> Result<FetchedPage, ScanError>;

    /// Secondary platform probe. Any failure collapses into `None`.
    async fn probe_platform(&self, _url: &str) -> Option<Platform> {
        None
    }
}
