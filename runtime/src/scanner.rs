// Copyright 2026 Compliance Shield Contributors
// SPDX-License-Identifier: Apache-2.0

//! The scan entry point: fetch one page, extract, run the rules, aggregate.
//!
//! [`Scanner::scan`] never fails and never panics on input. Transport
//! failures and internal errors come back as [`ScanResult::Failure`]; a
//! failed fetch aborts the scan with no partial checks.

use crate::acquisition::http_client::HttpClient;
use crate::acquisition::normalize::normalize_url;
use crate::acquisition::structured::extract_page;
use crate::acquisition::PageFetcher;
use crate::compliance::platform::detect_platform;
use crate::compliance::scoring::score_page;
use crate::compliance::types::{Platform, ScanReport, ScanResult};
use crate::config::ScanConfig;
use crate::error::ScanError;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Stateless, cheaply cloneable scanner. Concurrent scans share nothing
/// but the underlying HTTP connection pool.
#[derive(Clone)]
pub struct Scanner {
    fetcher: Arc<dyn PageFetcher>,
    config: ScanConfig,
}

impl Scanner {
    /// Scanner backed by a live [`HttpClient`].
    pub fn new(config: ScanConfig) -> Self {
        let fetcher: Arc<dyn PageFetcher> = Arc::new(HttpClient::new(&config));
        Self { fetcher, config }
    }

    /// Scanner backed by any page source.
    pub fn with_fetcher(fetcher: Arc<dyn PageFetcher>, config: ScanConfig) -> Self {
        Self { fetcher, config }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Scan a store URL (scheme optional).
    pub async fn scan(&self, raw_url: &str) -> ScanResult {
        let url = normalize_url(raw_url);
        info!("scan started: url={url}, profile={}", self.config.profile);

        match self.try_scan(&url).await {
            Ok(report) => {
                info!(
                    "scan complete: url={url}, platform={}, score={}, issues={}",
                    report.meta.platform,
                    report.score,
                    report.details.len()
                );
                ScanResult::Success(report)
            }
            Err(e) => {
                warn!("scan failed for {url}: {e}");
                ScanResult::from(e)
            }
        }
    }

    async fn try_scan(&self, url: &str) -> Result<ScanReport, ScanError> {
        let page = self.fetcher.fetch(url).await?;
        debug!(
            "fetched {} -> {} (status {}, {} bytes)",
            page.url,
            page.final_url,
            page.status,
            page.body.len()
        );

        // scraper's DOM is !Send; keep it on a blocking thread.
        let body = page.body;
        let (extract, body_platform) =
            tokio::task::spawn_blocking(move || (extract_page(&body), detect_platform(&body)))
                .await
                .map_err(|e| ScanError::Internal(format!("extraction task failed: {e}")))?;

        let platform = self.resolve_platform(url, body_platform).await;
        Ok(score_page(url, platform, &extract, &self.config))
    }

    /// Fall back to the `/products.json` probe when the body gave no hint.
    async fn resolve_platform(&self, url: &str, from_body: Platform) -> Platform {
        if from_body.is_known() || !self.config.probe_platform {
            return from_body;
        }
        match self.fetcher.probe_platform(url).await {
            Some(platform) => {
                debug!("platform probe matched {platform} for {url}");
                platform
            }
            None => Platform::Unknown,
        }
    }
}
