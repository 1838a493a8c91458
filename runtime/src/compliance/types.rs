//! Scan result data model.

use crate::error::ScanError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Detected storefront technology.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    #[default]
    Unknown,
    Shopify,
    WooCommerce,
    Wix,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Shopify => "Shopify",
            Self::WooCommerce => "WooCommerce",
            Self::Wix => "Wix",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Page-level facts reported alongside the score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanMeta {
    /// Normalized URL that was fetched.
    pub url: String,
    pub platform: Platform,
    /// Whether the page declares a custom favicon (same value as `checks["favicon"]`).
    pub favicon: bool,
}

/// Successful scan outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    pub score: i32,
    pub meta: ScanMeta,
    /// Check name to boolean outcome. Required checks report "passed",
    /// penalty checks report "detected".
    pub checks: BTreeMap<String, bool>,
    /// One message per triggered issue, in evaluation order.
    pub details: Vec<String>,
}

/// The only output of a scan: either a report or an error, never both.
///
/// Serializes as either `{score, meta, checks, details}` or `{error}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScanResult {
    Failure { error: String },
    Success(ScanReport),
}

impl ScanResult {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failure { error } => Some(error),
            Self::Success(_) => None,
        }
    }

    pub fn report(&self) -> Option<&ScanReport> {
        match self {
            Self::Success(report) => Some(report),
            Self::Failure { .. } => None,
        }
    }

    pub fn score(&self) -> Option<i32> {
        self.report().map(|r| r.score)
    }
}

impl From<ScanError> for ScanResult {
    fn from(err: ScanError) -> Self {
        Self::Failure {
            error: err.to_string(),
        }
    }
}

impl From<ScanReport> for ScanResult {
    fn from(report: ScanReport) -> Self {
        Self::Success(report)
    }
}
