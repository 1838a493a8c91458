//! Fold rule outcomes into the final report.

use super::platform::detect_platform;
use super::rules::{evaluate_rules, has_custom_favicon, RuleOutcome};
use super::types::{Platform, ScanMeta, ScanReport};
use crate::acquisition::structured::{extract_page, PageExtract};
use crate::config::ScanConfig;
use std::collections::BTreeMap;

/// Every scan starts from a perfect score.
pub const BASE_SCORE: i32 = 100;

/// Score an already-fetched page without touching the network.
///
/// The platform comes from the body alone; the `/products.json` probe is
/// the scanner's job.
pub fn evaluate_page(url: &str, body: &str, config: &ScanConfig) -> ScanReport {
    let page = extract_page(body);
    let platform = detect_platform(body);
    score_page(url, platform, &page, config)
}

/// Run the rule battery over an extracted page and aggregate.
pub fn score_page(
    url: &str,
    platform: Platform,
    page: &PageExtract,
    config: &ScanConfig,
) -> ScanReport {
    let outcomes = evaluate_rules(page, config.profile);
    let meta = ScanMeta {
        url: url.to_string(),
        platform,
        favicon: has_custom_favicon(page),
    };
    aggregate(meta, &outcomes, config.clamp_score)
}

/// Sum deductions from [`BASE_SCORE`] and collect checks and details.
pub fn aggregate(meta: ScanMeta, outcomes: &[RuleOutcome], clamp: bool) -> ScanReport {
    let mut checks = BTreeMap::new();
    let mut details = Vec::new();
    let mut score = BASE_SCORE;

    for outcome in outcomes {
        checks.insert(outcome.name.to_string(), outcome.value);
        score -= outcome.deduction;
        if let Some(detail) = &outcome.detail {
            tracing::debug!(rule = outcome.name, deduction = outcome.deduction, "rule triggered");
            details.push(detail.clone());
        }
    }

    ScanReport {
        score: if clamp { score.clamp(0, BASE_SCORE) } else { score },
        meta,
        checks,
        details,
    }
}
