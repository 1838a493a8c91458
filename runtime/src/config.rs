//! Scan configuration loading and resolution.
//!
//! Values are resolved in order of priority:
//! 1. CLI flags (applied by the caller on top of the returned config)
//! 2. `SHIELD_*` environment variables
//! 3. Built-in defaults

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Desktop Chrome user-agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
                                      AppleWebKit/537.36 (KHTML, like Gecko) \
                                      Chrome/91.0.4472.124 Safari/537.36";

/// Primary page fetch timeout.
pub const DEFAULT_TIMEOUT_MS: u64 = 8_000;

/// `/products.json` probe timeout.
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 5_000;

/// Which rules of the battery are enabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleProfile {
    /// Every rule except the professional-email check.
    #[default]
    Standard,
    /// The full battery.
    Extended,
}

impl FromStr for RuleProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "extended" => Ok(Self::Extended),
            other => Err(format!(
                "unknown rule profile '{other}' (expected 'standard' or 'extended')"
            )),
        }
    }
}

impl std::fmt::Display for RuleProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Standard => f.write_str("standard"),
            Self::Extended => f.write_str("extended"),
        }
    }
}

/// Settings for a single scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    pub user_agent: String,
    pub timeout_ms: u64,
    pub probe_timeout_ms: u64,
    /// Probe `/products.json` when the page body gives no platform hint.
    pub probe_platform: bool,
    pub profile: RuleProfile,
    /// Clamp the reported score to `[0, 100]`.
    pub clamp_score: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            probe_timeout_ms: DEFAULT_PROBE_TIMEOUT_MS,
            probe_platform: true,
            profile: RuleProfile::Standard,
            clamp_score: true,
        }
    }
}

impl ScanConfig {
    /// Defaults overlaid with any `SHIELD_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ScanConfig::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();

        if let Some(ua) = lookup("SHIELD_USER_AGENT").filter(|v| !v.trim().is_empty()) {
            if is_valid_user_agent(&ua) {
                cfg.user_agent = ua;
            } else {
                tracing::warn!("ignoring SHIELD_USER_AGENT={ua:?}: not a valid header value");
            }
        }
        if let Some(ms) = parse_var(&lookup, "SHIELD_TIMEOUT_MS") {
            cfg.timeout_ms = ms;
        }
        if let Some(ms) = parse_var(&lookup, "SHIELD_PROBE_TIMEOUT_MS") {
            cfg.probe_timeout_ms = ms;
        }
        if let Some(profile) = parse_var(&lookup, "SHIELD_PROFILE") {
            cfg.profile = profile;
        }
        if flag_set(&lookup, "SHIELD_NO_PROBE") {
            cfg.probe_platform = false;
        }
        if flag_set(&lookup, "SHIELD_RAW_SCORE") {
            cfg.clamp_score = false;
        }

        cfg
    }
}

/// Whether `ua` can be sent as a `User-Agent` header.
pub fn is_valid_user_agent(ua: &str) -> bool {
    reqwest::header::HeaderValue::from_str(ua).is_ok()
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!("ignoring {key}={raw:?}: {e}");
            None
        }
    }
}

fn flag_set(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> bool {
    lookup(key)
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}
