//! CLI subcommand implementations for the `shield` binary.

pub mod output;
pub mod report;
pub mod rules_cmd;
pub mod scan_cmd;
pub mod serve_cmd;

use crate::config::{RuleProfile, ScanConfig};
use clap::Args;

/// Scan tuning flags shared by `scan` and `serve`.
#[derive(Debug, Clone, Default, Args)]
pub struct ScanOpts {
    /// Rule profile (standard, extended)
    #[arg(long)]
    pub profile: Option<RuleProfile>,
    /// Page fetch timeout in milliseconds
    #[arg(long)]
    pub timeout: Option<u64>,
    /// Platform probe timeout in milliseconds
    #[arg(long)]
    pub probe_timeout: Option<u64>,
    /// Skip the /products.json platform probe
    #[arg(long)]
    pub no_probe: bool,
    /// Report the unclamped score (may go below zero)
    #[arg(long)]
    pub raw_score: bool,
}

impl ScanOpts {
    /// Overlay these flags on a config resolved from the environment.
    pub fn apply(&self, mut config: ScanConfig) -> ScanConfig {
        if let Some(profile) = self.profile {
            config.profile = profile;
        }
        if let Some(ms) = self.timeout {
            config.timeout_ms = ms;
        }
        if let Some(ms) = self.probe_timeout {
            config.probe_timeout_ms = ms;
        }
        if self.no_probe {
            config.probe_platform = false;
        }
        if self.raw_score {
            config.clamp_score = false;
        }
        config
    }

    /// Environment config with these flags on top.
    pub fn resolve(&self) -> ScanConfig {
        self.apply(ScanConfig::from_env())
    }
}
