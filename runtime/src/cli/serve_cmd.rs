//! `shield serve`: expose scans over the REST API.

use crate::cli::output::{self, Styled};
use crate::config::ScanConfig;
use crate::rest::{self, AppState};
use crate::scanner::Scanner;
use anyhow::{Context, Result};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tracing::info;

/// Run the REST server until interrupted.
pub async fn run(host: IpAddr, port: u16, config: ScanConfig) -> Result<()> {
    let addr = SocketAddr::new(host, port);
    info!(
        "starting Compliance Shield v{} (profile={}, probe={})",
        env!("CARGO_PKG_VERSION"),
        config.profile,
        config.probe_platform
    );

    if !output::is_quiet() {
        let s = Styled::new();
        eprintln!(
            "  {} Compliance Shield v{} listening on http://{addr}",
            s.ok_sym(),
            env!("CARGO_PKG_VERSION")
        );
    }

    let state = Arc::new(AppState {
        scanner: Scanner::new(config),
    });

    rest::start(addr, state)
        .await
        .with_context(|| format!("REST server on {addr} stopped"))
}
