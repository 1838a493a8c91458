//! `shield scan <url>`: scan one store page and print the report.

use crate::cli::output::{self, AlreadyReported, Styled};
use crate::cli::report;
use crate::config::ScanConfig;
use crate::scanner::Scanner;
use anyhow::Result;

/// Run the scan command.
pub async fn run(url: &str, config: ScanConfig) -> Result<()> {
    if url.trim().is_empty() {
        anyhow::bail!("Please enter a URL first.");
    }

    if !output::is_quiet() && !output::is_json() {
        eprintln!("  Scanning {}...", url.trim());
    }

    let scanner = Scanner::new(config);
    let result = scanner.scan(url).await;

    if output::is_json() {
        output::print_json(&result);
    } else {
        print!("{}", report::render(&result, &Styled::new()));
    }

    match result.error() {
        Some(error) => Err(AlreadyReported(error.to_string()).into()),
        None => Ok(()),
    }
}
