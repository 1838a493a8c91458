// Copyright 2026 Compliance Shield Contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use compliance_shield::cli::{self, output, ScanOpts};
use compliance_shield::config::ScanConfig;
use std::net::IpAddr;

#[derive(Parser)]
#[command(
    name = "shield",
    about = "Compliance Shield: score an online store for trust and GPSR compliance signals",
    version,
    after_help = "Run 'shield <command> --help' for details on each command."
)]
struct Cli {
    /// Output results as JSON (machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Log level (trace, debug, info, warn, error). RUST_LOG takes precedence.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a store page and print its compliance report
    Scan {
        /// Store URL (scheme optional, e.g. "yourstore.com")
        url: String,
        #[command(flatten)]
        opts: ScanOpts,
    },
    /// List the rules that make up the score
    Rules {
        /// Rule profile (standard, extended)
        #[arg(long)]
        profile: Option<compliance_shield::RuleProfile>,
    },
    /// Serve scans over an HTTP JSON API
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: IpAddr,
        /// Port to listen on
        #[arg(long, default_value = "7878")]
        port: u16,
        #[command(flatten)]
        opts: ScanOpts,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: Shell,
    },
}

fn init_tracing(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!("warn,compliance_shield={level}"))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global flags via environment variables so all modules can check them
    if cli.json {
        std::env::set_var("SHIELD_JSON", "1");
    }
    if cli.quiet {
        std::env::set_var("SHIELD_QUIET", "1");
    }
    if cli.no_color {
        std::env::set_var("SHIELD_NO_COLOR", "1");
    }

    let default_level = match cli.command {
        Commands::Serve { .. } => "info",
        _ => "warn",
    };
    init_tracing(cli.log_level.as_deref().unwrap_or(default_level));

    let result = match cli.command {
        Commands::Scan { url, opts } => cli::scan_cmd::run(&url, opts.resolve()).await,
        Commands::Rules { profile } => {
            let profile = profile.unwrap_or(ScanConfig::from_env().profile);
            cli::rules_cmd::run(profile).await
        }
        Commands::Serve { host, port, opts } => {
            cli::serve_cmd::run(host, port, opts.resolve()).await
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "shield", &mut std::io::stdout());
            Ok(())
        }
    };

    // Consistent exit codes: 0=success, 1=error
    if let Err(e) = &result {
        let reported = e.is::<output::AlreadyReported>();
        if !reported && !output::is_quiet() && !output::is_json() {
            eprintln!("  Error: {e:#}");
        }
        if !reported && output::is_json() {
            output::print_json(&serde_json::json!({ "error": format!("{e:#}") }));
        }
        std::process::exit(1);
    }

    result
}
