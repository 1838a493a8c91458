//! Terminal output helpers shared by every subcommand.
//!
//! Global flags (`--json`, `--quiet`, `--no-color`) are exported by `main`
//! as `SHIELD_*` environment variables so any module can check them.

use serde::Serialize;
use std::io::IsTerminal;

fn env_flag(key: &str) -> bool {
    std::env::var(key).map(|v| v == "1").unwrap_or(false)
}

/// `--json`: emit machine-readable output on stdout.
pub fn is_json() -> bool {
    env_flag("SHIELD_JSON")
}

/// `--quiet`: suppress non-essential output.
pub fn is_quiet() -> bool {
    env_flag("SHIELD_QUIET")
}

/// Colour is on for terminals unless `--no-color` or `NO_COLOR` is set.
pub fn use_color() -> bool {
    !env_flag("SHIELD_NO_COLOR")
        && std::env::var_os("NO_COLOR").is_none()
        && std::io::stdout().is_terminal()
}

/// Pretty-print any serializable value as JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("  Error: failed to serialize output: {e}"),
    }
}

/// Marker error: the command already printed its failure, `main` should
/// only set the exit code.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct AlreadyReported(pub String);

/// ANSI styling that degrades to plain text.
#[derive(Debug, Clone, Copy)]
pub struct Styled {
    color: bool,
}

impl Styled {
    /// Styling according to the current terminal and flags.
    pub fn new() -> Self {
        Self { color: use_color() }
    }

    /// Never emit escape codes.
    pub fn plain() -> Self {
        Self { color: false }
    }

    fn paint(&self, code: &str, s: &str) -> String {
        if self.color {
            format!("\x1b[{code}m{s}\x1b[0m")
        } else {
            s.to_string()
        }
    }

    pub fn red(&self, s: &str) -> String {
        self.paint("31", s)
    }

    pub fn yellow(&self, s: &str) -> String {
        self.paint("33", s)
    }

    pub fn green(&self, s: &str) -> String {
        self.paint("32", s)
    }

    pub fn bold(&self, s: &str) -> String {
        self.paint("1", s)
    }

    pub fn dim(&self, s: &str) -> String {
        self.paint("2", s)
    }

    pub fn ok_sym(&self) -> String {
        self.green("✓")
    }

    pub fn fail_sym(&self) -> String {
        self.red("✗")
    }
}
