//! Error types for the scan pipeline.

/// Everything that can abort a scan.
///
/// Only the primary page fetch can fail in normal operation; the
/// platform probe swallows its own failures and the rule battery is
/// infallible over already-extracted strings.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// Transport-level failure on the primary GET (DNS, refused, TLS, timeout).
    #[error("Could not connect to {url}. Check the URL or try 'https://' ({reason})")]
    Connect { url: String, reason: String },

    /// Anything else that went wrong while extracting or evaluating.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ScanError {
    pub fn connect(url: &str, err: impl std::fmt::Display) -> Self {
        Self::Connect {
            url: url.to_string(),
            reason: err.to_string(),
        }
    }
}
