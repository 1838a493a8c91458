//! Store URL normalization.

/// Turn raw user input into a GET target.
///
/// Surrounding whitespace is trimmed and `https://` is prepended unless the
/// input already carries an `http://` or `https://` scheme (any case).
/// Protocol-relative input (`//shop.example`) gets `https:`. Nothing else
/// is validated; a malformed host is left for the HTTP layer to reject.
pub fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if has_http_scheme(trimmed) {
        return trimmed.to_string();
    }
    if let Some(rest) = trimmed.strip_prefix("//") {
        return format!("https://{rest}");
    }
    format!("https://{trimmed}")
}

fn has_http_scheme(s: &str) -> bool {
    let head: String = s.chars().take(8).collect::<String>().to_ascii_lowercase();
    head.starts_with("http://") || head.starts_with("https://")
}
