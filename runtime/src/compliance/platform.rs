//! Storefront platform fingerprinting from the raw page body.

use super::types::Platform;

/// Fingerprints checked in order; the first match wins.
///
/// Each entry is `(platform, case_sensitive_needles, case_insensitive_needles)`.
const PLATFORM_FINGERPRINTS: &[(Platform, &[&str], &[&str])] = &[
    (Platform::Shopify, &["/products.json"], &["shopify"]),
    (Platform::WooCommerce, &["wp-content"], &[]),
    (Platform::Wix, &["wix.com"], &[]),
];

/// Classify the raw (not lowercased) response body.
pub fn detect_platform(body: &str) -> Platform {
    let lowered = body.to_lowercase();

    for &(platform, exact, folded) in PLATFORM_FINGERPRINTS {
        let matched = exact.iter().any(|needle| body.contains(needle))
            || folded.iter().any(|needle| lowered.contains(needle));
        if matched {
            return platform;
        }
    }

    Platform::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_woocommerce_from_wp_content() {
        let body = r#"<link rel="stylesheet" href="/wp-content/themes/store/style.css">"#;
        assert_eq!(detect_platform(body), Platform::WooCommerce);
    }

    #[test]
    fn test_products_json_beats_everything() {
        let body = r#"<script src="/wp-content/x.js"></script>
            <a href="https://www.wix.com">wix</a>
            <script>fetch("/products.json")</script>"#;
        assert_eq!(detect_platform(body), Platform::Shopify);
    }

    #[test]
    fn test_shopify_token_is_case_insensitive() {
        assert_eq!(
            detect_platform(r#"<script>window.Shopify = {};</script>"#),
            Platform::Shopify
        );
    }

    #[test]
    fn test_wix_and_unknown() {
        assert_eq!(
            detect_platform(r#"<meta name="generator" content="static.wix.com">"#),
            Platform::Wix
        );
        assert_eq!(detect_platform("<html><body>Hi</body></html>"), Platform::Unknown);
    }

    #[test]
    fn test_wp_content_match_is_case_sensitive() {
        assert_eq!(detect_platform("WP-CONTENT"), Platform::Unknown);
    }
}
