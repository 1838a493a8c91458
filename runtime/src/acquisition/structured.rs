//! Pull searchable text, links, favicons, and emails out of raw HTML.
//!
//! Parsing goes through the `scraper` crate, which uses a lenient HTML5
//! tree builder: unclosed tags and missing attributes never fail, and an
//! absent attribute reads as an empty string. Everything handed to the rule
//! battery is lowercased here so the rules can do plain substring tests.

use regex::Regex;
use scraper::{Html, Selector};
use std::sync::OnceLock;

/// Elements whose text content is never shown to a visitor.
const HIDDEN_TEXT_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Email "TLDs" that are really image extensions (`logo@2x.png`).
const ASSET_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "svg"];

/// Everything the rule battery looks at, derived from one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageExtract {
    /// Visible text, whitespace-collapsed and lowercased.
    pub text: String,
    /// Anchors that carry an `href`, in document order.
    pub links: Vec<ExtractedLink>,
    /// `href`s of `<link rel="...icon...">` elements, as written.
    pub favicons: Vec<String>,
    /// Distinct email addresses found anywhere in the raw body, lowercased.
    pub emails: Vec<String>,
}

/// A single `<a href>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedLink {
    /// Trimmed, lowercased `href`.
    pub href: String,
    /// Anchor text, whitespace-collapsed and lowercased.
    pub text: String,
}

impl PageExtract {
    /// Iterate over the lowercased hrefs.
    pub fn hrefs(&self) -> impl Iterator<Item = &str> {
        self.links.iter().map(|l| l.href.as_str())
    }

    /// Domain part of every extracted email.
    pub fn email_domains(&self) -> impl Iterator<Item = &str> {
        self.emails
            .iter()
            .filter_map(|e| e.rsplit_once('@').map(|(_, domain)| domain))
    }
}

/// Extract everything the rules need from a raw HTML body.
pub fn extract_page(html: &str) -> PageExtract {
    let document = Html::parse_document(html);

    PageExtract {
        text: visible_text(&document),
        links: extract_links(&document),
        favicons: extract_favicons(&document),
        emails: extract_emails(html),
    }
}

fn visible_text(document: &Html) -> String {
    let mut pieces: Vec<&str> = Vec::new();

    for node in document.root_element().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|a| {
            a.value()
                .as_element()
                .map(|el| HIDDEN_TEXT_ELEMENTS.contains(&el.name()))
                .unwrap_or(false)
        });
        if !hidden {
            pieces.push(&**text);
        }
    }

    collapse_whitespace(&pieces.join(" ")).to_lowercase()
}

fn extract_links(document: &Html) -> Vec<ExtractedLink> {
    let sel = Selector::parse("a[href]").expect("anchor selector is valid");

    document
        .select(&sel)
        .map(|el| {
            let href = el.value().attr("href").unwrap_or("").trim().to_lowercase();
            let text = collapse_whitespace(&el.text().collect::<Vec<_>>().join(" ")).to_lowercase();
            ExtractedLink { href, text }
        })
        .collect()
}

fn extract_favicons(document: &Html) -> Vec<String> {
    let sel = Selector::parse("link[rel]").expect("link selector is valid");

    document
        .select(&sel)
        .filter(|el| {
            el.value()
                .attr("rel")
                .map(|rel| rel.to_ascii_lowercase().contains("icon"))
                .unwrap_or(false)
        })
        .filter_map(|el| el.value().attr("href"))
        .map(|href| href.trim().to_string())
        .filter(|href| !href.is_empty())
        .collect()
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)[a-z0-9._%+\-]+@[a-z0-9\-]+(?:\.[a-z0-9\-]+)*\.([a-z]{2,})")
            .expect("email regex is valid")
    })
}

fn extract_emails(raw: &str) -> Vec<String> {
    let mut emails: Vec<String> = Vec::new();

    for caps in email_regex().captures_iter(raw) {
        let tld = caps.get(1).map(|m| m.as_str().to_ascii_lowercase()).unwrap_or_default();
        if ASSET_EXTENSIONS.contains(&tld.as_str()) {
            continue;
        }
        let email = caps[0].to_ascii_lowercase();
        if !emails.contains(&email) {
            emails.push(email);
        }
    }

    emails
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_text_lowercased_and_collapsed() {
        let html = r#"
        <html><head><title>Acme Goods</title></head>
        <body><h1>Welcome</h1>
        <p>Responsible
           Person: Jane</p></body></html>
        "#;

        let page = extract_page(html);
        assert!(page.text.contains("acme goods"));
        assert!(page.text.contains("welcome"));
        assert!(page.text.contains("responsible person: jane"));
    }

    #[test]
    fn test_script_and_style_text_is_hidden() {
        let html = r#"
        <html><head><style>.timer { color: red }</style></head>
        <body><p>Hello</p><script>var hurry = "lorem ipsum";</script>
        <noscript>Enable JavaScript</noscript></body></html>
        "#;

        let page = extract_page(html);
        assert_eq!(page.text, "hello");
    }

    #[test]
    fn test_extract_links_with_text() {
        let html = r#"
        <html><body>
        <a href=" /Policies/Refund-Policy ">Refund   Policy</a>
        <a href="mailto:Help@Example.com">Email us</a>
        <a>No href</a>
        <a href="">Empty</a>
        </body></html>
        "#;

        let page = extract_page(html);
        let hrefs: Vec<&str> = page.hrefs().collect();
        assert_eq!(hrefs, vec!["/policies/refund-policy", "mailto:help@example.com", ""]);
        let texts: Vec<&str> = page.links.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["refund policy", "email us", "empty"]);
    }

    #[test]
    fn test_malformed_html_does_not_fail() {
        let html = r#"<div><p>Unclosed <a href=/terms>Terms<b>bold</div><a href"#;
        let page = extract_page(html);
        assert!(page.text.contains("unclosed"));
        assert_eq!(page.hrefs().next(), Some("/terms"));
    }

    #[test]
    fn test_extract_favicons() {
        let html = r#"
        <html><head>
        <link rel="stylesheet" href="/theme.css">
        <link rel="Shortcut Icon" href="//cdn.shop.example/files/favicon.png">
        <link rel="apple-touch-icon" href="/apple-touch-icon.png">
        <link rel="icon">
        </head><body></body></html>
        "#;

        let page = extract_page(html);
        assert_eq!(
            page.favicons,
            vec![
                "//cdn.shop.example/files/favicon.png".to_string(),
                "/apple-touch-icon.png".to_string()
            ]
        );
    }

    #[test]
    fn test_extract_emails_from_raw_body() {
        let html = r#"
        <html><body>
        <p>Write to Sales@Acme-Goods.co.uk or sales@acme-goods.co.uk</p>
        <img src="/logo@2x.png">
        <!-- owner: founder@gmail.com -->
        </body></html>
        "#;

        let page = extract_page(html);
        assert_eq!(
            page.emails,
            vec!["sales@acme-goods.co.uk".to_string(), "founder@gmail.com".to_string()]
        );
        let domains: Vec<&str> = page.email_domains().collect();
        assert_eq!(domains, vec!["acme-goods.co.uk", "gmail.com"]);
    }
}
