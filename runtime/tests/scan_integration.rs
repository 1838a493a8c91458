//! End-to-end scans against a mock storefront.
//!
//! Every test stands up a `wiremock` server playing the store, so the full
//! path (normalize, GET, extract, classify, probe, rules, aggregate) runs
//! over real HTTP without touching the network.

use compliance_shield::config::{RuleProfile, ScanConfig, DEFAULT_USER_AGENT};
use compliance_shield::{Platform, ScanResult, Scanner};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

// ── Fixtures ──

const BARE_STORE: &str = r#"<!doctype html>
<html><head><title>Welcome</title></head>
<body>
  <h1>Hello</h1>
  <p>We sell quality goods.</p>
  <a href="/about">About us</a>
</body></html>"#;

const COMPLETE_STORE: &str = r#"<!doctype html>
<html><head>
  <title>Acme Goods</title>
  <link rel="icon" href="https://cdn.acme.example/uploads/favicon.png">
</head>
<body>
  <footer>
    <p>Acme Goods Ltd, 12 High Street, London</p>
    <p>EU Responsible Person: Acme BV, Keizersgracht 1, Amsterdam</p>
    <a href="/policies/refund-policy">Refund policy</a>
    <a href="/policies/shipping-policy">Shipping policy</a>
    <a href="/policies/terms-of-service">Terms of service</a>
    <a href="mailto:support@acmegoods.example">support@acmegoods.example</a>
    <a href="https://www.instagram.com/acmegoods">Instagram</a>
  </footer>
</body></html>"#;

/// Exact whole-value match on `User-Agent` (the value contains commas).
struct UserAgentIs(&'static str);

impl Match for UserAgentIs {
    fn matches(&self, request: &Request) -> bool {
        request
            .headers
            .get("user-agent")
            .and_then(|v| v.to_str().ok())
            == Some(self.0)
    }
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "text/html; charset=utf-8")
        .set_body_string(body)
}

async fn store_with_home(body: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(body))
        .mount(&server)
        .await;
    server
}

fn report(result: &ScanResult) -> &compliance_shield::ScanReport {
    match result {
        ScanResult::Success(r) => r,
        ScanResult::Failure { error } => panic!("expected a report, got error: {error}"),
    }
}

// ── Scoring ──

#[tokio::test]
async fn test_bare_store_loses_every_required_check() {
    let server = store_with_home(BARE_STORE).await;
    let scanner = Scanner::new(ScanConfig::default());

    let result = scanner.scan(&server.uri()).await;
    let r = report(&result);

    assert_eq!(r.score, 5);
    assert_eq!(r.details.len(), 6);
    for name in [
        "physical_address",
        "refund_policy",
        "shipping_policy",
        "terms_of_service",
        "contact_email",
        "responsible_person",
    ] {
        assert_eq!(r.checks[name], false, "{name}");
    }
    assert_eq!(r.meta.url, server.uri());
    assert_eq!(r.meta.platform, Platform::Unknown);
}

#[tokio::test]
async fn test_complete_store_scores_hundred() {
    let server = store_with_home(COMPLETE_STORE).await;
    let scanner = Scanner::new(ScanConfig::default());

    let result = scanner.scan(&server.uri()).await;
    let r = report(&result);

    assert_eq!(r.score, 100);
    assert!(r.details.is_empty(), "{:?}", r.details);
    assert!(r.meta.favicon);
    assert_eq!(r.checks["favicon"], true);
}

#[tokio::test]
async fn test_professional_email_beats_free_mail() {
    let body = COMPLETE_STORE.replace(
        "</footer>",
        "<p>Owner: acme.owner@gmail.com</p></footer>",
    );
    let server = store_with_home(&body).await;
    let config = ScanConfig {
        profile: RuleProfile::Extended,
        ..ScanConfig::default()
    };

    let result = Scanner::new(config).scan(&server.uri()).await;
    let r = report(&result);
    assert_eq!(r.checks["pro_email"], true);
    assert_eq!(r.score, 100);
}

#[tokio::test]
async fn test_penalties_stack_and_raw_score_goes_negative() {
    let body = r#"<html><body>
        <h1>My Store</h1>
        <p>Lorem ipsum. Hurry, only 2 left!</p>
        <a href="https://facebook.com">Facebook</a>
    </body></html>"#;
    let server = store_with_home(body).await;

    let raw = ScanConfig {
        clamp_score: false,
        ..ScanConfig::default()
    };
    let result = Scanner::new(raw).scan(&server.uri()).await;
    let r = report(&result);
    assert_eq!(r.score, -20);
    assert_eq!(r.checks["broken_socials"], true);
    assert_eq!(r.checks["template_text"], true);
    assert_eq!(r.checks["fake_scarcity"], true);

    let result = Scanner::new(ScanConfig::default()).scan(&server.uri()).await;
    assert_eq!(report(&result).score, 0);
}

#[tokio::test]
async fn test_non_2xx_page_is_still_scanned() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(404).set_body_string(COMPLETE_STORE))
        .mount(&server)
        .await;

    let result = Scanner::new(ScanConfig::default()).scan(&server.uri()).await;
    assert_eq!(report(&result).score, 100);
}

#[tokio::test]
async fn test_redirects_are_followed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("location", "/home"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/home"))
        .respond_with(html(COMPLETE_STORE))
        .mount(&server)
        .await;

    let result = Scanner::new(ScanConfig::default()).scan(&server.uri()).await;
    assert_eq!(report(&result).score, 100);
}

#[tokio::test]
async fn test_identical_content_gives_identical_results() {
    let server = store_with_home(BARE_STORE).await;
    let scanner = Scanner::new(ScanConfig::default());

    let first = serde_json::to_string(&scanner.scan(&server.uri()).await).unwrap();
    let second = serde_json::to_string(&scanner.scan(&server.uri()).await).unwrap();
    assert_eq!(first, second);
}

// ── Request shape ──

#[tokio::test]
async fn test_sends_desktop_user_agent_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(UserAgentIs(DEFAULT_USER_AGENT))
        .respond_with(html(COMPLETE_STORE))
        .expect(1)
        .mount(&server)
        .await;

    let result = Scanner::new(ScanConfig::default()).scan(&server.uri()).await;
    assert!(!result.is_error());
}

#[tokio::test]
async fn test_unusable_user_agent_falls_back_to_default() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(UserAgentIs(DEFAULT_USER_AGENT))
        .respond_with(html(COMPLETE_STORE))
        .expect(1)
        .mount(&server)
        .await;

    let config = ScanConfig {
        user_agent: "Shield\nBot".to_string(),
        ..ScanConfig::default()
    };
    let result = Scanner::new(config).scan(&server.uri()).await;
    assert_eq!(result.score(), Some(100));
}

// ── Platform detection ──

#[tokio::test]
async fn test_platform_from_body_skips_probe() {
    let body = r#"<html><head><link rel="stylesheet" href="/wp-content/themes/shop/style.css"></head>
        <body></body></html>"#;
    let server = store_with_home(body).await;
    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"products": []})))
        .expect(0)
        .mount(&server)
        .await;

    let result = Scanner::new(ScanConfig::default()).scan(&server.uri()).await;
    assert_eq!(report(&result).meta.platform, Platform::WooCommerce);
}

#[tokio::test]
async fn test_products_json_probe_detects_shopify() {
    let server = store_with_home(BARE_STORE).await;
    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"products": [{"id": 1, "title": "Mug"}]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let result = Scanner::new(ScanConfig::default()).scan(&server.uri()).await;
    let r = report(&result);
    assert_eq!(r.meta.platform, Platform::Shopify);
    // platform never affects the score
    assert_eq!(r.score, 5);
}

#[tokio::test]
async fn test_probe_failures_degrade_to_unknown() {
    // 500 from the probe
    let server = store_with_home(BARE_STORE).await;
    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let result = Scanner::new(ScanConfig::default()).scan(&server.uri()).await;
    assert_eq!(report(&result).meta.platform, Platform::Unknown);

    // probe answers HTML instead of JSON
    let server = store_with_home(BARE_STORE).await;
    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(html("<html>not json</html>"))
        .mount(&server)
        .await;
    let result = Scanner::new(ScanConfig::default()).scan(&server.uri()).await;
    assert_eq!(report(&result).meta.platform, Platform::Unknown);

    // probe slower than its timeout
    let server = store_with_home(BARE_STORE).await;
    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"products": []}))
                .set_delay(Duration::from_millis(1_500)),
        )
        .mount(&server)
        .await;
    let config = ScanConfig {
        probe_timeout_ms: 200,
        ..ScanConfig::default()
    };
    let result = Scanner::new(config).scan(&server.uri()).await;
    let r = report(&result);
    assert_eq!(r.meta.platform, Platform::Unknown);
    assert_eq!(r.score, 5);
}

// ── Failures ──

#[tokio::test]
async fn test_connection_refused_is_error_variant() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let result = Scanner::new(ScanConfig::default())
        .scan(&format!("http://127.0.0.1:{port}"))
        .await;

    assert!(result.is_error());
    assert!(!result.error().unwrap().is_empty());
    let json = serde_json::to_value(&result).unwrap();
    let obj = json.as_object().unwrap();
    assert_eq!(obj.len(), 1);
    assert!(obj.contains_key("error"));
}

#[tokio::test]
async fn test_primary_timeout_is_error_variant() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(COMPLETE_STORE).set_delay(Duration::from_millis(1_500)))
        .mount(&server)
        .await;

    let config = ScanConfig {
        timeout_ms: 200,
        ..ScanConfig::default()
    };
    let result = Scanner::new(config).scan(&server.uri()).await;
    assert!(result.is_error());
    assert_eq!(result.score(), None);
}
