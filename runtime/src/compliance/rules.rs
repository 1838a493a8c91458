//! The fixed battery of lexical compliance checks.
//!
//! Every check is a [`Rule`] value in [`RULES`]: a name, a predicate over
//! the extracted page, a point deduction, and the message reported when it
//! fires. The evaluator walks the table in order, so table order is the
//! order of `details` in the final report. Deductions are independent of
//! each other; reordering the table never changes a score.
//!
//! All matching is plain substring search over lowercased strings. These
//! are heuristics, not legal determinations.

use crate::acquisition::structured::PageExtract;
use crate::config::RuleProfile;
use serde::Serialize;
use url::Url;

// ── Keyword tables ──────────────────────────────────────────────────────────

const ADDRESS_KEYWORDS: &[&str] = &[
    "street", "road", "ave", "avenue", "lane", "suite", "floor", "box", "gmbh", "ltd", "inc",
    "plc",
];

const PO_BOX_PHRASE: &str = "po box";

// Matched against both the href and the anchor text.
const REFUND_LINK_TOKENS: &[&str] = &["refund", "return"];
const SHIPPING_LINK_TOKENS: &[&str] = &["shipping", "delivery"];
const TERMS_LINK_TOKENS: &[&str] = &["term", "condition"];

const GPSR_KEYWORDS: &[&str] = &[
    "responsible person",
    "authorised representative",
    "authorized representative",
    "economic operator",
    "eu address",
    "uk address",
    "importer",
];

const SOCIAL_DOMAINS: &[&str] = &["facebook.com", "instagram.com", "tiktok.com", "twitter.com"];

const TEMPLATE_PHRASES: &[&str] = &[
    "lorem ipsum",
    "insert text here",
    "add your address",
    "powered by shopify",
    "my store",
];

const SCARCITY_PHRASES: &[&str] = &[
    "hurry",
    "only 2 left",
    "selling out",
    "high demand",
    "limited time only",
    "timer",
];

const AMATEUR_EMAIL_DOMAINS: &[&str] = &[
    "gmail.com",
    "yahoo.com",
    "hotmail.com",
    "outlook.com",
    "aol.com",
    "icloud.com",
];

const CUSTOM_FAVICON_TOKENS: &[&str] = &["cdn", "upload"];

// ── Rule model ──────────────────────────────────────────────────────────────

/// How a rule's predicate maps onto a deduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    /// Predicate reports "present"; deduct when absent.
    Required,
    /// Predicate reports "detected"; deduct when detected.
    Penalty,
    /// Recorded in `checks`, never deducts and never adds a detail.
    Informational,
}

/// How loudly a triggered rule is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Notice,
    Warning,
    Critical,
}

impl Severity {
    fn prefix(&self) -> &'static str {
        match self {
            Self::Critical => "CRITICAL: ",
            Self::Warning => "WARNING: ",
            Self::Notice => "",
        }
    }
}

/// A single named check.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub kind: RuleKind,
    pub severity: Severity,
    /// Points subtracted when the rule triggers.
    pub delta: i32,
    pub message: &'static str,
    /// Lowest profile that enables this rule.
    pub profile: RuleProfile,
    predicate: fn(&PageExtract) -> bool,
}

/// What one rule concluded about one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    pub name: &'static str,
    /// Value recorded under `checks[name]`.
    pub value: bool,
    /// Whether this outcome deducts points and reports a detail.
    pub triggered: bool,
    pub deduction: i32,
    pub detail: Option<String>,
}

/// Serializable view of a rule for listings.
#[derive(Debug, Clone, Serialize)]
pub struct RuleInfo {
    pub name: &'static str,
    pub kind: RuleKind,
    pub severity: Severity,
    pub delta: i32,
    pub message: &'static str,
    pub profile: RuleProfile,
}

impl Rule {
    /// Whether the rule runs under `profile`.
    pub fn enabled_in(&self, profile: RuleProfile) -> bool {
        match self.profile {
            RuleProfile::Standard => true,
            RuleProfile::Extended => profile == RuleProfile::Extended,
        }
    }

    /// Full detail line as it appears in a report.
    pub fn detail(&self) -> String {
        format!("{}{}", self.severity.prefix(), self.message)
    }

    pub fn evaluate(&self, page: &PageExtract) -> RuleOutcome {
        let value = (self.predicate)(page);
        let triggered = match self.kind {
            RuleKind::Required => !value,
            RuleKind::Penalty => value,
            RuleKind::Informational => false,
        };

        RuleOutcome {
            name: self.name,
            value,
            triggered,
            deduction: if triggered { self.delta } else { 0 },
            detail: triggered.then(|| self.detail()),
        }
    }

    pub fn info(&self) -> RuleInfo {
        RuleInfo {
            name: self.name,
            kind: self.kind,
            severity: self.severity,
            delta: self.delta,
            message: self.message,
            profile: self.profile,
        }
    }
}

/// The battery, in evaluation order.
pub static RULES: &[Rule] = &[
    Rule {
        name: "physical_address",
        kind: RuleKind::Required,
        severity: Severity::Critical,
        delta: 20,
        message: "No physical business address found on the page.",
        profile: RuleProfile::Standard,
        predicate: has_physical_address,
    },
    Rule {
        name: "po_box",
        kind: RuleKind::Penalty,
        severity: Severity::Warning,
        delta: 10,
        message: "PO Box address detected. Merchant reviews often reject PO Boxes.",
        profile: RuleProfile::Standard,
        predicate: has_po_box,
    },
    Rule {
        name: "refund_policy",
        kind: RuleKind::Required,
        severity: Severity::Notice,
        delta: 15,
        message: "Missing refund / return policy link.",
        profile: RuleProfile::Standard,
        predicate: has_refund_link,
    },
    Rule {
        name: "shipping_policy",
        kind: RuleKind::Required,
        severity: Severity::Notice,
        delta: 10,
        message: "Missing shipping policy link.",
        profile: RuleProfile::Standard,
        predicate: has_shipping_link,
    },
    Rule {
        name: "terms_of_service",
        kind: RuleKind::Required,
        severity: Severity::Notice,
        delta: 10,
        message: "Missing terms of service link.",
        profile: RuleProfile::Standard,
        predicate: has_terms_link,
    },
    Rule {
        name: "contact_email",
        kind: RuleKind::Required,
        severity: Severity::Notice,
        delta: 10,
        message: "No contact method found (no mailto: link or contact page).",
        profile: RuleProfile::Standard,
        predicate: has_contact_method,
    },
    Rule {
        name: "responsible_person",
        kind: RuleKind::Required,
        severity: Severity::Critical,
        delta: 30,
        message: "Missing 'Responsible Person' (GPSR) declaration.",
        profile: RuleProfile::Standard,
        predicate: has_gpsr_declaration,
    },
    Rule {
        name: "broken_socials",
        kind: RuleKind::Penalty,
        severity: Severity::Warning,
        delta: 10,
        message: "Broken social links detected (links point to the network homepage, not a profile).",
        profile: RuleProfile::Standard,
        predicate: has_bare_social_link,
    },
    Rule {
        name: "template_text",
        kind: RuleKind::Penalty,
        severity: Severity::Warning,
        delta: 10,
        message: "Template placeholder text found (e.g. 'Lorem Ipsum').",
        profile: RuleProfile::Standard,
        predicate: has_template_text,
    },
    Rule {
        name: "fake_scarcity",
        kind: RuleKind::Penalty,
        severity: Severity::Warning,
        delta: 5,
        message: "Aggressive scarcity language detected (e.g. 'Hurry', 'Only 2 left').",
        profile: RuleProfile::Standard,
        predicate: has_scarcity_language,
    },
    Rule {
        name: "pro_email",
        kind: RuleKind::Required,
        severity: Severity::Notice,
        delta: 10,
        message: "No email address on a business domain (only free-mail providers or none at all).",
        profile: RuleProfile::Extended,
        predicate: has_professional_email,
    },
    Rule {
        name: "favicon",
        kind: RuleKind::Informational,
        severity: Severity::Notice,
        delta: 0,
        message: "Missing or default favicon.",
        profile: RuleProfile::Standard,
        predicate: has_custom_favicon,
    },
];

/// Rules enabled under `profile`, in evaluation order.
pub fn rules_for(profile: RuleProfile) -> impl Iterator<Item = &'static Rule> {
    RULES.iter().filter(move |r| r.enabled_in(profile))
}

/// Run every enabled rule against the page.
pub fn evaluate_rules(page: &PageExtract, profile: RuleProfile) -> Vec<RuleOutcome> {
    rules_for(profile).map(|rule| rule.evaluate(page)).collect()
}

// ── Predicates ──────────────────────────────────────────────────────────────

fn text_contains_any(page: &PageExtract, needles: &[&str]) -> bool {
    needles.iter().any(|n| page.text.contains(n))
}

/// Any anchor whose href or visible text mentions one of `needles`.
fn link_mentions_any(page: &PageExtract, needles: &[&str]) -> bool {
    page.links
        .iter()
        .any(|l| needles.iter().any(|n| l.href.contains(n) || l.text.contains(n)))
}

fn has_physical_address(page: &PageExtract) -> bool {
    text_contains_any(page, ADDRESS_KEYWORDS)
}

fn has_po_box(page: &PageExtract) -> bool {
    page.text.contains(PO_BOX_PHRASE)
}

fn has_refund_link(page: &PageExtract) -> bool {
    link_mentions_any(page, REFUND_LINK_TOKENS)
}

fn has_shipping_link(page: &PageExtract) -> bool {
    link_mentions_any(page, SHIPPING_LINK_TOKENS)
}

fn has_terms_link(page: &PageExtract) -> bool {
    link_mentions_any(page, TERMS_LINK_TOKENS)
}

fn has_contact_method(page: &PageExtract) -> bool {
    page.hrefs().any(|h| h.contains("mailto:")) || page.text.contains("contact")
}

fn has_gpsr_declaration(page: &PageExtract) -> bool {
    text_contains_any(page, GPSR_KEYWORDS)
}

fn has_bare_social_link(page: &PageExtract) -> bool {
    page.hrefs().any(is_bare_social_link)
}

fn has_template_text(page: &PageExtract) -> bool {
    text_contains_any(page, TEMPLATE_PHRASES)
}

fn has_scarcity_language(page: &PageExtract) -> bool {
    text_contains_any(page, SCARCITY_PHRASES)
}

fn has_professional_email(page: &PageExtract) -> bool {
    page.email_domains()
        .any(|domain| !AMATEUR_EMAIL_DOMAINS.contains(&domain))
}

/// A favicon served from a CDN or an upload path, not a theme default.
pub fn has_custom_favicon(page: &PageExtract) -> bool {
    page.favicons.iter().any(|href| {
        let href = href.to_ascii_lowercase();
        CUSTOM_FAVICON_TOKENS.iter().any(|t| href.contains(t))
    })
}

/// A link to a social network's front page instead of a profile.
///
/// Accepts absolute, protocol-relative, and scheme-less hrefs
/// (`facebook.com/`). Anything with a path segment or a query is a profile.
pub fn is_bare_social_link(href: &str) -> bool {
    let Some(url) = social_candidate(href) else {
        return false;
    };
    let Some(host) = url.host_str() else {
        return false;
    };

    SOCIAL_DOMAINS.contains(&strip_host_prefix(host))
        && (url.path().is_empty() || url.path() == "/")
        && url.query().is_none()
}

fn social_candidate(href: &str) -> Option<Url> {
    let absolute = if href.starts_with("http://") || href.starts_with("https://") {
        href.to_string()
    } else if let Some(rest) = href.strip_prefix("//") {
        format!("https://{rest}")
    } else if SOCIAL_DOMAINS
        .iter()
        .any(|d| strip_host_prefix(href).starts_with(d))
    {
        format!("https://{href}")
    } else {
        return None;
    };

    Url::parse(&absolute).ok()
}

fn strip_host_prefix(host: &str) -> &str {
    host.strip_prefix("www.")
        .or_else(|| host.strip_prefix("m."))
        .unwrap_or(host)
}
