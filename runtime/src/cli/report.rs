//! Render a [`ScanResult`] as a terminal report.
//!
//! Presentation only: nothing here feeds back into scoring. Any other
//! front end (the REST API, a web dashboard) consumes the same result.

use crate::cli::output::Styled;
use crate::compliance::rules::{RuleKind, RULES};
use crate::compliance::types::{ScanReport, ScanResult};

/// Score below which the report shows red.
pub const CRITICAL_BELOW: i32 = 50;
/// Score below which the report shows yellow and "CRITICAL RISK".
pub const COMPLIANT_FROM: i32 = 80;

/// Colour band of a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Red,
    Yellow,
    Green,
}

impl ScoreBand {
    pub fn of(score: i32) -> Self {
        if score < CRITICAL_BELOW {
            Self::Red
        } else if score < COMPLIANT_FROM {
            Self::Yellow
        } else {
            Self::Green
        }
    }

    fn paint(&self, s: &Styled, text: &str) -> String {
        match self {
            Self::Red => s.red(text),
            Self::Yellow => s.yellow(text),
            Self::Green => s.green(text),
        }
    }
}

/// Headline status for a score.
pub fn status_label(score: i32) -> &'static str {
    if score < COMPLIANT_FROM {
        "CRITICAL RISK"
    } else {
        "COMPLIANT"
    }
}

/// Check groups, in display order.
const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Google Merchant Center",
        &[
            ("physical_address", "Physical Address"),
            ("refund_policy", "Refund Policy"),
            ("terms_of_service", "Terms of Service"),
        ],
    ),
    (
        "GPSR & Legal",
        &[
            ("responsible_person", "Responsible Person (EU)"),
            ("contact_email", "Contact Method"),
            ("shipping_policy", "Shipping Policy"),
        ],
    ),
    (
        "Store Hygiene",
        &[
            ("po_box", "No PO Box Address"),
            ("broken_socials", "Social Links"),
            ("template_text", "No Placeholder Text"),
            ("fake_scarcity", "No Fake Scarcity"),
            ("pro_email", "Professional Email"),
            ("favicon", "Custom Favicon"),
        ],
    ),
];

/// Whether a recorded check value counts as a pass.
fn check_passed(name: &str, value: bool) -> bool {
    match RULES.iter().find(|r| r.name == name).map(|r| r.kind) {
        Some(RuleKind::Penalty) => !value,
        _ => value,
    }
}

/// Render either variant.
pub fn render(result: &ScanResult, s: &Styled) -> String {
    match result {
        ScanResult::Success(report) => render_report(report, s),
        ScanResult::Failure { error } => format!(
            "  {} Could not scan site. Reason: {error}\n",
            s.fail_sym()
        ),
    }
}

fn render_report(report: &ScanReport, s: &Styled) -> String {
    let band = ScoreBand::of(report.score);
    let mut out = String::new();

    out.push_str(&format!("\n  {}\n\n", s.bold(&report.meta.url)));
    out.push_str(&format!(
        "  Trust score  {}\n",
        band.paint(s, &format!("{}/100", report.score))
    ));
    out.push_str(&format!(
        "  Status       {}  ({} issue{} found)\n",
        band.paint(s, status_label(report.score)),
        report.details.len(),
        if report.details.len() == 1 { "" } else { "s" }
    ));
    out.push_str(&format!("  Platform     {}\n", report.meta.platform));
    out.push_str(&format!(
        "  Favicon      {}\n",
        if report.meta.favicon { "present" } else { "none" }
    ));

    for (title, rows) in SECTIONS {
        let present: Vec<_> = rows
            .iter()
            .filter_map(|(name, label)| report.checks.get(*name).map(|v| (*name, *label, *v)))
            .collect();
        if present.is_empty() {
            continue;
        }

        out.push_str(&format!("\n  {}\n", s.bold(title)));
        for (name, label, value) in present {
            let (sym, verdict) = if check_passed(name, value) {
                (s.ok_sym(), s.green("PASS"))
            } else {
                (s.fail_sym(), s.red("FAIL"))
            };
            out.push_str(&format!("    {sym} {label:<28} {verdict}\n"));
        }
    }

    if !report.details.is_empty() {
        out.push_str(&format!("\n  {}\n", s.bold("Issues")));
        for detail in &report.details {
            out.push_str(&format!("    - {detail}\n"));
        }
    } else {
        out.push_str(&format!("\n  {} No issues found.\n", s.ok_sym()));
    }

    out
}
