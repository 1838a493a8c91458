//! `shield rules`: list the enabled rule battery.

use crate::cli::output::{self, Styled};
use crate::compliance::rules::{rules_for, RuleKind};
use crate::config::RuleProfile;
use anyhow::Result;

/// Run the rules command.
pub async fn run(profile: RuleProfile) -> Result<()> {
    let rules: Vec<_> = rules_for(profile).map(|r| r.info()).collect();

    if output::is_json() {
        output::print_json(&serde_json::json!({
            "profile": profile,
            "rules": rules,
        }));
        return Ok(());
    }

    let s = Styled::new();
    println!("  {} ({profile} profile)\n", s.bold("Rule battery"));
    for rule in &rules {
        let effect = match rule.kind {
            RuleKind::Required => format!("-{} if missing", rule.delta),
            RuleKind::Penalty => format!("-{} if found", rule.delta),
            RuleKind::Informational => "info only".to_string(),
        };
        println!("  {:<20} {:<16} {}", rule.name, effect, s.dim(rule.message));
    }

    Ok(())
}
