//! Check command implementation.

use anyhow::Result;
use std::path::Path;

use super::{load_config, load_rules};
use crate::adjustments::{explain, RuleMatch, Verdict};
use crate::cli::AdjustmentArgs;
use crate::validation::validate_hostname;

/// Run the check command
pub async fn run(host: &str, adjustments: AdjustmentArgs, config_path: &Path) -> Result<()> {
    let host = validate_hostname(host)?;

    let config = load_config(config_path)?;
    let (includes, excludes) = load_rules(&config, &adjustments)?;

    let verdict = explain(&host, &includes, &excludes);

    println!();
    println!("{}", describe(&host, &verdict));
    println!();

    Ok(())
}

fn describe_rule(rule: &RuleMatch<'_>) -> String {
    match rule {
        RuleMatch::Literal => "exclude list".to_string(),
        RuleMatch::Pattern(pattern) => format!("exclude pattern {}", pattern.source()),
    }
}

/// Human-readable summary of a verdict.
pub fn describe(host: &str, verdict: &Verdict<'_>) -> String {
    match verdict {
        Verdict::Included { overrides: None } => {
            format!("{} is INCLUDED (include list)", host)
        }
        Verdict::Included {
            overrides: Some(rule),
        } => format!(
            "{} is INCLUDED (include list, overrides {})",
            host,
            describe_rule(rule)
        ),
        Verdict::Excluded(rule) => format!("{} is EXCLUDED ({})", host, describe_rule(rule)),
        Verdict::Unaffected => format!("{} is NOT affected by any rule", host),
    }
}
