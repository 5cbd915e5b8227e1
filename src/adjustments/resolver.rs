//! Applying include/exclude rules to an aggregated hostname set.

use std::collections::HashSet;
use tracing::debug;

use super::rules::{RuleMatch, RuleSet};
use crate::error::BlackholeError;

/// Drop every host matched by `excludes`, then add every literal of `includes`.
///
/// Includes are applied after excludes and unconditionally, so a host both
/// excluded and included ends up in the result. `includes` must hold literal
/// hostnames only.
pub fn resolve(
    base: HashSet<String>,
    includes: &RuleSet,
    excludes: &RuleSet,
) -> Result<HashSet<String>, BlackholeError> {
    if !includes.patterns.is_empty() {
        return Err(BlackholeError::IncludesContainPatterns(
            includes.patterns.len(),
        ));
    }

    let before = base.len();
    let mut adjusted: HashSet<String> = base
        .into_iter()
        .filter(|host| !excludes.matches(host))
        .collect();
    let excluded = before - adjusted.len();

    adjusted.extend(includes.literals.iter().cloned());

    debug!(
        "Adjusted hostnames: {} excluded, {} include rule(s), {} -> {}",
        excluded,
        includes.literals.len(),
        before,
        adjusted.len()
    );

    Ok(adjusted)
}

/// What the adjustment rules do to a single hostname.
#[derive(Debug, Clone, Copy)]
pub enum Verdict<'r> {
    /// Listed as an include; `overrides` is the exclusion it wins over, if any
    Included { overrides: Option<RuleMatch<'r>> },
    Excluded(RuleMatch<'r>),
    Unaffected,
}

/// Explain how [`resolve`] treats `host`. `host` must be canonical.
pub fn explain<'r>(host: &str, includes: &'r RuleSet, excludes: &'r RuleSet) -> Verdict<'r> {
    let exclusion = excludes.find_match(host);
    if includes.literals.contains(host) {
        return Verdict::Included {
            overrides: exclusion,
        };
    }
    match exclusion {
        Some(rule) => Verdict::Excluded(rule),
        None => Verdict::Unaffected,
    }
}
