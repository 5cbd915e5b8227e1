//! Include/exclude adjustments applied to the aggregated hostname set.
//!
//! Rules are parsed once with [`parse_rules`] and then applied with
//! [`resolve`]. Excludes may be literal hostnames or `/pattern/modifier`
//! rules; includes are literal only.

mod resolver;
mod rules;

pub use resolver::{explain, resolve, Verdict};
pub use rules::{parse_rules, parse_rules_with, Modifier, PatternRule, RuleMatch, RuleSet};
