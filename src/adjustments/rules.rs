//! Adjustment rule parsing.
//!
//! An adjustment specification is one of:
//!
//! ```text
//! ads.example.com          literal hostname
//! /ads[0-9]*\.example\.com/i   pattern rule (exclude side only)
//! @/etc/blackhole/excludes.txt  rule file, parsed recursively
//! ```

use regex::bytes::{Regex, RegexBuilder};
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, warn};

use crate::error::BlackholeError;
use crate::fs_abstraction::{real_fs, FileSystem};
use crate::matcher::match_fqdn;

/// Flag attached to a pattern rule after its closing slash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    /// No suffix
    None,
    /// `a`: character classes are ASCII-only
    AsciiOnly,
    /// `i`: case-insensitive
    CaseInsensitive,
    /// `l`: Unicode-aware classes
    LocaleAware,
}

impl FromStr for Modifier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(Modifier::None),
            "a" => Ok(Modifier::AsciiOnly),
            "i" => Ok(Modifier::CaseInsensitive),
            "l" => Ok(Modifier::LocaleAware),
            other if other.chars().count() > 1 => {
                Err(format!("only one modifier is allowed, got '{}'", other))
            }
            other => Err(format!("unknown modifier '{}' (use a, i or l)", other)),
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Modifier::None => "",
            Modifier::AsciiOnly => "a",
            Modifier::CaseInsensitive => "i",
            Modifier::LocaleAware => "l",
        };
        f.write_str(s)
    }
}

/// A compiled `/pattern/modifier` rule. Always matches the whole hostname.
#[derive(Debug, Clone)]
pub struct PatternRule {
    source: String,
    modifier: Modifier,
    regex: Regex,
}

impl PatternRule {
    /// Parse and compile a `/pattern/modifier` specification.
    ///
    /// The error is a human-readable reason, suitable for a log line.
    pub fn parse(spec: &str) -> Result<Self, String> {
        let parts: Vec<&str> = spec.split('/').collect();
        if parts.len() != 3 {
            return Err(format!(
                "expected /pattern/modifier, found {} segment(s)",
                parts.len()
            ));
        }
        if !parts[0].is_empty() {
            return Err("pattern must start with '/'".to_string());
        }

        let body = parts[1];
        if body.is_empty() {
            return Err("empty pattern".to_string());
        }
        let modifier: Modifier = parts[2].parse()?;

        // The body must stand alone, or a stray ')' escapes the anchors
        compile(body, modifier)?;
        let regex = compile(&format!("^(?:{})$", body), modifier)?;

        Ok(Self {
            source: spec.to_string(),
            modifier,
            regex,
        })
    }

    /// The specification string this rule was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn modifier(&self) -> Modifier {
        self.modifier
    }

    /// Full-string match against a hostname.
    pub fn matches(&self, host: &str) -> bool {
        self.regex.is_match(host.as_bytes())
    }
}

fn compile(pattern: &str, modifier: Modifier) -> Result<Regex, String> {
    let mut builder = RegexBuilder::new(pattern);
    match modifier {
        // `l` asks for Unicode classes, which is already the default
        Modifier::None | Modifier::LocaleAware => {}
        Modifier::AsciiOnly => {
            builder.unicode(false);
        }
        Modifier::CaseInsensitive => {
            builder.case_insensitive(true);
        }
    }
    builder.build().map_err(|e| e.to_string())
}

/// Which rule of a [`RuleSet`] matched a hostname.
#[derive(Debug, Clone, Copy)]
pub enum RuleMatch<'r> {
    Literal,
    Pattern(&'r PatternRule),
}

/// Literal hostnames plus pattern rules in the order they were declared.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    pub literals: HashSet<String>,
    pub patterns: Vec<PatternRule>,
}

impl RuleSet {
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty() && self.patterns.is_empty()
    }

    /// Total number of rules.
    pub fn len(&self) -> usize {
        self.literals.len() + self.patterns.len()
    }

    /// Union `other` into `self`, appending its patterns after ours.
    pub fn merge(&mut self, other: RuleSet) {
        self.literals.extend(other.literals);
        self.patterns.extend(other.patterns);
    }

    /// First rule matching `host`: literal membership, then patterns in order.
    pub fn find_match(&self, host: &str) -> Option<RuleMatch<'_>> {
        if self.literals.contains(host) {
            return Some(RuleMatch::Literal);
        }
        self.patterns
            .iter()
            .find(|rule| rule.matches(host))
            .map(RuleMatch::Pattern)
    }

    pub fn matches(&self, host: &str) -> bool {
        self.find_match(host).is_some()
    }
}

/// Parse adjustment specifications into a [`RuleSet`], reading `@path`
/// references from the real filesystem.
///
/// Pattern rules are only recognised when `allow_patterns` is set; rules read
/// from `@path` files may always contain them. Malformed entries are logged and
/// skipped. An unreadable rule file is an error.
pub fn parse_rules<S: AsRef<str>>(
    specs: &[S],
    allow_patterns: bool,
) -> Result<RuleSet, BlackholeError> {
    parse_rules_with(real_fs(), specs, allow_patterns)
}

/// [`parse_rules`] against an arbitrary [`FileSystem`].
pub fn parse_rules_with<S: AsRef<str>>(
    fs: &dyn FileSystem,
    specs: &[S],
    allow_patterns: bool,
) -> Result<RuleSet, BlackholeError> {
    let mut parser = RuleParser {
        fs,
        visited: HashSet::new(),
    };
    parser.parse(specs.iter().map(|s| s.as_ref()), allow_patterns)
}

struct RuleParser<'a> {
    fs: &'a dyn FileSystem,
    /// Canonical paths of every rule file merged so far; breaks `@` cycles
    visited: HashSet<PathBuf>,
}

impl RuleParser<'_> {
    fn parse<'s, I>(&mut self, specs: I, allow_patterns: bool) -> Result<RuleSet, BlackholeError>
    where
        I: IntoIterator<Item = &'s str>,
    {
        let mut rules = RuleSet::default();

        for raw in specs {
            let spec = raw.trim();
            if spec.is_empty() || spec.starts_with('#') {
                continue;
            }

            if let Some(path) = spec.strip_prefix('@') {
                let nested = self.parse_file(Path::new(path.trim()))?;
                rules.merge(nested);
            } else if allow_patterns && spec.contains('/') {
                match PatternRule::parse(spec) {
                    Ok(rule) => rules.patterns.push(rule),
                    Err(reason) => warn!("Skipping adjustment rule '{}': {}", spec, reason),
                }
            } else {
                match match_fqdn(&spec.to_ascii_lowercase()) {
                    Some(fqdn) => {
                        rules.literals.insert(fqdn);
                    }
                    None => warn!("Skipping adjustment '{}': not a valid hostname", spec),
                }
            }
        }

        Ok(rules)
    }

    fn parse_file(&mut self, path: &Path) -> Result<RuleSet, BlackholeError> {
        let rule_file_error = |source| BlackholeError::RuleFile {
            path: path.to_path_buf(),
            source,
        };

        let canonical = self.fs.canonicalize(path).map_err(rule_file_error)?;
        if !self.visited.insert(canonical.clone()) {
            warn!("Adjustment file {:?} already included, skipping", path);
            return Ok(RuleSet::default());
        }

        let content = self.fs.read_to_string(&canonical).map_err(rule_file_error)?;
        let rules = self.parse(content.lines(), true)?;
        debug!(
            "Loaded {} literal(s) and {} pattern(s) from {:?}",
            rules.literals.len(),
            rules.patterns.len(),
            path
        );
        Ok(rules)
    }
}
