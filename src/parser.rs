//! Blocklist body parsing.
//!
//! Accepts hosts files, plain domain lists and anything in between:
//!
//! ```text
//! # StevenBlack style
//! 0.0.0.0 ads.example.com
//! tracker.example.net   # inline comment
//! ```

use tracing::debug;

use crate::matcher::match_line;
use crate::utils::truncate;

/// Result of parsing one blocklist body.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParsedBlocklist {
    /// Extracted hostnames, in source order, duplicates included
    pub fqdns: Vec<String>,
    /// Lines that carried content but matched no known shape (trimmed, original case)
    pub unmatched: Vec<String>,
}

/// Parse a blocklist body line by line.
///
/// Comments start at the first `#` anywhere on a line. Blank and comment-only
/// lines are skipped silently; any other line that yields no hostname is
/// recorded in [`ParsedBlocklist::unmatched`] and parsing continues.
pub fn parse_blocklist(content: &str) -> ParsedBlocklist {
    let mut parsed = ParsedBlocklist::default();

    for line in content.lines() {
        let stripped = strip_comment(line).trim();
        if stripped.is_empty() {
            continue;
        }

        match match_line(&stripped.to_ascii_lowercase()) {
            Some(fqdn) => parsed.fqdns.push(fqdn),
            None => {
                let original = line.trim();
                debug!("No hostname pattern matched: {}", truncate(original, 120));
                parsed.unmatched.push(original.to_string());
            }
        }
    }

    parsed
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(idx) => &line[..idx],
        None => line,
    }
}
