//! Hostname extraction from a single blocklist line.
//!
//! Two line shapes are recognised, both matched against the whole line:
//!
//! ```text
//! ads.example.com
//! 0.0.0.0   ads.example.com
//! ```
//!
//! The IP address of the second shape is discarded. Callers are expected to
//! strip comments, trim and lowercase the line beforehand.

use once_cell::sync::Lazy;
use regex::Regex;

/// Longest line handed to the regexes. Longer lines are never hostname entries.
pub const MAX_LINE_LEN: usize = 1024;

/// One or more `label.` groups, then a final label that starts and ends with a
/// letter so bare IPv4 addresses and single-character TLDs are rejected.
const FQDN_PATTERN: &str = r"(?P<fqdn>(?:[a-z0-9_-]+\.)+[a-z][a-z0-9_-]*[a-z]\.?)";

/// IPv4 dotted quad, or a loose run of hex digits and colons for IPv6.
const IP_PATTERN: &str = r"(?:[0-9]{1,3}(?:\.[0-9]{1,3}){3}|[0-9a-f:]+)";

// ASCII-only classes: `(?i)` in Unicode mode would let `[a-z]` match U+017F and U+212A.
static FQDN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"(?i-u)^{}$", FQDN_PATTERN)).unwrap());

static IP_FQDN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"(?i-u)^{}\s+{}$", IP_PATTERN, FQDN_PATTERN)).unwrap());

/// Match a bare hostname, returning its canonical form.
///
/// # Examples
/// ```
/// use blackhole::matcher::match_fqdn;
/// assert_eq!(match_fqdn("ads.example.com").as_deref(), Some("ads.example.com"));
/// assert_eq!(match_fqdn("ads.example.com.").as_deref(), Some("ads.example.com"));
/// assert_eq!(match_fqdn("1.2.3.4"), None);
/// assert_eq!(match_fqdn("localhost"), None);
/// ```
pub fn match_fqdn(line: &str) -> Option<String> {
    if line.len() > MAX_LINE_LEN {
        return None;
    }
    FQDN_RE
        .captures(line)
        .and_then(|caps| caps.name("fqdn"))
        .map(|m| canonical(m.as_str()))
}

/// Match a bare hostname or an `IP hostname` pair, returning the canonical
/// hostname.
///
/// # Examples
/// ```
/// use blackhole::matcher::match_line;
/// assert_eq!(match_line("1.2.3.4 example.com").as_deref(), Some("example.com"));
/// assert_eq!(match_line("::1\tads.example.net").as_deref(), Some("ads.example.net"));
/// assert_eq!(match_line("0.0.0.0 0.0.0.0"), None);
/// ```
pub fn match_line(line: &str) -> Option<String> {
    if let Some(fqdn) = match_fqdn(line) {
        return Some(fqdn);
    }
    if line.len() > MAX_LINE_LEN {
        return None;
    }
    IP_FQDN_RE
        .captures(line)
        .and_then(|caps| caps.name("fqdn"))
        .map(|m| canonical(m.as_str()))
}

/// Canonical form: lowercase, without the trailing root dot.
fn canonical(fqdn: &str) -> String {
    fqdn.strip_suffix('.').unwrap_or(fqdn).to_ascii_lowercase()
}
