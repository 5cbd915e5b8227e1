//! Robustness tests for edge cases and error conditions.
//!
//! These tests verify that blackhole handles hostile or malformed input gracefully.

use std::collections::HashSet;
use std::fs;

use blackhole::adjustments::{parse_rules, resolve};
use blackhole::error::BlackholeError;
use blackhole::masterlist::parse_masterlist;
use blackhole::matcher::{match_fqdn, match_line};
use blackhole::parser::parse_blocklist;
use tempfile::TempDir;

/// Unreachable hosts fail cleanly after the retries
#[tokio::test]
async fn test_unreachable_host() {
    use blackhole::fetcher::{Fetcher, Retriever};

    let fetcher = Fetcher::new().unwrap();

    // Unresolvable host; fails without panicking
    let result = fetcher.fetch_text("https://blackhole.invalid/hosts.txt").await;
    assert!(result.is_err());
    assert_eq!(fetcher.total_downloaded(), 0);
}

/// Mutually recursive rule files terminate and merge both
#[test]
fn test_cyclic_rule_files() {
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.txt");
    fs::write(&a, format!("one.example.com\n@{}\n", b.display())).unwrap();
    fs::write(&b, format!("two.example.com\n@{}\n/three\\..*/\n", a.display())).unwrap();

    let rules = parse_rules(&[format!("@{}", a.display())], true).unwrap();
    assert_eq!(rules.literals.len(), 2);
    assert_eq!(rules.patterns.len(), 1);
    assert!(rules.matches("three.example.org"));
}

/// The same file referenced twice and via a relative path is merged once
#[test]
fn test_repeated_rule_file() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("rules.txt");
    fs::write(&file, "/ads.*/\n").unwrap();
    let spec = format!("@{}", file.display());
    let dotted = format!("@{}/./rules.txt", dir.path().display());

    let rules = parse_rules(&[spec.as_str(), dotted.as_str()], true).unwrap();
    assert_eq!(rules.patterns.len(), 1);
}

#[test]
fn test_rule_file_is_directory() {
    let dir = TempDir::new().unwrap();
    let spec = format!("@{}", dir.path().display());
    let err = parse_rules(&[spec], true).unwrap_err();
    assert!(matches!(err, BlackholeError::RuleFile { .. }));
}

/// Malformed and catastrophic-looking patterns never abort parsing
#[test]
fn test_malformed_and_pathological_patterns() {
    let specs = [
        "/(a+)+$/",
        "/(x+x+)+y/i",
        "/[unclosed/",
        "/a/b/c",
        "//",
        "/ok\\.example\\.com/q",
        "not a host",
        "ads.example.com",
    ];
    let rules = parse_rules(&specs, true).unwrap();
    assert_eq!(rules.patterns.len(), 2);
    assert_eq!(rules.literals.len(), 1);

    let hostile = format!("{}.example.com", "x".repeat(200));
    assert!(!rules.matches(&hostile));
}

#[test]
fn test_large_input_handling() {
    let content: String = (0..50_000)
        .map(|i| format!("0.0.0.0 host{}.example.com\n", i % 10_000))
        .collect();
    let parsed = parse_blocklist(&content);
    assert_eq!(parsed.fqdns.len(), 50_000);
    assert!(parsed.unmatched.is_empty());

    let unique: HashSet<String> = parsed.fqdns.into_iter().collect();
    assert_eq!(unique.len(), 10_000);

    let excludes = parse_rules(&[r"/host[0-4][0-9]*\.example\.com/"], true).unwrap();
    let resolved = resolve(unique, &Default::default(), &excludes).unwrap();
    // host0-4, host10-49, host100-499, host1000-4999
    assert_eq!(resolved.len(), 10_000 - 4_445);
}

#[test]
fn test_overlong_lines() {
    let long_host = format!("{}.com", "a".repeat(2_000));
    assert!(match_line(&long_host).is_none());

    let parsed = parse_blocklist(&format!("{}\nok.example.com\n", long_host));
    assert_eq!(parsed.fqdns, vec!["ok.example.com"]);
    assert_eq!(parsed.unmatched.len(), 1);
}

#[test]
fn test_unicode_handling() {
    assert!(match_fqdn("bücher.example.com").is_none());
    assert!(match_fqdn("xn--bcher-kva.example.com").is_some());
    // Kelvin sign and long s do not fold into ASCII letters
    assert!(match_fqdn("example.\u{212A}om").is_none());
    assert!(match_fqdn("example.\u{17F}ite").is_none());

    let parsed = parse_blocklist("💥.example.com\n例え.テスト\nok.example.com\n");
    assert_eq!(parsed.fqdns, vec!["ok.example.com"]);
    assert_eq!(parsed.unmatched.len(), 2);
}

#[test]
fn test_empty_and_whitespace() {
    for input in ["", "\n\n", "   \t  \n", "# only a comment\n", "\r\n\r\n"] {
        let parsed = parse_blocklist(input);
        assert!(parsed.fqdns.is_empty());
        assert!(parsed.unmatched.is_empty());
    }

    let rules = parse_rules(&["", "   ", "# comment"], true).unwrap();
    assert!(rules.is_empty());
}

#[test]
fn test_binary_garbage() {
    let garbage: String = (0u8..=127).map(char::from).collect();
    let parsed = parse_blocklist(&garbage);
    assert!(parsed.fqdns.is_empty());
}

#[test]
fn test_masterlist_malformed_input() {
    let extra_columns = "\"tracking\",\"tick\",\"s\",\"d\",\"https://x.example/a\",\"extra\"\n";
    assert_eq!(parse_masterlist(extra_columns).unwrap().len(), 1);
    assert!(parse_masterlist("a,b\nc\n,,,,,,\n").unwrap().is_empty());
}
