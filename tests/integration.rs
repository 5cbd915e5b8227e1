//! Integration tests for blackhole.
//!
//! These tests drive the compiled binary and only exercise paths that fail or
//! finish before any network access.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Path to a config file that does not exist, so defaults are used
fn missing_config(dir: &TempDir) -> PathBuf {
    dir.path().join("absent.yaml")
}

/// Run blackhole with the given config file and return output
fn run_blackhole(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_blackhole"))
        .arg("--config")
        .arg(config)
        .args(args)
        .output()
        .expect("Failed to execute blackhole")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_version_command() {
    let dir = TempDir::new().unwrap();
    let output = run_blackhole(&missing_config(&dir), &["version"]);
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("blackhole "));
}

#[test]
fn test_help_command() {
    let output = Command::new(env!("CARGO_BIN_EXE_blackhole"))
        .arg("--help")
        .output()
        .unwrap();
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("build"));
    assert!(text.contains("check"));
    assert!(text.contains("--silent"));
}

#[test]
fn test_build_bind_format_not_implemented() {
    let dir = TempDir::new().unwrap();
    let output = run_blackhole(&missing_config(&dir), &["build", "-f", "bind"]);
    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("not implemented"));
}

#[test]
fn test_build_unknown_format() {
    let dir = TempDir::new().unwrap();
    let output = run_blackhole(&missing_config(&dir), &["build", "-f", "dnsmasq"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("dnsmasq"));
}

#[test]
fn test_build_unknown_category() {
    let dir = TempDir::new().unwrap();
    let output = run_blackhole(&missing_config(&dir), &["build", "-c", "social"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("social"));
}

#[test]
fn test_build_unknown_quality() {
    let dir = TempDir::new().unwrap();
    let output = run_blackhole(&missing_config(&dir), &["build", "-q", "gold"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("gold"));
}

#[test]
fn test_build_http_masterlist_rejected() {
    let dir = TempDir::new().unwrap();
    let output = run_blackhole(
        &missing_config(&dir),
        &["build", "-u", "http://lists.example/csv.txt"],
    );
    assert!(!output.status.success());
}

#[test]
fn test_build_missing_rule_file() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.txt");
    let spec = format!("@{}", missing.display());
    let output = run_blackhole(&missing_config(&dir), &["build", "-x", &spec]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("nope.txt"));
}

#[test]
fn test_check_excluded_by_pattern() {
    let dir = TempDir::new().unwrap();
    let output = run_blackhole(
        &missing_config(&dir),
        &["check", "Ads.Example.com", "-x", r"/ads\..*/"],
    );
    assert!(output.status.success());
    assert!(stdout(&output).contains("ads.example.com is EXCLUDED"));
}

#[test]
fn test_check_uses_rule_files() {
    let dir = TempDir::new().unwrap();
    let excludes = dir.path().join("excludes.txt");
    let nested = dir.path().join("nested.txt");
    fs::write(&nested, "# nested\n/.*\\.tracker\\.net/\n").unwrap();
    fs::write(
        &excludes,
        format!("ads.example.com\n@{}\n@{}\n", nested.display(), excludes.display()),
    )
    .unwrap();
    let spec = format!("@{}", excludes.display());

    let output = run_blackhole(
        &missing_config(&dir),
        &["check", "pixel.tracker.net", "-x", &spec],
    );
    assert!(output.status.success());
    assert!(stdout(&output).contains("EXCLUDED"));

    let output = run_blackhole(
        &missing_config(&dir),
        &["check", "pixel.tracker.net", "-x", &spec, "-i", "pixel.tracker.net"],
    );
    assert!(output.status.success());
    assert!(stdout(&output).contains("INCLUDED"));
}

#[test]
fn test_check_config_rules() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.yaml");
    fs::write(&config, "excludes:\n  - /.*\\.example\\.org/i\n").unwrap();

    let output = run_blackhole(&config, &["check", "cdn.example.org"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("EXCLUDED"));

    let output = run_blackhole(&config, &["check", "cdn.example.com"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("NOT affected"));
}

#[test]
fn test_check_invalid_host() {
    let dir = TempDir::new().unwrap();
    let output = run_blackhole(&missing_config(&dir), &["check", "localhost"]);
    assert!(!output.status.success());
}

#[test]
fn test_init_then_refuse_overwrite() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("etc/config.yaml");

    let output = run_blackhole(&config, &["init"]);
    assert!(output.status.success());
    assert!(config.exists());

    let output = run_blackhole(&config, &["init"]);
    assert!(!output.status.success());

    let output = run_blackhole(&config, &["init", "--force"]);
    assert!(output.status.success());
}

#[test]
fn test_invalid_config_file() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.yaml");
    fs::write(&config, "format: dnsmasq\n").unwrap();

    let output = run_blackhole(&config, &["check", "ads.example.com"]);
    assert!(!output.status.success());
}
