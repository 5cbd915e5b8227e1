//! Centralized validation functions for blackhole.
//!
//! This module provides unified validation for:
//! - Source URLs
//! - Hostnames given on the command line
//! - Category and quality names

use anyhow::{bail, Result};

use crate::masterlist::{Category, Quality};
use crate::matcher::match_fqdn;

/// Validate that a source URL uses HTTPS and names a host.
///
/// # Examples
/// ```
/// use blackhole::validation::validate_url;
/// assert!(validate_url("https://v.firebog.net/hosts/csv.txt").is_ok());
/// assert!(validate_url("http://v.firebog.net/hosts/csv.txt").is_err());
/// assert!(validate_url("https://").is_err());
/// ```
pub fn validate_url(url: &str) -> Result<()> {
    let Some(rest) = url.strip_prefix("https://") else {
        bail!("URL must use HTTPS: {}", url);
    };

    let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
    if host.is_empty() {
        bail!("URL has no host: {}", url);
    }
    if url.chars().any(|c| c.is_whitespace() || c.is_control()) {
        bail!("URL contains whitespace or control characters: {:?}", url);
    }

    Ok(())
}

/// Validate a hostname and return its canonical form.
///
/// # Examples
/// ```
/// use blackhole::validation::validate_hostname;
/// assert_eq!(validate_hostname("Ads.Example.com.").unwrap(), "ads.example.com");
/// assert!(validate_hostname("localhost").is_err());
/// ```
pub fn validate_hostname(host: &str) -> Result<String> {
    match_fqdn(&host.trim().to_ascii_lowercase())
        .ok_or_else(|| anyhow::anyhow!("Invalid hostname: {}", host))
}

/// Parse category names; an empty list selects every category.
///
/// # Examples
/// ```
/// use blackhole::masterlist::Category;
/// use blackhole::validation::parse_categories;
/// assert_eq!(parse_categories(&[]).unwrap().len(), 5);
/// assert_eq!(parse_categories(&["tracking".to_string()]).unwrap(), vec![Category::Tracking]);
/// assert!(parse_categories(&["social".to_string()]).is_err());
/// ```
pub fn parse_categories(names: &[String]) -> Result<Vec<Category>> {
    if names.is_empty() {
        return Ok(Category::ALL.to_vec());
    }

    let mut categories = Vec::with_capacity(names.len());
    for name in names {
        let category: Category = name.parse()?;
        if !categories.contains(&category) {
            categories.push(category);
        }
    }
    Ok(categories)
}

/// Parse a quality tier name.
///
/// # Examples
/// ```
/// use blackhole::masterlist::Quality;
/// use blackhole::validation::parse_quality;
/// assert_eq!(parse_quality("tick").unwrap(), Quality::Tick);
/// assert!(parse_quality("gold").is_err());
/// ```
pub fn parse_quality(name: &str) -> Result<Quality> {
    Ok(name.parse()?)
}
