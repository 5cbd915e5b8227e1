//! CLI command implementations.

pub mod build;
pub mod check;
pub mod init;
pub mod sources;

use anyhow::{Context, Result};
use std::path::Path;

use crate::adjustments::{parse_rules, RuleSet};
use crate::cli::{AdjustmentArgs, SelectionArgs};
use crate::config::Config;
use crate::error::BlackholeError;
use crate::masterlist::{Category, Quality};
use crate::validation::{parse_categories, parse_quality, validate_url};

/// Masterlist selection after merging command-line flags over the config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub masterlist_url: String,
    pub categories: Vec<Category>,
    pub quality: Quality,
}

impl Selection {
    /// Merge `args` over `config`. Flags win; an empty category list keeps the configured one.
    pub fn resolve(args: &SelectionArgs, config: &Config) -> Result<Self> {
        let masterlist_url = args
            .url
            .clone()
            .unwrap_or_else(|| config.masterlist_url.clone());
        validate_url(&masterlist_url).context("Invalid masterlist URL")?;

        let categories = if args.categories.is_empty() {
            config.categories.clone()
        } else {
            parse_categories(&args.categories)?
        };

        let quality = match &args.quality {
            Some(name) => parse_quality(name)?,
            None => config.quality,
        };

        Ok(Self {
            masterlist_url,
            categories,
            quality,
        })
    }
}

/// Load the config file, or defaults when it does not exist.
pub fn load_config(config_path: &Path) -> Result<Config> {
    Config::load_or_default(config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))
}

/// Parse configured and command-line adjustments into (includes, excludes).
///
/// Fails if an include file contributed a pattern rule.
pub fn load_rules(config: &Config, args: &AdjustmentArgs) -> Result<(RuleSet, RuleSet)> {
    let include_specs: Vec<&str> = config
        .includes
        .iter()
        .chain(&args.includes)
        .map(String::as_str)
        .collect();
    let exclude_specs: Vec<&str> = config
        .excludes
        .iter()
        .chain(&args.excludes)
        .map(String::as_str)
        .collect();

    let includes = parse_rules(&include_specs, false).context("Failed to load include rules")?;
    if !includes.patterns.is_empty() {
        return Err(BlackholeError::IncludesContainPatterns(includes.patterns.len()).into());
    }
    let excludes = parse_rules(&exclude_specs, true).context("Failed to load exclude rules")?;

    Ok((includes, excludes))
}
