//! Configuration management for blackhole.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::fs_abstraction::{real_fs, FileSystem};
use crate::masterlist::{Category, Quality, MASTERLIST_URL};
use crate::output::OutputFormat;
use crate::validation::validate_url;

/// Default configuration file location.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/blackhole/config.yaml";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Masterlist CSV location
    pub masterlist_url: String,

    /// Masterlist categories to download
    pub categories: Vec<Category>,

    /// Minimum masterlist quality tier (cross, std, tick)
    pub quality: Quality,

    /// Output format (text, unbound, bind)
    pub format: OutputFormat,

    /// Hostnames always present in the output (literal or @file)
    pub includes: Vec<String>,

    /// Hostnames removed from the output (literal, /pattern/modifier or @file)
    pub excludes: Vec<String>,

    /// Blocklists fetched in addition to the masterlist selection
    pub extra_sources: Vec<BlocklistSource>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            masterlist_url: MASTERLIST_URL.to_string(),
            categories: Category::ALL.to_vec(),
            quality: Quality::Std,
            format: OutputFormat::Text,
            includes: Vec::new(),
            excludes: Vec::new(),
            extra_sources: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = real_fs()
            .read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;

        config.validate()?;

        Ok(config)
    }

    /// Load the file if it exists, otherwise fall back to defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if real_fs().exists(path.as_ref()) {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        validate_url(&self.masterlist_url).context("Invalid masterlist_url")?;

        for source in self.extra_sources.iter().filter(|s| s.enabled) {
            if source.name.trim().is_empty() {
                anyhow::bail!("Extra source with URL {} has no name", source.url);
            }
            validate_url(&source.url)
                .with_context(|| format!("Invalid URL for extra source '{}'", source.name))?;
        }

        Ok(())
    }

    /// Extra sources with `enabled: true`
    pub fn enabled_extra_sources(&self) -> Vec<&BlocklistSource> {
        self.extra_sources.iter().filter(|s| s.enabled).collect()
    }

    /// Generate default config with comments
    pub fn generate_default_yaml() -> String {
        include_str!("../templates/config.yaml").to_string()
    }
}

/// A blocklist to download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlocklistSource {
    pub name: String,
    pub url: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}
