//! Init command implementation.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::config::Config;
use crate::utils::write_atomic;

/// Run the init command
pub async fn run(force: bool, config_path: &Path) -> Result<()> {
    if config_path.exists() && !force {
        anyhow::bail!(
            "Config file {:?} already exists (use --force to overwrite)",
            config_path
        );
    }

    if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {:?}", parent))?;
    }

    write_atomic(config_path, Config::generate_default_yaml().as_bytes())
        .with_context(|| format!("Failed to write config to {:?}", config_path))?;

    info!("Wrote default configuration to {:?}", config_path);
    Ok(())
}
