//! Sources command implementation.

use anyhow::Result;
use std::path::Path;

use super::{load_config, Selection};
use crate::cli::SelectionArgs;
use crate::fetcher::{fetch_masterlist, Fetcher};
use crate::masterlist::{filter, MasterlistEntry};
use crate::utils::truncate;

/// Run the sources command
pub async fn run(selection: SelectionArgs, config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    let selection = Selection::resolve(&selection, &config)?;

    let fetcher = Fetcher::new()?;
    let entries = fetch_masterlist(&fetcher, &selection.masterlist_url).await?;
    let selected = filter(&entries, &selection.categories, selection.quality);

    println!();
    println!("{}", format_table(&selected));

    let extras = config.enabled_extra_sources();
    if !extras.is_empty() {
        println!();
        println!("Extra sources:");
        for source in &extras {
            println!("  {:<40} {}", truncate(&source.name, 40), source.url);
        }
    }

    println!();
    println!(
        "{} of {} masterlist entries selected (quality >= {}), {} extra source(s)",
        selected.len(),
        entries.len(),
        selection.quality,
        extras.len()
    );

    Ok(())
}

/// One line per entry: category, quality, description, URL.
pub fn format_table(entries: &[&MasterlistEntry]) -> String {
    let mut lines = vec![format!(
        "  {:<12} {:<6} {:<40} {}",
        "CATEGORY", "QUALITY", "DESCRIPTION", "URL"
    )];
    for entry in entries {
        lines.push(format!(
            "  {:<12} {:<6} {:<40} {}",
            entry.category.as_str(),
            entry.quality.as_str(),
            truncate(&entry.description, 40),
            entry.url
        ));
    }
    lines.join("\n")
}
