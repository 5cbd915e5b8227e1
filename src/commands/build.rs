//! Build command implementation.

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::{load_config, load_rules, Selection};
use crate::adjustments::{resolve, RuleSet};
use crate::aggregator::collect_hostnames;
use crate::cli::{AdjustmentArgs, SelectionArgs};
use crate::config::BlocklistSource;
use crate::fetcher::{fetch_masterlist, Fetcher, Retriever};
use crate::masterlist::filter;
use crate::output::{render, OutputFormat};
use crate::utils::{format_bytes, format_count, write_atomic};

/// Run the build command
pub async fn run(
    config_path: &Path,
    selection: SelectionArgs,
    adjustments: AdjustmentArgs,
    format: Option<String>,
    output: Option<PathBuf>,
) -> Result<()> {
    let config = load_config(config_path)?;

    // Everything that can be checked offline is checked before downloading
    let format = match format {
        Some(name) => name.parse::<OutputFormat>()?,
        None => config.format,
    };
    format.ensure_supported()?;

    let selection = Selection::resolve(&selection, &config)?;
    let (includes, excludes) = load_rules(&config, &adjustments)?;
    let extra_sources: Vec<BlocklistSource> =
        config.enabled_extra_sources().into_iter().cloned().collect();

    let fetcher = Fetcher::new()?;
    let hosts = build_hostnames(&fetcher, &selection, &extra_sources, &includes, &excludes).await?;
    info!(
        "Downloaded {}",
        format_bytes(fetcher.total_downloaded() as u64)
    );

    match output {
        Some(path) => {
            let mut buf = Vec::new();
            let count = render(&hosts, format, &mut buf)?;
            write_atomic(&path, &buf)
                .with_context(|| format!("Failed to write output to {:?}", path))?;
            info!("Wrote {} hostnames to {:?}", format_count(count), path);
        }
        None => {
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            let count = render(&hosts, format, &mut out).context("Failed to write output")?;
            info!("Wrote {} hostnames", format_count(count));
        }
    }

    Ok(())
}

/// Fetch the selected blocklists and return the adjusted hostname set.
pub async fn build_hostnames<R: Retriever + ?Sized>(
    retriever: &R,
    selection: &Selection,
    extra_sources: &[BlocklistSource],
    includes: &RuleSet,
    excludes: &RuleSet,
) -> Result<HashSet<String>> {
    let entries = fetch_masterlist(retriever, &selection.masterlist_url).await?;
    let selected = filter(&entries, &selection.categories, selection.quality);
    info!(
        "Selected {} of {} blocklists (quality >= {})",
        selected.len(),
        entries.len(),
        selection.quality
    );

    let mut sources: Vec<BlocklistSource> =
        selected.into_iter().map(BlocklistSource::from).collect();
    sources.extend(extra_sources.iter().cloned());

    if sources.is_empty() {
        warn!("No blocklists selected. Check the category and quality options.");
    }

    let aggregate = collect_hostnames(retriever, &sources).await?;
    let hosts = resolve(aggregate.hostnames, includes, excludes)?;

    info!("Final list: {} hostnames", format_count(hosts.len()));
    Ok(hosts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adjustments::parse_rules;
    use crate::error::BlackholeError;
    use crate::fetcher::mock::StaticRetriever;
    use crate::masterlist::{Category, Quality};

    const MASTERLIST: &str = "https://lists.example/csv.txt";
    const MASTERLIST_CSV: &str = concat!(
        "\"advertising\",\"tick\",\"s\",\"Ads\",\"https://lists.example/ads.txt\"\n",
        "\"tracking\",\"std\",\"s\",\"Trackers\",\"https://lists.example/track.txt\"\n",
        "\"suspicious\",\"cross\",\"s\",\"Noisy\",\"https://lists.example/noisy.txt\"\n",
    );

    fn retriever() -> StaticRetriever {
        StaticRetriever::new(&[
            (MASTERLIST, MASTERLIST_CSV),
            (
                "https://lists.example/ads.txt",
                "0.0.0.0 ads.example.com\n0.0.0.0 banner.example.com\n",
            ),
            (
                "https://lists.example/track.txt",
                "pixel.example.net\nads.example.com\n",
            ),
            ("https://lists.example/noisy.txt", "cdn.example.org\n"),
        ])
    }

    fn selection(categories: &[Category], quality: Quality) -> Selection {
        Selection {
            masterlist_url: MASTERLIST.to_string(),
            categories: categories.to_vec(),
            quality,
        }
    }

    fn sorted(hosts: HashSet<String>) -> Vec<String> {
        let mut v: Vec<String> = hosts.into_iter().collect();
        v.sort();
        v
    }

    #[tokio::test]
    async fn test_build_filters_masterlist() {
        let retriever = retriever();
        let hosts = build_hostnames(
            &retriever,
            &selection(&Category::ALL, Quality::Std),
            &[],
            &RuleSet::default(),
            &RuleSet::default(),
        )
        .await
        .unwrap();

        assert_eq!(
            sorted(hosts),
            vec!["ads.example.com", "banner.example.com", "pixel.example.net"]
        );
        assert!(!retriever
            .requested()
            .contains(&"https://lists.example/noisy.txt".to_string()));
    }

    #[tokio::test]
    async fn test_build_applies_adjustments() {
        let includes = parse_rules(&["keep.example.com"], false).unwrap();
        let excludes = parse_rules(&[r"/.*\.example\.net/", "banner.example.com"], true).unwrap();

        let hosts = build_hostnames(
            &retriever(),
            &selection(&[Category::Advertising, Category::Tracking], Quality::Cross),
            &[],
            &includes,
            &excludes,
        )
        .await
        .unwrap();

        assert_eq!(sorted(hosts), vec!["ads.example.com", "keep.example.com"]);
    }

    #[tokio::test]
    async fn test_build_includes_extra_sources() {
        let extra = vec![BlocklistSource {
            name: "Local".to_string(),
            url: "https://lists.example/noisy.txt".to_string(),
            enabled: true,
        }];
        let hosts = build_hostnames(
            &retriever(),
            &selection(&[Category::Advertising], Quality::Tick),
            &extra,
            &RuleSet::default(),
            &RuleSet::default(),
        )
        .await
        .unwrap();

        assert_eq!(
            sorted(hosts),
            vec!["ads.example.com", "banner.example.com", "cdn.example.org"]
        );
    }

    #[tokio::test]
    async fn test_build_empty_selection() {
        let hosts = build_hostnames(
            &retriever(),
            &selection(&[Category::Malicious], Quality::Cross),
            &[],
            &RuleSet::default(),
            &RuleSet::default(),
        )
        .await
        .unwrap();
        assert!(hosts.is_empty());
    }

    #[tokio::test]
    async fn test_build_masterlist_unreachable() {
        let retriever = StaticRetriever::new(&[]);
        let err = build_hostnames(
            &retriever,
            &selection(&Category::ALL, Quality::Std),
            &[],
            &RuleSet::default(),
            &RuleSet::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BlackholeError>(),
            Some(BlackholeError::Retrieve { url, .. }) if url == MASTERLIST
        ));
    }
}
