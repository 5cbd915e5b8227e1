//! Hostname aggregation across many blocklists.

use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use tracing::{info, warn};

use crate::config::BlocklistSource;
use crate::error::BlackholeError;
use crate::fetcher::Retriever;
use crate::parser::parse_blocklist;
use crate::utils::format_count;

/// Number of blocklists downloaded concurrently
const CONCURRENT_FETCHES: usize = 6;

/// Per-source outcome of an aggregation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceStats {
    pub name: String,
    pub url: String,
    /// Hostnames recognised in the source (before deduplication)
    pub hostnames: usize,
    /// Non-blank lines that did not yield a hostname
    pub unmatched: usize,
}

/// The deduplicated union of every source.
#[derive(Debug, Default)]
pub struct Aggregate {
    pub hostnames: HashSet<String>,
    pub sources: Vec<SourceStats>,
}

/// Download every source and merge their hostnames into one set.
///
/// Downloads run concurrently but insertion happens here, one source at a
/// time, in source order. The first failed download aborts the run.
pub async fn collect_hostnames<R: Retriever + ?Sized>(
    retriever: &R,
    sources: &[BlocklistSource],
) -> Result<Aggregate, BlackholeError> {
    let mut aggregate = Aggregate::default();

    let mut downloads = stream::iter(sources)
        .map(|source| async move { (source, retriever.fetch_text(&source.url).await) })
        .buffered(CONCURRENT_FETCHES);

    while let Some((source, result)) = downloads.next().await {
        let content = result.map_err(|e| BlackholeError::Retrieve {
            url: source.url.clone(),
            reason: format!("{:#}", e),
        })?;

        let parsed = parse_blocklist(&content);
        if !parsed.unmatched.is_empty() {
            warn!(
                "{}: {} line(s) not recognised as hostnames",
                source.name,
                format_count(parsed.unmatched.len())
            );
        }
        info!(
            "{}: {} hostnames",
            source.name,
            format_count(parsed.fqdns.len())
        );

        aggregate.sources.push(SourceStats {
            name: source.name.clone(),
            url: source.url.clone(),
            hostnames: parsed.fqdns.len(),
            unmatched: parsed.unmatched.len(),
        });
        aggregate.hostnames.extend(parsed.fqdns);
    }

    info!(
        "Aggregated {} unique hostnames from {} source(s)",
        format_count(aggregate.hostnames.len()),
        aggregate.sources.len()
    );

    Ok(aggregate)
}
