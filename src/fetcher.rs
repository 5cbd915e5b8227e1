//! HTTP fetcher for downloading the masterlist and blocklists.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::{debug, info};

use crate::error::BlackholeError;
use crate::masterlist::{parse_masterlist, MasterlistEntry};
use crate::utils::{format_bytes, format_count};

const TIMEOUT_SECS: u64 = 30;
const MAX_RETRIES: u32 = 3;
const RETRY_DELAY_MS: u64 = 2000;

/// Maximum size per downloaded file (32 MB)
/// Large hosts files (e.g. aggregated lists) stay well under 20 MB
const MAX_FILE_SIZE: usize = 32 * 1024 * 1024;

/// Maximum total size for all downloads combined (512 MB)
const MAX_TOTAL_SIZE: usize = 512 * 1024 * 1024;

/// Source of remote text content.
#[async_trait]
pub trait Retriever: Send + Sync {
    /// Download `url` and return its body as text.
    async fn fetch_text(&self, url: &str) -> Result<String>;
}

/// HTTP client for fetching lists
pub struct Fetcher {
    client: Client,
    /// Cumulative download size tracker (thread-safe for concurrent fetches)
    total_downloaded: AtomicUsize,
}

impl Fetcher {
    /// Create a new fetcher with default settings
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .user_agent(format!("blackhole/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self {
            client,
            total_downloaded: AtomicUsize::new(0),
        })
    }

    /// Get the total bytes downloaded so far
    pub fn total_downloaded(&self) -> usize {
        self.total_downloaded.load(Ordering::Relaxed)
    }

    /// Fetch content with retry logic and size validation
    async fn fetch_with_retry(&self, url: &str) -> Result<String> {
        let mut last_error = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let delay = RETRY_DELAY_MS * (1 << (attempt - 1));
                debug!("Retry {} after {}ms for {}", attempt, delay, url);
                tokio::time::sleep(Duration::from_millis(delay)).await;
            }

            match self.client.get(url).send().await {
                Ok(response) => {
                    if response.status().is_success() {
                        if let Some(content_length) = response.content_length() {
                            self.check_size(content_length as usize)?;
                        }

                        let body = response
                            .text()
                            .await
                            .context("Failed to read response body")?;
                        self.check_size(body.len())?;

                        let new_total = self
                            .total_downloaded
                            .fetch_add(body.len(), Ordering::Relaxed)
                            + body.len();
                        if new_total > MAX_TOTAL_SIZE {
                            anyhow::bail!(
                                "Cumulative download limit exceeded: {} bytes (max: {} bytes)",
                                new_total,
                                MAX_TOTAL_SIZE
                            );
                        }

                        debug!("Fetched {} ({})", url, format_bytes(body.len() as u64));
                        return Ok(body);
                    }
                    last_error = Some(anyhow::anyhow!("HTTP {}", response.status()));
                }
                Err(e) => {
                    last_error = Some(e.into());
                }
            }
        }

        Err(last_error.unwrap_or_else(|| anyhow::anyhow!("Unknown error")))
    }

    fn check_size(&self, size: usize) -> Result<()> {
        if size > MAX_FILE_SIZE {
            anyhow::bail!(
                "Response too large: {} bytes (max: {} bytes)",
                size,
                MAX_FILE_SIZE
            );
        }
        let current_total = self.total_downloaded.load(Ordering::Relaxed);
        if current_total + size > MAX_TOTAL_SIZE {
            anyhow::bail!(
                "Cumulative download limit exceeded: {} + {} > {} bytes",
                current_total,
                size,
                MAX_TOTAL_SIZE
            );
        }
        Ok(())
    }
}

#[async_trait]
impl Retriever for Fetcher {
    async fn fetch_text(&self, url: &str) -> Result<String> {
        self.fetch_with_retry(url).await
    }
}

/// Download and decode the masterlist at `url`.
pub async fn fetch_masterlist<R: Retriever + ?Sized>(
    retriever: &R,
    url: &str,
) -> Result<Vec<MasterlistEntry>, BlackholeError> {
    info!("Downloading master list from {}", url);

    let content = retriever
        .fetch_text(url)
        .await
        .map_err(|e| BlackholeError::Retrieve {
            url: url.to_string(),
            reason: format!("{:#}", e),
        })?;
    let entries = parse_masterlist(&content)?;

    info!("Master list has {} entries", format_count(entries.len()));
    Ok(entries)
}
