//! # blackhole - DNS blocklist aggregator
//!
//! Downloads the hostname blocklists indexed by a masterlist, merges them into
//! one deduplicated set and renders it for a DNS resolver.
//!
//! ## Features
//!
//! - **Tolerant parsing** - hosts files, plain domain lists and inline comments
//! - **Selection** - by masterlist category and minimum quality tier
//! - **Adjustments** - literal or `/pattern/modifier` excludes, literal includes,
//!   `@file` references with cycle detection
//! - **Output** - plain text or Unbound `local-zone` directives
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        blackhole                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  CLI (clap)                                                 │
//! │    └── Commands: build, sources, check, init, version      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Config (serde_yaml)                                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Fetcher (reqwest + rustls)                                 │
//! │    └── Masterlist (csv) -> category/quality filter          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Aggregator (futures, bounded concurrency)                  │
//! │    └── Parser -> Matcher (regex)                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Adjustments                                                │
//! │    ├── Rule parser (literals, patterns, @files)             │
//! │    └── Resolver (exclude, then include)                     │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Output (text, unbound)                                     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```no_run
//! use blackhole::adjustments::{parse_rules, resolve};
//! use blackhole::aggregator::collect_hostnames;
//! use blackhole::config::BlocklistSource;
//! use blackhole::fetcher::{fetch_masterlist, Fetcher};
//! use blackhole::masterlist::{filter, Category, Quality, MASTERLIST_URL};
//! use blackhole::output::{render, OutputFormat};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let fetcher = Fetcher::new()?;
//!
//!     // Pick the curated advertising lists
//!     let entries = fetch_masterlist(&fetcher, MASTERLIST_URL).await?;
//!     let sources: Vec<BlocklistSource> = filter(&entries, &[Category::Advertising], Quality::Tick)
//!         .into_iter()
//!         .map(BlocklistSource::from)
//!         .collect();
//!
//!     // Download and merge
//!     let aggregate = collect_hostnames(&fetcher, &sources).await?;
//!
//!     // Apply adjustments
//!     let includes = parse_rules(&["ads.example.com"], false)?;
//!     let excludes = parse_rules(&["/.*\\.example\\.org/i"], true)?;
//!     let hosts = resolve(aggregate.hostnames, &includes, &excludes)?;
//!
//!     render(&hosts, OutputFormat::Unbound, &mut std::io::stdout())?;
//!     Ok(())
//! }
//! ```

pub mod adjustments;
pub mod aggregator;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod fs_abstraction;
pub mod masterlist;
pub mod matcher;
pub mod output;
pub mod parser;
pub mod utils;
pub mod validation;
