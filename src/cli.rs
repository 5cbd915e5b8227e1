//! CLI argument parsing with clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_PATH;

#[derive(Parser)]
#[command(name = "blackhole")]
#[command(author, version, about = "DNS blocklist aggregator")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file path
    #[arg(long, default_value = DEFAULT_CONFIG_PATH, global = true)]
    pub config: PathBuf,

    /// Silent mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub silent: bool,

    /// Verbose mode (debug output)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Masterlist selection, shared by `build` and `sources`.
#[derive(Args, Debug, Default, Clone)]
pub struct SelectionArgs {
    /// Masterlist URL (overrides config)
    #[arg(short, long)]
    pub url: Option<String>,

    /// Categories to include (suspicious, advertising, tracking, malicious, other)
    #[arg(short = 'c', long = "category", num_args = 1..)]
    pub categories: Vec<String>,

    /// Minimum list quality (cross, std, tick)
    #[arg(short, long)]
    pub quality: Option<String>,
}

/// Include/exclude rules appended to the configured ones.
#[derive(Args, Debug, Default, Clone)]
pub struct AdjustmentArgs {
    /// Hostname or @file to always include
    #[arg(short = 'i', long = "include")]
    pub includes: Vec<String>,

    /// Hostname, /pattern/modifier or @file to exclude
    #[arg(short = 'x', long = "exclude", allow_hyphen_values = true)]
    pub excludes: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download the selected blocklists and print the merged hostname list
    Build {
        #[command(flatten)]
        selection: SelectionArgs,

        #[command(flatten)]
        adjustments: AdjustmentArgs,

        /// Output format (text, unbound, bind)
        #[arg(short, long)]
        format: Option<String>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the masterlist entries a build would download
    Sources {
        #[command(flatten)]
        selection: SelectionArgs,
    },

    /// Show how the include/exclude rules treat a hostname
    Check {
        /// Hostname to check
        host: String,

        #[command(flatten)]
        adjustments: AdjustmentArgs,
    },

    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Show version
    Version,
}
