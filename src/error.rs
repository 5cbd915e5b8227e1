//! Error types for blackhole.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BlackholeError {
    #[error("Cannot read adjustment file {path:?}: {source}")]
    RuleFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Include rules must be literal hostnames, found {0} pattern rule(s)")]
    IncludesContainPatterns(usize),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Unknown quality: {0}")]
    UnknownQuality(String),

    #[error("Unknown output format: {0}")]
    UnknownFormat(String),

    #[error("Output format not implemented: {0}")]
    UnsupportedFormat(String),

    #[error("Could not retrieve {url}: {reason}")]
    Retrieve { url: String, reason: String },

    #[error("Masterlist error: {0}")]
    Masterlist(String),
}
