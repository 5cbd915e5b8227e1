//! Masterlist decoding and source selection.
//!
//! The masterlist is a headerless CSV index of blocklists:
//!
//! ```text
//! "advertising","tick","https://example.org","Example ad servers","https://example.org/ads.txt"
//! ```
//!
//! Columns are `category, quality, site, description, url`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use crate::config::BlocklistSource;
use crate::error::BlackholeError;

/// Default masterlist location.
pub const MASTERLIST_URL: &str = "https://v.firebog.net/hosts/csv.txt";

/// What kind of hosts a blocklist targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Suspicious,
    Advertising,
    Tracking,
    Malicious,
    Other,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Suspicious,
        Category::Advertising,
        Category::Tracking,
        Category::Malicious,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Suspicious => "suspicious",
            Category::Advertising => "advertising",
            Category::Tracking => "tracking",
            Category::Malicious => "malicious",
            Category::Other => "other",
        }
    }
}

impl FromStr for Category {
    type Err = BlackholeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "suspicious" => Ok(Category::Suspicious),
            "advertising" => Ok(Category::Advertising),
            "tracking" => Ok(Category::Tracking),
            "malicious" => Ok(Category::Malicious),
            "other" => Ok(Category::Other),
            _ => Err(BlackholeError::UnknownCategory(s.to_string())),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Curation tier of a blocklist, ordered `Cross < Std < Tick`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    /// Likely to cause false positives
    Cross,
    /// Less aggressive, some false positives
    #[default]
    Std,
    /// Safe for most users
    Tick,
}

impl Quality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Quality::Cross => "cross",
            Quality::Std => "std",
            Quality::Tick => "tick",
        }
    }
}

impl FromStr for Quality {
    type Err = BlackholeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cross" => Ok(Quality::Cross),
            "std" => Ok(Quality::Std),
            "tick" => Ok(Quality::Tick),
            _ => Err(BlackholeError::UnknownQuality(s.to_string())),
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One decoded masterlist row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MasterlistEntry {
    pub category: Category,
    pub quality: Quality,
    pub site: String,
    pub description: String,
    pub url: String,
}

impl From<&MasterlistEntry> for BlocklistSource {
    fn from(entry: &MasterlistEntry) -> Self {
        BlocklistSource {
            name: entry.description.clone(),
            url: entry.url.clone(),
            enabled: true,
        }
    }
}

/// Decode masterlist CSV content.
///
/// Rows with missing columns or an unknown category/quality are skipped with a
/// warning. Only undecodable CSV is an error.
pub fn parse_masterlist(content: &str) -> Result<Vec<MasterlistEntry>, BlackholeError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut entries = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|e| BlackholeError::Masterlist(e.to_string()))?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        match entry_from_record(&record) {
            Ok(entry) => entries.push(entry),
            Err(reason) => warn!("Skipping masterlist row {}: {}", index + 1, reason),
        }
    }

    Ok(entries)
}

fn entry_from_record(record: &csv::StringRecord) -> Result<MasterlistEntry, String> {
    let field = |idx: usize, name: &str| {
        record
            .get(idx)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| format!("no {} found", name))
    };

    let category = field(0, "category")?
        .parse::<Category>()
        .map_err(|e| e.to_string())?;
    let quality = field(1, "quality")?
        .parse::<Quality>()
        .map_err(|e| e.to_string())?;
    let site = record.get(2).unwrap_or_default().to_string();
    let description = field(3, "description")?.to_string();
    let url = field(4, "url")?.to_string();

    Ok(MasterlistEntry {
        category,
        quality,
        site,
        description,
        url,
    })
}

/// Keep entries in one of `categories` with at least `min_quality`.
pub fn filter<'a>(
    entries: &'a [MasterlistEntry],
    categories: &[Category],
    min_quality: Quality,
) -> Vec<&'a MasterlistEntry> {
    entries
        .iter()
        .filter(|e| categories.contains(&e.category) && e.quality >= min_quality)
        .collect()
}
