//! Rendering the final hostname set.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::io::Write;
use std::str::FromStr;

use crate::error::BlackholeError;

/// Output syntax for the hostname list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One hostname per line
    #[default]
    Text,
    /// Unbound `local-zone` directives
    Unbound,
    /// BIND response-policy zone (not implemented)
    Bind,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Unbound => "unbound",
            OutputFormat::Bind => "bind",
        }
    }

    /// Fail if this format cannot be rendered.
    pub fn ensure_supported(&self) -> Result<(), BlackholeError> {
        match self {
            OutputFormat::Bind => Err(BlackholeError::UnsupportedFormat(
                self.as_str().to_string(),
            )),
            OutputFormat::Text | OutputFormat::Unbound => Ok(()),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = BlackholeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "unbound" => Ok(OutputFormat::Unbound),
            "bind" => Ok(OutputFormat::Bind),
            _ => Err(BlackholeError::UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Write `hosts` sorted ascending in `format`. Returns the number of entries.
///
/// Nothing is written when the format is unsupported.
pub fn render<W: Write>(
    hosts: &HashSet<String>,
    format: OutputFormat,
    out: &mut W,
) -> anyhow::Result<usize> {
    format.ensure_supported()?;

    let mut sorted: Vec<&str> = hosts.iter().map(String::as_str).collect();
    sorted.sort_unstable();

    for host in &sorted {
        match format {
            OutputFormat::Text => writeln!(out, "{}", host)?,
            OutputFormat::Unbound => writeln!(out, "local-zone: \"{}\" static", host)?,
            OutputFormat::Bind => unreachable!("rejected by ensure_supported"),
        }
    }
    out.flush()?;

    Ok(sorted.len())
}
