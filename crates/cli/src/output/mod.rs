//! Output formatting for CLI

use anyhow::Result;
use serde::{Deserialize, Serialize};

mod formatters;
mod table;
mod views;

pub use formatters::{JsonFormatter, PlainFormatter};
pub use table::TableFormatter;

/// Output format enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// The service response as pretty JSON (default)
    #[default]
    Json,
    /// Table output
    Table,
    /// Plain text output
    Plain,
}

impl OutputFormat {
    /// Parse output format from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "table" => Some(Self::Table),
            "plain" => Some(Self::Plain),
            _ => None,
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Table => write!(f, "table"),
            Self::Plain => write!(f, "plain"),
        }
    }
}

/// Types that can be printed in every output format.
///
/// JSON and plain output come from the `Serialize` impl; types with a
/// natural tabular shape override [`format_table`](Self::format_table).
pub trait Formattable: Serialize {
    /// Format as JSON
    fn format_json(&self) -> Result<String> {
        JsonFormatter::format(self)
    }

    /// Format as table
    fn format_table(&self) -> Result<String> {
        self.format_plain()
    }

    /// Format as plain text
    fn format_plain(&self) -> Result<String> {
        PlainFormatter::format(self)
    }

    /// Format using the specified format
    fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => self.format_json(),
            OutputFormat::Table => self.format_table(),
            OutputFormat::Plain => self.format_plain(),
        }
    }
}

impl Formattable for serde_json::Value {}

/// Color helpers
pub mod colors {
    use colored::*;

    pub fn success(s: &str) -> ColoredString {
        s.green()
    }

    pub fn error(s: &str) -> ColoredString {
        s.red()
    }

    pub fn warning(s: &str) -> ColoredString {
        s.yellow()
    }

    pub fn dim(s: &str) -> ColoredString {
        s.dimmed()
    }
}
