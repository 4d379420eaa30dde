//! Loading labeled data from the command line

use anyhow::{Context, Result};
use nlc_evaluation::{EvaluationError, TrainingData};
use std::fs;
use std::path::{Path, PathBuf};

/// Where the labeled data comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// A JSON document given inline (`-d`)
    Inline(String),
    /// A JSON or YAML file (`-f`)
    File(PathBuf),
}

impl DataSource {
    /// Pick the source from the `-d`/`-f` flags; `-d` wins when both are set
    pub fn from_flags(data: Option<String>, file: Option<PathBuf>) -> Option<Self> {
        match (data, file) {
            (Some(data), _) => Some(DataSource::Inline(data)),
            (None, Some(file)) => Some(DataSource::File(file)),
            (None, None) => None,
        }
    }
}

/// Read and parse `{ "training_data": [...] }` from the source.
///
/// Files ending in `.yaml` or `.yml` are parsed as YAML, everything else as
/// JSON.
pub fn load_training_data(source: &DataSource) -> Result<TrainingData> {
    match source {
        DataSource::Inline(data) => {
            serde_json::from_str(data).context("Failed to parse the -d argument as JSON")
        }
        DataSource::File(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Unable to read the file: {}", path.display()))?;
            parse_file_content(path, &content)
        }
    }
}

fn parse_file_content(path: &Path, content: &str) -> Result<TrainingData> {
    if is_yaml(path) {
        serde_yaml::from_str(content)
            .with_context(|| format!("Failed to parse YAML in {}", path.display()))
    } else {
        serde_json::from_str(content)
            .with_context(|| format!("Failed to parse JSON in {}", path.display()))
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|s| s.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// Turn an evaluation error into a CLI error, listing field problems
pub fn describe(err: EvaluationError) -> anyhow::Error {
    let details: Vec<String> = err
        .field_errors()
        .iter()
        .map(|e| format!("  - {}", e))
        .collect();

    if details.is_empty() {
        anyhow::Error::new(err)
    } else {
        anyhow::anyhow!("{}\n{}", err, details.join("\n"))
    }
}
