//! CSV and JSON reports of scored results.

use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::EvaluationError;
use crate::types::ScoredResult;

/// Header line of the CSV report
pub const CSV_HEADER: &str = "text, top_class, exact_match, top_3, top_5, match_fail";

/// Render results as CSV.
///
/// Fields are separated by `", "`, flags are written as `1`/`0` and `text` is
/// always double-quoted with embedded quotes doubled. `top_class` is quoted
/// only when it contains a delimiter, a quote or a line break; a quoted
/// `top_class` follows `text` without the space so that standard CSV readers
/// still see it as one field.
pub fn to_csv(results: &[ScoredResult]) -> String {
    let mut csv = String::with_capacity(CSV_HEADER.len() + 1 + results.len() * 64);
    csv.push_str(CSV_HEADER);
    csv.push('\n');

    for result in results {
        let top_class = class_field(&result.top_class);
        let separator = match top_class {
            Cow::Borrowed(_) => ", ",
            Cow::Owned(_) => ",",
        };
        csv.push_str(&format!(
            "\"{}\"{}{}, {}, {}, {}, {}\n",
            result.text.replace('"', "\"\""),
            separator,
            top_class,
            flag(result.exact_match),
            flag(result.top3),
            flag(result.top5),
            flag(result.match_fail),
        ));
    }

    csv
}

fn class_field(name: &str) -> Cow<'_, str> {
    if name.contains([',', '"', '\r', '\n']) {
        Cow::Owned(format!("\"{}\"", name.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(name)
    }
}

fn flag(value: bool) -> u8 {
    u8::from(value)
}

/// Render results as a JSON array
pub fn to_json(results: &[ScoredResult]) -> Result<String, EvaluationError> {
    Ok(serde_json::to_string_pretty(results)?)
}

/// Per-destination outcome of [`write_reports`]; `None` when not requested
#[derive(Debug, Default)]
pub struct ReportOutcome {
    /// CSV report
    pub csv: Option<Result<PathBuf, EvaluationError>>,
    /// JSON report
    pub json: Option<Result<PathBuf, EvaluationError>>,
}

impl ReportOutcome {
    /// Reports that were written
    pub fn written(&self) -> Vec<&Path> {
        [&self.csv, &self.json]
            .into_iter()
            .filter_map(|r| r.as_ref()?.as_ref().ok())
            .map(PathBuf::as_path)
            .collect()
    }

    /// Reports that failed
    pub fn errors(&self) -> Vec<&EvaluationError> {
        [&self.csv, &self.json]
            .into_iter()
            .filter_map(|r| r.as_ref()?.as_ref().err())
            .collect()
    }

    /// Whether every requested report was written
    pub fn is_ok(&self) -> bool {
        self.errors().is_empty()
    }
}

/// Write the requested reports concurrently.
///
/// Each write succeeds or fails on its own; both have finished when this
/// returns.
pub async fn write_reports(
    results: &[ScoredResult],
    csv_path: Option<&Path>,
    json_path: Option<&Path>,
) -> ReportOutcome {
    let csv_write = async {
        match csv_path {
            Some(path) => Some(write_report(path, to_csv(results)).await),
            None => None,
        }
    };

    let json_write = async {
        match json_path {
            Some(path) => Some(match to_json(results) {
                Ok(body) => write_report(path, body).await,
                Err(e) => {
                    debug!(path = %path.display(), error = %e, "Failed to render JSON report");
                    Err(e)
                }
            }),
            None => None,
        }
    };

    let (csv, json) = tokio::join!(csv_write, json_write);
    ReportOutcome { csv, json }
}

async fn write_report(path: &Path, body: String) -> Result<PathBuf, EvaluationError> {
    match tokio::fs::write(path, body).await {
        Ok(()) => {
            info!(path = %path.display(), "Report written");
            Ok(path.to_path_buf())
        }
        Err(source) => {
            debug!(path = %path.display(), error = %source, "Failed to write report");
            Err(EvaluationError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ClassMatch;
    use nlc_sdk::ClassifiedClass;

    fn result(text: &str, exact: bool, top3: bool, top5: bool, fail: bool) -> ScoredResult {
        ScoredResult {
            classifier_id: Some("c-1".to_string()),
            url: None,
            text: text.to_string(),
            top_class: "temperature".to_string(),
            classes: vec![ClassifiedClass::new("temperature", 0.9)],
            exact_match: exact,
            class_matches: vec![ClassMatch {
                class_name: "temperature".to_string(),
                match_index: if fail { None } else { Some(0) },
            }],
            top3,
            top5,
            match_fail: fail,
        }
    }

    #[test]
    fn test_csv_layout() {
        let csv = to_csv(&[
            result("How hot is it?", true, true, true, false),
            result("Say \"hi\"", false, false, false, true),
        ]);

        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(lines[1], "\"How hot is it?\", temperature, 1, 1, 1, 0");
        assert_eq!(lines[2], "\"Say \"\"hi\"\"\", temperature, 0, 0, 0, 1");
        assert!(csv.ends_with('\n'));
    }

    #[test]
    fn test_csv_quotes_class_names_with_delimiters() {
        let mut row = result("is it hot", true, true, true, false);
        row.top_class = "weather, \"temperature\"".to_string();

        let csv = to_csv(&[row]);
        assert_eq!(
            csv.lines().nth(1),
            Some("\"is it hot\",\"weather, \"\"temperature\"\"\", 1, 1, 1, 0")
        );
    }

    #[test]
    fn test_csv_of_no_results_is_header_only() {
        assert_eq!(to_csv(&[]), format!("{}\n", CSV_HEADER));
    }

    #[test]
    fn test_json_is_plain_array() {
        let json = to_json(&[result("a", true, true, true, false)]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let items = value.as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["top3"], true);
        assert_eq!(items[0]["class_matches"][0]["match_index"], 0);
    }

    #[test]
    fn test_empty_outcome_is_ok() {
        let outcome = ReportOutcome::default();
        assert!(outcome.is_ok());
        assert!(outcome.written().is_empty());
    }
}
