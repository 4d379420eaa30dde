//! Table views of service responses

use anyhow::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use nlc_sdk::{ClassificationResult, Classifier, ClassifierList, ClassifierStatus};

use super::{Formattable, TableFormatter};

fn or_dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

fn timestamp(value: Option<&DateTime<Utc>>) -> String {
    value
        .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_else(|| "-".to_string())
}

impl Formattable for Classifier {
    fn format_table(&self) -> Result<String> {
        TableFormatter::key_value(vec![
            ("Classifier ID", self.classifier_id.clone()),
            ("Name", or_dash(self.name.as_deref())),
            ("Language", or_dash(self.language.as_deref())),
            (
                "Status",
                self.status
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ),
            ("Description", or_dash(self.status_description.as_deref())),
            ("Created", timestamp(self.created.as_ref())),
            ("URL", self.url.clone()),
        ])
    }
}

impl Formattable for ClassifierStatus {
    fn format_table(&self) -> Result<String> {
        TableFormatter::key_value(vec![
            ("Classifier ID", self.classifier_id.clone()),
            ("Name", or_dash(self.name.as_deref())),
            ("Language", or_dash(self.language.as_deref())),
            ("Status", self.status.to_string()),
            ("Description", or_dash(self.status_description.as_deref())),
            ("Created", timestamp(self.created.as_ref())),
            ("URL", self.url.clone()),
        ])
    }
}

impl Formattable for ClassifierList {
    fn format_table(&self) -> Result<String> {
        let rows = self
            .classifiers
            .iter()
            .map(|c| {
                vec![
                    c.classifier_id.clone(),
                    or_dash(c.name.as_deref()),
                    or_dash(c.language.as_deref()),
                    timestamp(c.created.as_ref()),
                ]
            })
            .collect();
        TableFormatter::simple(vec!["Classifier ID", "Name", "Language", "Created"], rows)
    }
}

impl Formattable for ClassificationResult {
    fn format_table(&self) -> Result<String> {
        let rows = self
            .classes
            .iter()
            .enumerate()
            .map(|(rank, class)| {
                vec![
                    (rank + 1).to_string(),
                    class.class_name.clone(),
                    format!("{:.4}", class.confidence),
                ]
            })
            .collect();

        let header = format!(
            "{}\ntop class: {}",
            self.text.as_deref().unwrap_or_default(),
            self.top_class
        );
        let ranking = TableFormatter::simple(vec!["Rank", "Class", "Confidence"], rows)?;
        Ok(format!("{}\n{}", header.trim_start(), ranking))
    }
}
