//! Labeled data and scored results.

use nlc_sdk::{ClassifiedClass, CreateClassifierRequest, TrainingExample};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{ClassificationError, EvaluationError};
use crate::validation::validate_examples;

/// An utterance and the labels considered correct for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct LabeledExample {
    /// Input utterance
    #[serde(default)]
    #[validate(length(min = 1, message = "text must not be empty"))]
    pub text: String,
    /// Ground-truth labels
    #[serde(default)]
    #[validate(length(min = 1, message = "classes must not be empty"))]
    pub classes: Vec<String>,
}

impl LabeledExample {
    /// Create a labeled example
    pub fn new<I, S>(text: impl Into<String>, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            text: text.into(),
            classes: classes.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<LabeledExample> for TrainingExample {
    fn from(example: LabeledExample) -> Self {
        TrainingExample {
            text: example.text,
            classes: example.classes,
        }
    }
}

/// Input document of `create` and `blind`: `{ "training_data": [...] }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrainingData {
    /// Language of the phrases (used when creating a classifier)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Classifier display name (used when creating a classifier)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Labeled phrases
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub training_data: Option<Vec<LabeledExample>>,
}

impl TrainingData {
    /// Wrap a list of examples
    pub fn from_examples(examples: Vec<LabeledExample>) -> Self {
        Self {
            language: None,
            name: None,
            training_data: Some(examples),
        }
    }

    /// Validate and return the labeled examples
    pub fn into_examples(self) -> Result<Vec<LabeledExample>, EvaluationError> {
        let examples = self.training_data.ok_or_else(|| {
            EvaluationError::validation(
                "missing `training_data`; the data to test must be formatted as training data",
            )
        })?;
        validate_examples(&examples)?;
        Ok(examples)
    }

    /// Validate and turn into a classifier creation request
    pub fn into_create_request(self) -> Result<CreateClassifierRequest, EvaluationError> {
        let language = self.language.clone();
        let name = self.name.clone();
        let examples = self.into_examples()?;

        let mut request =
            CreateClassifierRequest::new(examples.into_iter().map(TrainingExample::from).collect());
        if let Some(language) = language {
            request = request.with_language(language);
        }
        if let Some(name) = name {
            request = request.with_name(name);
        }
        Ok(request)
    }
}

/// Position of one expected label in the predicted ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassMatch {
    /// Expected label
    pub class_name: String,
    /// Zero-based rank, `None` when the label was not predicted at all
    #[serde(with = "crate::serialization::match_index")]
    pub match_index: Option<usize>,
}

impl ClassMatch {
    /// Whether the label was ranked strictly above `cutoff`
    pub fn within(&self, cutoff: usize) -> bool {
        self.match_index.map_or(false, |rank| rank < cutoff)
    }

    /// Whether the label appears anywhere in the ranking
    pub fn found(&self) -> bool {
        self.match_index.is_some()
    }
}

/// A classification response annotated with match diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredResult {
    /// Classifier that produced the result
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier_id: Option<String>,
    /// Resource URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Classified utterance
    pub text: String,
    /// Highest-confidence class
    pub top_class: String,
    /// Ranked classes as returned by the service
    #[serde(default)]
    pub classes: Vec<ClassifiedClass>,
    /// `top_class` is one of the expected labels
    pub exact_match: bool,
    /// Rank of each expected label
    pub class_matches: Vec<ClassMatch>,
    /// Some expected label ranked in the first three
    pub top3: bool,
    /// Some expected label ranked in the first five (see [`crate::Top5Mode`])
    pub top5: bool,
    /// No expected label was ranked at all
    pub match_fail: bool,
}

/// An example whose classification call failed.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemFailure {
    /// Position of the example in the input
    pub index: usize,
    /// Utterance that was sent
    pub text: String,
    /// What went wrong
    pub error: ClassificationError,
}

/// Outcome of a blind evaluation run.
#[derive(Debug, Clone, Default)]
pub struct EvaluationSummary {
    /// Scored results, in input order
    pub results: Vec<ScoredResult>,
    /// Fraction of `results` with an exact match
    pub accuracy: f64,
    /// Items that could not be classified, in input order
    pub failures: Vec<ItemFailure>,
}

impl EvaluationSummary {
    /// Build a summary from per-item outcomes.
    ///
    /// Accuracy is computed over the successfully scored items only; failed
    /// items count neither as hits nor as misses. No scored items gives `0.0`.
    pub fn from_outcomes(outcomes: Vec<Result<ScoredResult, ItemFailure>>) -> Self {
        let mut results = Vec::with_capacity(outcomes.len());
        let mut failures = Vec::new();

        for outcome in outcomes {
            match outcome {
                Ok(result) => results.push(result),
                Err(failure) => failures.push(failure),
            }
        }

        let accuracy = accuracy(&results);

        Self {
            results,
            accuracy,
            failures,
        }
    }

    /// Number of items attempted
    pub fn attempted(&self) -> usize {
        self.results.len() + self.failures.len()
    }

    /// Number of exact matches
    pub fn exact_matches(&self) -> usize {
        self.results.iter().filter(|r| r.exact_match).count()
    }

    /// Whether every item was classified
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// `count(exact_match) / count(results)`, or `0.0` for no results
pub fn accuracy(results: &[ScoredResult]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    let hits = results.iter().filter(|r| r.exact_match).count();
    hits as f64 / results.len() as f64
}
