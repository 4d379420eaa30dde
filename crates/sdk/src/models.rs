//! SDK data models
//!
//! This module provides the data structures used in API requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{SdkError, SdkResult};

// ============================================================================
// Classifier Models
// ============================================================================

/// Classifier summary (used in create and list responses)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classifier {
    /// Unique identifier
    pub classifier_id: String,
    /// Resource URL
    pub url: String,
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Language of the training data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Creation timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    /// Training state, present in the create response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ClassifierState>,
    /// Human readable state description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_description: Option<String>,
}

/// Classifier list response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassifierList {
    /// Classifiers owned by the account
    #[serde(default)]
    pub classifiers: Vec<Classifier>,
}

impl ClassifierList {
    /// Check if the list is empty
    pub fn is_empty(&self) -> bool {
        self.classifiers.is_empty()
    }

    /// Number of classifiers
    pub fn len(&self) -> usize {
        self.classifiers.len()
    }
}

/// Training state of a classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassifierState {
    /// No classifier with that ID exists
    #[serde(rename = "Non Existent")]
    NonExistent,
    /// Training is in progress
    Training,
    /// Training failed
    Failed,
    /// Ready to classify
    Available,
    /// Temporarily not serving requests
    Unavailable,
    /// A state this client does not know about
    #[serde(other)]
    Unknown,
}

impl ClassifierState {
    /// Whether the classifier accepts classify calls
    pub fn is_available(&self) -> bool {
        matches!(self, ClassifierState::Available)
    }
}

impl fmt::Display for ClassifierState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ClassifierState::NonExistent => "Non Existent",
            ClassifierState::Training => "Training",
            ClassifierState::Failed => "Failed",
            ClassifierState::Available => "Available",
            ClassifierState::Unavailable => "Unavailable",
            ClassifierState::Unknown => "Unknown",
        };
        write!(f, "{}", s)
    }
}

/// Status response for a single classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierStatus {
    /// Unique identifier
    pub classifier_id: String,
    /// Resource URL
    pub url: String,
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Language of the training data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Creation timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    /// Training state
    pub status: ClassifierState,
    /// Human readable state description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_description: Option<String>,
}

// ============================================================================
// Classification Models
// ============================================================================

/// One ranked class in a classification response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedClass {
    /// Class label
    pub class_name: String,
    /// Confidence in `[0, 1]`
    pub confidence: f64,
}

impl ClassifiedClass {
    /// Create a ranked class
    pub fn new(class_name: impl Into<String>, confidence: f64) -> Self {
        Self {
            class_name: class_name.into(),
            confidence,
        }
    }
}

/// Classification response
///
/// `classes` is ordered by descending confidence and `top_class` is the name
/// of its first entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Classifier that produced the result
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier_id: Option<String>,
    /// Resource URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Classified phrase as echoed by the service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Highest-confidence class
    pub top_class: String,
    /// Ranked classes
    #[serde(default)]
    pub classes: Vec<ClassifiedClass>,
}

impl ClassificationResult {
    /// Build a result from ranked classes; `top_class` is the first entry
    pub fn from_ranked(classes: Vec<ClassifiedClass>) -> Self {
        let top_class = classes
            .first()
            .map(|c| c.class_name.clone())
            .unwrap_or_default();
        Self {
            classifier_id: None,
            url: None,
            text: None,
            top_class,
            classes,
        }
    }

    /// Zero-based rank of a class name, if present
    pub fn rank_of(&self, class_name: &str) -> Option<usize> {
        self.classes.iter().position(|c| c.class_name == class_name)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ClassifyRequest<'a> {
    pub text: &'a str,
}

// ============================================================================
// Training Models
// ============================================================================

/// One training phrase and the classes it belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingExample {
    /// Training phrase
    pub text: String,
    /// Classes the phrase belongs to
    pub classes: Vec<String>,
}

/// Request to create (and train) a classifier
#[derive(Debug, Clone, Serialize)]
pub struct CreateClassifierRequest {
    /// Language of the training data
    pub language: String,
    /// Optional display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Training phrases
    pub training_data: Vec<TrainingExample>,
}

/// Metadata part of the multipart create request
#[derive(Debug, Clone, Serialize)]
pub struct TrainingMetadata<'a> {
    /// Language of the training data
    pub language: &'a str,
    /// Optional display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
}

impl CreateClassifierRequest {
    /// Create a request with the default language (`en`)
    pub fn new(training_data: Vec<TrainingExample>) -> Self {
        Self {
            language: "en".to_string(),
            name: None,
            training_data,
        }
    }

    /// Set the language
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The `training_metadata` part
    pub fn metadata(&self) -> TrainingMetadata<'_> {
        TrainingMetadata {
            language: &self.language,
            name: self.name.as_deref(),
        }
    }

    /// Render the training data in the service's CSV format: one row per
    /// phrase, the phrase first and its classes after it.
    pub fn to_training_csv(&self) -> SdkResult<String> {
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .has_headers(false)
            .from_writer(Vec::new());

        for example in &self.training_data {
            let mut record = Vec::with_capacity(example.classes.len() + 1);
            record.push(example.text.as_str());
            record.extend(example.classes.iter().map(String::as_str));
            writer.write_record(&record).map_err(csv_error)?;
        }

        let bytes = writer.into_inner().map_err(|e| SdkError::SerializationError {
            message: format!("Failed to flush training CSV: {}", e),
            source: None,
        })?;

        String::from_utf8(bytes).map_err(|e| SdkError::SerializationError {
            message: e.to_string(),
            source: Some(Box::new(e)),
        })
    }
}

fn csv_error(err: csv::Error) -> SdkError {
    SdkError::SerializationError {
        message: format!("Failed to write training CSV: {}", err),
        source: Some(Box::new(err)),
    }
}
