//! Evaluation error types

use nlc_sdk::SdkError;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop an evaluation or a report write
#[derive(Error, Debug)]
pub enum EvaluationError {
    /// The labeled data does not have the expected shape
    #[error("Validation failed: {message}")]
    Validation {
        /// Summary message
        message: String,
        /// Per-field problems, e.g. `training_data[2].classes`
        field_errors: Vec<FieldError>,
    },

    /// A report file could not be written
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        /// Destination that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A report could not be rendered
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl EvaluationError {
    /// Create a validation error without field details
    pub fn validation(message: impl Into<String>) -> Self {
        EvaluationError::Validation {
            message: message.into(),
            field_errors: Vec::new(),
        }
    }

    /// Create a validation error with field details
    pub fn validation_with_fields(message: impl Into<String>, field_errors: Vec<FieldError>) -> Self {
        EvaluationError::Validation {
            message: message.into(),
            field_errors,
        }
    }

    /// Field errors of a validation failure, empty for other variants
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            EvaluationError::Validation { field_errors, .. } => field_errors,
            _ => &[],
        }
    }
}

/// Field-specific validation error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Field path (e.g. `training_data[0].text`)
    pub field: String,
    /// Error message
    pub message: String,
}

impl FieldError {
    /// Create a new field error
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// A single classification call that failed.
///
/// Network failures and service-reported errors both land here. During a
/// blind evaluation these are collected per item and never abort the batch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ClassificationError {
    /// Error message
    pub message: String,
    /// HTTP status reported by the service, if any
    pub status_code: Option<u16>,
}

impl ClassificationError {
    /// Create a classification error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: None,
        }
    }
}

impl From<SdkError> for ClassificationError {
    fn from(err: SdkError) -> Self {
        Self {
            status_code: err.status_code(),
            message: err.to_string(),
        }
    }
}
