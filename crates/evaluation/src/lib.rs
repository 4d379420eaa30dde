//! Blind evaluation of a trained classifier.
//!
//! This crate scores a classifier against labeled examples it was not
//! necessarily trained on:
//! - Input validation of labeled data
//! - Per-example scoring (exact match, top-3, top-5, match failure)
//! - Bounded, order-preserving fan-out of classification calls
//! - CSV and JSON reports of the scored results

pub mod classify;
pub mod error;
pub mod harness;
pub mod report;
pub mod scorer;
pub mod serialization;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use classify::Classify;
pub use error::{ClassificationError, EvaluationError, FieldError};
pub use harness::{EvalProgress, Evaluator, EvaluatorConfig, DEFAULT_CONCURRENCY};
pub use report::{to_csv, to_json, write_reports, ReportOutcome, CSV_HEADER};
pub use scorer::{score, Top5Mode};
pub use types::{ClassMatch, EvaluationSummary, ItemFailure, LabeledExample, ScoredResult, TrainingData};
pub use validation::validate_examples;

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, EvaluationError>;
