//! Blind evaluation harness.
//!
//! Classifies every labeled example with bounded concurrency and scores the
//! results. Output keeps input order regardless of completion order, and a
//! failing item never aborts the batch.

use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use tracing::{debug, info};

use crate::classify::Classify;
use crate::error::EvaluationError;
use crate::scorer::{score, Top5Mode};
use crate::types::{EvaluationSummary, ItemFailure, LabeledExample, ScoredResult};
use crate::validation::validate_examples;

/// Default number of in-flight classification requests
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Evaluator configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluatorConfig {
    /// Maximum number of classification requests in flight
    pub concurrency: usize,
    /// How the `top5` flag is computed
    pub top5_mode: Top5Mode,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            top5_mode: Top5Mode::default(),
        }
    }
}

impl EvaluatorConfig {
    /// Set the concurrency limit
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Set the top-5 mode
    pub fn with_top5_mode(mut self, top5_mode: Top5Mode) -> Self {
        self.top5_mode = top5_mode;
        self
    }
}

/// Progress events emitted while an evaluation runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum EvalProgress {
    /// Validation passed and classification is about to start
    Started {
        /// Number of examples
        total: usize,
    },
    /// One example finished, successfully or not
    ItemCompleted {
        /// Examples finished so far
        completed: usize,
        /// Number of examples
        total: usize,
        /// Whether the example was classified
        success: bool,
    },
}

/// Runs blind evaluations
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    config: EvaluatorConfig,
}

impl Evaluator {
    /// Create an evaluator; a concurrency of zero is raised to one
    pub fn new(config: EvaluatorConfig) -> Self {
        Self {
            config: EvaluatorConfig {
                concurrency: config.concurrency.max(1),
                ..config
            },
        }
    }

    /// Effective configuration
    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Evaluate `examples` against the classifier `classifier_id`.
    ///
    /// Examples are validated first; a malformed example fails the whole run
    /// before any classification request is sent.
    pub async fn evaluate<C>(
        &self,
        classifier: &C,
        classifier_id: &str,
        examples: &[LabeledExample],
    ) -> Result<EvaluationSummary, EvaluationError>
    where
        C: Classify + ?Sized,
    {
        self.evaluate_with_progress(classifier, classifier_id, examples, |_| {})
            .await
    }

    /// Same as [`evaluate`](Self::evaluate), calling `on_progress` as items
    /// complete.
    pub async fn evaluate_with_progress<C, F>(
        &self,
        classifier: &C,
        classifier_id: &str,
        examples: &[LabeledExample],
        on_progress: F,
    ) -> Result<EvaluationSummary, EvaluationError>
    where
        C: Classify + ?Sized,
        F: Fn(EvalProgress) + Send + Sync,
    {
        validate_examples(examples)?;

        let start_time = Instant::now();
        let total = examples.len();
        let top5_mode = self.config.top5_mode;

        info!(
            classifier_id,
            total,
            concurrency = self.config.concurrency,
            %top5_mode,
            "Starting blind evaluation"
        );
        on_progress(EvalProgress::Started { total });

        let completed = AtomicUsize::new(0);
        let completed = &completed;
        let on_progress = &on_progress;

        let outcomes: Vec<Result<ScoredResult, ItemFailure>> =
            stream::iter(examples.iter().enumerate())
                .map(|(index, example)| async move {
                    let outcome = match classifier.classify(classifier_id, &example.text).await {
                        Ok(result) => {
                            debug!(index, top_class = %result.top_class, "Classified example");
                            Ok(score(example, result, top5_mode))
                        }
                        Err(error) => {
                            debug!(index, text = %example.text, error = %error, "Classification failed");
                            Err(ItemFailure {
                                index,
                                text: example.text.clone(),
                                error,
                            })
                        }
                    };

                    let count = completed.fetch_add(1, Ordering::SeqCst) + 1;
                    on_progress(EvalProgress::ItemCompleted {
                        completed: count,
                        total,
                        success: outcome.is_ok(),
                    });

                    outcome
                })
                .buffered(self.config.concurrency)
                .collect()
                .await;

        let summary = EvaluationSummary::from_outcomes(outcomes);

        info!(
            scored = summary.results.len(),
            failed = summary.failures.len(),
            accuracy = summary.accuracy,
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "Blind evaluation finished"
        );

        Ok(summary)
    }
}
