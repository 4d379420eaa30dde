//! Validation of labeled data before any classification call is made.

use validator::Validate;

use crate::error::{EvaluationError, FieldError};
use crate::types::LabeledExample;

/// Validate every example, collecting all problems.
///
/// Fails when the list is empty or when any example has an empty `text` or
/// an empty `classes` list. Field paths are reported as
/// `training_data[<index>].<field>`.
pub fn validate_examples(examples: &[LabeledExample]) -> Result<(), EvaluationError> {
    if examples.is_empty() {
        return Err(EvaluationError::validation(
            "training_data must contain at least one example",
        ));
    }

    let field_errors: Vec<FieldError> = examples
        .iter()
        .enumerate()
        .flat_map(|(index, example)| example_errors(index, example))
        .collect();

    if field_errors.is_empty() {
        return Ok(());
    }

    let invalid = {
        let mut indices: Vec<&str> = field_errors
            .iter()
            .filter_map(|e| e.field.split('.').next())
            .collect();
        indices.dedup();
        indices.len()
    };

    Err(EvaluationError::validation_with_fields(
        format!("{} of {} examples are malformed", invalid, examples.len()),
        field_errors,
    ))
}

fn example_errors(index: usize, example: &LabeledExample) -> Vec<FieldError> {
    let errors = match example.validate() {
        Ok(()) => return Vec::new(),
        Err(errors) => errors,
    };

    let mut field_errors: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                FieldError::new(format!("training_data[{}].{}", index, field), message)
            })
        })
        .collect();

    field_errors.sort_by(|a, b| a.field.cmp(&b.field));
    field_errors
}
