//! Classifier management commands

use anyhow::{Context, Result};
use tracing::info;

use crate::commands::input::{describe, load_training_data, DataSource};
use crate::commands::CommandContext;
use crate::interactive::spinner;
use crate::output::colors;

/// Create and train a classifier from labeled data
pub async fn create(ctx: &CommandContext, source: DataSource) -> Result<()> {
    let request = load_training_data(&source)?
        .into_create_request()
        .map_err(describe)?;

    info!(
        examples = request.training_data.len(),
        language = %request.language,
        "Creating classifier"
    );

    let sp = spinner("Uploading training data...");
    let created = ctx.client.classifiers().create(&request).await;
    sp.finish_and_clear();

    let classifier = created.context("Failed to create classifier")?;
    ctx.print(&classifier)
}

/// Show the training status of a classifier
pub async fn status(ctx: &CommandContext, classifier_id: String) -> Result<()> {
    let sp = spinner("Fetching classifier status...");
    let status = ctx.client.classifiers().status(&classifier_id).await;
    sp.finish_and_clear();

    ctx.print(&status?)
}

/// Classify a single phrase
pub async fn classify(ctx: &CommandContext, classifier_id: String, text: String) -> Result<()> {
    let sp = spinner("Classifying...");
    let result = ctx.client.classifiers().classify(&classifier_id, &text).await;
    sp.finish_and_clear();

    ctx.print(&result?)
}

/// List the classifiers of the account
pub async fn list(ctx: &CommandContext) -> Result<()> {
    let sp = spinner("Fetching classifiers...");
    let list = ctx.client.classifiers().list().await;
    sp.finish_and_clear();

    let list = list?;
    if list.is_empty() && ctx.config.output_format != crate::output::OutputFormat::Json {
        println!("{}", colors::warning("No classifiers found."));
        return Ok(());
    }

    ctx.print(&list)
}

/// Delete a classifier
pub async fn delete(ctx: &CommandContext, classifier_id: String) -> Result<()> {
    let sp = spinner("Deleting classifier...");
    let response = ctx.client.classifiers().remove(&classifier_id).await;
    sp.finish_and_clear();

    let response = response?;
    if is_empty_ack(&response) {
        println!(
            "{}",
            colors::success(&format!("Classifier '{}' deleted", classifier_id))
        );
        return Ok(());
    }

    ctx.print(&response)
}

/// The service acknowledges a deletion with an empty object
fn is_empty_ack(response: &serde_json::Value) -> bool {
    response.as_object().map_or(false, |o| o.is_empty())
}
