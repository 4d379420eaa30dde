//! Blind evaluation command

use anyhow::Result;
use nlc_evaluation::{
    write_reports, EvalProgress, EvaluationSummary, Evaluator, EvaluatorConfig, ReportOutcome,
    Top5Mode,
};
use std::path::PathBuf;

use crate::commands::input::{describe, load_training_data, DataSource};
use crate::commands::CommandContext;
use crate::interactive::progress_bar;
use crate::output::{colors, OutputFormat, TableFormatter};

/// Options of a blind evaluation run
#[derive(Debug, Clone)]
pub struct BlindOptions {
    /// Classifier to evaluate
    pub classifier_id: String,
    /// Labeled data
    pub source: DataSource,
    /// CSV report destination
    pub csv_output: Option<PathBuf>,
    /// JSON report destination
    pub json_output: Option<PathBuf>,
    /// In-flight requests; falls back to the configured value
    pub concurrency: Option<usize>,
    /// How the `top5` flag is computed
    pub top5_mode: Top5Mode,
}

/// Classify every labeled example, write the reports and print the accuracy
pub async fn blind(ctx: &CommandContext, options: BlindOptions) -> Result<EvaluationSummary> {
    let examples = load_training_data(&options.source)?
        .into_examples()
        .map_err(describe)?;

    let evaluator = Evaluator::new(
        EvaluatorConfig::default()
            .with_concurrency(options.concurrency.unwrap_or(ctx.config.concurrency))
            .with_top5_mode(options.top5_mode),
    );

    let pb = progress_bar(examples.len() as u64);
    let evaluated = evaluator
        .evaluate_with_progress(&ctx.client, &options.classifier_id, &examples, |event| {
            if let EvalProgress::ItemCompleted { completed, .. } = event {
                pb.set_position(completed as u64);
            }
        })
        .await;
    pb.finish_and_clear();

    let summary = evaluated.map_err(describe)?;

    for failure in &summary.failures {
        eprintln!(
            "{} #{} \"{}\": {}",
            colors::error("error:"),
            failure.index,
            failure.text,
            failure.error
        );
    }

    let outcome = write_reports(
        &summary.results,
        options.csv_output.as_deref(),
        options.json_output.as_deref(),
    )
    .await;
    print_report_outcome(&outcome);

    if ctx.config.output_format == OutputFormat::Table {
        println!("{}", summary_table(&summary)?);
    }
    println!("accuracy: {}", summary.accuracy);

    Ok(summary)
}

fn print_report_outcome(outcome: &ReportOutcome) {
    for path in outcome.written() {
        eprintln!("{} {}", colors::dim("Report written:"), path.display());
    }
    for err in outcome.errors() {
        eprintln!("{} {}", colors::warning("Warning:"), err);
    }
}

fn summary_table(summary: &EvaluationSummary) -> Result<String> {
    let count = |f: fn(&nlc_evaluation::ScoredResult) -> bool| {
        summary.results.iter().filter(|r| f(r)).count().to_string()
    };

    TableFormatter::key_value(vec![
        ("Examples", summary.attempted().to_string()),
        ("Scored", summary.results.len().to_string()),
        ("Failed", summary.failures.len().to_string()),
        ("Exact match", summary.exact_matches().to_string()),
        ("Top 3", count(|r| r.top3)),
        ("Top 5", count(|r| r.top5)),
        ("Match fail", count(|r| r.match_fail)),
    ])
}
