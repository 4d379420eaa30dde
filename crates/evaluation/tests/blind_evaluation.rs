//! Blind evaluation tests against in-memory classifiers.

use async_trait::async_trait;
use nlc_evaluation::{
    write_reports, ClassificationError, Classify, EvalProgress, EvaluationError, Evaluator,
    EvaluatorConfig, LabeledExample, ScoredResult, Top5Mode,
};
use nlc_sdk::{ClassificationResult, ClassifiedClass};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Answers from a fixed table keyed by text; unknown texts fail.
#[derive(Default)]
struct TableClassifier {
    answers: HashMap<String, Vec<&'static str>>,
    failing: Vec<String>,
    delays_ms: HashMap<String, u64>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    seen_ids: Mutex<Vec<String>>,
}

impl TableClassifier {
    fn answer(mut self, text: &str, ranking: Vec<&'static str>) -> Self {
        self.answers.insert(text.to_string(), ranking);
        self
    }

    fn fail(mut self, text: &str) -> Self {
        self.failing.push(text.to_string());
        self
    }

    fn delay(mut self, text: &str, ms: u64) -> Self {
        self.delays_ms.insert(text.to_string(), ms);
        self
    }
}

#[async_trait]
impl Classify for TableClassifier {
    async fn classify(
        &self,
        classifier_id: &str,
        text: &str,
    ) -> Result<ClassificationResult, ClassificationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen_ids.lock().unwrap().push(classifier_id.to_string());

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let delay = self.delays_ms.get(text).copied().unwrap_or(1);
        tokio::time::sleep(Duration::from_millis(delay)).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing.iter().any(|t| t == text) {
            return Err(ClassificationError::new("connection reset by peer"));
        }

        let ranking = self
            .answers
            .get(text)
            .ok_or_else(|| ClassificationError::new(format!("no answer for {text}")))?;

        let mut result = ClassificationResult::from_ranked(
            ranking
                .iter()
                .enumerate()
                .map(|(i, name)| ClassifiedClass::new(*name, 1.0 / (i as f64 + 2.0)))
                .collect(),
        );
        result.classifier_id = Some(classifier_id.to_string());
        result.text = Some(text.to_string());
        Ok(result)
    }
}

fn evaluator() -> Evaluator {
    Evaluator::new(EvaluatorConfig::default())
}

#[tokio::test]
async fn single_exact_match_scores_full_accuracy() {
    let classifier = TableClassifier::default().answer("a", vec!["X"]);
    let examples = vec![LabeledExample::new("a", ["X"])];

    let summary = evaluator()
        .evaluate(&classifier, "clf-1", &examples)
        .await
        .unwrap();

    assert_eq!(summary.results.len(), 1);
    assert!(summary.results[0].exact_match);
    assert_eq!(summary.accuracy, 1.0);
    assert!(summary.failures.is_empty());
    assert_eq!(summary.results[0].classifier_id.as_deref(), Some("clf-1"));
}

#[tokio::test]
async fn all_misses_score_zero_accuracy() {
    let classifier = TableClassifier::default()
        .answer("a", vec!["Z", "X"])
        .answer("b", vec!["Z", "W"]);
    let examples = vec![
        LabeledExample::new("a", ["X"]),
        LabeledExample::new("b", ["Y"]),
    ];

    let summary = evaluator()
        .evaluate(&classifier, "clf-1", &examples)
        .await
        .unwrap();

    assert_eq!(summary.accuracy, 0.0);
    assert!(!summary.results[0].match_fail, "X is ranked second");
    assert!(summary.results[1].match_fail, "Y is not ranked at all");
}

#[tokio::test]
async fn failed_item_is_excluded_and_reported() {
    let classifier = TableClassifier::default()
        .answer("a", vec!["X"])
        .fail("b");
    let examples = vec![
        LabeledExample::new("a", ["X"]),
        LabeledExample::new("b", ["Y"]),
    ];

    let summary = evaluator()
        .evaluate(&classifier, "clf-1", &examples)
        .await
        .unwrap();

    assert_eq!(summary.results.len(), 1);
    assert_eq!(summary.results[0].text, "a");
    assert_eq!(summary.accuracy, 1.0);

    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].index, 1);
    assert_eq!(summary.failures[0].text, "b");
    assert_eq!(
        summary.failures[0].error.to_string(),
        "connection reset by peer"
    );
    assert_eq!(summary.attempted(), 2);
}

#[tokio::test]
async fn every_item_failing_yields_zero_accuracy() {
    let classifier = TableClassifier::default().fail("a").fail("b");
    let examples = vec![
        LabeledExample::new("a", ["X"]),
        LabeledExample::new("b", ["Y"]),
    ];

    let summary = evaluator()
        .evaluate(&classifier, "clf-1", &examples)
        .await
        .unwrap();

    assert!(summary.results.is_empty());
    assert_eq!(summary.failures.len(), 2);
    assert_eq!(summary.accuracy, 0.0);
}

#[tokio::test]
async fn results_keep_input_order_under_reordered_completion() {
    let classifier = TableClassifier::default()
        .answer("slow", vec!["A"])
        .answer("medium", vec!["B"])
        .answer("fast", vec!["C"])
        .delay("slow", 60)
        .delay("medium", 30)
        .delay("fast", 1);
    let examples = vec![
        LabeledExample::new("slow", ["A"]),
        LabeledExample::new("medium", ["B"]),
        LabeledExample::new("fast", ["C"]),
    ];

    let summary = evaluator()
        .evaluate(&classifier, "clf-1", &examples)
        .await
        .unwrap();

    let texts: Vec<&str> = summary.results.iter().map(|r| r.text.as_str()).collect();
    assert_eq!(texts, vec!["slow", "medium", "fast"]);
}

#[tokio::test]
async fn concurrency_limit_is_respected() {
    let mut classifier = TableClassifier::default();
    let mut examples = Vec::new();
    for i in 0..12 {
        let text = format!("item-{i}");
        classifier = classifier.answer(&text, vec!["X"]).delay(&text, 10);
        examples.push(LabeledExample::new(text, ["X"]));
    }

    let evaluator = Evaluator::new(EvaluatorConfig::default().with_concurrency(3));
    let summary = evaluator
        .evaluate(&classifier, "clf-1", &examples)
        .await
        .unwrap();

    assert_eq!(summary.results.len(), 12);
    assert_eq!(classifier.calls.load(Ordering::SeqCst), 12);
    let max = classifier.max_in_flight.load(Ordering::SeqCst);
    assert!(max <= 3, "saw {max} concurrent calls");
    assert!(max >= 2, "calls were not issued concurrently");
}

#[tokio::test]
async fn malformed_example_fails_before_any_call() {
    let classifier = TableClassifier::default().answer("a", vec!["X"]);
    let examples: Vec<LabeledExample> =
        serde_json::from_str(r#"[{"text": "a", "classes": ["X"]}, {"text": "b"}]"#).unwrap();

    let err = evaluator()
        .evaluate(&classifier, "clf-1", &examples)
        .await
        .unwrap_err();

    assert!(matches!(err, EvaluationError::Validation { .. }));
    assert_eq!(err.field_errors()[0].field, "training_data[1].classes");
    assert_eq!(classifier.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn classifier_id_is_forwarded() {
    let classifier = TableClassifier::default()
        .answer("a", vec!["X"])
        .answer("b", vec!["Y"]);
    let examples = vec![
        LabeledExample::new("a", ["X"]),
        LabeledExample::new("b", ["Y"]),
    ];

    evaluator()
        .evaluate(&classifier, "weather-nlc-7", &examples)
        .await
        .unwrap();

    let ids = classifier.seen_ids.lock().unwrap().clone();
    assert_eq!(ids, vec!["weather-nlc-7", "weather-nlc-7"]);
}

#[tokio::test]
async fn top5_mode_is_applied() {
    let classifier = TableClassifier::default().answer("a", vec!["A", "B", "C", "X"]);
    let examples = vec![LabeledExample::new("a", ["X"])];

    let literal = Evaluator::new(EvaluatorConfig::default().with_top5_mode(Top5Mode::Literal))
        .evaluate(&classifier, "clf-1", &examples)
        .await
        .unwrap();
    assert!(!literal.results[0].top5);

    let corrected = evaluator()
        .evaluate(&classifier, "clf-1", &examples)
        .await
        .unwrap();
    assert!(corrected.results[0].top5);
}

#[tokio::test]
async fn progress_events_cover_every_item() {
    let classifier = TableClassifier::default()
        .answer("a", vec!["X"])
        .fail("b")
        .answer("c", vec!["Z"]);
    let examples = vec![
        LabeledExample::new("a", ["X"]),
        LabeledExample::new("b", ["Y"]),
        LabeledExample::new("c", ["Z"]),
    ];

    let events = Mutex::new(Vec::new());
    evaluator()
        .evaluate_with_progress(&classifier, "clf-1", &examples, |event| {
            events.lock().unwrap().push(event);
        })
        .await
        .unwrap();

    let events = events.into_inner().unwrap();
    assert_eq!(events[0], EvalProgress::Started { total: 3 });
    assert_eq!(events.len(), 4);

    let failures = events
        .iter()
        .filter(|e| matches!(e, EvalProgress::ItemCompleted { success: false, .. }))
        .count();
    assert_eq!(failures, 1);
    assert!(matches!(
        events[3],
        EvalProgress::ItemCompleted { completed: 3, total: 3, .. }
    ));
}

#[tokio::test]
async fn reports_round_trip_through_csv_and_json() {
    let classifier = TableClassifier::default()
        .answer("How \"hot\", is it?", vec!["temperature", "conditions"])
        .answer("Will it rain", vec!["temperature", "conditions"])
        .answer("is it hot", vec!["weather, temperature", "conditions"])
        .answer("say \"when\"", vec!["\"quoted\" class", "conditions"]);
    let examples = vec![
        LabeledExample::new("How \"hot\", is it?", ["temperature"]),
        LabeledExample::new("Will it rain", ["conditions"]),
        LabeledExample::new("is it hot", ["weather, temperature"]),
        LabeledExample::new("say \"when\"", ["conditions"]),
    ];

    let summary = evaluator()
        .evaluate(&classifier, "clf-1", &examples)
        .await
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("results.csv");
    let json_path = dir.path().join("results.json");

    let outcome = write_reports(&summary.results, Some(&csv_path), Some(&json_path)).await;
    assert!(outcome.is_ok());
    assert_eq!(outcome.written().len(), 2);

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(&csv_path)
        .unwrap();
    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(
        headers,
        vec!["text", "top_class", "exact_match", "top_3", "top_5", "match_fail"]
    );

    let rows: Vec<Vec<String>> = reader
        .records()
        .map(|r| r.unwrap().iter().map(String::from).collect())
        .collect();
    assert_eq!(rows.len(), summary.results.len());
    assert_eq!(rows[2][1], "weather, temperature");
    assert_eq!(rows[3][1], "\"quoted\" class");

    for (row, result) in rows.iter().zip(&summary.results) {
        let flag = |b: bool| if b { "1" } else { "0" }.to_string();
        assert_eq!(
            row,
            &vec![
                result.text.clone(),
                result.top_class.clone(),
                flag(result.exact_match),
                flag(result.top3),
                flag(result.top5),
                flag(result.match_fail),
            ]
        );
    }

    let json = std::fs::read_to_string(&json_path).unwrap();
    let parsed: Vec<ScoredResult> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, summary.results);
}

#[tokio::test]
async fn report_write_failures_are_independent() {
    let dir = tempfile::tempdir().unwrap();
    let bad_csv = dir.path().join("missing-dir").join("results.csv");
    let good_json = dir.path().join("results.json");

    let outcome = write_reports(&[], Some(&bad_csv), Some(&good_json)).await;

    assert!(!outcome.is_ok());
    assert!(matches!(
        outcome.csv,
        Some(Err(EvaluationError::Io { .. }))
    ));
    assert!(matches!(outcome.json, Some(Ok(_))));
    assert_eq!(std::fs::read_to_string(&good_json).unwrap().trim(), "[]");
}

#[tokio::test]
async fn no_reports_requested_writes_nothing() {
    let outcome = write_reports(&[], None, None).await;
    assert!(outcome.csv.is_none());
    assert!(outcome.json.is_none());
    assert!(outcome.is_ok());
}

#[derive(Clone, Default)]
struct CapturedLog(Arc<Mutex<Vec<u8>>>);

impl std::io::Write for CapturedLog {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn item_and_report_failures_stay_out_of_warn_output() {
    let log = CapturedLog::default();
    let writer = log.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let classifier = TableClassifier::default().answer("a", vec!["X"]).fail("b");
    let examples = vec![
        LabeledExample::new("a", ["X"]),
        LabeledExample::new("b", ["Y"]),
    ];
    let summary = evaluator()
        .evaluate(&classifier, "clf-1", &examples)
        .await
        .unwrap();
    assert_eq!(summary.failures.len(), 1);

    let dir = tempfile::tempdir().unwrap();
    let bad_csv = dir.path().join("missing-dir").join("results.csv");
    let outcome = write_reports(&summary.results, Some(&bad_csv), None).await;
    assert!(!outcome.is_ok());

    let output = String::from_utf8(log.0.lock().unwrap().clone()).unwrap();
    assert!(output.is_empty(), "unexpected warnings: {output}");
}
