//! End-to-end analyzer behaviour against mock models


use feedcheck_classifiers::{AuthenticityClassifier, Classifier, ModelSlot};
use feedcheck_core::{
    AnalysisError, Classification, Language, LanguageSelection, Sentiment,
};
use feedcheck_review::{
    read_feedback_texts, to_csv_string, FeedbackAnalyzer, ReviewFilter, ReviewStore,
};
use mock_models::{english_only, models_with, ready_models, FixedModel, FlakyModel};
use proptest::prelude::*;
use std::sync::Arc;

const ENGLISH: LanguageSelection = LanguageSelection::Fixed(Language::English);

#[tokio::test]
async fn test_english_submission() {
    let models = ready_models();
    let analyzer = FeedbackAnalyzer::new(models.classifier);
    let mut store = ReviewStore::new();

    let record = analyzer
        .analyze(&mut store, "This product changed my life, highly recommend!", ENGLISH)
        .await
        .unwrap();

    assert_eq!(record.id, 1);
    assert_eq!(record.language, Language::English);
    assert_eq!(record.classification, Classification::Genuine);
    assert_eq!(record.confidence, "87%");
    assert_eq!(record.sentiment, Sentiment::Positive);
    let polarity: f64 = record.polarity.parse().unwrap();
    assert!(polarity > 0.2);
    assert_eq!(record.polarity.split('.').nth(1).map(str::len), Some(2));
    assert_eq!(record.timestamp.len(), "2024-01-01 10:00".len());

    assert_eq!(store.records(), [record]);
    assert_eq!(models.english.calls(), 1);
    assert_eq!(models.multilingual.calls(), 0);
}

#[tokio::test]
async fn test_negative_english_label_marks_fake() {
    let models = models_with(
        FixedModel::new("sst2", "NEGATIVE", 0.99),
        FixedModel::new("nlptown", "3 stars", 0.5),
    );
    let analyzer = FeedbackAnalyzer::new(models.classifier);
    let mut store = ReviewStore::new();

    let record = analyzer
        .analyze(&mut store, "Terrible, it broke after a day", ENGLISH)
        .await
        .unwrap();

    assert_eq!(record.classification, Classification::Fake);
    assert_eq!(record.sentiment, Sentiment::Negative);
}

#[tokio::test]
async fn test_duplicate_submission() {
    let analyzer = FeedbackAnalyzer::new(ready_models().classifier);
    let mut store = ReviewStore::new();
    let text = "Delivery was on time and the box was intact";

    analyzer.analyze(&mut store, text, ENGLISH).await.unwrap();
    let err = analyzer.analyze(&mut store, text, ENGLISH).await.unwrap_err();

    assert_eq!(err, AnalysisError::DuplicateSubmission);
    assert_eq!(err.to_string(), "This feedback has already been analyzed.");
    assert_eq!(store.len(), 1);

    // Not byte-identical, so not a duplicate
    analyzer
        .analyze(&mut store, "Delivery was on time and the box was intact ", ENGLISH)
        .await
        .unwrap();
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn test_reset_then_resubmit() {
    let analyzer = FeedbackAnalyzer::new(ready_models().classifier);
    let mut store = ReviewStore::new();

    analyzer.analyze(&mut store, "first", ENGLISH).await.unwrap();
    analyzer.analyze(&mut store, "second", ENGLISH).await.unwrap();
    assert!(analyzer.analyze(&mut store, "first", ENGLISH).await.is_err());

    store.reset();
    assert!(store.is_empty());
    assert_eq!(store.seen_count(), 0);

    let record = analyzer.analyze(&mut store, "first", ENGLISH).await.unwrap();
    assert_eq!(record.id, 1);
}

#[tokio::test]
async fn test_empty_input_rejected_before_pipeline() {
    let models = ready_models();
    let analyzer = FeedbackAnalyzer::new(models.classifier);
    let mut store = ReviewStore::new();

    for text in ["", "   ", "\n\t"] {
        let err = analyzer
            .analyze(&mut store, text, LanguageSelection::Auto)
            .await
            .unwrap_err();
        assert_eq!(err, AnalysisError::empty_input());
    }

    assert!(store.is_empty());
    assert_eq!(models.english.calls(), 0);
}

#[tokio::test]
async fn test_multilingual_submission_uses_one_model_call() {
    let models = ready_models();
    let analyzer = FeedbackAnalyzer::new(models.classifier);
    let mut store = ReviewStore::new();

    let record = analyzer
        .analyze(
            &mut store,
            "यह उत्पाद बहुत अच्छा है और मैं इसे सभी को सुझाता हूँ, सेवा भी शानदार थी",
            LanguageSelection::Auto,
        )
        .await
        .unwrap();

    assert_eq!(record.language, Language::Hindi);
    assert_eq!(record.classification, Classification::Genuine);
    assert_eq!(record.confidence, "72%");
    assert_eq!(record.sentiment, Sentiment::Positive);
    assert_eq!(record.polarity, "0.50");
    assert_eq!(models.multilingual.calls(), 1);
    assert_eq!(models.english.calls(), 0);
}

#[tokio::test]
async fn test_low_multilingual_score_is_fake() {
    let models = models_with(
        FixedModel::new("sst2", "POSITIVE", 0.9),
        FixedModel::new("nlptown", "3 stars", 0.41),
    );
    let analyzer = FeedbackAnalyzer::new(models.classifier);
    let mut store = ReviewStore::new();

    let record = analyzer
        .analyze(&mut store, "ఏదో", LanguageSelection::Fixed(Language::Telugu))
        .await
        .unwrap();

    assert_eq!(record.classification, Classification::Fake);
    assert_eq!(record.sentiment, Sentiment::Neutral);
    assert_eq!(record.polarity, "0.00");
}

#[tokio::test]
async fn test_model_unavailable() {
    let analyzer = FeedbackAnalyzer::new(english_only());
    let mut store = ReviewStore::new();

    let err = analyzer
        .analyze(&mut store, "ठीक है", LanguageSelection::Fixed(Language::Hindi))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        AnalysisError::ModelUnavailable {
            language: Language::Hindi
        }
    );
    assert_eq!(err.to_string(), "Multilingual analysis not available");
    assert!(store.is_empty());

    // English still works
    analyzer.analyze(&mut store, "works", ENGLISH).await.unwrap();
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_english_model_unavailable() {
    let analyzer = FeedbackAnalyzer::new(AuthenticityClassifier::new(
        ModelSlot::unavailable("no weights"),
        ModelSlot::unavailable("no weights"),
    ));
    let mut store = ReviewStore::new();

    let err = analyzer.analyze(&mut store, "hello", ENGLISH).await.unwrap_err();
    assert_eq!(err.to_string(), "English analysis not available");
}

#[tokio::test]
async fn test_exception_leaves_store_and_hashes_untouched() {
    let flaky: Arc<dyn Classifier> = Arc::new(FlakyModel::new(
        "BOOM",
        FixedModel::new("sst2", "POSITIVE", 0.9),
    ));
    let analyzer = FeedbackAnalyzer::new(AuthenticityClassifier::from_models(
        flaky,
        Arc::new(FixedModel::new("nlptown", "5 stars", 0.9)),
    ));
    let mut store = ReviewStore::new();

    let err = analyzer.analyze(&mut store, "BOOM goes the review", ENGLISH).await.unwrap_err();
    assert_eq!(err.kind(), "exception");
    assert!(err.to_string().starts_with("Error analyzing feedback: "));
    assert!(store.is_empty());
    assert_eq!(store.seen_count(), 0);
}

#[tokio::test]
async fn test_batch_reports_each_row() {
    let flaky: Arc<dyn Classifier> = Arc::new(FlakyModel::new(
        "BOOM",
        FixedModel::new("sst2", "POSITIVE", 0.9),
    ));
    let analyzer = FeedbackAnalyzer::new(AuthenticityClassifier::from_models(
        flaky,
        Arc::new(FixedModel::new("nlptown", "5 stars", 0.9)),
    ));
    let mut store = ReviewStore::new();

    let report = analyzer
        .analyze_batch(
            &mut store,
            ["good one", "BOOM", "good one", "another good one", " "],
            ENGLISH,
        )
        .await
        .unwrap();

    assert_eq!(report.total, 5);
    let ids: Vec<usize> = report.stored.iter().map(|r| r.id).collect();
    assert_eq!(ids, [1, 2]);

    let failures: Vec<(usize, &str)> = report.failures.iter().map(|f| (f.row, f.kind)).collect();
    assert_eq!(
        failures,
        [(2, "exception"), (3, "duplicate"), (5, "invalid_input")]
    );
    assert_eq!(report.first_failure().map(|f| f.row), Some(2));
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn test_batch_limit() {
    let analyzer = FeedbackAnalyzer::new(ready_models().classifier).with_max_batch_rows(2);
    let mut store = ReviewStore::new();

    let err = analyzer
        .analyze_batch(&mut store, ["a", "b", "c"], ENGLISH)
        .await
        .unwrap_err();
    assert!(matches!(err, AnalysisError::InputValidation(_)));
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_upload_to_filtered_export() {
    let models = models_with(
        FixedModel::new("sst2", "NEGATIVE", 0.91),
        FixedModel::new("nlptown", "1 star", 0.8),
    );
    let analyzer = FeedbackAnalyzer::new(models.classifier);
    let mut store = ReviewStore::new();

    let upload = "id,feedback\n1,Awful experience with support\n2,\n3,\"बहुत खराब उत्पाद है, पैसे की बर्बादी, कभी मत खरीदना\"\n";
    let texts = read_feedback_texts(upload.as_bytes()).unwrap();
    let report = analyzer
        .analyze_batch(&mut store, &texts, LanguageSelection::Auto)
        .await
        .unwrap();
    assert_eq!(report.stored.len(), 2);

    let filter = ReviewFilter::parse(Some("All"), Some("All"), Some("Hindi")).unwrap();
    let csv = to_csv_string(store.filter(&filter)).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with("2,"));
    assert!(lines[1].contains(",Hindi,GENUINE,80%,NEGATIVE,-1.00,"));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn stored_count_equals_distinct_texts(texts in proptest::collection::vec("[a-c]{1,2}", 0..20)) {
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let analyzer = FeedbackAnalyzer::new(ready_models().classifier);
        let mut store = ReviewStore::new();

        let report = runtime
            .block_on(analyzer.analyze_batch(&mut store, &texts, ENGLISH))
            .unwrap();

        let distinct: std::collections::HashSet<&String> = texts.iter().collect();
        prop_assert_eq!(store.len(), distinct.len());
        prop_assert_eq!(report.stored.len() + report.failures.len(), texts.len());

        let ids: Vec<usize> = store.records().iter().map(|r| r.id).collect();
        let expected: Vec<usize> = (1..=distinct.len()).collect();
        prop_assert_eq!(ids, expected);
    }
}
