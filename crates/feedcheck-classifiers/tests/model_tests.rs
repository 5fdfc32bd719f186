//! Tests against the real pretrained models.
//!
//! These download weights from the HuggingFace Hub and only run when
//! `FEEDCHECK_RUN_MODEL_TESTS=1`.

#![cfg(feature = "ml-models")]

use feedcheck_classifiers::{load_authenticity_classifier, load_slot, ModelRegistry};
use feedcheck_core::{Classification, Language};

fn model_tests_enabled() -> bool {
    std::env::var("FEEDCHECK_RUN_MODEL_TESTS")
        .ok()
        .is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

fn registry() -> ModelRegistry {
    ModelRegistry::from_yaml(
        r#"
version: "1.0"
models:
  english:
    name: "distilbert-base-uncased-finetuned-sst-2-english"
    source:
      type: huggingface
      repo: "distilbert-base-uncased-finetuned-sst-2-english"
    architecture:
      type: distil-bert-sequence-classification
      num_labels: 2
      labels: ["NEGATIVE", "POSITIVE"]
  multilingual:
    name: "nlptown/bert-base-multilingual-uncased-sentiment"
    source:
      type: huggingface
      repo: "nlptown/bert-base-multilingual-uncased-sentiment"
    architecture:
      type: bert-sequence-classification
      num_labels: 5
  missing:
    source:
      type: local
      path: "./models/does-not-exist"
    architecture:
      type: bert-sequence-classification
      num_labels: 5
"#,
    )
    .unwrap()
}

#[test]
fn test_missing_local_model_is_unavailable() {
    assert!(!load_slot(&registry(), "missing").is_ready());
}

#[tokio::test]
async fn test_english_model_labels() {
    if !model_tests_enabled() {
        return;
    }

    let classifier = load_authenticity_classifier(&registry(), "english", "missing");
    assert!(classifier.english_ready());

    let genuine = classifier
        .classify(
            "I absolutely love this and it exceeded my expectations.",
            Language::English,
        )
        .await
        .unwrap();
    assert_eq!(genuine.classification, Classification::Genuine);
    assert!(genuine.confidence > 0.9);

    let fake = classifier
        .classify("This was a terrible, useless waste of money.", Language::English)
        .await
        .unwrap();
    assert_eq!(fake.classification, Classification::Fake);
}

#[tokio::test]
async fn test_multilingual_model_star_rating() {
    if !model_tests_enabled() {
        return;
    }

    let classifier = load_authenticity_classifier(&registry(), "missing", "multilingual");
    assert!(classifier.multilingual_ready());

    let verdict = classifier
        .classify(
            "यह उत्पाद बहुत अच्छा है, मुझे बहुत पसंद आया",
            Language::Hindi,
        )
        .await
        .unwrap();

    let stars = verdict.rating.map(|r| r.stars()).unwrap();
    assert!((1..=5).contains(&stars));
    assert!(stars >= 4, "expected a positive rating, got {stars}");
}
