//! Authenticity dispatch tests against mock models


use feedcheck_classifiers::{AuthenticityClassifier, Classifier, ModelSlot, SentimentScorer};
use feedcheck_core::{Classification, Error, Language, Sentiment};
use mock_classifiers::{FailingClassifier, MockClassifier};
use std::sync::Arc;

fn both_ready(
    english: MockClassifier,
    multilingual: MockClassifier,
) -> (AuthenticityClassifier, Arc<MockClassifier>, Arc<MockClassifier>) {
    let english = Arc::new(english);
    let multilingual = Arc::new(multilingual);
    let classifier = AuthenticityClassifier::from_models(
        english.clone() as Arc<dyn Classifier>,
        multilingual.clone() as Arc<dyn Classifier>,
    );
    (classifier, english, multilingual)
}

#[tokio::test]
async fn test_english_negative_label_is_fake() {
    let (classifier, english, multilingual) = both_ready(
        MockClassifier::english().with_label("NEGATIVE").with_score(0.97),
        MockClassifier::multilingual(),
    );

    let verdict = classifier
        .classify("Worst purchase ever", Language::English)
        .await
        .unwrap();

    assert_eq!(verdict.classification, Classification::Fake);
    assert!((verdict.confidence - 0.97).abs() < f32::EPSILON);
    assert!(verdict.rating.is_none());
    assert_eq!(english.call_count(), 1);
    assert_eq!(multilingual.call_count(), 0);
}

#[tokio::test]
async fn test_english_positive_label_is_genuine() {
    let (classifier, _, _) = both_ready(
        MockClassifier::english().with_label("POSITIVE").with_score(0.55),
        MockClassifier::multilingual(),
    );

    let verdict = classifier
        .classify("Pretty decent", Language::English)
        .await
        .unwrap();
    assert_eq!(verdict.classification, Classification::Genuine);
}

#[tokio::test]
async fn test_multilingual_threshold() {
    let (classifier, english, multilingual) = both_ready(
        MockClassifier::english(),
        MockClassifier::multilingual()
            .with_response_for("कम", "4 stars", 0.59)
            .with_response_for("ठीक", "4 stars", 0.6),
    );

    let low = classifier.classify("कम", Language::Hindi).await.unwrap();
    assert_eq!(low.classification, Classification::Fake);

    let at_cutoff = classifier.classify("ठीक", Language::Telugu).await.unwrap();
    assert_eq!(at_cutoff.classification, Classification::Genuine);
    assert_eq!(at_cutoff.rating.map(|r| r.stars()), Some(4));

    assert_eq!(english.call_count(), 0);
    assert_eq!(multilingual.call_count(), 2);
}

#[tokio::test]
async fn test_rating_feeds_sentiment_without_second_call() {
    let (classifier, _, multilingual) = both_ready(
        MockClassifier::english(),
        MockClassifier::multilingual().with_label("2 stars").with_score(0.8),
    );
    let scorer = SentimentScorer::new();

    let text = "సేవ బాగాలేదు";
    let verdict = classifier.classify(text, Language::Telugu).await.unwrap();
    let score = scorer.score(text, Language::Telugu, verdict.rating);

    assert_eq!(score.sentiment, Sentiment::Negative);
    assert_eq!(score.polarity_label(), "-0.50");
    assert_eq!(multilingual.call_count(), 1);
}

#[tokio::test]
async fn test_unparseable_star_label_is_error() {
    let (classifier, _, _) = both_ready(
        MockClassifier::english(),
        MockClassifier::multilingual().with_label("POSITIVE"),
    );

    let err = classifier.classify("कुछ", Language::Hindi).await.unwrap_err();
    assert!(matches!(err, Error::Classifier(_)));
}

#[tokio::test]
async fn test_unavailable_slot() {
    let classifier = AuthenticityClassifier::new(
        ModelSlot::Ready(Arc::new(MockClassifier::english()) as Arc<dyn Classifier>),
        ModelSlot::unavailable("weights missing"),
    );

    assert!(classifier.english_ready());
    assert!(!classifier.multilingual_ready());

    let err = classifier.classify("कुछ", Language::Hindi).await.unwrap_err();
    assert!(matches!(err, Error::ModelUnavailable(_)));

    assert!(classifier.classify("fine", Language::English).await.is_ok());
}

#[tokio::test]
async fn test_model_failure_propagates() {
    let classifier = AuthenticityClassifier::from_models(
        Arc::new(FailingClassifier::new("broken").with_error("tensor shape mismatch")),
        Arc::new(MockClassifier::multilingual()),
    );

    let err = classifier.classify("text", Language::English).await.unwrap_err();
    assert!(err.to_string().contains("tensor shape mismatch"));
}

#[tokio::test]
async fn test_verdict_carries_model_latency() {
    let (classifier, _, _) = both_ready(MockClassifier::english(), MockClassifier::multilingual());

    let english = classifier.classify("Solid build", Language::English).await.unwrap();
    let hindi = classifier.classify("अच्छा है", Language::Hindi).await.unwrap();

    assert_eq!(english.model_latency_us, 100);
    assert_eq!(hindi.model_latency_us, 100);
}
