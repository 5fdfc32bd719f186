//! Feedback analysis orchestration
//!
//! One submission runs dedup check, language resolution, authenticity
//! classification and sentiment scoring, then appends a record. A rejection
//! at any step leaves the store untouched.

use crate::store::ReviewStore;
use feedcheck_classifiers::{AuthenticityClassifier, LanguageDetector, SentimentScorer};
use feedcheck_core::{
    feedback_hash, format_confidence, minute_timestamp, AnalysisError, Error, FeedbackRecord,
    LanguageSelection,
};
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Default cap on rows per batch
pub const DEFAULT_MAX_BATCH_ROWS: usize = 5000;

/// Composes detection, classification and scoring over a [`ReviewStore`]
#[derive(Clone)]
pub struct FeedbackAnalyzer {
    detector: LanguageDetector,
    authenticity: AuthenticityClassifier,
    scorer: SentimentScorer,
    max_batch_rows: usize,
}

impl FeedbackAnalyzer {
    pub fn new(authenticity: AuthenticityClassifier) -> Self {
        Self {
            detector: LanguageDetector::new(),
            authenticity,
            scorer: SentimentScorer::new(),
            max_batch_rows: DEFAULT_MAX_BATCH_ROWS,
        }
    }

    pub fn with_max_batch_rows(mut self, max_batch_rows: usize) -> Self {
        self.max_batch_rows = max_batch_rows;
        self
    }

    pub fn authenticity(&self) -> &AuthenticityClassifier {
        &self.authenticity
    }

    /// Analyze one submission and store the resulting record
    pub async fn analyze(
        &self,
        store: &mut ReviewStore,
        text: &str,
        selection: LanguageSelection,
    ) -> Result<FeedbackRecord, AnalysisError> {
        let start = Instant::now();
        let outcome = self.run(store, text, selection).await;
        let latency_us = start.elapsed().as_micros() as u64;

        metrics::histogram!("feedcheck_analysis_latency_us").record(latency_us as f64);

        match &outcome {
            Ok(record) => {
                metrics::counter!("feedcheck_submissions_total", "outcome" => "stored").increment(1);
                metrics::counter!(
                    "feedcheck_records_total",
                    "classification" => record.classification.as_str(),
                    "sentiment" => record.sentiment.as_str(),
                    "language" => record.language.as_str()
                )
                .increment(1);
                info!(
                    id = record.id,
                    language = %record.language,
                    classification = %record.classification,
                    sentiment = %record.sentiment,
                    latency_us,
                    "feedback stored"
                );
            }
            Err(err) => {
                metrics::counter!("feedcheck_submissions_total", "outcome" => err.kind()).increment(1);
                warn!(kind = err.kind(), reason = %err, "feedback rejected");
            }
        }

        outcome
    }

    async fn run(
        &self,
        store: &mut ReviewStore,
        text: &str,
        selection: LanguageSelection,
    ) -> Result<FeedbackRecord, AnalysisError> {
        if text.trim().is_empty() {
            return Err(AnalysisError::empty_input());
        }

        let hash = feedback_hash(text);
        if store.is_duplicate(&hash) {
            return Err(AnalysisError::DuplicateSubmission);
        }

        let language = self.detector.resolve(text, selection);
        debug!(%language, ?selection, "language resolved");

        let verdict = self
            .authenticity
            .classify(text, language)
            .await
            .map_err(|err| match err {
                Error::ModelUnavailable(reason) => {
                    debug!(%reason, "model slot unavailable");
                    AnalysisError::ModelUnavailable { language }
                }
                other => AnalysisError::from(other),
            })?;

        metrics::histogram!("feedcheck_model_latency_us", "language" => language.as_str())
            .record(verdict.model_latency_us as f64);

        let score = self.scorer.score(text, language, verdict.rating);
        debug!(
            sentiment = %score.sentiment,
            polarity = score.polarity,
            "sentiment scored"
        );

        let record = FeedbackRecord {
            id: store.next_id(),
            text: text.to_string(),
            language,
            classification: verdict.classification,
            confidence: format_confidence(verdict.confidence),
            sentiment: score.sentiment,
            polarity: score.polarity_label(),
            timestamp: minute_timestamp(),
        };

        if !store.append(record.clone()) {
            return Err(AnalysisError::DuplicateSubmission);
        }
        Ok(record)
    }

    /// Analyze rows one after another.
    ///
    /// Each row gets its own outcome; a failed row never stops the batch.
    /// Only an oversized batch is rejected as a whole.
    pub async fn analyze_batch<I, S>(
        &self,
        store: &mut ReviewStore,
        texts: I,
        selection: LanguageSelection,
    ) -> Result<BatchReport, AnalysisError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let texts: Vec<S> = texts.into_iter().collect();
        if texts.len() > self.max_batch_rows {
            return Err(AnalysisError::InputValidation(format!(
                "Batch of {} rows exceeds the limit of {}",
                texts.len(),
                self.max_batch_rows
            )));
        }

        let mut report = BatchReport {
            total: texts.len(),
            ..BatchReport::default()
        };

        for (idx, text) in texts.iter().enumerate() {
            match self.analyze(store, text.as_ref(), selection).await {
                Ok(record) => report.stored.push(record),
                Err(error) => report.failures.push(RowFailure::new(idx + 1, error)),
            }
        }

        info!(
            total = report.total,
            stored = report.stored.len(),
            failed = report.failures.len(),
            "batch analyzed"
        );
        Ok(report)
    }
}

/// Per-row outcome summary of a batch
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    /// Rows submitted
    pub total: usize,

    /// Records stored, in row order
    pub stored: Vec<FeedbackRecord>,

    pub failures: Vec<RowFailure>,
}

impl BatchReport {
    /// Reason of the first failed row, if any
    pub fn first_failure(&self) -> Option<&RowFailure> {
        self.failures.first()
    }
}

/// A batch row that produced no record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowFailure {
    /// 1-based row number within the batch
    pub row: usize,

    pub kind: &'static str,

    pub reason: String,

    #[serde(skip)]
    pub error: AnalysisError,
}

impl RowFailure {
    fn new(row: usize, error: AnalysisError) -> Self {
        Self {
            row,
            kind: error.kind(),
            reason: error.to_string(),
            error,
        }
    }
}
