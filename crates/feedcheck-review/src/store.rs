//! Session review log and its query layer

use feedcheck_core::{
    feedback_hash, Classification, DedupGuard, Error, FeedbackRecord, Language, Result,
    Sentiment,
};
use serde::Serialize;
use std::str::FromStr;

/// Filter value meaning "no constraint"
pub const FILTER_ALL: &str = "All";

/// Ordered, append-only log of analyzed feedback for one session.
///
/// The log and the dedup hash set live together so a reset clears both or
/// neither.
#[derive(Debug, Default)]
pub struct ReviewStore {
    records: Vec<FeedbackRecord>,
    seen: DedupGuard,
}

impl ReviewStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All records in insertion order
    pub fn records(&self) -> &[FeedbackRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Id the next record will receive
    pub fn next_id(&self) -> usize {
        self.records.len() + 1
    }

    pub fn is_duplicate(&self, hash: &str) -> bool {
        self.seen.is_duplicate(hash)
    }

    /// Number of content hashes seen since the last reset
    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }

    /// Store a record, fingerprinting its text.
    ///
    /// Returns false and stores nothing when a record with the same text is
    /// already in the log.
    pub fn append(&mut self, record: FeedbackRecord) -> bool {
        if !self.seen.record(feedback_hash(&record.text)) {
            return false;
        }
        self.records.push(record);
        true
    }

    /// Records matching every set constraint, in insertion order
    pub fn filter<'a>(&'a self, filter: &'a ReviewFilter) -> impl Iterator<Item = &'a FeedbackRecord> + 'a {
        self.records.iter().filter(move |record| filter.matches(record))
    }

    /// Clear the log and the dedup set together
    pub fn reset(&mut self) {
        tracing::info!(
            records = self.records.len(),
            hashes = self.seen.len(),
            "resetting review store"
        );
        self.records.clear();
        self.seen.clear();
    }
}

/// Three independent equality filters, combined with AND
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReviewFilter {
    pub classification: Option<Classification>,
    pub sentiment: Option<Sentiment>,
    pub language: Option<Language>,
}

impl ReviewFilter {
    /// Filter that matches everything
    pub fn all() -> Self {
        Self::default()
    }

    /// Build from raw dashboard values; `None`, `""` and `"All"` mean
    /// unconstrained
    pub fn parse(
        classification: Option<&str>,
        sentiment: Option<&str>,
        language: Option<&str>,
    ) -> Result<Self> {
        Ok(Self {
            classification: parse_value(classification)?,
            sentiment: parse_value(sentiment)?,
            language: parse_language(language)?,
        })
    }

    pub fn with_classification(mut self, classification: Classification) -> Self {
        self.classification = Some(classification);
        self
    }

    pub fn with_sentiment(mut self, sentiment: Sentiment) -> Self {
        self.sentiment = Some(sentiment);
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    pub fn matches(&self, record: &FeedbackRecord) -> bool {
        self.classification.map_or(true, |c| record.classification == c)
            && self.sentiment.map_or(true, |s| record.sentiment == s)
            && self.language.map_or(true, |l| record.language == l)
    }
}

fn parse_value<T: FromStr<Err = Error>>(raw: Option<&str>) -> Result<Option<T>> {
    match raw {
        None | Some("") | Some(FILTER_ALL) => Ok(None),
        Some(value) => value.parse().map(Some),
    }
}

// Language names only; codes like "en" are a submission convenience
fn parse_language(raw: Option<&str>) -> Result<Option<Language>> {
    match raw {
        None | Some("") | Some(FILTER_ALL) => Ok(None),
        Some(value) => Language::ALL
            .into_iter()
            .find(|language| language.as_str() == value)
            .map(Some)
            .ok_or_else(|| Error::invalid_input(format!("unknown language '{value}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feedcheck_core::feedback_hash;

    fn record(id: usize, text: &str, classification: Classification, sentiment: Sentiment, language: Language) -> FeedbackRecord {
        FeedbackRecord {
            id,
            text: text.to_string(),
            language,
            classification,
            confidence: "90%".to_string(),
            sentiment,
            polarity: "0.00".to_string(),
            timestamp: "2024-01-01 10:00".to_string(),
        }
    }

    fn populated() -> ReviewStore {
        let mut store = ReviewStore::new();
        for (text, c, s, l) in [
            ("a", Classification::Genuine, Sentiment::Positive, Language::English),
            ("b", Classification::Fake, Sentiment::Negative, Language::Hindi),
            ("c", Classification::Genuine, Sentiment::Neutral, Language::Telugu),
            ("d", Classification::Genuine, Sentiment::Positive, Language::Hindi),
        ] {
            let id = store.next_id();
            assert!(store.append(record(id, text, c, s, l)));
        }
        store
    }

    #[test]
    fn test_all_filter_preserves_order() {
        let store = populated();
        let filter = ReviewFilter::parse(Some("All"), Some("All"), Some("All")).unwrap();
        let ids: Vec<usize> = store.filter(&filter).map(|r| r.id).collect();
        assert_eq!(ids, [1, 2, 3, 4]);
    }

    #[test]
    fn test_filters_combine_with_and() {
        let store = populated();

        let filter = ReviewFilter::all()
            .with_classification(Classification::Genuine)
            .with_language(Language::Hindi);
        let ids: Vec<usize> = store.filter(&filter).map(|r| r.id).collect();
        assert_eq!(ids, [4]);

        let filter = ReviewFilter::parse(None, Some("NEGATIVE"), None).unwrap();
        assert_eq!(store.filter(&filter).count(), 1);
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let mut store = ReviewStore::new();
        store.append(record(1, "a", Classification::Genuine, Sentiment::Positive, Language::English));

        let filter = ReviewFilter::parse(Some("FAKE"), None, None).unwrap();
        assert_eq!(store.filter(&filter).count(), 0);
    }

    #[test]
    fn test_unknown_filter_value() {
        assert!(matches!(
            ReviewFilter::parse(Some("Fake"), None, None),
            Err(Error::InvalidInput(_))
        ));
        assert!(ReviewFilter::parse(None, None, Some("en")).is_err());
        assert!(ReviewFilter::parse(None, None, Some("Kannada")).is_err());
    }

    #[test]
    fn test_reset_clears_log_and_hashes() {
        let mut store = populated();
        assert!(store.is_duplicate(&feedback_hash("a")));
        assert_eq!(store.seen_count(), 4);

        store.reset();

        assert!(store.is_empty());
        assert_eq!(store.seen_count(), 0);
        assert!(!store.is_duplicate(&feedback_hash("a")));
        assert_eq!(store.next_id(), 1);
    }

    #[test]
    fn test_append_rejects_repeated_text() {
        let mut store = populated();

        let repeat = record(5, "a", Classification::Fake, Sentiment::Neutral, Language::English);
        assert!(!store.append(repeat));

        assert_eq!(store.len(), 4);
        assert_eq!(store.seen_count(), 4);
        assert_eq!(store.records().iter().filter(|r| r.text == "a").count(), 1);
        assert_eq!(store.next_id(), 5);
    }
}
