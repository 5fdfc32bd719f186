//! Aggregate views over the review log

use feedcheck_core::{Classification, FeedbackRecord, Language, Sentiment};
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Number of equal-width confidence bins over [0, 1]
pub const CONFIDENCE_BINS: usize = 10;

/// Default number of keywords returned per class
pub const DEFAULT_KEYWORD_LIMIT: usize = 50;

const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "aren't", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can", "can't", "cannot", "could", "couldn't", "did", "didn't", "do", "does",
    "doesn't", "doing", "don't", "down", "during", "each", "few", "for", "from", "further", "had",
    "hadn't", "has", "hasn't", "have", "haven't", "having", "he", "her", "here", "hers",
    "herself", "him", "himself", "his", "how", "i", "if", "in", "into", "is", "isn't", "it",
    "its", "itself", "let's", "me", "more", "most", "mustn't", "my", "myself", "no", "nor", "not",
    "of", "off", "on", "once", "only", "or", "other", "ought", "our", "ours", "ourselves", "out",
    "over", "own", "same", "shan't", "she", "should", "shouldn't", "so", "some", "such", "than",
    "that", "the", "their", "theirs", "them", "themselves", "then", "there", "these", "they",
    "this", "those", "through", "to", "too", "under", "until", "up", "very", "was", "wasn't",
    "we", "were", "weren't", "what", "when", "where", "which", "while", "who", "whom", "why",
    "with", "won't", "would", "wouldn't", "you", "your", "yours", "yourself", "yourselves",
];

/// Summary statistics over a whole review log
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insights {
    pub total: usize,

    /// Share of GENUINE records in [0, 1]
    pub genuine_share: f64,

    /// Share of FAKE records in [0, 1]
    pub fake_share: f64,

    /// (language, share) for languages present, in language order
    pub language_shares: Vec<(Language, f64)>,

    pub classification_counts: Vec<(Classification, usize)>,

    /// Ordered POSITIVE, NEGATIVE, NEUTRAL
    pub sentiment_counts: Vec<(Sentiment, usize)>,

    pub language_counts: Vec<(Language, usize)>,

    /// Counts per confidence bin; bin `i` covers `[i/10, (i+1)/10)`, the
    /// last bin includes 1.0
    pub confidence_histogram: [usize; CONFIDENCE_BINS],

    /// Mean confidence of GENUINE records, absent when there are none
    pub avg_genuine_confidence: Option<f64>,

    pub avg_fake_confidence: Option<f64>,

    /// Share of POSITIVE records among GENUINE ones
    pub positive_in_genuine: Option<f64>,

    /// Share of NEGATIVE records among FAKE ones
    pub negative_in_fake: Option<f64>,
}

impl Insights {
    /// Compute insights; `None` for an empty log
    pub fn compute(records: &[FeedbackRecord]) -> Option<Self> {
        if records.is_empty() {
            return None;
        }

        let total = records.len();
        let share = |n: usize| n as f64 / total as f64;

        let count_class = |c: Classification| records.iter().filter(|r| r.classification == c).count();
        let genuine = count_class(Classification::Genuine);
        let fake = count_class(Classification::Fake);

        let language_counts: Vec<(Language, usize)> = Language::ALL
            .into_iter()
            .map(|l| (l, records.iter().filter(|r| r.language == l).count()))
            .collect();

        let sentiment_counts = Sentiment::ALL
            .into_iter()
            .map(|s| (s, records.iter().filter(|r| r.sentiment == s).count()))
            .collect();

        let mut confidence_histogram = [0usize; CONFIDENCE_BINS];
        for confidence in records.iter().filter_map(FeedbackRecord::confidence_fraction) {
            confidence_histogram[confidence_bin(confidence)] += 1;
        }

        Some(Self {
            total,
            genuine_share: share(genuine),
            fake_share: share(fake),
            language_shares: language_counts
                .iter()
                .filter(|(_, n)| *n > 0)
                .map(|(l, n)| (*l, share(*n)))
                .collect(),
            classification_counts: vec![
                (Classification::Genuine, genuine),
                (Classification::Fake, fake),
            ],
            sentiment_counts,
            language_counts,
            confidence_histogram,
            avg_genuine_confidence: average_confidence(records, Classification::Genuine),
            avg_fake_confidence: average_confidence(records, Classification::Fake),
            positive_in_genuine: ratio_within(records, Classification::Genuine, Sentiment::Positive),
            negative_in_fake: ratio_within(records, Classification::Fake, Sentiment::Negative),
        })
    }
}

fn confidence_bin(confidence: f64) -> usize {
    ((confidence.clamp(0.0, 1.0) * CONFIDENCE_BINS as f64) as usize).min(CONFIDENCE_BINS - 1)
}

fn average_confidence(records: &[FeedbackRecord], class: Classification) -> Option<f64> {
    let values: Vec<f64> = records
        .iter()
        .filter(|r| r.classification == class)
        .filter_map(FeedbackRecord::confidence_fraction)
        .collect();

    (!values.is_empty()).then(|| values.iter().sum::<f64>() / values.len() as f64)
}

fn ratio_within(records: &[FeedbackRecord], class: Classification, sentiment: Sentiment) -> Option<f64> {
    let in_class: Vec<&FeedbackRecord> = records.iter().filter(|r| r.classification == class).collect();
    if in_class.is_empty() {
        return None;
    }
    let matching = in_class.iter().filter(|r| r.sentiment == sentiment).count();
    Some(matching as f64 / in_class.len() as f64)
}

/// A term and how often it occurs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordCount {
    pub term: String,
    pub count: usize,
}

fn word_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // Unicode letters and combining marks so Devanagari and Telugu words stay whole
    PATTERN.get_or_init(|| {
        Regex::new(r"[\p{L}\p{M}\p{N}]+(?:'[\p{L}]+)?").expect("static keyword regex")
    })
}

/// Term frequencies over records of one class (or all records when `None`)
pub fn keyword_frequencies<'a, I>(
    records: I,
    classification: Option<Classification>,
    limit: usize,
) -> Vec<KeywordCount>
where
    I: IntoIterator<Item = &'a FeedbackRecord>,
{
    let mut counts: HashMap<String, usize> = HashMap::new();

    for record in records
        .into_iter()
        .filter(|r| classification.map_or(true, |c| r.classification == c))
    {
        let lowered = record.text.to_lowercase();
        for token in word_pattern().find_iter(&lowered).map(|m| m.as_str()) {
            if token.chars().count() < 2 || STOPWORDS.contains(&token) {
                continue;
            }
            *counts.entry(token.to_string()).or_default() += 1;
        }
    }

    let mut keywords: Vec<KeywordCount> = counts
        .into_iter()
        .map(|(term, count)| KeywordCount { term, count })
        .collect();
    keywords.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.term.cmp(&b.term)));
    keywords.truncate(limit);
    keywords
}

/// Explanatory indicator lines shown next to a stored record
pub fn key_indicators(record: &FeedbackRecord) -> Vec<&'static str> {
    let mut indicators = match record.classification {
        Classification::Fake => vec![
            "Unnatural language patterns",
            "Overly generic or exaggerated statements",
            "Mismatch between sentiment and content",
        ],
        Classification::Genuine => vec![
            "Natural language patterns",
            "Specific details and examples",
            "Consistent sentiment throughout",
        ],
    };

    match record.sentiment {
        Sentiment::Negative => indicators.extend([
            "Criticism of specific aspects",
            "Frustrated or disappointed tone",
        ]),
        Sentiment::Positive => indicators.extend([
            "Praise for specific aspects",
            "Satisfied or enthusiastic tone",
        ]),
        Sentiment::Neutral => {}
    }

    indicators
}
