//! Sentiment scoring
//!
//! English text is scored with the polarity lexicon. Hindi and Telugu reuse
//! the star rating produced by the multilingual model, so no second model
//! call is made for sentiment.

use crate::lexicon::PolarityLexicon;
use feedcheck_core::{format_polarity, Error, Language, Result, Sentiment};
use serde::Serialize;

/// Polarity strictly above this is POSITIVE
pub const POSITIVE_POLARITY: f64 = 0.2;

/// Polarity strictly below this is NEGATIVE
pub const NEGATIVE_POLARITY: f64 = -0.2;

/// A 1-5 star rating from the multilingual model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StarRating(u8);

impl StarRating {
    pub fn new(stars: u8) -> Result<Self> {
        if (1..=5).contains(&stars) {
            Ok(Self(stars))
        } else {
            Err(Error::classifier(format!("star rating {stars} outside 1-5")))
        }
    }

    /// Parse a model label such as "4 stars" or "1 star" from its leading digit
    pub fn from_label(label: &str) -> Result<Self> {
        let digit = label
            .trim_start()
            .chars()
            .next()
            .and_then(|c| c.to_digit(10))
            .ok_or_else(|| {
                Error::classifier(format!("cannot read a star rating from label '{label}'"))
            })?;
        Self::new(digit as u8)
    }

    pub fn stars(&self) -> u8 {
        self.0
    }
}

/// Sentiment bucket plus the polarity it was derived from
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SentimentScore {
    pub sentiment: Sentiment,
    pub polarity: f64,
}

impl SentimentScore {
    pub fn neutral() -> Self {
        Self {
            sentiment: Sentiment::Neutral,
            polarity: 0.0,
        }
    }

    /// Bucket a lexicon polarity; both ±0.2 boundaries are NEUTRAL
    pub fn from_polarity(polarity: f64) -> Self {
        let sentiment = if polarity > POSITIVE_POLARITY {
            Sentiment::Positive
        } else if polarity < NEGATIVE_POLARITY {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        };
        Self {
            sentiment,
            polarity,
        }
    }

    /// Map a star rating onto [-1, 1] as (stars - 3) / 2
    pub fn from_rating(rating: StarRating) -> Self {
        match rating.stars() {
            stars @ 4..=5 => Self {
                sentiment: Sentiment::Positive,
                polarity: f64::from(stars - 3) / 2.0,
            },
            stars @ 1..=2 => Self {
                sentiment: Sentiment::Negative,
                polarity: -f64::from(3 - stars) / 2.0,
            },
            _ => Self::neutral(),
        }
    }

    /// Polarity as reported in records, two decimals
    pub fn polarity_label(&self) -> String {
        format_polarity(self.polarity)
    }
}

/// Chooses the scoring path by language
#[derive(Debug, Clone, Default)]
pub struct SentimentScorer {
    lexicon: PolarityLexicon,
}

impl SentimentScorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Score a submission.
    ///
    /// `rating` is the multilingual model's output for this text, if the model
    /// ran. A multilingual text without a rating degrades to NEUTRAL.
    pub fn score(&self, text: &str, language: Language, rating: Option<StarRating>) -> SentimentScore {
        if language.is_multilingual() {
            return rating.map(SentimentScore::from_rating).unwrap_or_else(|| {
                tracing::debug!("no star rating available, sentiment defaults to neutral");
                SentimentScore::neutral()
            });
        }

        SentimentScore::from_polarity(self.lexicon.polarity(text))
    }
}
