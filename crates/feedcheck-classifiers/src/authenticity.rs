//! Authenticity classification
//!
//! Neither underlying model is a trained fake-review detector. The English
//! path reads a negative sentiment label as FAKE, and the multilingual path
//! reads a low star-rating confidence as FAKE. Both heuristics are kept
//! exactly as-is for compatibility with existing review logs; they are
//! unvalidated and should not be read as stronger evidence than that.

use crate::classifier::{ClassificationResult, Classifier};
use crate::sentiment::StarRating;
use feedcheck_core::{Classification, Error, Language, Result};
use std::sync::Arc;
use tracing::debug;

/// Multilingual scores below this are FAKE
pub const MULTILINGUAL_GENUINE_THRESHOLD: f32 = 0.6;

/// English labels read as FAKE (compared case-insensitively)
const ENGLISH_FAKE_LABELS: &[&str] = &["negative", "fake"];

/// A model that either loaded at startup or did not
#[derive(Debug, Clone)]
pub enum ModelSlot<T> {
    Ready(T),
    Unavailable { reason: String },
}

impl<T> ModelSlot<T> {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ModelSlot<U> {
        match self {
            Self::Ready(inner) => ModelSlot::Ready(f(inner)),
            Self::Unavailable { reason } => ModelSlot::Unavailable { reason },
        }
    }

    fn get(&self) -> Result<&T> {
        match self {
            Self::Ready(inner) => Ok(inner),
            Self::Unavailable { reason } => Err(Error::model_unavailable(reason.clone())),
        }
    }
}

/// Outcome of an authenticity check
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticityVerdict {
    pub classification: Classification,

    /// Raw model score in [0, 1]
    pub confidence: f32,

    /// Star rating, present only on the multilingual path
    pub rating: Option<StarRating>,

    /// Time spent inside the model, as reported by it
    pub model_latency_us: u64,
}

/// Binary sentiment model used as an authenticity proxy for English
#[derive(Clone)]
pub struct EnglishClassifier {
    model: Arc<dyn Classifier>,
}

impl EnglishClassifier {
    pub fn new(model: Arc<dyn Classifier>) -> Self {
        Self { model }
    }

    pub async fn classify(&self, text: &str) -> Result<AuthenticityVerdict> {
        let result = self.model.classify(text).await?;
        let classification = english_label_classification(&result.label);

        debug!(
            model = self.model.name(),
            label = %result.label,
            score = result.score,
            scores = ?result.metadata.all_scores,
            latency_us = result.latency_us,
            %classification,
            "english authenticity"
        );

        Ok(AuthenticityVerdict {
            classification,
            confidence: result.score,
            rating: None,
            model_latency_us: result.latency_us,
        })
    }
}

/// Star-rating model used as an authenticity proxy for Hindi and Telugu
#[derive(Clone)]
pub struct MultilingualClassifier {
    model: Arc<dyn Classifier>,
}

impl MultilingualClassifier {
    pub fn new(model: Arc<dyn Classifier>) -> Self {
        Self { model }
    }

    /// Classify and return the star rating alongside, so sentiment scoring
    /// does not invoke the model a second time
    pub async fn classify(&self, text: &str) -> Result<AuthenticityVerdict> {
        let result: ClassificationResult = self.model.classify(text).await?;
        let rating = StarRating::from_label(&result.label)?;

        let classification = if result.exceeds_threshold(MULTILINGUAL_GENUINE_THRESHOLD) {
            Classification::Genuine
        } else {
            Classification::Fake
        };

        debug!(
            model = self.model.name(),
            label = %result.label,
            score = result.score,
            scores = ?result.metadata.all_scores,
            latency_us = result.latency_us,
            %classification,
            "multilingual authenticity"
        );

        Ok(AuthenticityVerdict {
            classification,
            confidence: result.score,
            rating: Some(rating),
            model_latency_us: result.latency_us,
        })
    }
}

/// Dispatches to the model for a language bucket
#[derive(Clone)]
pub struct AuthenticityClassifier {
    english: ModelSlot<EnglishClassifier>,
    multilingual: ModelSlot<MultilingualClassifier>,
}

impl AuthenticityClassifier {
    pub fn new(
        english: ModelSlot<Arc<dyn Classifier>>,
        multilingual: ModelSlot<Arc<dyn Classifier>>,
    ) -> Self {
        Self {
            english: english.map(EnglishClassifier::new),
            multilingual: multilingual.map(MultilingualClassifier::new),
        }
    }

    /// Both models ready
    pub fn from_models(english: Arc<dyn Classifier>, multilingual: Arc<dyn Classifier>) -> Self {
        Self::new(ModelSlot::Ready(english), ModelSlot::Ready(multilingual))
    }

    /// Fails with `Error::ModelUnavailable` when the model for `language`
    /// did not load
    pub async fn classify(&self, text: &str, language: Language) -> Result<AuthenticityVerdict> {
        if language.is_multilingual() {
            self.multilingual.get()?.classify(text).await
        } else {
            self.english.get()?.classify(text).await
        }
    }

    pub fn english_ready(&self) -> bool {
        self.english.is_ready()
    }

    pub fn multilingual_ready(&self) -> bool {
        self.multilingual.is_ready()
    }
}

fn english_label_classification(label: &str) -> Classification {
    if ENGLISH_FAKE_LABELS
        .iter()
        .any(|fake| label.eq_ignore_ascii_case(fake))
    {
        Classification::Fake
    } else {
        Classification::Genuine
    }
}
