//! Core types for FeedCheck

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Languages a feedback text can be bucketed into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Language {
    English,
    Hindi,
    Telugu,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::English, Language::Hindi, Language::Telugu];

    /// Display name, also used in records and exports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Hindi => "Hindi",
            Self::Telugu => "Telugu",
        }
    }

    /// ISO 639-1 code
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Hindi => "hi",
            Self::Telugu => "te",
        }
    }

    /// Whether this language is served by the multilingual model
    pub fn is_multilingual(&self) -> bool {
        !matches!(self, Self::English)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "English" | "en" => Ok(Self::English),
            "Hindi" | "hi" => Ok(Self::Hindi),
            "Telugu" | "te" => Ok(Self::Telugu),
            other => Err(Error::invalid_input(format!("unknown language '{other}'"))),
        }
    }
}

/// Caller's language choice for a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LanguageSelection {
    /// Run the statistical detector
    #[default]
    Auto,
    /// Skip detection and use this language verbatim
    Fixed(Language),
}

impl FromStr for LanguageSelection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "auto" | "Auto-detect" => Ok(Self::Auto),
            other => other.parse().map(Self::Fixed),
        }
    }
}

impl Serialize for LanguageSelection {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Auto => serializer.serialize_str("auto"),
            Self::Fixed(language) => serializer.serialize_str(language.as_str()),
        }
    }
}

impl<'de> Deserialize<'de> for LanguageSelection {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Authenticity label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Classification {
    Genuine,
    Fake,
}

impl Classification {
    pub const ALL: [Classification; 2] = [Classification::Genuine, Classification::Fake];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Genuine => "GENUINE",
            Self::Fake => "FAKE",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Classification {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "GENUINE" => Ok(Self::Genuine),
            "FAKE" => Ok(Self::Fake),
            other => Err(Error::invalid_input(format!("unknown classification '{other}'"))),
        }
    }
}

/// Sentiment bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// Reporting order
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "POSITIVE",
            Self::Negative => "NEGATIVE",
            Self::Neutral => "NEUTRAL",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "POSITIVE" => Ok(Self::Positive),
            "NEGATIVE" => Ok(Self::Negative),
            "NEUTRAL" => Ok(Self::Neutral),
            other => Err(Error::invalid_input(format!("unknown sentiment '{other}'"))),
        }
    }
}

/// One analyzed piece of feedback.
///
/// Field order matches the export column order. Records are never mutated
/// after the orchestrator builds them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    /// Review-log length + 1 at creation time
    pub id: usize,

    /// Submitted text, unmodified
    pub text: String,

    pub language: Language,

    pub classification: Classification,

    /// Authenticity score as a whole percentage, e.g. "87%"
    pub confidence: String,

    pub sentiment: Sentiment,

    /// Signed polarity with two decimals, e.g. "-0.35"
    pub polarity: String,

    /// Creation time, `YYYY-MM-DD HH:MM`
    pub timestamp: String,
}

impl FeedbackRecord {
    /// Confidence back as a fraction in [0, 1]
    pub fn confidence_fraction(&self) -> Option<f64> {
        self.confidence
            .trim_end_matches('%')
            .parse::<f64>()
            .ok()
            .map(|pct| pct / 100.0)
    }
}

/// Format a [0, 1] score as a whole percentage
pub fn format_confidence(score: f32) -> String {
    format!("{:.0}%", f64::from(score) * 100.0)
}

/// Format a polarity value with two decimal places
pub fn format_polarity(polarity: f64) -> String {
    format!("{polarity:.2}")
}

/// Minute-precision local timestamp
pub fn minute_timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M").to_string()
}
