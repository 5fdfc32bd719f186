//! FeedCheck Core
//!
//! Core types and utilities shared across FeedCheck components.
//!
//! This crate provides:
//! - The feedback record and its enumerated fields (language, authenticity, sentiment)
//! - Error types: infrastructure errors and the per-submission rejection taxonomy
//! - Content fingerprinting and the session-scoped duplicate guard

pub mod dedup;
pub mod error;
pub mod types;

pub use dedup::{feedback_hash, DedupGuard};
pub use error::{AnalysisError, Error, Result};
pub use types::{
    format_confidence, format_polarity, minute_timestamp, Classification, FeedbackRecord,
    Language, LanguageSelection, Sentiment,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::dedup::{feedback_hash, DedupGuard};
    pub use crate::error::{AnalysisError, Error, Result};
    pub use crate::types::{Classification, FeedbackRecord, Language, LanguageSelection, Sentiment};
}
