//! FeedCheck Review
//!
//! The session-side half of FeedCheck:
//! - `FeedbackAnalyzer` runs one submission (or a batch) through the pipeline
//! - `ReviewStore` holds a session's records and dedup hashes
//! - CSV ingest and export, insights and keyword frequencies for reporting

pub mod analyzer;
pub mod export;
pub mod ingest;
pub mod report;
pub mod store;

pub use analyzer::{BatchReport, FeedbackAnalyzer, RowFailure, DEFAULT_MAX_BATCH_ROWS};
pub use export::{to_csv_string, write_csv, EXPORT_FILE_NAME};
pub use ingest::read_feedback_texts;
pub use report::{key_indicators, keyword_frequencies, Insights, KeywordCount, DEFAULT_KEYWORD_LIMIT};
pub use store::{ReviewFilter, ReviewStore};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::analyzer::{BatchReport, FeedbackAnalyzer};
    pub use crate::report::Insights;
    pub use crate::store::{ReviewFilter, ReviewStore};
}
