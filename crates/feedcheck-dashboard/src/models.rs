//! Request and response payloads for the dashboard API

use feedcheck_core::{FeedbackRecord, LanguageSelection};
use feedcheck_review::{BatchReport, RowFailure};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,

    /// Defaults to auto-detection
    #[serde(default)]
    pub language: LanguageSelection,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeResponse {
    pub record: FeedbackRecord,

    /// Explanatory indicators for the stored record
    pub indicators: Vec<&'static str>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BatchRequest {
    pub texts: Vec<String>,

    #[serde(default)]
    pub language: LanguageSelection,
}

/// Outcome of a batch or upload
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub stored: usize,
    pub failed: usize,
    pub records: Vec<FeedbackRecord>,
    pub failures: Vec<RowFailure>,
}

impl From<BatchReport> for BatchSummary {
    fn from(report: BatchReport) -> Self {
        Self {
            total: report.total,
            stored: report.stored.len(),
            failed: report.failures.len(),
            records: report.stored,
            failures: report.failures,
        }
    }
}

/// Query string for uploads
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadQuery {
    #[serde(default)]
    pub language: LanguageSelection,
}

/// Review filters; absent or `All` means no constraint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterQuery {
    pub classification: Option<String>,
    pub sentiment: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct KeywordsQuery {
    pub classification: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionCreated {
    pub session_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelStatus {
    pub english: bool,
    pub multilingual: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub models: ModelStatus,
}
