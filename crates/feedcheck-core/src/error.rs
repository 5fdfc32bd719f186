//! Error types for FeedCheck

use crate::types::Language;

/// Result type alias using FeedCheck's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for FeedCheck infrastructure operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Classifier execution errors
    #[error("classifier error: {0}")]
    Classifier(String),

    /// A required model failed to initialize
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Rejected input (empty text, malformed upload, unknown filter value)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Network/IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// CSV read/write errors
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new classifier error
    pub fn classifier(msg: impl Into<String>) -> Self {
        Self::Classifier(msg.into())
    }

    /// Create a new model-unavailable error
    pub fn model_unavailable(msg: impl Into<String>) -> Self {
        Self::ModelUnavailable(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new invalid-input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

/// Why a single submission produced no record.
///
/// Every variant is non-fatal: it is reported for that submission only and
/// never touches the review log.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    /// Byte-identical text was already analyzed in this session
    #[error("This feedback has already been analyzed.")]
    DuplicateSubmission,

    /// The model for this language failed to load at startup
    #[error("{} analysis not available", model_family(.language))]
    ModelUnavailable { language: Language },

    /// Detection, classification or scoring failed unexpectedly
    #[error("Error analyzing feedback: {0}")]
    AnalysisException(String),

    /// Rejected before the pipeline ran
    #[error("{0}")]
    InputValidation(String),
}

impl AnalysisError {
    /// Short machine-readable kind, used for metrics labels and API payloads
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DuplicateSubmission => "duplicate",
            Self::ModelUnavailable { .. } => "model_unavailable",
            Self::AnalysisException(_) => "exception",
            Self::InputValidation(_) => "invalid_input",
        }
    }

    pub fn empty_input() -> Self {
        Self::InputValidation("Please enter feedback to analyze".to_string())
    }
}

impl From<Error> for AnalysisError {
    fn from(err: Error) -> Self {
        match err {
            Error::InvalidInput(msg) => Self::InputValidation(msg),
            other => Self::AnalysisException(other.to_string()),
        }
    }
}

fn model_family(language: &Language) -> &'static str {
    match language {
        Language::English => "English",
        Language::Hindi | Language::Telugu => "Multilingual",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_strings() {
        assert_eq!(
            AnalysisError::DuplicateSubmission.to_string(),
            "This feedback has already been analyzed."
        );
        assert_eq!(
            AnalysisError::ModelUnavailable {
                language: Language::English
            }
            .to_string(),
            "English analysis not available"
        );
        assert_eq!(
            AnalysisError::ModelUnavailable {
                language: Language::Telugu
            }
            .to_string(),
            "Multilingual analysis not available"
        );
    }

    #[test]
    fn test_error_conversion() {
        let err: AnalysisError = Error::invalid_input("bad column").into();
        assert_eq!(err, AnalysisError::InputValidation("bad column".to_string()));

        let err: AnalysisError = Error::classifier("tensor shape").into();
        assert_eq!(err.kind(), "exception");
        assert!(err.to_string().starts_with("Error analyzing feedback: "));
    }
}
