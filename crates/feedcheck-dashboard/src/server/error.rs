use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use feedcheck_core::AnalysisError;
use uuid::Uuid;

/// Errors returned by API handlers
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("Unknown session {0}")]
    SessionNotFound(Uuid),

    #[error("Metrics recorder not installed")]
    MetricsDisabled,

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Analysis(AnalysisError::InputValidation(_)) => StatusCode::BAD_REQUEST,
            Self::Analysis(AnalysisError::DuplicateSubmission) => StatusCode::CONFLICT,
            Self::Analysis(AnalysisError::ModelUnavailable { .. }) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            Self::Analysis(AnalysisError::AnalysisException(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::SessionNotFound(_) | Self::MetricsDisabled => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Analysis(err) => err.kind(),
            Self::SessionNotFound(_) => "session_not_found",
            Self::MetricsDisabled => "metrics_disabled",
            Self::Internal(_) => "internal",
        }
    }
}

impl From<feedcheck_core::Error> for ApiError {
    fn from(err: feedcheck_core::Error) -> Self {
        Self::Analysis(AnalysisError::from(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(kind = self.kind(), "request failed: {}", self);
        }
        (
            status,
            Json(serde_json::json!({ "error": self.to_string(), "kind": self.kind() })),
        )
            .into_response()
    }
}
