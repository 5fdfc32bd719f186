use crate::models::{
    AnalyzeRequest, AnalyzeResponse, BatchRequest, BatchSummary, FilterQuery, HealthResponse,
    KeywordsQuery, ModelStatus, SessionCreated, UploadQuery,
};
use crate::server::ApiError;
use crate::state::{AppState, SessionHandle};
use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use feedcheck_core::Classification;
use feedcheck_review::{
    key_indicators, keyword_frequencies, read_feedback_texts, to_csv_string, Insights,
    KeywordCount, ReviewFilter, EXPORT_FILE_NAME,
};
use std::collections::BTreeMap;
use uuid::Uuid;

fn session(state: &AppState, id: Uuid) -> Result<SessionHandle, ApiError> {
    state.sessions.get(&id).ok_or(ApiError::SessionNotFound(id))
}

fn filter_from(query: &FilterQuery) -> Result<ReviewFilter, ApiError> {
    Ok(ReviewFilter::parse(
        query.classification.as_deref(),
        query.sentiment.as_deref(),
        query.language.as_deref(),
    )?)
}

// ============================================================================
// Health and metrics
// ============================================================================

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let authenticity = state.analyzer.authenticity();
    Json(HealthResponse {
        status: "ok",
        models: ModelStatus {
            english: authenticity.english_ready(),
            multilingual: authenticity.multilingual_ready(),
        },
    })
}

pub async fn metrics(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let handle = state.metrics_handle.as_ref().ok_or(ApiError::MetricsDisabled)?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        handle.render(),
    ))
}

// ============================================================================
// Sessions
// ============================================================================

pub async fn create_session(State(state): State<AppState>) -> impl IntoResponse {
    let session_id = state.sessions.create();
    (StatusCode::CREATED, Json(SessionCreated { session_id }))
}

pub async fn end_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    if state.sessions.remove(&id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::SessionNotFound(id))
    }
}

pub async fn reset_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let store = session(&state, id)?;
    store.lock().await.reset();
    tracing::info!(session = %id, "review log reset");
    Ok(Json(serde_json::json!({ "status": "reset" })))
}

// ============================================================================
// Analysis
// ============================================================================

pub async fn submit_feedback(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let store = session(&state, id)?;
    let mut store = store.lock().await;

    let record = state.analyzer.analyze(&mut store, &req.text, req.language).await?;
    let indicators = key_indicators(&record);

    Ok((StatusCode::CREATED, Json(AnalyzeResponse { record, indicators })))
}

pub async fn submit_batch(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<BatchRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let store = session(&state, id)?;
    let mut store = store.lock().await;

    let report = state
        .analyzer
        .analyze_batch(&mut store, &req.texts, req.language)
        .await?;

    Ok(Json(BatchSummary::from(report)))
}

pub async fn upload_csv(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<UploadQuery>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let store = session(&state, id)?;
    let texts = read_feedback_texts(body.as_ref())?;
    tracing::debug!(session = %id, rows = texts.len(), "csv upload parsed");

    let mut store = store.lock().await;
    let report = state
        .analyzer
        .analyze_batch(&mut store, &texts, query.language)
        .await?;

    Ok(Json(BatchSummary::from(report)))
}

// ============================================================================
// Review and reporting
// ============================================================================

pub async fn list_reviews(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<FilterQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let filter = filter_from(&query)?;
    let store = session(&state, id)?;
    let store = store.lock().await;

    let records: Vec<_> = store.filter(&filter).cloned().collect();
    Ok(Json(records))
}

pub async fn export_reviews(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<FilterQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let filter = filter_from(&query)?;
    let store = session(&state, id)?;
    let store = store.lock().await;

    let csv = to_csv_string(store.filter(&filter))
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    let disposition = format!("attachment; filename=\"{}\"", EXPORT_FILE_NAME);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    ))
}

pub async fn get_insights(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let store = session(&state, id)?;
    let store = store.lock().await;
    Ok(Json(Insights::compute(store.records())))
}

pub async fn get_keywords(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<KeywordsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let classes: Vec<Classification> = match query.classification.as_deref() {
        None | Some("") | Some(feedcheck_review::store::FILTER_ALL) => {
            Classification::ALL.to_vec()
        }
        Some(value) => vec![value.parse::<Classification>()?],
    };
    let limit = query.limit.unwrap_or(state.config.keyword_limit);

    let store = session(&state, id)?;
    let store = store.lock().await;

    let keywords: BTreeMap<Classification, Vec<KeywordCount>> = classes
        .into_iter()
        .map(|class| {
            (
                class,
                keyword_frequencies(store.records(), Some(class), limit),
            )
        })
        .collect();
    Ok(Json(keywords))
}
