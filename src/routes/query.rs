use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use tracing::{error, info, warn};

use crate::errors::AppError;
use crate::models::{QueryRequest, QueryResponse};
use crate::services::query_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(answer_query))
}

/// POST /query
///
/// Answer a business question about the analytics data.
///
/// Request body: QueryRequest
/// {
///   "query": "What is the trend in sessions?",
///   "language": "en"
/// }
///
/// Returns: QueryResponse with the answer, an optional Plotly chart and a follow-up question
async fn answer_query(
    State(state): State<AppState>,
    payload: Result<Json<QueryRequest>, JsonRejection>,
) -> Result<Json<QueryResponse>, AppError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("POST /query - rejected body: {}", rejection.body_text());
        AppError::from(rejection)
    })?;

    info!("POST /query - language: {}, query: {}", request.language, request.query);

    let response = query_service::process_query(
        state.llm.as_ref(),
        &state.translator,
        &state.dataset,
        request,
    )
    .await
    .map_err(|e| {
        error!("Failed to process query: {:?}", e);
        e
    })?;

    Ok(Json(response))
}
