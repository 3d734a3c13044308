use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(health))
}

#[derive(Debug, Serialize)]
struct HealthStatus {
    status: &'static str,
    dataset_rows: usize,
    first_day: Option<NaiveDate>,
    last_day: Option<NaiveDate>,
}

/// GET /health
///
/// Liveness probe; also reports which slice of data the service answers from.
async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    debug!("GET /health");
    let range = state.dataset.date_range();
    Json(HealthStatus {
        status: "ok",
        dataset_rows: state.dataset.len(),
        first_day: range.map(|(start, _)| start),
        last_day: range.map(|(_, end)| end),
    })
}
