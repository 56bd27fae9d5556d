use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use tracing::instrument;

use crate::{
    health::services::{check_health, HealthReport},
    state::AppState,
};

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

#[instrument(skip(state))]
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    let report = check_health(state.store.as_ref(), state.started_at).await;
    let status = if report.is_ok() {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(report))
}
