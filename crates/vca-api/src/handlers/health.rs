use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};

use crate::dto::HealthResponse;
use crate::state::AppState;

pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse::ok(state.pipeline.backends()))
}
