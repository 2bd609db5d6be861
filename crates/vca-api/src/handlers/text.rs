use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::dto::{TextQueryRequest, TextQueryResponse};
use crate::error::ApiError;
use crate::services::QueryService;
use crate::state::AppState;

pub async fn process_text(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TextQueryRequest>, JsonRejection>,
) -> Result<Json<TextQueryResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        ApiError::bad_request("Invalid request body").with_details(rejection.body_text())
    })?;

    tracing::info!(
        chars = request.query.len(),
        language = %request.language,
        "Processing text query"
    );

    let response = QueryService::resolve_text(&state, &request).await?;

    Ok(Json(response))
}
