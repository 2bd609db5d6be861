use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Room for the multipart envelope around the audio part
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Create the API router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    let body_limit = state.config.max_audio_bytes + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/process_text", post(handlers::process_text))
        .route("/process_voice", post(handlers::process_voice))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
