use vca_core::VoiceQuery;

use crate::dto::{TextQueryRequest, TextQueryResponse, VoiceQueryResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// Service for resolving caller queries through the pipeline
pub struct QueryService;

impl QueryService {
    pub async fn resolve_text(state: &AppState, request: &TextQueryRequest) -> Result<TextQueryResponse, ApiError> {
        let answer = state.pipeline.resolve_text(&request.query, request.language).await?;

        tracing::info!(
            request_id = %answer.request_id,
            fully_live = answer.fully_live(),
            "Text query resolved"
        );

        Ok(answer.into())
    }

    pub async fn resolve_voice(state: &AppState, voice: VoiceQuery) -> Result<VoiceQueryResponse, ApiError> {
        let answer = state.pipeline.resolve_voice(voice).await?;

        tracing::info!(
            request_id = %answer.request_id,
            fully_live = answer.fully_live(),
            "Voice query resolved"
        );

        Ok(answer.into())
    }
}
