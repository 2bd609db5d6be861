use std::sync::Arc;

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    Json,
};
use vca_core::{AudioClip, AudioEncoding, Language, Rejection, VoiceQuery};

use crate::dto::VoiceQueryResponse;
use crate::error::ApiError;
use crate::services::QueryService;
use crate::state::AppState;

pub async fn process_voice(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<VoiceQueryResponse>, ApiError> {
    // A body that is not a multipart form cannot carry an audio file
    let mut multipart = multipart.map_err(|rejection| {
        tracing::warn!(reason = %rejection.body_text(), "Rejected non-multipart voice request");
        ApiError::from(Rejection::MissingAudio).with_details(rejection.body_text())
    })?;

    let voice = extract_voice_query(&mut multipart, state.config.max_audio_bytes).await?;

    tracing::info!(
        has_audio = voice.audio.is_some(),
        language = %voice.language,
        "Processing voice query"
    );

    let response = QueryService::resolve_voice(&state, voice).await?;

    Ok(Json(response))
}

/// Collect the `audio` file and `language` field from the form
async fn extract_voice_query(multipart: &mut Multipart, max_audio_bytes: usize) -> Result<VoiceQuery, ApiError> {
    let mut audio = None;
    let mut language = Language::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "audio" => {
                let encoding = AudioEncoding::detect(field.file_name(), field.content_type());
                let data = field.bytes().await.map_err(multipart_error)?;

                if data.len() > max_audio_bytes {
                    return Err(ApiError::payload_too_large("Audio file too large")
                        .with_details(format!("Limit is {} bytes", max_audio_bytes)));
                }

                tracing::debug!(size = data.len(), encoding = encoding.as_str(), "Received audio upload");
                audio = Some(AudioClip::new(data.to_vec(), encoding));
            }
            "language" => {
                let code = field.text().await.map_err(multipart_error)?;
                language = Language::from_code(code.trim());
            }
            _ => {}
        }
    }

    Ok(VoiceQuery::new(audio, language))
}

fn multipart_error(err: MultipartError) -> ApiError {
    ApiError {
        status: err.status(),
        message: "Failed to parse multipart form".to_string(),
        details: Some(err.body_text()),
    }
}
