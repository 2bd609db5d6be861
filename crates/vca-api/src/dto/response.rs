use serde::Serialize;
use vca_core::Answer;
use vca_retrieval::BackendSummary;

/// Text query response
#[derive(Debug, Serialize)]
pub struct TextQueryResponse {
    pub response: String,
}

impl From<Answer> for TextQueryResponse {
    fn from(answer: Answer) -> Self {
        Self {
            response: answer.response,
        }
    }
}

/// Voice query response
#[derive(Debug, Serialize)]
pub struct VoiceQueryResponse {
    pub transcription: String,
    pub response: String,
}

impl From<Answer> for VoiceQueryResponse {
    fn from(answer: Answer) -> Self {
        Self {
            transcription: answer.transcription.unwrap_or_default(),
            response: answer.response,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub backends: BackendSummary,
}

impl HealthResponse {
    pub fn ok(backends: BackendSummary) -> Self {
        Self {
            status: "ok",
            service: "vca-api",
            version: env!("CARGO_PKG_VERSION"),
            backends,
        }
    }
}
