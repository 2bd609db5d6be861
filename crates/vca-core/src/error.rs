//! Error types for Virtual CA

use thiserror::Error;

/// Failures raised by backend adapters and configuration loading.
///
/// Components never let these escape: they are logged and converted into a
/// fallback value at the component boundary.
#[derive(Debug, Error)]
pub enum VcaError {
    // Backend errors
    #[error("{backend} backend unavailable: {reason}")]
    BackendUnavailable { backend: String, reason: String },

    #[error("{backend} backend did not answer within {seconds}s")]
    Timeout { backend: String, seconds: u64 },

    #[error("Malformed response from {backend} backend: {reason}")]
    MalformedResponse { backend: String, reason: String },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl VcaError {
    pub fn unavailable(backend: impl Into<String>, reason: impl ToString) -> Self {
        Self::BackendUnavailable {
            backend: backend.into(),
            reason: reason.to_string(),
        }
    }

    pub fn malformed(backend: impl Into<String>, reason: impl ToString) -> Self {
        Self::MalformedResponse {
            backend: backend.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<serde_json::Error> for VcaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, VcaError>;

/// Caller-input validation failures detected before the pipeline starts.
///
/// These are the only conditions that short-circuit a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("No query provided")]
    EmptyQuery,

    #[error("No audio file provided")]
    MissingAudio,
}
