use async_trait::async_trait;
use std::path::Path;

use crate::error::Result;
use crate::models::AudioEncoding;

/// Transcription request for audio staged on disk
#[derive(Debug, Clone, Copy)]
pub struct SpeechRequest<'a> {
    pub audio_path: &'a Path,
    pub locale: &'a str,
    pub encoding: AudioEncoding,
}

/// Port for speech-to-text services
#[async_trait]
pub trait SpeechBackend: Send + Sync {
    /// Transcribe the staged audio and return the transcript
    async fn transcribe(&self, request: &SpeechRequest<'_>) -> Result<String>;

    /// Get the name of the backend for logs
    fn name(&self) -> &str;
}
