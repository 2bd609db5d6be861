use std::sync::Arc;
use std::time::Duration;
use vca_core::error::{Result, VcaError};
use vca_core::ports::{bounded, SpeechBackend, SpeechRequest, DEFAULT_CALL_TIMEOUT};
use vca_core::{message, AudioClip, Language, MessageId, StageOutcome};

use crate::staging::StagedAudio;

/// Converts recorded audio into text
pub struct SpeechTranscriber {
    backend: Option<Arc<dyn SpeechBackend>>,
    timeout: Duration,
}

impl SpeechTranscriber {
    /// Create a transcriber; `None` means no speech backend is configured
    pub fn new(backend: Option<Arc<dyn SpeechBackend>>) -> Self {
        Self {
            backend,
            timeout: DEFAULT_CALL_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.backend.is_some()
    }

    /// Transcribe a clip. Never fails; unavailable or failed transcription
    /// yields a localized notice in place of the transcript.
    pub async fn transcribe(&self, clip: &AudioClip, language: Language) -> StageOutcome<String> {
        let Some(backend) = &self.backend else {
            tracing::warn!("Speech backend not configured, returning configuration notice");
            return StageOutcome::Unconfigured(message(MessageId::SpeechUnconfigured, language).to_string());
        };

        match self.recognize(backend.as_ref(), clip, language).await {
            Ok(transcript) => {
                tracing::info!(chars = transcript.len(), locale = language.locale(), "Transcribed audio");
                StageOutcome::Live(transcript)
            }
            Err(e) => {
                tracing::error!(error = %e, backend = backend.name(), "Error converting speech to text");
                StageOutcome::recovered(message(MessageId::SpeechFailed, language).to_string(), e)
            }
        }
    }

    async fn recognize(&self, backend: &dyn SpeechBackend, clip: &AudioClip, language: Language) -> Result<String> {
        let staged = StagedAudio::stage(clip)?;

        let request = SpeechRequest {
            audio_path: staged.path(),
            locale: language.locale(),
            encoding: staged.encoding(),
        };
        let result = bounded(backend.name(), self.timeout, backend.transcribe(&request)).await;

        if let Err(e) = staged.release() {
            tracing::warn!(error = %e, "Failed to remove staged audio");
        }

        let transcript = result?;
        if transcript.trim().is_empty() {
            return Err(VcaError::malformed(backend.name(), "Empty transcript"));
        }
        Ok(transcript)
    }
}
