use std::sync::Arc;
use std::time::Duration;
use vca_core::error::{Result, VcaError};
use vca_core::ports::{bounded, ChatBackend, ChatRequest, DEFAULT_CALL_TIMEOUT};
use vca_core::{message, Analysis, Language, MessageId, StageOutcome};

use crate::prompts::{composer_system_prompt, composer_user_message};

/// Balanced between creativity and precision
pub const COMPOSER_TEMPERATURE: f32 = 0.5;

/// Cap on generated tokens per answer
pub const COMPOSER_MAX_TOKENS: u32 = 1000;

/// Produces the final localized answer
pub struct ResponseComposer {
    backend: Option<Arc<dyn ChatBackend>>,
    timeout: Duration,
}

impl ResponseComposer {
    /// Create a composer; `None` means no generation backend is configured
    pub fn new(backend: Option<Arc<dyn ChatBackend>>) -> Self {
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

    /// Compose an answer. Never fails.
    pub async fn compose(
        &self,
        query: &str,
        analysis: &Analysis,
        legal_info: &[String],
        language: Language,
    ) -> StageOutcome<String> {
        let Some(backend) = &self.backend else {
            tracing::warn!("Generation backend not configured, returning configuration notice");
            return StageOutcome::Unconfigured(
                message(MessageId::GenerationUnconfigured, language).to_string(),
            );
        };

        match self.generate(backend.as_ref(), query, analysis, legal_info, language).await {
            Ok(text) => StageOutcome::Live(text),
            Err(e) => {
                tracing::error!(error = %e, backend = backend.name(), "Error generating response");
                StageOutcome::recovered(message(MessageId::GenerationFailed, language).to_string(), e)
            }
        }
    }

    async fn generate(
        &self,
        backend: &dyn ChatBackend,
        query: &str,
        analysis: &Analysis,
        legal_info: &[String],
        language: Language,
    ) -> Result<String> {
        let request = ChatRequest::new(
            composer_system_prompt(language),
            composer_user_message(query, analysis, legal_info),
        )
        .with_temperature(COMPOSER_TEMPERATURE)
        .with_max_tokens(COMPOSER_MAX_TOKENS);

        let text = bounded(backend.name(), self.timeout, backend.complete(&request)).await?;

        if text.trim().is_empty() {
            return Err(VcaError::malformed(backend.name(), "Empty response"));
        }
        Ok(text)
    }
}
