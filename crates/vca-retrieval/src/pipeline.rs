use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;
use vca_core::config::LayeredConfig;
use vca_core::error::Result;
use vca_core::ports::{ChatBackend, SpeechBackend};
use vca_core::{
    message, Answer, Language, MessageId, Query, Rejection, Stage, StageReport, VoiceQuery,
};
use vca_llm::{GroqClient, QueryClassifier, ResponseComposer};
use vca_speech::{ReverieClient, SpeechTranscriber};

use crate::legal::{LegalInfoRetriever, LegalSourceKind};

/// Which backends the pipeline was built with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BackendSummary {
    pub classification: bool,
    pub legal_search: LegalSourceKind,
    pub generation: bool,
    pub speech: bool,
}

/// Query-resolution pipeline
///
/// Stages run strictly in sequence and every stage runs on every request,
/// whatever the previous stage produced. Only input validation can stop a
/// request, and only before the first stage.
pub struct PipelineOrchestrator {
    classifier: QueryClassifier,
    retriever: LegalInfoRetriever,
    composer: ResponseComposer,
    transcriber: SpeechTranscriber,
}

impl PipelineOrchestrator {
    pub fn new(
        classifier: QueryClassifier,
        retriever: LegalInfoRetriever,
        composer: ResponseComposer,
        transcriber: SpeechTranscriber,
    ) -> Self {
        Self {
            classifier,
            retriever,
            composer,
            transcriber,
        }
    }

    /// Build the pipeline from configuration.
    ///
    /// A backend without a credential is left unconfigured. No connectivity
    /// check is made.
    pub fn from_config(config: &LayeredConfig) -> Result<Self> {
        let timeout = config.request_timeout();

        let chat: Option<Arc<dyn ChatBackend>> = match GroqClient::from_config(config)? {
            Some(client) => Some(Arc::new(client)),
            None => None,
        };
        let speech: Option<Arc<dyn SpeechBackend>> = match ReverieClient::from_config(config)? {
            Some(client) => Some(Arc::new(client)),
            None => None,
        };

        Ok(Self::new(
            QueryClassifier::new(chat.clone()).with_timeout(timeout),
            LegalInfoRetriever::from_config(config)?,
            ResponseComposer::new(chat).with_timeout(timeout),
            SpeechTranscriber::new(speech).with_timeout(timeout),
        ))
    }

    pub fn backends(&self) -> BackendSummary {
        BackendSummary {
            classification: self.classifier.is_configured(),
            legal_search: self.retriever.kind(),
            generation: self.composer.is_configured(),
            speech: self.transcriber.is_configured(),
        }
    }

    /// Resolve a typed query
    pub async fn resolve_text(&self, text: &str, language: Language) -> std::result::Result<Answer, Rejection> {
        let query = Query::new(text, language).inspect_err(|r| tracing::warn!(reason = %r, "Rejected text query"))?;

        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("resolve", %request_id, path = "text", language = %language);

        Ok(self
            .run(request_id, query, None, Vec::new())
            .instrument(span)
            .await)
    }

    /// Resolve a spoken query; the transcript is surfaced alongside the answer
    pub async fn resolve_voice(&self, voice: VoiceQuery) -> std::result::Result<Answer, Rejection> {
        let (clip, language) = voice
            .into_audio()
            .inspect_err(|r| tracing::warn!(reason = %r, "Rejected voice query"))?;

        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("resolve", %request_id, path = "voice", language = %language);

        async {
            tracing::info!(bytes = clip.len(), encoding = clip.encoding().as_str(), "Received audio");

            let (report, transcript) = self
                .transcriber
                .transcribe(&clip, language)
                .await
                .report(Stage::Transcribe);
            log_stage(&report);

            // The transcriber never yields blank text; notices flow on as the query
            let query = Query::new(transcript.clone(), language)
                .or_else(|_| Query::new(message(MessageId::SpeechFailed, language), language))?;

            Ok::<_, Rejection>(self.run(request_id, query, Some(transcript), vec![report]).await)
        }
        .instrument(span)
        .await
    }

    async fn run(
        &self,
        request_id: Uuid,
        query: Query,
        transcription: Option<String>,
        mut stages: Vec<StageReport>,
    ) -> Answer {
        let (report, analysis) = self.classifier.analyze(&query).await.report(Stage::Classify);
        log_stage(&report);
        stages.push(report);

        let (report, legal_info) = self.retriever.fetch(&analysis.search_terms).await.report(Stage::Retrieve);
        log_stage(&report);
        stages.push(report);

        let (report, response) = self
            .composer
            .compose(query.text(), &analysis, &legal_info, query.language())
            .await
            .report(Stage::Compose);
        log_stage(&report);
        stages.push(report);

        tracing::info!(
            stages = stages.len(),
            live = stages.iter().all(|s| s.status.is_live()),
            "Query resolved"
        );

        Answer {
            request_id,
            transcription,
            response,
            stages,
            resolved_at: Utc::now(),
        }
    }
}

fn log_stage(report: &StageReport) {
    match &report.cause {
        Some(cause) => tracing::debug!(stage = %report.stage, status = %report.status, cause = %cause, "Stage complete"),
        None => tracing::debug!(stage = %report.stage, status = %report.status, "Stage complete"),
    }
}
