use crate::cli::TranscribeArgs;
use crate::output::OutputWriter;
use anyhow::{Context, Result};
use vca_core::config::LayeredConfig;
use vca_core::{AudioClip, AudioEncoding, VoiceQuery};
use vca_retrieval::PipelineOrchestrator;

pub async fn execute(
    args: TranscribeArgs,
    config: &LayeredConfig,
    output: &OutputWriter,
    explain: bool,
) -> Result<()> {
    let bytes = tokio::fs::read(&args.audio)
        .await
        .with_context(|| format!("Failed to read audio file {}", args.audio.display()))?;

    let file_name = args.audio.file_name().and_then(|name| name.to_str());
    let encoding = AudioEncoding::detect(file_name, None);

    tracing::debug!(size = bytes.len(), encoding = encoding.as_str(), "Loaded audio file");

    let pipeline = PipelineOrchestrator::from_config(config).context("Failed to build pipeline")?;
    let voice = VoiceQuery::new(Some(AudioClip::new(bytes, encoding)), args.language());

    let answer = pipeline.resolve_voice(voice).await?;

    output.result(&answer)?;

    output.section("Transcription");
    output.text(answer.transcription.as_deref().unwrap_or_default());

    output.section("Answer");
    output.text(&answer.response);

    if explain {
        output.section("Pipeline");
        output.stages(&answer.stages);
        output.kv("Request", answer.request_id);
    }

    Ok(())
}
