use crate::cli::AskArgs;
use crate::output::OutputWriter;
use anyhow::{Context, Result};
use vca_core::config::LayeredConfig;
use vca_retrieval::PipelineOrchestrator;

pub async fn execute(args: AskArgs, config: &LayeredConfig, output: &OutputWriter, explain: bool) -> Result<()> {
    let pipeline = PipelineOrchestrator::from_config(config).context("Failed to build pipeline")?;

    let answer = pipeline.resolve_text(&args.query, args.language()).await?;

    output.result(&answer)?;

    output.section("Answer");
    output.text(&answer.response);

    if explain {
        output.section("Pipeline");
        output.stages(&answer.stages);
        output.kv("Request", answer.request_id);
    }

    if !answer.fully_live() && !explain {
        output.warning("Some stages ran without a live backend; rerun with --explain for details");
    }

    Ok(())
}
