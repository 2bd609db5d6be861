use crate::cli::DoctorArgs;
use crate::output::OutputWriter;
use anyhow::{Context, Result};
use console::style;
use serde_json::json;
use tabled::Tabled;
use vca_core::config::LayeredConfig;
use vca_retrieval::{LegalSourceKind, PipelineOrchestrator};

#[derive(Tabled)]
struct ConfigRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Source")]
    source: String,
}

pub fn execute(args: DoctorArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let pipeline = PipelineOrchestrator::from_config(config).context("Failed to build pipeline")?;
    let backends = pipeline.backends();
    let inspection = config.to_inspection_map();

    if output.is_json() {
        let values: serde_json::Map<String, serde_json::Value> = inspection
            .iter()
            .map(|(key, (value, source))| (key.clone(), json!({ "value": value, "source": source.to_string() })))
            .collect();
        return output.result(json!({ "backends": backends, "config": values }));
    }

    println!("\n{}", style("Virtual CA Health Check").bold().underlined());
    println!("{}", style("═".repeat(60)).dim());

    check("Classification", backends.classification, "GROQ_API_KEY");
    check("Generation", backends.generation, "GROQ_API_KEY");
    check("Speech", backends.speech, "REVERIE_API_KEY");

    match backends.legal_search {
        LegalSourceKind::Live => println!("{} Legal search: live", style("✓").green()),
        LegalSourceKind::Demo => {
            println!("{} Legal search: demo (canned snippets)", style("⚠").yellow());
            println!("  → Set VCA_LEGAL_MODE=live for ranked search");
        }
        LegalSourceKind::Unconfigured => {
            println!("{} Legal search: not configured", style("✗").red());
            println!("  → Set KANOON_API_KEY");
        }
    }

    if args.verbose {
        output.section("Configuration");
        let rows = inspection
            .into_iter()
            .map(|(key, (value, source))| ConfigRow {
                key,
                value,
                source: source.to_string(),
            })
            .collect();
        output.table(rows);
    }

    println!();
    if backends.classification && backends.speech && backends.legal_search == LegalSourceKind::Live {
        output.success("All backends configured");
    }
    Ok(())
}

fn check(name: &str, configured: bool, env_var: &str) {
    if configured {
        println!("{} {}: configured", style("✓").green(), name);
    } else {
        println!("{} {}: not configured", style("✗").red(), name);
        println!("  → Set {}", env_var);
    }
}
