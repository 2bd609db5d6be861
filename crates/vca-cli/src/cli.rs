use clap::{Parser, Subcommand};
use std::path::PathBuf;
use vca_core::config::{parse_legal_mode, parse_timeout_secs, CliConfigOverrides, LegalMode};
use vca_core::Language;

/// Virtual CA - Indian taxation and accounting assistant
#[derive(Parser, Debug)]
#[command(name = "vca")]
#[command(about = "Indian taxation and accounting assistant", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Show how each pipeline stage resolved
    #[arg(long, global = true)]
    pub explain: bool,

    /// Configuration file (defaults to ./vca.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Chat model used for classification and answers
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Legal search mode (live or demo)
    #[arg(long, global = true, value_parser = legal_mode_arg)]
    pub legal_mode: Option<LegalMode>,

    /// Per-call backend timeout in seconds
    #[arg(long, global = true, value_parser = timeout_arg)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn overrides(&self) -> CliConfigOverrides {
        CliConfigOverrides {
            groq_model: self.model.clone(),
            legal_mode: self.legal_mode,
            request_timeout_secs: self.timeout,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask a taxation or accounting question
    Ask(AskArgs),

    /// Transcribe an audio question and answer it
    Transcribe(TranscribeArgs),

    /// Show which backends are configured
    Doctor(DoctorArgs),
}

#[derive(Parser, Debug)]
pub struct AskArgs {
    /// The question to ask
    pub query: String,

    /// Response language (en or hi)
    #[arg(short, long, default_value = "en")]
    pub language: String,
}

impl AskArgs {
    pub fn language(&self) -> Language {
        Language::from_code(&self.language)
    }
}

#[derive(Parser, Debug)]
pub struct TranscribeArgs {
    /// Audio file containing the question
    pub audio: PathBuf,

    /// Spoken language (en or hi)
    #[arg(short, long, default_value = "en")]
    pub language: String,
}

impl TranscribeArgs {
    pub fn language(&self) -> Language {
        Language::from_code(&self.language)
    }
}

#[derive(Parser, Debug)]
pub struct DoctorArgs {
    /// Show the source of every configuration value
    #[arg(short, long)]
    pub verbose: bool,
}

fn legal_mode_arg(s: &str) -> Result<LegalMode, String> {
    parse_legal_mode(s).map_err(|e| e.to_string())
}

fn timeout_arg(s: &str) -> Result<u64, String> {
    parse_timeout_secs(s).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ask_with_global_flags() {
        let cli = Cli::try_parse_from(["vca", "ask", "What is GST?", "--language", "hi", "--json", "--explain"])
            .unwrap();

        assert!(cli.json);
        assert!(cli.explain);
        match cli.command {
            Commands::Ask(args) => {
                assert_eq!(args.query, "What is GST?");
                assert_eq!(args.language(), Language::Hi);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_language_code_is_english() {
        let cli = Cli::try_parse_from(["vca", "ask", "tds", "-l", "ta"]).unwrap();
        match cli.command {
            Commands::Ask(args) => assert_eq!(args.language(), Language::En),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_overrides_from_flags() {
        let cli = Cli::try_parse_from([
            "vca",
            "--legal-mode",
            "demo",
            "--timeout",
            "30",
            "--model",
            "llama-3.1-8b-instant",
            "doctor",
        ])
        .unwrap();
        let overrides = cli.overrides();

        assert_eq!(overrides.legal_mode, Some(LegalMode::Demo));
        assert_eq!(overrides.request_timeout_secs, Some(30));
        assert_eq!(overrides.groq_model.as_deref(), Some("llama-3.1-8b-instant"));
    }

    #[test]
    fn test_invalid_overrides_are_rejected() {
        assert!(Cli::try_parse_from(["vca", "--legal-mode", "maybe", "doctor"]).is_err());
        assert!(Cli::try_parse_from(["vca", "--timeout", "0", "doctor"]).is_err());
    }
}
