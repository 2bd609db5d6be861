use console::style;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::fmt::Display;
use tabled::{settings::Style, Table, Tabled};
use vca_core::StageReport;

/// Output format mode
#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Human,
    Json,
}

pub struct OutputWriter {
    format: OutputFormat,
}

#[derive(Tabled)]
struct StageRow {
    #[tabled(rename = "Stage")]
    stage: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Cause")]
    cause: String,
}

impl OutputWriter {
    pub fn new(json: bool) -> Self {
        Self {
            format: if json {
                OutputFormat::Json
            } else {
                OutputFormat::Human
            },
        }
    }

    pub fn success(&self, message: impl Display) {
        match self.format {
            OutputFormat::Human => println!("{} {}", style("✓").green().bold(), message),
            OutputFormat::Json => println!("{}", status_json("success", message)),
        }
    }

    pub fn warning(&self, message: impl Display) {
        match self.format {
            OutputFormat::Human => eprintln!("{} {}", style("⚠").yellow().bold(), message),
            OutputFormat::Json => eprintln!("{}", status_json("warning", message)),
        }
    }

    pub fn error(&self, message: impl Display) {
        match self.format {
            OutputFormat::Human => eprintln!("{} {}", style("✗").red().bold(), message),
            OutputFormat::Json => eprintln!("{}", status_json("error", message)),
        }
    }

    pub fn table<T: Tabled>(&self, data: Vec<T>) {
        if self.is_json() {
            return;
        }
        if data.is_empty() {
            println!("{}", style("(no data)").dim());
        } else {
            let mut table = Table::new(data);
            table.with(Style::rounded());
            println!("{}", table);
        }
    }

    /// Per-stage resolution table (human mode only)
    pub fn stages(&self, reports: &[StageReport]) {
        let rows = reports
            .iter()
            .map(|r| StageRow {
                stage: r.stage.to_string(),
                status: r.status.to_string(),
                cause: r.cause.clone().unwrap_or_default(),
            })
            .collect();
        self.table(rows);
    }

    /// Emit a JSON success envelope around `data` (JSON mode only)
    pub fn result<T: Serialize>(&self, data: T) -> anyhow::Result<()> {
        if self.is_json() {
            let output = serde_json::json!({
                "status": "success",
                "data": data,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Ok(())
    }

    pub fn kv(&self, key: impl Display, value: impl Display) {
        if !self.is_json() {
            println!("{}: {}", style(key).bold(), value);
        }
    }

    pub fn section(&self, title: impl Display) {
        if !self.is_json() {
            println!("\n{}", style(title).bold().underlined());
        }
    }

    pub fn text(&self, body: impl Display) {
        if !self.is_json() {
            println!("{}", body);
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }
}

fn status_json(status: &str, message: impl Display) -> String {
    let output: JsonValue = serde_json::json!({
        "status": status,
        "message": message.to_string(),
    });
    serde_json::to_string_pretty(&output).unwrap_or_else(|_| output.to_string())
}
