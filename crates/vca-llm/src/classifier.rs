use serde_json::Value as JsonValue;
use std::sync::Arc;
use std::time::Duration;
use vca_core::error::{Result, VcaError};
use vca_core::models::analysis::{DEFAULT_INTENT, DEFAULT_TOPIC};
use vca_core::ports::{bounded, ChatBackend, ChatRequest, DEFAULT_CALL_TIMEOUT};
use vca_core::{Analysis, Query, StageOutcome};

use crate::prompts::CLASSIFIER_SYSTEM_PROMPT;

/// Sampling temperature for classification; low for precise analysis
pub const CLASSIFIER_TEMPERATURE: f32 = 0.2;

/// Number of leading query words used as search terms without a model
const HEURISTIC_TERM_COUNT: usize = 3;

/// Turns a query into a structured [`Analysis`]
pub struct QueryClassifier {
    backend: Option<Arc<dyn ChatBackend>>,
    timeout: Duration,
}

impl QueryClassifier {
    /// Create a classifier; `None` means no classification backend is configured
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

    /// Analyze a query. Never fails.
    ///
    /// Without a backend the first words of the query become the search
    /// terms. When the backend errors or returns unusable output, the whole
    /// query text becomes the single search term instead.
    pub async fn analyze(&self, query: &Query) -> StageOutcome<Analysis> {
        let Some(backend) = &self.backend else {
            tracing::warn!("Classification backend not configured, using heuristic analysis");
            return StageOutcome::Unconfigured(heuristic_analysis(query.text()));
        };

        match self.classify(backend.as_ref(), query).await {
            Ok(analysis) => {
                tracing::debug!(
                    topic = %analysis.topic,
                    intent = %analysis.intent,
                    search_terms = ?analysis.search_terms,
                    "Query analysis"
                );
                StageOutcome::Live(analysis)
            }
            Err(e) => {
                tracing::error!(error = %e, backend = backend.name(), "Error analyzing query");
                StageOutcome::recovered(recovery_analysis(query.text()), e)
            }
        }
    }

    async fn classify(&self, backend: &dyn ChatBackend, query: &Query) -> Result<Analysis> {
        let request = ChatRequest::new(CLASSIFIER_SYSTEM_PROMPT, query.text())
            .with_temperature(CLASSIFIER_TEMPERATURE);

        let raw = bounded(backend.name(), self.timeout, backend.complete(&request)).await?;
        parse_analysis(&raw)
    }
}

/// Analysis used when no classification backend is configured
pub fn heuristic_analysis(text: &str) -> Analysis {
    let words: Vec<String> = text
        .split_whitespace()
        .take(HEURISTIC_TERM_COUNT)
        .map(str::to_string)
        .collect();

    if words.is_empty() {
        Analysis::general(Analysis::fallback_search_terms())
    } else {
        Analysis::general(words)
    }
}

/// Analysis used after the classification backend failed
pub fn recovery_analysis(text: &str) -> Analysis {
    if text.is_empty() {
        Analysis::general(Analysis::fallback_search_terms())
    } else {
        Analysis::general(vec![text.to_string()])
    }
}

/// Parse model output into an [`Analysis`].
///
/// The output must be a JSON object, optionally wrapped in a Markdown code
/// fence. Missing fields take their defaults; a `search_terms` value that is
/// not a list yields no search terms.
pub fn parse_analysis(raw: &str) -> Result<Analysis> {
    let value: JsonValue = serde_json::from_str(strip_code_fence(raw))
        .map_err(|e| VcaError::malformed("classifier", format!("Response is not JSON: {}", e)))?;

    let JsonValue::Object(fields) = value else {
        return Err(VcaError::malformed("classifier", "Response is not a JSON object"));
    };

    let text_field = |name: &str, default: &str| {
        fields
            .get(name)
            .and_then(JsonValue::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(default)
            .to_string()
    };

    let search_terms = match fields.get("search_terms") {
        Some(JsonValue::Array(items)) => items.iter().filter_map(scalar_text).collect(),
        Some(other) => {
            tracing::debug!(search_terms = %other, "search_terms is not a list");
            Vec::new()
        }
        None => Vec::new(),
    };

    let entities = match fields.get("entities") {
        Some(JsonValue::Array(items)) => items.iter().filter_map(entity_text).collect(),
        Some(JsonValue::Object(map)) => map
            .iter()
            .filter_map(|(key, value)| entity_text(value).map(|text| format!("{}: {}", key, text)))
            .collect(),
        _ => Vec::new(),
    };

    Ok(Analysis {
        topic: text_field("topic", DEFAULT_TOPIC),
        search_terms,
        intent: text_field("intent", DEFAULT_INTENT),
        entities,
    })
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") on the opening fence line
    let body = rest.split_once('\n').map(|(_, body)| body).unwrap_or(rest);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

fn scalar_text(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn entity_text(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::Null => None,
        JsonValue::String(s) if s.trim().is_empty() => None,
        JsonValue::String(s) => Some(s.trim().to_string()),
        other => Some(other.to_string()),
    }
}
