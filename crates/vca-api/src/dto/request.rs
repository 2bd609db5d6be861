use serde::Deserialize;
use vca_core::Language;

/// Text query request body
#[derive(Debug, Deserialize)]
pub struct TextQueryRequest {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub language: Language,
}
