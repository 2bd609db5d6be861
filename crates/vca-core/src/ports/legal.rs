use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Relevance,
    Date,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Relevance => "relevance",
            SortOrder::Date => "date",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegalSearchRequest {
    pub query: String,
    pub limit: usize,
    pub sort: SortOrder,
}

/// A ranked legal search hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalDocument {
    pub title: String,
    pub snippet: String,
}

/// Port for ranked legal search
#[async_trait]
pub trait LegalSearchBackend: Send + Sync {
    /// Search for documents, best match first
    async fn search(&self, request: &LegalSearchRequest) -> Result<Vec<LegalDocument>>;

    /// Get the name of the backend for logs
    fn name(&self) -> &str;
}
