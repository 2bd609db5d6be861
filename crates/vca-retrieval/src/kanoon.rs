use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use std::time::Duration;
use vca_core::config::{Credential, LayeredConfig};
use vca_core::error::{Result, VcaError};
use vca_core::ports::{LegalDocument, LegalSearchBackend, LegalSearchRequest};

const BACKEND: &str = "kanoon";

/// Indian Kanoon legal search client
pub struct KanoonClient {
    base_url: String,
    api_key: Credential,
    timeout: Duration,
    client: reqwest::Client,
}

impl KanoonClient {
    pub fn new(base_url: impl Into<String>, api_key: Credential, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| VcaError::unavailable(BACKEND, format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into(),
            api_key,
            timeout,
            client,
        })
    }

    /// Build a client from configuration; `None` when no API key is configured
    pub fn from_config(config: &LayeredConfig) -> Result<Option<Self>> {
        let Some(api_key) = config.kanoon_api_key.value.clone() else {
            return Ok(None);
        };

        Self::new(config.kanoon_base_url.value.clone(), api_key, config.request_timeout()).map(Some)
    }

    /// Search URL with the query encoded as request parameters
    pub fn search_url(&self, request: &LegalSearchRequest) -> Result<Url> {
        let limit = request.limit.to_string();
        Url::parse_with_params(
            &self.base_url,
            &[
                ("formInput", request.query.as_str()),
                ("pageNum", "1"),
                ("pageSize", limit.as_str()),
                ("sortBy", request.sort.as_str()),
            ],
        )
        .map_err(|e| VcaError::ConfigInvalid {
            key: "kanoon.base_url".to_string(),
            reason: format!("{}: {}", self.base_url, e),
        })
    }
}

#[async_trait]
impl LegalSearchBackend for KanoonClient {
    async fn search(&self, request: &LegalSearchRequest) -> Result<Vec<LegalDocument>> {
        let url = self.search_url(request)?;

        let response = self
            .client
            .get(url)
            .bearer_auth(self.api_key.expose())
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    VcaError::Timeout {
                        backend: BACKEND.to_string(),
                        seconds: self.timeout.as_secs(),
                    }
                } else {
                    VcaError::unavailable(BACKEND, format!("Failed to reach {}: {}", self.base_url, e))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(VcaError::unavailable(
                BACKEND,
                format!("API error ({}): {}", status, error_text),
            ));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| VcaError::malformed(BACKEND, format!("Failed to parse response: {}", e)))?;

        Ok(body.into_documents(request.limit))
    }

    fn name(&self) -> &str {
        BACKEND
    }
}

/// Search response body
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    docs: Vec<SearchHit>,
}

/// A hit may carry `snippet`, `headline`, or both; `snippet` wins
#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(default)]
    title: String,
    snippet: Option<String>,
    headline: Option<String>,
}

impl SearchResponse {
    fn into_documents(self, limit: usize) -> Vec<LegalDocument> {
        self.docs
            .into_iter()
            .take(limit)
            .map(|hit| LegalDocument {
                title: hit.title,
                snippet: hit.snippet.or(hit.headline).unwrap_or_default(),
            })
            .collect()
    }
}
