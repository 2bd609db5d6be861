use async_trait::async_trait;
use serde::Serialize;

use crate::error::Result;

/// One system-instruction + user-message completion request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub system: String,
    pub user: String,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
}

impl ChatRequest {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            temperature: 1.0,
            max_tokens: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Port for chat-completion models (classification and generation)
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Submit a request and return the generated text
    async fn complete(&self, request: &ChatRequest) -> Result<String>;

    /// Get the name of the backend for logs
    fn name(&self) -> &str;
}
