use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use vca_core::config::{Credential, LayeredConfig};
use vca_core::error::{Result, VcaError};
use vca_core::ports::{ChatBackend, ChatRequest};

const BACKEND: &str = "groq";

/// Groq chat-completions client (OpenAI-compatible wire format)
pub struct GroqClient {
    /// Base URL for the API (e.g., "https://api.groq.com/openai/v1")
    base_url: String,

    /// Model name to use for completions
    model: String,

    api_key: Credential,

    timeout: Duration,

    /// HTTP client
    client: reqwest::Client,
}

impl GroqClient {
    /// Create a new client
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Credential,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| VcaError::unavailable(BACKEND, format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key,
            timeout,
            client,
        })
    }

    /// Build a client from configuration; `None` when no API key is configured
    pub fn from_config(config: &LayeredConfig) -> Result<Option<Self>> {
        let Some(api_key) = config.groq_api_key.value.clone() else {
            return Ok(None);
        };

        Self::new(
            config.groq_base_url.value.clone(),
            config.groq_model.value.clone(),
            api_key,
            config.request_timeout(),
        )
        .map(Some)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn body<'a>(&'a self, request: &'a ChatRequest) -> CompletionRequest<'a> {
        CompletionRequest {
            model: &self.model,
            messages: vec![
                Message { role: "system", content: &request.system },
                Message { role: "user", content: &request.user },
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        }
    }

    fn transport_error(&self, err: reqwest::Error) -> VcaError {
        if err.is_timeout() {
            VcaError::Timeout {
                backend: BACKEND.to_string(),
                seconds: self.timeout.as_secs(),
            }
        } else {
            VcaError::unavailable(BACKEND, format!("Failed to reach {}: {}", self.base_url, err))
        }
    }
}

#[async_trait]
impl ChatBackend for GroqClient {
    async fn complete(&self, request: &ChatRequest) -> Result<String> {
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(self.api_key.expose())
            .json(&self.body(request))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(VcaError::unavailable(
                BACKEND,
                format!("API error ({}): {}", status, error_text),
            ));
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| VcaError::malformed(BACKEND, format!("Failed to parse response: {}", e)))?;

        completion.into_text()
    }

    fn name(&self) -> &str {
        BACKEND
    }
}

/// Request body for the chat-completions API
#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

/// Response from the chat-completions API
#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl CompletionResponse {
    fn into_text(self) -> Result<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| VcaError::malformed(BACKEND, "Completion contained no text"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> GroqClient {
        GroqClient::new(
            "https://api.groq.com/openai/v1/",
            "llama3-70b-8192",
            Credential::new("gsk_test").unwrap(),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_groq_client_creation() {
        let client = client();
        assert_eq!(client.model(), "llama3-70b-8192");
        assert_eq!(client.name(), "groq");
        assert_eq!(client.endpoint(), "https://api.groq.com/openai/v1/chat/completions");
    }

    #[test]
    fn test_from_config_without_key_is_none() {
        let config = LayeredConfig::with_defaults();
        assert!(GroqClient::from_config(&config).unwrap().is_none());
    }

    #[test]
    fn test_request_body_shape() {
        let client = client();
        let request = ChatRequest::new("sys", "usr").with_temperature(0.5).with_max_tokens(1000);
        let body = serde_json::to_value(client.body(&request)).unwrap();

        assert_eq!(body["model"], "llama3-70b-8192");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "sys");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "usr");
        assert_eq!(body["temperature"], 0.5);
        assert_eq!(body["max_tokens"], 1000);
    }

    #[test]
    fn test_request_body_omits_unbounded_max_tokens() {
        let client = client();
        let request = ChatRequest::new("sys", "usr").with_temperature(0.2);
        let body = serde_json::to_value(client.body(&request)).unwrap();
        assert!(body.get("max_tokens").is_none());
    }

    #[test]
    fn test_response_text_extraction() {
        let response: CompletionResponse = serde_json::from_str(
            r#"{"choices":[{"index":0,"message":{"role":"assistant","content":"Hello"}}]}"#,
        )
        .unwrap();
        assert_eq!(response.into_text().unwrap(), "Hello");
    }

    #[test]
    fn test_empty_response_is_malformed() {
        for raw in [
            r#"{"choices":[]}"#,
            r#"{}"#,
            r#"{"choices":[{"message":{"content":null}}]}"#,
            r#"{"choices":[{"message":{"content":"   "}}]}"#,
        ] {
            let response: CompletionResponse = serde_json::from_str(raw).unwrap();
            assert!(
                matches!(response.into_text(), Err(VcaError::MalformedResponse { .. })),
                "{} should be malformed",
                raw
            );
        }
    }
}
