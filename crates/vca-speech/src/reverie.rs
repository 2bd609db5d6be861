use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::time::Duration;
use vca_core::config::{Credential, LayeredConfig};
use vca_core::error::{Result, VcaError};
use vca_core::ports::{SpeechBackend, SpeechRequest};

const BACKEND: &str = "reverie";

/// Reverie speech-to-text client
pub struct ReverieClient {
    endpoint: String,
    api_key: Credential,
    timeout: Duration,
    client: reqwest::Client,
}

impl ReverieClient {
    pub fn new(endpoint: impl Into<String>, api_key: Credential, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| VcaError::unavailable(BACKEND, format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into(),
            api_key,
            timeout,
            client,
        })
    }

    /// Build a client from configuration; `None` when no API key is configured
    pub fn from_config(config: &LayeredConfig) -> Result<Option<Self>> {
        let Some(api_key) = config.reverie_api_key.value.clone() else {
            return Ok(None);
        };

        Self::new(config.reverie_base_url.value.clone(), api_key, config.request_timeout()).map(Some)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn form(&self, request: &SpeechRequest<'_>) -> Result<Form> {
        let audio = tokio::fs::read(request.audio_path).await?;
        let file_name = request
            .audio_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("audio.{}", request.encoding.as_str()));

        let part = Part::bytes(audio)
            .file_name(file_name)
            .mime_str(request.encoding.mime_type())
            .map_err(|e| VcaError::unavailable(BACKEND, format!("Invalid audio part: {}", e)))?;

        Ok(Form::new()
            .part("audio", part)
            .text("language", request.locale.to_string())
            .text("encoding", request.encoding.as_str()))
    }
}

#[async_trait]
impl SpeechBackend for ReverieClient {
    async fn transcribe(&self, request: &SpeechRequest<'_>) -> Result<String> {
        let form = self.form(request).await?;

        let response = self
            .client
            .post(&self.endpoint)
            .header("API-KEY", self.api_key.expose())
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    VcaError::Timeout {
                        backend: BACKEND.to_string(),
                        seconds: self.timeout.as_secs(),
                    }
                } else {
                    VcaError::unavailable(BACKEND, format!("Failed to reach {}: {}", self.endpoint, e))
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

        let body: TranscriptResponse = response
            .json()
            .await
            .map_err(|e| VcaError::malformed(BACKEND, format!("Failed to parse response: {}", e)))?;

        Ok(body.transcript.unwrap_or_default())
    }

    fn name(&self) -> &str {
        BACKEND
    }
}

/// Response from the speech-to-text API
#[derive(Debug, Deserialize)]
struct TranscriptResponse {
    transcript: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use vca_core::AudioEncoding;

    #[test]
    fn test_from_config_without_key_is_none() {
        assert!(ReverieClient::from_config(&LayeredConfig::with_defaults()).unwrap().is_none());
    }

    #[test]
    fn test_from_config_with_key() {
        let config = LayeredConfig::with_defaults()
            .load_from_lookup(|key| (key == "REVERIE_API_KEY").then(|| "rev".to_string()));
        let client = ReverieClient::from_config(&config).unwrap().unwrap();
        assert_eq!(client.endpoint(), "https://api.reverieinc.com/speech-to-text");
        assert_eq!(client.name(), "reverie");
    }

    #[test]
    fn test_transcript_response_tolerates_missing_field() {
        let body: TranscriptResponse = serde_json::from_str(r#"{"status":"ok"}"#).unwrap();
        assert!(body.transcript.is_none());
        let body: TranscriptResponse =
            serde_json::from_str(r#"{"transcript":"income tax rates"}"#).unwrap();
        assert_eq!(body.transcript.as_deref(), Some("income tax rates"));
    }

    #[tokio::test]
    async fn test_form_requires_readable_audio() {
        let client = ReverieClient::new(
            "http://localhost:9/stt",
            Credential::new("rev").unwrap(),
            Duration::from_secs(1),
        )
        .unwrap();
        let request = SpeechRequest {
            audio_path: Path::new("/nonexistent/vca-audio.wav"),
            locale: "en_IN",
            encoding: AudioEncoding::Wav,
        };

        assert!(matches!(client.form(&request).await, Err(VcaError::Io(_))));
    }
}
