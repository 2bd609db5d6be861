use std::env;

/// Default upload cap for voice queries
pub const DEFAULT_MAX_AUDIO_BYTES: usize = 25 * 1024 * 1024;

/// API server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub port: u16,
    pub cors_origin: String,
    pub max_audio_bytes: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            cors_origin: "*".to_string(),
            max_audio_bytes: DEFAULT_MAX_AUDIO_BYTES,
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = lookup("VCA_PORT").and_then(|p| p.parse().ok()).unwrap_or(defaults.port);

        let cors_origin = lookup("VCA_CORS_ORIGIN")
            .filter(|origin| !origin.trim().is_empty())
            .unwrap_or(defaults.cors_origin);

        let max_audio_bytes = lookup("VCA_MAX_AUDIO_BYTES")
            .and_then(|b| b.parse().ok())
            .filter(|bytes| *bytes > 0)
            .unwrap_or(defaults.max_audio_bytes);

        Self {
            port,
            cors_origin,
            max_audio_bytes,
        }
    }

    /// Get the server bind address
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }

    /// Whether any origin may call the API
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origin == "*"
    }
}
