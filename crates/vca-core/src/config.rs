use crate::error::{Result, VcaError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Config file picked up from the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "vca.toml";

pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_GROQ_MODEL: &str = "llama3-70b-8192";
pub const DEFAULT_KANOON_BASE_URL: &str = "https://api.indiankanoon.org/search/";
pub const DEFAULT_REVERIE_BASE_URL: &str = "https://api.reverieinc.com/speech-to-text";
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;
const MAX_TIMEOUT_SECS: u64 = 120;

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConfigSource::Default => "default",
            ConfigSource::File => "file",
            ConfigSource::Environment => "environment",
            ConfigSource::Cli => "cli",
        };
        f.write_str(name)
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// A backend API key. Never printed.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    /// Wrap a raw key; empty or whitespace-only keys count as absent
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// How the legal retriever behaves once a credential is present
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegalMode {
    /// Ranked search against the live service
    #[default]
    Live,
    /// Keyword-routed canned snippets, no network call
    Demo,
}

/// Layered configuration for Virtual CA
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub groq_api_key: ConfigValue<Option<Credential>>,
    pub groq_base_url: ConfigValue<String>,
    pub groq_model: ConfigValue<String>,
    pub kanoon_api_key: ConfigValue<Option<Credential>>,
    pub kanoon_base_url: ConfigValue<String>,
    pub legal_mode: ConfigValue<LegalMode>,
    pub reverie_api_key: ConfigValue<Option<Credential>>,
    pub reverie_base_url: ConfigValue<String>,
    pub request_timeout_secs: ConfigValue<u64>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            groq_api_key: ConfigValue::new(None, ConfigSource::Default),
            groq_base_url: ConfigValue::new(DEFAULT_GROQ_BASE_URL.to_string(), ConfigSource::Default),
            groq_model: ConfigValue::new(DEFAULT_GROQ_MODEL.to_string(), ConfigSource::Default),
            kanoon_api_key: ConfigValue::new(None, ConfigSource::Default),
            kanoon_base_url: ConfigValue::new(
                DEFAULT_KANOON_BASE_URL.to_string(),
                ConfigSource::Default,
            ),
            legal_mode: ConfigValue::new(LegalMode::Live, ConfigSource::Default),
            reverie_api_key: ConfigValue::new(None, ConfigSource::Default),
            reverie_base_url: ConfigValue::new(
                DEFAULT_REVERIE_BASE_URL.to_string(),
                ConfigSource::Default,
            ),
            request_timeout_secs: ConfigValue::new(DEFAULT_TIMEOUT_SECS, ConfigSource::Default),
        }
    }

    /// Defaults, then the config file (explicit path, or `vca.toml` if present), then environment
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = Self::with_defaults();

        let config = match config_path {
            Some(path) => config.load_from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                config.load_from_file(DEFAULT_CONFIG_FILE)?
            }
            None => config,
        };

        Ok(config.load_from_env())
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| VcaError::ConfigInvalid {
            key: "file".to_string(),
            reason: format!("Failed to read config file: {}", e),
        })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| VcaError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(section) = file_config.groq {
            if let Some(key) = section.api_key.and_then(Credential::new) {
                self.groq_api_key.update(Some(key), ConfigSource::File);
            }
            if let Some(url) = section.base_url {
                self.groq_base_url.update(url, ConfigSource::File);
            }
            if let Some(model) = section.model {
                self.groq_model.update(model, ConfigSource::File);
            }
        }

        if let Some(section) = file_config.kanoon {
            if let Some(key) = section.api_key.and_then(Credential::new) {
                self.kanoon_api_key.update(Some(key), ConfigSource::File);
            }
            if let Some(url) = section.base_url {
                self.kanoon_base_url.update(url, ConfigSource::File);
            }
            if let Some(mode) = section.mode {
                self.legal_mode.update(mode, ConfigSource::File);
            }
        }

        if let Some(section) = file_config.reverie {
            if let Some(key) = section.api_key.and_then(Credential::new) {
                self.reverie_api_key.update(Some(key), ConfigSource::File);
            }
            if let Some(url) = section.base_url {
                self.reverie_base_url.update(url, ConfigSource::File);
            }
        }

        if let Some(secs) = file_config.request_timeout_secs {
            self.request_timeout_secs.update(validate_timeout_secs(secs)?, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(self) -> Self {
        self.load_from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key/value lookup shaped like the process environment
    pub fn load_from_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("GROQ_API_KEY").and_then(Credential::new) {
            self.groq_api_key.update(Some(key), ConfigSource::Environment);
        }
        if let Some(url) = lookup("VCA_GROQ_BASE_URL") {
            self.groq_base_url.update(url, ConfigSource::Environment);
        }
        if let Some(model) = lookup("VCA_GROQ_MODEL") {
            self.groq_model.update(model, ConfigSource::Environment);
        }

        if let Some(key) = lookup("KANOON_API_KEY").and_then(Credential::new) {
            self.kanoon_api_key.update(Some(key), ConfigSource::Environment);
        }
        if let Some(url) = lookup("VCA_KANOON_BASE_URL") {
            self.kanoon_base_url.update(url, ConfigSource::Environment);
        }
        if let Some(mode_str) = lookup("VCA_LEGAL_MODE") {
            match parse_legal_mode(&mode_str) {
                Ok(mode) => self.legal_mode.update(mode, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid VCA_LEGAL_MODE value '{}': expected live or demo",
                    mode_str
                ),
            }
        }

        if let Some(key) = lookup("REVERIE_API_KEY").and_then(Credential::new) {
            self.reverie_api_key.update(Some(key), ConfigSource::Environment);
        }
        if let Some(url) = lookup("VCA_REVERIE_BASE_URL") {
            self.reverie_base_url.update(url, ConfigSource::Environment);
        }

        if let Some(secs_str) = lookup("VCA_TIMEOUT_SECS") {
            match parse_timeout_secs(&secs_str) {
                Ok(secs) => self.request_timeout_secs.update(secs, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid VCA_TIMEOUT_SECS value '{}': expected 1-{} seconds",
                    secs_str,
                    MAX_TIMEOUT_SECS
                ),
            }
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(model) = overrides.groq_model {
            self.groq_model.update(model, ConfigSource::Cli);
        }

        if let Some(mode) = overrides.legal_mode {
            self.legal_mode.update(mode, ConfigSource::Cli);
        }

        if let Some(secs) = overrides.request_timeout_secs {
            self.request_timeout_secs.update(secs, ConfigSource::Cli);
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.value)
    }

    /// Get all configuration values as a map for inspection.
    ///
    /// Credentials are reported only as present or absent.
    pub fn to_inspection_map(&self) -> BTreeMap<String, (String, ConfigSource)> {
        fn presence(key: &ConfigValue<Option<Credential>>) -> (String, ConfigSource) {
            let shown = if key.value.is_some() { "configured" } else { "not set" };
            (shown.to_string(), key.source)
        }

        let mut map = BTreeMap::new();

        map.insert("groq_api_key".to_string(), presence(&self.groq_api_key));
        map.insert(
            "groq_base_url".to_string(),
            (self.groq_base_url.value.clone(), self.groq_base_url.source),
        );
        map.insert("groq_model".to_string(), (self.groq_model.value.clone(), self.groq_model.source));
        map.insert("kanoon_api_key".to_string(), presence(&self.kanoon_api_key));
        map.insert(
            "kanoon_base_url".to_string(),
            (self.kanoon_base_url.value.clone(), self.kanoon_base_url.source),
        );
        map.insert(
            "legal_mode".to_string(),
            (format!("{:?}", self.legal_mode.value).to_lowercase(), self.legal_mode.source),
        );
        map.insert("reverie_api_key".to_string(), presence(&self.reverie_api_key));
        map.insert(
            "reverie_base_url".to_string(),
            (self.reverie_base_url.value.clone(), self.reverie_base_url.source),
        );
        map.insert(
            "request_timeout_secs".to_string(),
            (self.request_timeout_secs.value.to_string(), self.request_timeout_secs.source),
        );

        map
    }
}

impl Default for LayeredConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize)]
struct FileConfig {
    groq: Option<GroqSection>,
    kanoon: Option<KanoonSection>,
    reverie: Option<ReverieSection>,
    request_timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct GroqSection {
    api_key: Option<String>,
    base_url: Option<String>,
    model: Option<String>,
}

#[derive(Debug, Deserialize)]
struct KanoonSection {
    api_key: Option<String>,
    base_url: Option<String>,
    mode: Option<LegalMode>,
}

#[derive(Debug, Deserialize)]
struct ReverieSection {
    api_key: Option<String>,
    base_url: Option<String>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub groq_model: Option<String>,
    pub legal_mode: Option<LegalMode>,
    pub request_timeout_secs: Option<u64>,
}

/// Parse legal mode from string
pub fn parse_legal_mode(s: &str) -> Result<LegalMode> {
    match s.trim().to_lowercase().as_str() {
        "live" => Ok(LegalMode::Live),
        "demo" => Ok(LegalMode::Demo),
        _ => Err(VcaError::ConfigInvalid {
            key: "legal_mode".to_string(),
            reason: format!("Invalid legal mode: {}. Use live or demo", s),
        }),
    }
}

/// Parse a request timeout in whole seconds
pub fn parse_timeout_secs(s: &str) -> Result<u64> {
    let secs = s.trim().parse::<u64>().map_err(|e| VcaError::ConfigInvalid {
        key: "request_timeout_secs".to_string(),
        reason: format!("Invalid timeout '{}': {}", s, e),
    })?;
    validate_timeout_secs(secs)
}

fn validate_timeout_secs(secs: u64) -> Result<u64> {
    if (1..=MAX_TIMEOUT_SECS).contains(&secs) {
        Ok(secs)
    } else {
        Err(VcaError::ConfigInvalid {
            key: "request_timeout_secs".to_string(),
            reason: format!("Timeout must be between 1 and {} seconds, got {}", MAX_TIMEOUT_SECS, secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = LayeredConfig::with_defaults();
        assert!(config.groq_api_key.value.is_none());
        assert!(config.kanoon_api_key.value.is_none());
        assert!(config.reverie_api_key.value.is_none());
        assert_eq!(config.groq_model.value, "llama3-70b-8192");
        assert_eq!(config.legal_mode.value, LegalMode::Live);
        assert_eq!(config.request_timeout(), Duration::from_secs(20));
    }

    #[test]
    fn test_config_precedence() {
        let mut value = ConfigValue::new(100, ConfigSource::Default);

        value.update(200, ConfigSource::File);
        assert_eq!(value.value, 200);
        assert_eq!(value.source, ConfigSource::File);

        value.update(300, ConfigSource::Environment);
        assert_eq!(value.value, 300);
        assert_eq!(value.source, ConfigSource::Environment);

        value.update(400, ConfigSource::Cli);
        assert_eq!(value.value, 400);
        assert_eq!(value.source, ConfigSource::Cli);

        // Lower precedence should not override
        value.update(500, ConfigSource::File);
        assert_eq!(value.value, 400);
        assert_eq!(value.source, ConfigSource::Cli);
    }

    #[test]
    fn test_credential_blank_is_absent() {
        assert!(Credential::new("").is_none());
        assert!(Credential::new("   ").is_none());
        assert_eq!(Credential::new(" gsk_123 ").unwrap().expose(), "gsk_123");
    }

    #[test]
    fn test_credential_debug_is_redacted() {
        let key = Credential::new("super-secret").unwrap();
        assert_eq!(format!("{:?}", key), "Credential(***)");
        let config = LayeredConfig::with_defaults()
            .load_from_lookup(lookup_from(&[("GROQ_API_KEY", "super-secret")]));
        assert!(!format!("{:?}", config).contains("super-secret"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
request_timeout_secs = 15

[groq]
api_key = "gsk_file"
model = "llama-3.3-70b-versatile"

[kanoon]
api_key = "kanoon_file"
mode = "demo"
"#
        )
        .unwrap();

        let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap();

        assert_eq!(config.groq_api_key.value.as_ref().unwrap().expose(), "gsk_file");
        assert_eq!(config.groq_api_key.source, ConfigSource::File);
        assert_eq!(config.groq_model.value, "llama-3.3-70b-versatile");
        assert_eq!(config.kanoon_api_key.source, ConfigSource::File);
        assert_eq!(config.legal_mode.value, LegalMode::Demo);
        assert_eq!(config.request_timeout_secs.value, 15);
        // Untouched sections keep defaults
        assert!(config.reverie_api_key.value.is_none());
        assert_eq!(config.reverie_api_key.source, ConfigSource::Default);
    }

    #[test]
    fn test_file_rejects_out_of_range_timeout() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "request_timeout_secs = 0").unwrap();

        let err = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, VcaError::ConfigInvalid { .. }));
    }

    #[test]
    fn test_lookup_overrides_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[groq]\napi_key = \"gsk_file\"").unwrap();

        let config = LayeredConfig::with_defaults()
            .load_from_file(file.path())
            .unwrap()
            .load_from_lookup(lookup_from(&[("GROQ_API_KEY", "gsk_env")]));

        assert_eq!(config.groq_api_key.value.as_ref().unwrap().expose(), "gsk_env");
        assert_eq!(config.groq_api_key.source, ConfigSource::Environment);
    }

    #[test]
    fn test_lookup_ignores_blank_key_and_bad_values() {
        let config = LayeredConfig::with_defaults().load_from_lookup(lookup_from(&[
            ("KANOON_API_KEY", "  "),
            ("VCA_LEGAL_MODE", "sometimes"),
            ("VCA_TIMEOUT_SECS", "forever"),
        ]));

        assert!(config.kanoon_api_key.value.is_none());
        assert_eq!(config.legal_mode.value, LegalMode::Live);
        assert_eq!(config.request_timeout_secs.value, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = LayeredConfig::with_defaults()
            .load_from_lookup(lookup_from(&[("VCA_LEGAL_MODE", "live")]));

        config.update_from_cli(CliConfigOverrides {
            groq_model: None,
            legal_mode: Some(LegalMode::Demo),
            request_timeout_secs: Some(5),
        });

        assert_eq!(config.legal_mode.value, LegalMode::Demo);
        assert_eq!(config.legal_mode.source, ConfigSource::Cli);
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.groq_model.source, ConfigSource::Default);
    }

    #[test]
    fn test_parse_legal_mode() {
        assert_eq!(parse_legal_mode("demo").unwrap(), LegalMode::Demo);
        assert_eq!(parse_legal_mode(" LIVE ").unwrap(), LegalMode::Live);
        assert!(parse_legal_mode("mock").is_err());
    }

    #[test]
    fn test_parse_timeout_secs() {
        assert_eq!(parse_timeout_secs("30").unwrap(), 30);
        assert!(parse_timeout_secs("0").is_err());
        assert!(parse_timeout_secs("121").is_err());
        assert!(parse_timeout_secs("ten").is_err());
    }

    #[test]
    fn test_inspection_map_hides_credentials() {
        let config = LayeredConfig::with_defaults()
            .load_from_lookup(lookup_from(&[("REVERIE_API_KEY", "rev-secret")]));
        let map = config.to_inspection_map();

        let (shown, source) = &map["reverie_api_key"];
        assert_eq!(shown, "configured");
        assert_eq!(*source, ConfigSource::Environment);

        let (shown, _) = &map["groq_api_key"];
        assert_eq!(shown, "not set");
        assert!(map.values().all(|(v, _)| !v.contains("rev-secret")));
        assert_eq!(map["legal_mode"].0, "live");
    }
}
