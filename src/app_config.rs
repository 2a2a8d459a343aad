use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code of the scraped novels
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Target language code for published translations
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Translation config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation service type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationService {
    /// LLM chat completions through an OpenRouter-style endpoint
    #[default]
    OpenRouter,
    /// Free machine-translation backend with client-side chunking
    Google,
}

impl TranslationService {
    /// Capitalized service name for user-facing output
    pub fn display_name(&self) -> &str {
        match self {
            Self::OpenRouter => "OpenRouter",
            Self::Google => "Google Translate",
        }
    }

    /// Lowercase service identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::OpenRouter => "openrouter".to_string(),
            Self::Google => "google".to_string(),
        }
    }
}

impl std::fmt::Display for TranslationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for TranslationService {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "openrouter" => Ok(Self::OpenRouter),
            "google" => Ok(Self::Google),
            _ => Err(anyhow!("Invalid translation service: {}", s)),
        }
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Translation service to use
    #[serde(default)]
    pub service: TranslationService,

    /// API key for the chat-completion service
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Model name for chat completions
    #[serde(default = "default_model")]
    pub model: String,

    /// Chat-completion endpoint URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Common translation settings
    #[serde(default)]
    pub common: TranslationCommonConfig,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            service: TranslationService::default(),
            api_key: String::new(),
            model: default_model(),
            endpoint: default_endpoint(),
            common: TranslationCommonConfig::default(),
        }
    }
}

/// Common translation settings applicable to both services
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationCommonConfig {
    /// Total attempts for failed requests (first try included)
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    /// Base backoff in seconds after a rate-limit response; the wait grows
    /// linearly with the attempt number
    #[serde(default = "default_rate_limit_backoff_secs")]
    pub rate_limit_backoff_secs: u64,

    /// Request timeout in seconds for chat completions
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Character budget per request for the free backend; longer texts are
    /// split on paragraph boundaries
    #[serde(default = "default_max_chars_per_request")]
    pub max_chars_per_request: usize,
}

impl Default for TranslationCommonConfig {
    fn default() -> Self {
        Self {
            retry_count: default_retry_count(),
            rate_limit_backoff_secs: default_rate_limit_backoff_secs(),
            timeout_secs: default_timeout_secs(),
            max_chars_per_request: default_max_chars_per_request(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_source_language() -> String {
    "zh-CN".to_string()
}

fn default_target_language() -> String {
    "en".to_string()
}

fn default_model() -> String {
    "google/gemini-2.0-flash-lite-preview-02-05:free".to_string()
}

fn default_endpoint() -> String {
    "https://openrouter.ai/api/v1".to_string()
}

fn default_retry_count() -> u32 {
    3
}

fn default_rate_limit_backoff_secs() -> u64 {
    5
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_max_chars_per_request() -> usize {
    // Under the free backend's 5000 character ceiling
    4500
}

impl Config {
    /// Load configuration from a JSON file and apply environment overrides
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            anyhow!("Failed to read config file {:?}: {}", path.as_ref(), e)
        })?;

        let mut config: Config = serde_json::from_str(&content).map_err(|e| {
            anyhow!("Failed to parse config file {:?}: {}", path.as_ref(), e)
        })?;

        config.apply_env_overrides();
        Ok(config)
    }

    /// Override sensitive values from the environment when present
    pub fn apply_env_overrides(&mut self) {
        if let Ok(api_key) = std::env::var("OPENROUTER_API_KEY") {
            if !api_key.is_empty() {
                self.translation.api_key = api_key;
            }
        }
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        crate::language_utils::validate_language_code(&self.source_language)?;
        crate::language_utils::validate_language_code(&self.target_language)?;

        if self.translation.service == TranslationService::OpenRouter {
            if self.translation.api_key.is_empty() {
                return Err(anyhow!(
                    "Translation API key is required for the OpenRouter service"
                ));
            }

            Url::parse(&self.translation.endpoint).map_err(|e| {
                anyhow!(
                    "Invalid endpoint URL '{}': {}",
                    self.translation.endpoint,
                    e
                )
            })?;
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: default_source_language(),
            target_language: default_target_language(),
            translation: TranslationConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
