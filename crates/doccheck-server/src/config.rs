//! Configuration file parsing for the server.
//!
//! Loads bind address, upload limit, output policy and model settings from
//! TOML. The Gemini API key is never read from the file; it is supplied
//! separately from the `GEMINI_API_KEY` environment variable.

use doccheck_extractor::{AnalysisConfig, OutputPolicy};
use doccheck_llm::gemini::{DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};
use doccheck_llm::GeminiConfig;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Environment variable holding the Gemini API key
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Server configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Missing required field
    #[error("Missing required configuration field: {0}")]
    MissingField(String),

    /// Field present but unusable
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Server configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1")
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Bind port (e.g., 5000)
    #[serde(default = "default_bind_port")]
    pub bind_port: u16,

    /// Largest accepted request body for `/analyze`, in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,

    /// Model output validation policy
    #[serde(default)]
    pub output_policy: OutputPolicy,

    /// Gemini connection settings
    #[serde(default)]
    pub gemini: GeminiSettings,
}

/// Gemini settings (everything except the API key)
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiSettings {
    /// API base URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model name
    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_bind_port() -> u16 {
    5000
}

/// Default upload limit: 25 MiB
fn default_max_upload_bytes() -> usize {
    25 * 1024 * 1024
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            bind_port: default_bind_port(),
            max_upload_bytes: default_max_upload_bytes(),
            output_policy: OutputPolicy::default(),
            gemini: GeminiSettings::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: ServerConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate field values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bind_address.trim().is_empty() {
            return Err(ConfigError::MissingField("bind_address".to_string()));
        }
        if self.max_upload_bytes == 0 {
            return Err(ConfigError::Invalid(
                "max_upload_bytes must be greater than 0".to_string(),
            ));
        }
        if self.gemini.model.trim().is_empty() {
            return Err(ConfigError::MissingField("gemini.model".to_string()));
        }
        if self.gemini.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "gemini.timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }

    /// Analyzer settings derived from this configuration
    pub fn analysis_config(&self) -> AnalysisConfig {
        match self.output_policy {
            OutputPolicy::Strict => AnalysisConfig::default(),
            OutputPolicy::Passthrough => AnalysisConfig::passthrough(),
        }
    }

    /// Gemini client settings, completed with the API key
    pub fn gemini_config(&self, api_key: impl Into<String>) -> GeminiConfig {
        GeminiConfig::new(api_key)
            .with_endpoint(self.gemini.endpoint.clone())
            .with_model(self.gemini.model.clone())
            .with_timeout_secs(self.gemini.timeout_secs)
    }
}

/// Read the API key from the environment
pub fn api_key_from_env() -> Result<String, ConfigError> {
    match std::env::var(API_KEY_ENV) {
        Ok(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(ConfigError::MissingField(API_KEY_ENV.to_string())),
    }
}
