//! Configuration for the upload/predict page.
//!
//! Settings are plain JSON so they can be stored (e.g. in the browser's
//! localStorage) and edited by hand. Every field has a default, so a partial
//! document is valid.

use serde::{Deserialize, Serialize};

use crate::confidence::ConfidencePolicy;

/// Console verbosity, stored by its lowercase name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Convert to the log crate's Level.
    pub fn to_level(&self) -> log::Level {
        match self {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}

/// Format version written by this build; documents with a higher one are refused.
pub const CONFIG_VERSION: u32 = 1;

/// Default prediction endpoint, relative to the page origin.
pub const DEFAULT_ENDPOINT: &str = "/predict";

/// Default multipart field carrying the image.
pub const DEFAULT_FIELD_NAME: &str = "file";

/// Page configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version of the configuration format
    #[serde(default = "default_version")]
    pub version: u32,

    /// URL the image is posted to
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Multipart form field name for the image
    #[serde(default = "default_field_name")]
    pub field_name: String,

    /// Confidence display override
    #[serde(default)]
    pub confidence: ConfidencePolicy,

    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_field_name() -> String {
    DEFAULT_FIELD_NAME.to_string()
}

impl AppConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            endpoint: default_endpoint(),
            field_name: default_field_name(),
            confidence: ConfidencePolicy::default(),
            log_level: LogLevel::default(),
        }
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize and validate a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        config.validate()?;
        Ok(config)
    }

    /// Check field values that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::Invalid("endpoint cannot be empty".to_string()));
        }
        if self.field_name.trim().is_empty() {
            return Err(ConfigError::Invalid("field name cannot be empty".to_string()));
        }
        self.confidence.validate().map_err(ConfigError::Invalid)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// A field has an unusable value
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// Storage error (localStorage in WASM)
    #[error("Storage error: {0}")]
    StorageError(String),
}
