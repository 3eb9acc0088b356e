//! Application configuration
//!
//! Configuration is read from an optional YAML file and then overridden by
//! command-line flags and environment variables. Every field has a default,
//! so an empty file (or no file) is a valid configuration.
//!
//! ```yaml
//! source:
//!   url: https://example.com/stations.json
//!   records_path: data.items
//!   timeout_secs: 10
//!   max_retries: 2
//! server:
//!   host: 127.0.0.1
//!   port: 3000
//! ```

use crate::error::{Error, Result};
use crate::source::HttpDataSource;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Dataset served when no URL is configured
pub const DEFAULT_DATASET_URL: &str = "https://app-media.noloco.app/noloco/dublin-bikes.json";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where the dataset comes from
    #[serde(default)]
    pub source: SourceConfig,

    /// HTTP server settings
    #[serde(default)]
    pub server: ServerSettings,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Check that the configuration is usable
    pub fn validate(&self) -> Result<()> {
        self.source.validate()?;
        if self.server.host.trim().is_empty() {
            return Err(Error::invalid_config("server.host", "must not be empty"));
        }
        Ok(())
    }
}

// ============================================================================
// Source Config
// ============================================================================

/// Remote dataset settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Dataset URL
    #[serde(default = "default_url")]
    pub url: String,

    /// Path to the record array inside the response document
    #[serde(default)]
    pub records_path: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retries for transient fetch failures
    #[serde(default)]
    pub max_retries: u32,
}

fn default_url() -> String {
    DEFAULT_DATASET_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            records_path: None,
            timeout_secs: default_timeout_secs(),
            max_retries: 0,
        }
    }
}

impl SourceConfig {
    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check the URL and timeout
    pub fn validate(&self) -> Result<()> {
        let parsed = url::Url::parse(&self.url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::invalid_config(
                "source.url",
                format!("unsupported scheme '{}'", parsed.scheme()),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(Error::invalid_config(
                "source.timeout_secs",
                "must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Build the HTTP data source described by this config
    pub fn build_source(&self) -> Result<HttpDataSource> {
        self.validate()?;
        let source = HttpDataSource::with_timeout(&self.url, self.timeout(), self.max_retries)?;
        Ok(match &self.records_path {
            Some(path) => source.with_records_path(path),
            None => source,
        })
    }
}

// ============================================================================
// Server Settings
// ============================================================================

/// HTTP server bind settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerSettings {
    /// `host:port` string to bind to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
