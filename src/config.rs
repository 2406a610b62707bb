//! Configuration management for the screening engine

use anyhow::{Context, Result};
use config::{Config, File};
use serde::Deserialize;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub detection: DetectionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Detection configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DetectionConfig {
    /// Identifiers always flagged as suspicious
    #[serde(default = "default_blacklist")]
    pub blacklist: Vec<String>,
    /// Watch keywords in match priority order
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,
    /// Occurrences of one identifier allowed before all of its
    /// transactions are flagged
    #[serde(default = "default_frequency_threshold")]
    pub frequency_threshold: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (compact, pretty)
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_blacklist() -> Vec<String> {
    vec!["9999".to_string(), "1001".to_string()]
}

fn default_keywords() -> Vec<String> {
    vec![
        "crypto".to_string(),
        "offshore".to_string(),
        "bet".to_string(),
    ]
}

fn default_frequency_threshold() -> u64 {
    3
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "compact".to_string()
}

impl AppConfig {
    /// Load configuration from the default location, falling back to
    /// built-in defaults when the file does not exist.
    pub fn load_or_default() -> Result<Self> {
        let default_path = Path::new("config/config.toml");
        if default_path.exists() {
            Self::load_from_path(default_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            blacklist: default_blacklist(),
            keywords: default_keywords(),
            frequency_threshold: default_frequency_threshold(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}
