//! # Configuration
//!
//! Main application configuration structure. Matches the layout of
//! `sidekick.yaml`; every section falls back to sensible defaults so a missing
//! or minimal file still yields a working offline setup.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }
}

/// Settings for the hosted model endpoint.
#[derive(Debug, Deserialize, Clone)]
pub struct ModelConfig {
    /// Base URL of an OpenAI-compatible API. Default endpoint when unset.
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    /// Name of an environment variable holding the key, e.g. "OPENAI_API_KEY".
    #[serde(default)]
    pub api_key_env: Option<String>,
    #[serde(default = "default_model_name")]
    pub name: String,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            api_key_env: None,
            name: default_model_name(),
            timeout_secs: None,
        }
    }
}

fn default_model_name() -> String {
    "gpt-4o-mini".to_string()
}

/// Session-level toggles for the companion.
#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    /// Speak replies out loud (console fallback just prints them).
    #[serde(default = "default_true")]
    pub voice: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { voice: true }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Default, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Directory for the session log; no file logging when unset.
    #[serde(default)]
    pub dir: Option<String>,
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_file() -> String {
    "session.log".to_string()
}
