//! Configuration loading, validation, and management for Summit.
//!
//! Loads configuration from `~/.summit/config.toml` with environment
//! variable overrides. Validates all settings at startup. Business logic
//! never reads the process environment directly — the config object is
//! constructed once and passed into the engine and provider, so tests can
//! inject fakes.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.summit/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Anthropic API key. Taken from the environment when absent here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Default model — handles the vast majority of conversations.
    #[serde(default = "default_model")]
    pub model: String,

    /// Upgrade model for complex decisions, deep reflection, and long
    /// conversations.
    #[serde(default = "default_upgrade_model")]
    pub upgrade_model: String,

    /// Sampling temperature for coaching turns.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens per coaching response.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// When true, a missing API key is a hard failure (HTTP 503 at the
    /// gateway) instead of a degraded canned-response path.
    #[serde(default)]
    pub strict: bool,

    /// Profile store configuration
    #[serde(default)]
    pub memory: MemoryConfig,

    /// Gateway configuration
    #[serde(default)]
    pub gateway: GatewayConfig,
}

fn default_model() -> String {
    "claude-sonnet-4-5".into()
}
fn default_upgrade_model() -> String {
    "claude-opus-4-1".into()
}
fn default_temperature() -> f32 {
    0.7
}
fn default_max_tokens() -> u32 {
    800
}

fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("model", &self.model)
            .field("upgrade_model", &self.upgrade_model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("strict", &self.strict)
            .field("memory", &self.memory)
            .field("gateway", &self.gateway)
            .finish()
    }
}

/// Profile store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Directory holding one JSON profile per user. Created lazily.
    #[serde(default = "default_memory_dir")]
    pub dir: PathBuf,
}

fn default_memory_dir() -> PathBuf {
    AppConfig::config_dir().join("memory")
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            dir: default_memory_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,
}

fn default_port() -> u16 {
    8000
}
fn default_host() -> String {
    "127.0.0.1".into()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.summit/config.toml).
    ///
    /// Environment variable overrides, highest priority first:
    /// - `SUMMIT_API_KEY`, then `ANTHROPIC_API_KEY` for the key
    /// - `SUMMIT_MODEL` / `SUMMIT_UPGRADE_MODEL` for model ids
    /// - `SUMMIT_STRICT` (any non-empty value except "0"/"false") for strict mode
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;

        if config.api_key.is_none() {
            config.api_key = std::env::var("SUMMIT_API_KEY")
                .ok()
                .or_else(|| std::env::var("ANTHROPIC_API_KEY").ok());
        }

        if let Ok(model) = std::env::var("SUMMIT_MODEL") {
            config.model = model;
        }
        if let Ok(model) = std::env::var("SUMMIT_UPGRADE_MODEL") {
            config.upgrade_model = model;
        }
        if let Ok(strict) = std::env::var("SUMMIT_STRICT") {
            config.strict = !matches!(strict.as_str(), "" | "0" | "false");
        }

        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".summit")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.temperature < 0.0 || self.temperature > 2.0 {
            return Err(ConfigError::ValidationError(
                "temperature must be between 0.0 and 2.0".into(),
            ));
        }
        if self.max_tokens == 0 {
            return Err(ConfigError::ValidationError(
                "max_tokens must be greater than zero".into(),
            ));
        }
        if self.model.trim().is_empty() || self.upgrade_model.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "model ids must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Check if an API key is available (from config or environment).
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Generate a default config TOML string (for first-run setup).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            upgrade_model: default_upgrade_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            strict: false,
            memory: MemoryConfig::default(),
            gateway: GatewayConfig::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
