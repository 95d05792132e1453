//! Configuration loading, validation, and management for Redpen.
//!
//! Loads configuration from `~/.redpen/config.toml` with environment
//! variable overrides. Validates all settings at startup. The relay refuses
//! to start without an API key.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.redpen/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Model provider API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Base URL of the OpenAI-compatible API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Server-side context cap, in characters. Independent from the
    /// client-supplied cap; the stricter one wins at the relay.
    #[serde(default = "default_max_context_chars")]
    pub max_context_chars: usize,

    /// Optional HTTPS proxy for outbound provider calls
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_url: Option<String>,

    /// Relay server configuration
    #[serde(default)]
    pub relay: RelayConfig,
}

fn default_api_base_url() -> String {
    "https://api.openai.com/v1".into()
}
fn default_model() -> String {
    "gpt-4o-mini".into()
}
fn default_max_context_chars() -> usize {
    8000
}

/// Redact a secret for Debug output.
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
            .field("api_base_url", &self.api_base_url)
            .field("model", &self.model)
            .field("max_context_chars", &self.max_context_chars)
            .field("proxy_url", &self.proxy_url)
            .field("relay", &self.relay)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// The add-in origin allowed by CORS
    #[serde(default = "default_allowed_origin")]
    pub allowed_origin: String,
}

fn default_host() -> String {
    "127.0.0.1".into()
}
fn default_port() -> u16 {
    3001
}
fn default_allowed_origin() -> String {
    "https://localhost:3000".into()
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_origin: default_allowed_origin(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.redpen/config.toml).
    ///
    /// Environment variables take priority over the file:
    /// - `REDPEN_API_KEY`, then `OPENAI_API_KEY`
    /// - `REDPEN_MODEL`, then `LLM_MODEL`
    /// - `OPENAI_API_BASE`
    /// - `MAX_CONTEXT_CHARS`
    /// - `PROXY_URL`
    /// - `PORT`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;

        if let Some(key) = std::env::var("REDPEN_API_KEY")
            .ok()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
        {
            config.api_key = Some(key);
        }

        if let Some(model) = std::env::var("REDPEN_MODEL")
            .ok()
            .or_else(|| std::env::var("LLM_MODEL").ok())
        {
            config.model = model;
        }

        if let Ok(base) = std::env::var("OPENAI_API_BASE") {
            config.api_base_url = base;
        }

        if let Ok(raw) = std::env::var("MAX_CONTEXT_CHARS") {
            config.max_context_chars = raw.parse().map_err(|_| {
                ConfigError::ValidationError(format!(
                    "MAX_CONTEXT_CHARS must be a positive integer, got: {raw}"
                ))
            })?;
        }

        if let Ok(proxy) = std::env::var("PROXY_URL") {
            if !proxy.is_empty() {
                config.proxy_url = Some(proxy);
            }
        }

        if let Ok(raw) = std::env::var("PORT") {
            config.relay.port = raw.parse().map_err(|_| {
                ConfigError::ValidationError(format!("PORT must be a port number, got: {raw}"))
            })?;
        }

        config.validate()?;
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
        dirs_home().join(".redpen")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_context_chars == 0 {
            return Err(ConfigError::ValidationError(
                "max_context_chars must be greater than zero".into(),
            ));
        }

        if self.api_base_url.is_empty() {
            return Err(ConfigError::ValidationError(
                "api_base_url must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// The API key, or a fatal error for processes that cannot run without
    /// one (the relay).
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingApiKey)
    }

    /// Generate a default config TOML string (for the `onboard` command).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: default_api_base_url(),
            model: default_model(),
            max_context_chars: default_max_context_chars(),
            proxy_url: None,
            relay: RelayConfig::default(),
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

    #[error("API key is not set — add api_key to config.toml or set OPENAI_API_KEY")]
    MissingApiKey,
}
