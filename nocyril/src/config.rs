//! Configuration loading.
//!
//! Configuration lives in a TOML file:
//!
//! ```toml
//! vk_token = "community-access-token"
//!
//! [api]
//! timeout_ms = 5000
//!
//! [[groups]]
//! group_id = 10
//! secret = "s1"
//! confirmation = "conf-token"
//! ```
//!
//! The access token may also come from the `NOCYRIL_VK_TOKEN` environment
//! variable, which takes precedence over the file.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Environment variable that overrides `vk_token`.
pub const TOKEN_ENV: &str = "NOCYRIL_VK_TOKEN";

/// Fatal startup configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("vk token is required (set vk_token in the config file or NOCYRIL_VK_TOKEN)")]
    MissingToken,
}

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Community access token used for every VK API call
    #[serde(default)]
    pub vk_token: String,

    /// Monitored communities, in file order
    #[serde(default)]
    pub groups: Vec<GroupConfig>,

    /// VK API endpoint settings
    #[serde(default)]
    pub api: ApiConfig,
}

/// Callback API settings for one monitored community.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GroupConfig {
    /// Community ID as sent in the callback's `group_id` field
    pub group_id: i64,

    /// Secret key configured in the community's Callback API settings
    #[serde(default)]
    pub secret: String,

    /// String VK expects back for the `confirmation` event
    pub confirmation: String,
}

/// VK method API settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL for method calls
    pub base_url: String,

    /// API version sent as `v`
    pub version: String,

    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.vk.com/method".to_string(),
            version: "5.131".to_string(),
            timeout_ms: 8000,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file, honouring the token override
    /// from the environment.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let token_override = env::var(TOKEN_ENV).ok().filter(|t| !t.trim().is_empty());
        Self::load(path.as_ref(), token_override)
    }

    fn load(path: &Path, token_override: Option<String>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(token) = token_override {
            config.vk_token = token;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check invariants that make the service unable to start.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.vk_token.trim().is_empty() {
            return Err(ConfigError::MissingToken);
        }
        Ok(())
    }
}
