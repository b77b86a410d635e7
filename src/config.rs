use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Scheme prefix every webhook URL must carry.
const SECURE_SCHEME: &str = "https";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Invalid webhook url: {0}")]
    InsecureWebhookUrl(String),
}

/// Runtime settings for one notification run.
///
/// Every string field falls back to empty when missing, so an absent
/// `webhook_url` is caught by validation rather than by the parser.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub webhook_url: String,
    pub user_name: String,
    pub channel: String,
    /// Candidate list, one entry per line.
    pub shop_list: PathBuf,
    pub icon_emoji: String,
    /// Overall request timeout; no timeout when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Config {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Load from JSON, or from TOML when the file has a `.toml` extension.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let is_toml = path.extension().and_then(|e| e.to_str()) == Some("toml");
        let config = if is_toml {
            Self::from_toml_str(&content)
        } else {
            Self::from_json_str(&content)
        }
        .map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        })?;

        config.validate()?;
        Ok(config)
    }

    fn from_json_str(content: &str) -> Result<Self, String> {
        serde_json::from_str(content).map_err(|e| e.to_string())
    }

    fn from_toml_str(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.webhook_url.starts_with(SECURE_SCHEME) {
            return Err(ConfigError::InsecureWebhookUrl(self.webhook_url.clone()));
        }
        Ok(())
    }
}
