//! Server configuration.
//!
//! Defaults are overridden by a TOML file, which is in turn overridden by
//! command-line flags and environment variables (see the `contactbook`
//! binary).

use std::path::{Path, PathBuf};
use std::time::Duration;

use contactbook_core::Error;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Listener settings.
    pub server: ServerConfig,
    /// Where contacts are persisted.
    pub storage: StorageConfig,
    /// Session cookie settings.
    pub session: SessionSettings,
}

/// Listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to bind, e.g. `127.0.0.1:3000`.
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
        }
    }
}

/// Where contacts are persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Database file. `None` keeps contacts in memory only.
    pub path: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: Some(PathBuf::from("contactbook.redb")),
        }
    }
}

/// Session cookie settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Secret the cookie signing key is derived from.
    pub secret: String,
    /// Lifetime of a session and of its undelivered flash messages.
    pub max_age_secs: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            secret: "secret".to_string(),
            max_age_secs: 6,
        }
    }
}

impl Config {
    /// Load configuration from `path`, or the defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read {}: {e}", path.display()))
        })?;
        let config = Self::from_toml_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize the configuration as pretty TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()).into())
    }

    /// Session lifetime as a [`Duration`].
    pub fn session_max_age(&self) -> Duration {
        Duration::from_secs(self.session.max_age_secs)
    }
}
