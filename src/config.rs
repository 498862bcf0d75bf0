//! Configuration System
//!
//! Layered configuration for the workspace core: built-in defaults, an
//! optional TOML file in the XDG config directory, and `ATELIER_*`
//! environment variable overrides, highest last.

use crate::error::RemoteError;
use crate::logging::LoggingConfig;
use config::{Config, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AtelierConfig {
    /// Remote host settings
    #[serde(default)]
    pub remote: RemoteConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote host settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// API base URL of the host
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Personal access token; also settable via `ATELIER_REMOTE__TOKEN`
    #[serde(default)]
    pub token: Option<String>,

    /// Branch used when none is specified
    #[serde(default = "default_branch")]
    pub branch: String,

    /// Commit message used when none is specified
    #[serde(default = "default_commit_message")]
    pub commit_message: String,

    /// Delay between sequential bulk-push writes, in milliseconds
    #[serde(default = "default_push_delay_ms")]
    pub push_delay_ms: u64,
}

fn default_api_base() -> String {
    crate::remote::github::DEFAULT_API_BASE.to_string()
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_commit_message() -> String {
    "Update from atelier".to_string()
}

fn default_push_delay_ms() -> u64 {
    300
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            token: None,
            branch: default_branch(),
            commit_message: default_commit_message(),
            push_delay_ms: default_push_delay_ms(),
        }
    }
}

impl RemoteConfig {
    pub fn push_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.push_delay_ms)
    }

    /// The token, or an auth error if none is configured.
    pub fn require_token(&self) -> Result<&str, RemoteError> {
        self.token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| RemoteError::AuthFailed("no access token configured".to_string()))
    }
}

/// Path of the user-level config file, if a home directory can be resolved.
pub fn config_file_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "atelier").map(|dirs| dirs.config_dir().join("config.toml"))
}

impl AtelierConfig {
    /// Load configuration: defaults, then the XDG config file if present,
    /// then `ATELIER_*` environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = config_file_path() {
            builder = builder.add_source(File::from(path).required(false));
        }
        builder
            .add_source(Environment::with_prefix("ATELIER").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// Load from an explicit file plus environment overrides; the file must
    /// exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path))
            .add_source(Environment::with_prefix("ATELIER").separator("__"))
            .build()?
            .try_deserialize()
    }
}
