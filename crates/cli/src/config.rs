// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Client configuration.
//!
//! Configuration is stored in `config.toml` inside the data directory and
//! includes:
//! - `[remote]`: the task collection URL and the per-request timeout
//! - `[connectivity]`: reachability probe timing
//!
//! Every field has a default, so a missing file or a partial file is fine.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::sync::ProbeConfig;

pub const CONFIG_FILE_NAME: &str = "config.toml";
const DATA_DIR_NAME: &str = "taskq";

/// Default remote collection.
pub const DEFAULT_REMOTE_URL: &str = "https://jsonplaceholder.typicode.com/todos";

/// Client configuration stored in `<data dir>/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub connectivity: ConnectivityConfig,
}

/// Remote collection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Collection URL. Creates POST here, updates and deletes go to `{url}/{id}`.
    #[serde(default = "default_remote_url")]
    pub url: String,
    /// Per-request timeout in seconds (default: 10).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            url: default_remote_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl RemoteConfig {
    /// Validates that the URL is an http(s) URL with a host.
    ///
    /// Returns an error message if the URL is invalid.
    pub fn validate_url(&self) -> Option<String> {
        let url = self.url.trim();
        let rest = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"));
        match rest {
            Some(rest) if !rest.is_empty() && !rest.starts_with('/') => None,
            Some(_) => Some(format!("invalid remote URL '{}': missing host", url)),
            None => Some(format!(
                "invalid remote URL '{}': must start with http:// or https://",
                url
            )),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Reachability probe settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectivityConfig {
    /// Seconds between probes while online (default: 30).
    #[serde(default = "default_probe_interval_secs")]
    pub probe_interval_secs: u64,
    /// First retry delay after a failed probe in milliseconds (default: 500).
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,
    /// Maximum retry delay in seconds (default: 60).
    #[serde(default = "default_max_backoff_secs")]
    pub max_backoff_secs: u64,
}

impl Default for ConnectivityConfig {
    fn default() -> Self {
        Self {
            probe_interval_secs: default_probe_interval_secs(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_secs: default_max_backoff_secs(),
        }
    }
}

impl ConnectivityConfig {
    pub fn probe_config(&self) -> ProbeConfig {
        ProbeConfig {
            interval: Duration::from_secs(self.probe_interval_secs),
            initial_backoff: Duration::from_millis(self.initial_backoff_ms),
            max_backoff: Duration::from_secs(self.max_backoff_secs),
        }
    }
}

fn default_remote_url() -> String {
    DEFAULT_REMOTE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_probe_interval_secs() -> u64 {
    30
}

fn default_initial_backoff_ms() -> u64 {
    500
}

fn default_max_backoff_secs() -> u64 {
    60
}

impl Config {
    /// Loads configuration from the data directory.
    ///
    /// A missing file yields the defaults.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let config_path = data_dir.join(CONFIG_FILE_NAME);
        let content = match fs::read_to_string(&config_path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Config::default()),
            Err(e) => return Err(Error::Config(format!("failed to read config: {}", e))),
        };
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the data directory.
    pub fn save(&self, data_dir: &Path) -> Result<()> {
        let config_path = data_dir.join(CONFIG_FILE_NAME);
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("failed to serialize config: {}", e)))?;
        fs::write(&config_path, content)?;
        Ok(())
    }

    /// Checks values that cannot be expressed in the types.
    pub fn validate(&self) -> Result<()> {
        if let Some(message) = self.remote.validate_url() {
            return Err(Error::InvalidRemoteUrl(message));
        }
        if self.remote.timeout_secs == 0 {
            return Err(Error::Config("remote.timeout_secs must be at least 1".to_string()));
        }
        if self.connectivity.initial_backoff_ms == 0 {
            return Err(Error::Config(
                "connectivity.initial_backoff_ms must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Resolves the data directory: the explicit path if given, otherwise the
/// platform data directory.
pub fn resolve_data_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    dirs::data_dir()
        .map(|d| d.join(DATA_DIR_NAME))
        .ok_or(Error::NoDataDir)
}

/// Creates the data directory and writes a default config if none exists.
///
/// Returns true if a config file was written.
pub fn init_data_dir(data_dir: &Path, remote_url: Option<&str>) -> Result<bool> {
    fs::create_dir_all(data_dir)?;
    let config_path = data_dir.join(CONFIG_FILE_NAME);
    if config_path.exists() && remote_url.is_none() {
        return Ok(false);
    }

    let mut config = Config::load(data_dir)?;
    if let Some(url) = remote_url {
        config.remote.url = url.trim_end_matches('/').to_string();
    }
    config.validate()?;
    config.save(data_dir)?;
    Ok(true)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
