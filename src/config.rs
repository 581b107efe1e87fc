//! Configuration for the hosting platform adapter.
//!
//! All fields are optional; the library works with zero config as long as a
//! token is available from the environment.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Directory name under the user's config dir.
const CONFIG_DIR: &str = "merge-sleuth";

/// Config filename.
const CONFIG_FILE: &str = "config.toml";

/// Environment variables checked for a token, in order.
const TOKEN_ENV_VARS: [&str; 2] = ["GITHUB_TOKEN", "GH_TOKEN"];

/// GitHub caps `per_page` at 100.
const MAX_PER_PAGE: u8 = 100;

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// GitHub settings
    #[serde(default)]
    pub github: GitHubConfig,
}

/// GitHub adapter settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// GitHub Enterprise host (None for github.com)
    pub host: Option<String>,
    /// API token. If None, falls back to `GITHUB_TOKEN` then `GH_TOKEN`.
    pub token: Option<String>,
    /// Page size used when listing PR commits
    pub per_page: u8,
    /// Timeout for a single API request, in seconds
    pub request_timeout_secs: u64,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            host: None,
            token: None,
            per_page: MAX_PER_PAGE,
            request_timeout_secs: 30,
        }
    }
}

impl GitHubConfig {
    /// Request timeout as a `Duration`
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Config {
    /// Default config file location (`<config dir>/merge-sleuth/config.toml`).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Load configuration from the default location.
    ///
    /// Returns the default config if the file doesn't exist. The token is
    /// filled from the environment when the file does not set one.
    pub fn load() -> Result<Self> {
        let mut config = match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path)?,
            _ => Self::default(),
        };
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;

        Self::from_toml(&content)
            .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Fill the token from the environment if none is configured.
    pub fn apply_env(&mut self) {
        if self.github.token.is_some() {
            return;
        }
        self.github.token = TOKEN_ENV_VARS
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|token| !token.trim().is_empty());
    }

    /// Check value ranges and the host format.
    pub fn validate(&self) -> Result<()> {
        let github = &self.github;
        if github.per_page == 0 || github.per_page > MAX_PER_PAGE {
            return Err(Error::Config(format!(
                "github.per_page must be between 1 and {MAX_PER_PAGE}, got {}",
                github.per_page
            )));
        }
        if github.request_timeout_secs == 0 {
            return Err(Error::Config(
                "github.request_timeout_secs must be greater than 0".to_string(),
            ));
        }
        if let Some(host) = &github.host {
            let parsed = url::Url::parse(&format!("https://{host}"))
                .map_err(|e| Error::Config(format!("invalid github.host '{host}': {e}")))?;
            if parsed.host_str().is_none() || parsed.path() != "/" || parsed.query().is_some() {
                return Err(Error::Config(format!(
                    "github.host must be a bare host name, got '{host}'"
                )));
            }
        }
        Ok(())
    }
}
