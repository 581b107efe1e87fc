//! Platform service construction from configuration

use crate::config::Config;
use crate::error::{Error, Result};
use crate::platform::{GitHubService, PlatformService};
use tracing::debug;

/// Create a platform service from configuration
///
/// The token must already be present in `config` (see [`Config::apply_env`]).
pub fn create_platform_service(config: &Config) -> Result<Box<dyn PlatformService>> {
    config.validate()?;

    let token = config
        .github
        .token
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| {
            Error::Config("no GitHub token configured - set GITHUB_TOKEN or github.token".into())
        })?;

    debug!(host = ?config.github.host, "creating GitHub service");
    let service = GitHubService::from_config(token, &config.github)?;
    Ok(Box::new(service))
}
