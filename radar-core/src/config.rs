//! Configuration management for Radar
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (RADAR_*)
//! 3. Config file (~/.config/radar/config.toml)
//! 4. Default values

use std::path::PathBuf;
use std::time::Duration;

use humantime_serde::re::humantime;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default REST API base address
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Default web address used for links the API does not return
pub const DEFAULT_WEB_URL: &str = "https://github.com";

/// Default time-to-live for cached listings
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// GitHub access configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct GitHubSettings {
    /// Base address of the REST API
    pub api_url: String,

    /// Base address of the web interface
    pub web_url: String,

    /// Value sent in the User-Agent header
    pub user_agent: String,

    /// How long fetched listings stay cached
    #[serde(with = "humantime_serde")]
    pub cache_ttl: Duration,
}

impl Default for GitHubSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            web_url: DEFAULT_WEB_URL.to_string(),
            user_agent: "radar".to_string(),
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// GitHub configuration
    pub github: GitHubSettings,
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();

        if let Some(path) = config_path {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &PathBuf) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        let config: Config = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/radar/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("radar").join("config.toml"))
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - RADAR_API_URL: REST API base address
    /// - RADAR_CACHE_TTL: cache lifetime, e.g. `90s` or `10m`
    pub fn with_env_overrides(self) -> Result<Self> {
        let api_url = std::env::var("RADAR_API_URL").ok();
        let cache_ttl = std::env::var("RADAR_CACHE_TTL").ok();
        self.with_cli_overrides(api_url, cache_ttl)
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(
        mut self,
        api_url: Option<String>,
        cache_ttl: Option<String>,
    ) -> Result<Self> {
        if let Some(url) = api_url {
            self.github.api_url = url;
        }

        if let Some(ttl) = cache_ttl {
            self.github.cache_ttl = humantime::parse_duration(&ttl).map_err(|e| {
                Error::Config(format!("Invalid cache TTL '{}': {}", ttl, e))
            })?;
        }

        self.validate()?;
        Ok(self)
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults
    pub fn load_with_overrides(api_url: Option<String>, cache_ttl: Option<String>) -> Result<Self> {
        Self::load()?
            .with_env_overrides()?
            .with_cli_overrides(api_url, cache_ttl)
    }

    /// Check that both base addresses are absolute URLs
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("api_url", &self.github.api_url),
            ("web_url", &self.github.web_url),
        ] {
            url::Url::parse(value)
                .map_err(|e| Error::Config(format!("Invalid {} '{}': {}", name, value, e)))?;
        }
        Ok(())
    }
}
