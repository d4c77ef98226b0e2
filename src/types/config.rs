//! Agent configuration: which browser profile to read, where to upload, and
//! how the auto-sync timer is named and defaulted.
//!
//! Loaded from a JSON file where every field is optional. The bearer token may
//! also come from the `UNIBROWSER_API_TOKEN` environment variable, which wins
//! over the file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::errors::ConfigError;
use super::settings::DEFAULT_INTERVAL_MINUTES;
use super::sync::{MetadataDefaults, SyncEndpoint};

pub const TOKEN_ENV_VAR: &str = "UNIBROWSER_API_TOKEN";
pub const DEFAULT_ENDPOINT: &str = "https://127.0.0.1:8000/api/sync/bookmarks";
pub const DEFAULT_TIMER_NAME: &str = "autoSyncBookmarks";

/// The browser family whose profile and labels the agent uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum HostDialect {
    #[default]
    Chrome,
    Firefox,
}

impl HostDialect {
    /// Label uploaded as `browser_name` when nothing else is configured.
    pub fn default_browser_name(&self) -> &'static str {
        match self {
            HostDialect::Chrome => "Chrome",
            HostDialect::Firefox => "Firefox",
        }
    }

    pub fn metadata_defaults(&self) -> MetadataDefaults {
        MetadataDefaults::for_browser(self.default_browser_name())
    }
}

/// Identity and default period of the auto-sync timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerConfig {
    pub name: String,
    pub default_interval_minutes: u64,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_TIMER_NAME.to_string(),
            default_interval_minutes: DEFAULT_INTERVAL_MINUTES,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub host: HostDialect,
    pub profile_path: Option<PathBuf>,
    pub settings_path: Option<PathBuf>,
    pub endpoint: String,
    #[serde(skip_serializing)]
    pub api_token: Option<String>,
    pub timer_name: String,
    pub default_interval_minutes: u64,
    pub request_timeout_secs: u64,
    pub accept_invalid_certs: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            host: HostDialect::default(),
            profile_path: None,
            settings_path: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_token: None,
            timer_name: DEFAULT_TIMER_NAME.to_string(),
            default_interval_minutes: DEFAULT_INTERVAL_MINUTES,
            request_timeout_secs: 30,
            accept_invalid_certs: false,
        }
    }
}

impl AgentConfig {
    /// Loads the config file at `path`.
    ///
    /// When `required` is false a missing file yields the defaults; this is how
    /// the implicit `<config_dir>/config.json` is treated.
    pub fn load(path: &Path, required: bool) -> Result<Self, ConfigError> {
        if !path.exists() && !required {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        let config: AgentConfig = serde_json::from_str(&content)
            .map_err(|e| ConfigError::Parse(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_interval_minutes == 0 {
            return Err(ConfigError::Invalid(
                "default_interval_minutes must be greater than zero".to_string(),
            ));
        }
        if self.timer_name.is_empty() {
            return Err(ConfigError::Invalid("timer_name must not be empty".to_string()));
        }
        if self.endpoint.is_empty() {
            return Err(ConfigError::Invalid("endpoint must not be empty".to_string()));
        }
        Ok(())
    }

    /// Resolves the bearer credential, preferring `env_token` over the file.
    pub fn resolve_token(&self, env_token: Option<String>) -> Result<Zeroizing<String>, ConfigError> {
        env_token
            .filter(|t| !t.is_empty())
            .or_else(|| self.api_token.clone().filter(|t| !t.is_empty()))
            .map(Zeroizing::new)
            .ok_or(ConfigError::MissingToken)
    }

    /// Builds the upload endpoint using the token from the environment or the file.
    pub fn sync_endpoint(&self) -> Result<SyncEndpoint, ConfigError> {
        let token = self.resolve_token(std::env::var(TOKEN_ENV_VAR).ok())?;
        Ok(SyncEndpoint::new(&self.endpoint, &token))
    }

    pub fn timer_config(&self) -> TimerConfig {
        TimerConfig {
            name: self.timer_name.clone(),
            default_interval_minutes: self.default_interval_minutes,
        }
    }
}
