//! Typed-client settings: a profile-based settings file plus environment
//! overrides.
//!
//! The file selects a profile through `currentConfig`; each profile holds a
//! `TypedClient` section. JSON `appsettings` files are valid YAML and load
//! the same way. Other top-level sections (logging and so on) are ignored.

use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use missinglink_api::{ClientConfig, PageLimits};
use serde::Deserialize;

use crate::error::ConfigError;

pub const ENV_API_URL: &str = "MISSINGLINK_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "MISSINGLINK_TIMEOUT_SECS";
pub const ENV_API_VERSION: &str = "MISSINGLINK_API_VERSION";
pub const ENV_USER: &str = "MISSINGLINK_USER";
pub const ENV_PROFILE: &str = "MISSINGLINK_PROFILE";

/// Parsed settings file.
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// Name of the profile to use.
    #[serde(rename = "currentConfig", default = "default_profile")]
    pub current_config: String,

    #[serde(flatten)]
    sections: HashMap<String, serde_yml::Value>,
}

#[derive(Debug, Deserialize)]
struct Profile {
    #[serde(rename = "TypedClient")]
    typed_client: TypedClientSettings,
}

/// Connection settings for the typed API client.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TypedClientSettings {
    #[serde(default)]
    pub api_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub http_timeout: u64,
    #[serde(default = "default_api_version")]
    pub api_version: String,
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
    /// Identity sent as basic credentials, if any.
    #[serde(default)]
    pub user_name: Option<String>,
}

fn default_profile() -> String {
    "Default".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_api_version() -> String {
    "1.0".to_string()
}

fn default_max_page_size() -> u32 {
    250
}

fn default_page_size() -> u32 {
    50
}

impl Default for TypedClientSettings {
    fn default() -> Self {
        Self {
            api_url: String::new(),
            http_timeout: default_timeout_secs(),
            api_version: default_api_version(),
            max_page_size: default_max_page_size(),
            default_page_size: default_page_size(),
            user_name: None,
        }
    }
}

impl FromStr for Settings {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(serde_yml::from_str(s)?)
    }
}

impl Settings {
    /// Reads and parses a settings file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        raw.parse()
    }

    /// Typed-client settings of the profile named by `currentConfig`.
    pub fn typed_client(&self) -> Result<TypedClientSettings, ConfigError> {
        self.typed_client_for(&self.current_config)
    }

    pub fn typed_client_for(&self, profile: &str) -> Result<TypedClientSettings, ConfigError> {
        let section = self
            .sections
            .get(profile)
            .ok_or_else(|| ConfigError::MissingProfile(profile.to_string()))?;
        let profile: Profile = serde_yml::from_value(section.clone())?;
        Ok(profile.typed_client)
    }

    /// Names of the top-level sections, profiles and otherwise.
    pub fn profiles(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }
}

impl TypedClientSettings {
    /// Loads the settings file at `path` (if it exists), picks the profile
    /// named by `MISSINGLINK_PROFILE` or `currentConfig`, then applies the
    /// environment overrides. Without a file, defaults plus overrides are used.
    pub fn resolve(path: &Path) -> Result<Self, ConfigError> {
        let settings = if path.exists() {
            let file = Settings::load(path)?;
            match std::env::var(ENV_PROFILE) {
                Ok(profile) if !profile.trim().is_empty() => file.typed_client_for(profile.trim())?,
                _ => file.typed_client()?,
            }
        } else {
            tracing::debug!("No settings file at {}, using defaults", path.display());
            Self::default()
        };
        settings.with_env_overrides()
    }

    /// Applies `MISSINGLINK_*` environment variables on top of these settings.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup`, keyed by the `MISSINGLINK_*` names.
    /// Empty values are ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get(ENV_API_URL) {
            self.api_url = url;
        }
        if let Some(raw) = get(ENV_TIMEOUT_SECS) {
            self.http_timeout = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue {
                    key: ENV_TIMEOUT_SECS,
                    value: raw.clone(),
                })?;
        }
        if let Some(version) = get(ENV_API_VERSION) {
            self.api_version = version;
        }
        if let Some(user) = get(ENV_USER) {
            self.user_name = Some(user);
        }
        Ok(self)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout)
    }

    /// Resolved configuration for the API client.
    pub fn client_config(&self) -> Result<ClientConfig, ConfigError> {
        if self.http_timeout == 0 {
            return Err(ConfigError::InvalidValue {
                key: "HttpTimeout",
                value: "0".to_string(),
            });
        }
        ClientConfig::new(&self.api_url, self.timeout(), &self.api_version).map_err(|_| {
            ConfigError::InvalidValue {
                key: "ApiUrl",
                value: self.api_url.clone(),
            }
        })
    }

    pub fn page_limits(&self) -> PageLimits {
        PageLimits::new(self.max_page_size, self.default_page_size)
    }
}
