//! Configuration file structures for the steam-partner client.
//!
//! The configuration is read from a YAML file and can be overridden with
//! environment variables prefixed by `STEAM_PARTNER_`, nested keys being
//! separated by `__`.
//!
//! # Configuration File Format
//!
//! ```yaml
//! partner:
//!   # Base URL of the partner web API
//!   url: "http://partner.steam-api.com/"
//!
//!   # Publisher web API key
//!   key: "your-publisher-key"
//!
//!   # Application the stats belong to
//!   app_id: 480
//!
//!   # Request timeout in seconds (optional)
//!   timeout: 30
//!
//!   # `raw` or `percent`
//!   value_encoding: raw
//!
//!   # `first_only` or `all`
//!   achievement_mode: first_only
//! ```
//!
//! # Environment Variable Overrides
//!
//! ```bash
//! export STEAM_PARTNER_PARTNER__KEY="your-publisher-key"
//! export STEAM_PARTNER_PARTNER__APP_ID=480
//! ```

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Yaml},
};
use serde::{Deserialize, Serialize};

use crate::partner::{
    AchievementMode, AppId, PartnerConfig, STEAM_PARTNER_API_BASE_URL, ValueEncoding,
};

/// Root configuration structure.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// Partner web API configuration
    pub partner: Partner,
}

/// Partner web API configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Partner {
    /// Base URL of the partner web API.
    ///
    /// # Examples
    ///
    /// - `http://partner.steam-api.com/`
    /// - `http://localhost:8080`
    pub url: String,

    /// Publisher web API key, sent as the `key` parameter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// Steam application id.
    pub app_id: u32,

    /// Request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    /// Query string value encoding.
    #[serde(default)]
    pub value_encoding: ValueEncoding,

    /// Achievements sent per submission.
    #[serde(default)]
    pub achievement_mode: AchievementMode,
}

impl Default for Partner {
    fn default() -> Self {
        Partner {
            url: STEAM_PARTNER_API_BASE_URL.to_owned(),
            key: None,
            app_id: 0,
            timeout: None,
            value_encoding: ValueEncoding::default(),
            achievement_mode: AchievementMode::default(),
        }
    }
}

impl From<&Partner> for PartnerConfig {
    fn from(partner: &Partner) -> Self {
        PartnerConfig {
            base_url: partner.url.clone(),
            api_key: partner.key.clone(),
            app_id: AppId(partner.app_id),
            timeout: partner.timeout.map(Duration::from_secs),
            value_encoding: partner.value_encoding,
            achievement_mode: partner.achievement_mode,
        }
    }
}

/// Configuration loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl Config {
    /// Load configuration from `yaml_path` and the environment.
    ///
    /// Sources are merged in priority order:
    /// 1. Struct defaults (lowest)
    /// 2. The YAML file
    /// 3. Environment variables with the `STEAM_PARTNER_` prefix (highest)
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or is invalid.
    pub fn load(yaml_path: &str) -> Result<Self, ConfigError> {
        let config: Self = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Yaml::file(yaml_path))
            .merge(Env::prefixed("STEAM_PARTNER_").split("__"))
            .extract()?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.partner.url.is_empty() {
            return Err(ConfigError::Validation(
                "partner.url must not be empty".into(),
            ));
        }

        if !self.partner.url.starts_with("http://") && !self.partner.url.starts_with("https://") {
            return Err(ConfigError::Validation(format!(
                "partner.url must start with http:// or https://, got {}",
                self.partner.url
            )));
        }

        if self.partner.app_id == 0 {
            return Err(ConfigError::Validation(
                "partner.app_id is required. Set STEAM_PARTNER_PARTNER__APP_ID or configure it in the YAML file.".into(),
            ));
        }

        if self.partner.key.as_deref() == Some("") {
            return Err(ConfigError::Validation(
                "partner.key must not be empty when set".into(),
            ));
        }

        if self.partner.timeout == Some(0) {
            return Err(ConfigError::Validation(
                "partner.timeout must be greater than zero".into(),
            ));
        }

        Ok(())
    }
}
