//! Front-end configuration: which appliance to talk to and how to present it.

use crate::error::{Error, Result};
use crate::i18n::Locale;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub device: DeviceConfig,
    pub ui: UiConfig,
}

/// Connection to the appliance's web API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// e.g. `http://192.168.1.100`
    pub base_url: String,
    /// Session token, sent as a cookie when set.
    pub token: Option<String>,
    pub timeout_secs: u64,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1".to_string(),
            token: None,
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub locale: Locale,
    /// How long save notices stay on screen.
    pub notice_secs: u64,
    pub log_level: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            locale: Locale::En,
            notice_secs: 3,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load from `path`, or from the first standard location that exists.
    ///
    /// With no explicit path and no file on disk, defaults are returned.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::candidates().into_iter().find(|p| p.exists()) {
                Some(p) => p,
                None => {
                    debug!("No configuration file found, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let content = fs::read_to_string(&path)
            .map_err(|e| Error::Config(format!("read {}: {e}", path.display())))?;
        let config = Self::parse(&content).map_err(|e| match e {
            Error::Config(msg) => Error::Config(format!("{}: {msg}", path.display())),
            other => other,
        })?;

        info!("Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Parse and validate TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("create {}: {e}", parent.display())))?;
        }
        fs::write(path, content)
            .map_err(|e| Error::Config(format!("write {}: {e}", path.display())))?;

        info!("Saved configuration to: {}", path.display());
        Ok(())
    }

    /// Per-user configuration file.
    pub fn default_path() -> PathBuf {
        match dirs::config_dir() {
            Some(dir) => dir.join("usb-identity").join("config.toml"),
            None => PathBuf::from(".config/usb-identity/config.toml"),
        }
    }

    fn candidates() -> Vec<PathBuf> {
        vec![
            Self::default_path(),
            PathBuf::from("/etc/usb-identity/config.toml"),
        ]
    }

    fn validate(&self) -> Result<()> {
        if !VALID_LOG_LEVELS.contains(&self.ui.log_level.as_str()) {
            return Err(Error::Config(format!(
                "invalid log level '{}', must be one of: {}",
                self.ui.log_level,
                VALID_LOG_LEVELS.join(", ")
            )));
        }
        if self.device.base_url.trim().is_empty() {
            return Err(Error::Config("device.base_url must not be empty".into()));
        }
        if self.device.timeout_secs == 0 {
            return Err(Error::Config("device.timeout_secs must be positive".into()));
        }
        Ok(())
    }
}
