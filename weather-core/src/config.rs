use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{fs, path::Path, path::PathBuf, time::Duration};

use crate::classify::DEFAULT_ICON_URL_TEMPLATE;

/// Endpoints and limits for the data sources.
///
/// Nothing needs to be configured: without a config file every field takes its
/// default. Example TOML:
/// ```toml
/// timeout_secs = 5
/// icon_size = 100
/// forecast_url = "https://api.open-meteo.com/v1/forecast"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// IP geolocation endpoint returning `loc` and `city`.
    pub geolocation_url: String,

    /// Open-Meteo forecast endpoint.
    pub forecast_url: String,

    /// Icon URL with an `{icon}` placeholder for the icon key.
    pub icon_url_template: String,

    /// Per-request timeout.
    pub timeout_secs: u64,

    /// Side of the square the icon is scaled into, in pixels.
    pub icon_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            geolocation_url: "https://ipinfo.io/json".to_string(),
            forecast_url: "https://api.open-meteo.com/v1/forecast".to_string(),
            icon_url_template: DEFAULT_ICON_URL_TEMPLATE.to_string(),
            timeout_secs: 5,
            icon_size: 100,
        }
    }
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Load config from the platform config dir, or defaults if there is no file.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path)
    }

    /// Like [`Config::load`], but an unusable config file only costs a warning.
    pub fn load_or_default() -> Self {
        match Self::config_file_path() {
            Ok(path) => Self::load_or_default_from(&path),
            Err(e) => {
                tracing::warn!(error = %e, "no config directory, using defaults");
                Self::default()
            }
        }
    }

    /// Config from `path`, falling back to defaults if it cannot be read or parsed.
    pub fn load_or_default_from(path: &Path) -> Self {
        Self::load_from(path).unwrap_or_else(|e| {
            tracing::warn!(error = %format!("{e:#}"), "ignoring config file, using defaults");
            Self::default()
        })
    }

    /// Load config from `path`, or defaults if it doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(contents)?;
        if !cfg.icon_url_template.contains("{icon}") {
            return Err(anyhow!(
                "icon_url_template must contain an `{{icon}}` placeholder, got '{}'",
                cfg.icon_url_template
            ));
        }
        Ok(cfg)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "localweather", "localweather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
