use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::{Path, PathBuf}, time::Duration};

use crate::aggregate::{DEFAULT_FORECAST_DAYS, DayBucketing};

pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Which calendar the forecast days are cut on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayBoundary {
    #[default]
    Utc,
    /// Local days of the looked-up city, using the offset the feed reports.
    City,
}

impl DayBoundary {
    /// Resolve against the UTC offset reported for the city, if any.
    pub fn bucketing(self, city_offset_secs: Option<i32>) -> DayBucketing {
        match (self, city_offset_secs) {
            (DayBoundary::City, Some(secs)) => DayBucketing::FixedOffset(secs),
            _ => DayBucketing::Utc,
        }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// forecast_days = 5
/// timeout_secs = 10
/// day_boundary = "city"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub forecast_days: usize,
    pub timeout_secs: u64,
    pub day_boundary: DayBoundary,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            forecast_days: DEFAULT_FORECAST_DAYS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            day_boundary: DayBoundary::Utc,
        }
    }
}

impl Config {
    /// Load config from disk, or return the default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "forecast", "forecast-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// API key from the environment, falling back to the config file.
    pub fn api_key(&self) -> Result<String> {
        Self::resolve_api_key(std::env::var(API_KEY_ENV).ok(), self.api_key.as_deref())
    }

    fn resolve_api_key(from_env: Option<String>, from_file: Option<&str>) -> Result<String> {
        from_env
            .filter(|k| !k.trim().is_empty())
            .or_else(|| from_file.map(str::to_owned))
            .ok_or_else(|| {
                anyhow!(
                    "No OpenWeather API key configured.\n\
                     Hint: run `forecast configure` or set {API_KEY_ENV}."
                )
            })
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
