use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

use crate::route::CorridorTable;

pub const DEFAULT_CITY: &str = "Manila";
pub const DEFAULT_FORECAST_DAYS: u8 = 7;
pub const MAX_FORECAST_DAYS: u8 = 14;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Credentials for WeatherAPI.com.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub api_key: String,
}

/// Extra named corridor, merged over the built-in ones.
///
/// Example TOML:
/// [[corridors]]
/// origin = "Cebu"
/// destination = "Moalboal"
/// via = ["Carcar"]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorridorConfig {
    pub origin: String,
    pub destination: String,
    #[serde(default)]
    pub via: Vec<String>,
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// City shown by `saferoute show` when none is given.
    pub default_city: String,

    pub forecast_days: u8,

    /// Upper bound for a single weather request.
    pub request_timeout_secs: u64,

    /// Example TOML:
    /// [weatherapi]
    /// api_key = "..."
    pub weatherapi: Option<ProviderConfig>,

    pub corridors: Vec<CorridorConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_city: DEFAULT_CITY.to_string(),
            forecast_days: DEFAULT_FORECAST_DAYS,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            weatherapi: None,
            corridors: Vec::new(),
        }
    }
}

impl Config {
    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(contents)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "saferoute", "saferoute")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn validate(&self) -> Result<()> {
        if self.request_timeout_secs == 0 {
            return Err(anyhow!("request_timeout_secs must be greater than zero"));
        }

        for corridor in &self.corridors {
            if corridor.origin.trim().is_empty() || corridor.destination.trim().is_empty() {
                return Err(anyhow!("corridor entries need both an origin and a destination"));
            }
            if corridor.via.iter().any(|stop| stop.trim().is_empty()) {
                return Err(anyhow!(
                    "corridor {} -> {} has a blank stop in `via`",
                    corridor.origin.trim(),
                    corridor.destination.trim()
                ));
            }
        }

        Ok(())
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.weatherapi = Some(ProviderConfig { api_key });
    }

    /// Returns the API key, if present and non-blank.
    pub fn api_key(&self) -> Option<&str> {
        self.weatherapi
            .as_ref()
            .map(|cfg| cfg.api_key.as_str())
            .filter(|key| !key.trim().is_empty())
    }

    pub fn is_configured(&self) -> bool {
        self.api_key().is_some()
    }

    /// Forecast length accepted by the service, 1..=14 days.
    pub fn forecast_days(&self) -> u8 {
        self.forecast_days.clamp(1, MAX_FORECAST_DAYS)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// Built-in corridors with the configured ones layered on top.
    pub fn corridor_table(&self) -> CorridorTable {
        let mut table = CorridorTable::default();
        for corridor in &self.corridors {
            table.insert(
                corridor.origin.trim(),
                corridor.destination.trim(),
                corridor.via.iter().map(|stop| stop.trim().to_owned()).collect(),
            );
        }
        table
    }
}
