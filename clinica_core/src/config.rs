//! Configuration file support for the clinic shell.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/turnos/config.toml`.

use crate::{Error, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub clinic: ClinicConfig,

    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Startup behaviour
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClinicConfig {
    #[serde(default = "default_seed_sample_data")]
    pub seed_sample_data: bool,
}

impl Default for ClinicConfig {
    fn default() -> Self {
        Self {
            seed_sample_data: default_seed_sample_data(),
        }
    }
}

/// Formats the shell uses to parse and print timestamps
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_datetime_format")]
    pub datetime_format: String,

    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            datetime_format: default_datetime_format(),
            date_format: default_date_format(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// Default value functions
fn default_seed_sample_data() -> bool {
    true
}

fn default_datetime_format() -> String {
    "%d/%m/%Y %H:%M".into()
}

fn default_date_format() -> String {
    "%d/%m/%Y".into()
}

fn default_log_level() -> String {
    "warn".into()
}

fn check_format(field: &str, format: &str) -> Result<()> {
    if format.trim().is_empty() {
        return Err(Error::Config(format!("{} must not be empty", field)));
    }
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(Error::Config(format!(
            "{} is not a valid strftime format: {:?}",
            field, format
        )));
    }
    // Offset and timezone specifiers parse fine but cannot render a naive timestamp
    let sample = NaiveDate::from_ymd_opt(2000, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| Error::Config("cannot build sample timestamp".into()))?;
    let mut rendered = String::new();
    if write!(rendered, "{}", sample.format(format)).is_err() {
        return Err(Error::Config(format!(
            "{} cannot format a date without a timezone: {:?}",
            field, format
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load and validate configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            std::env::var_os("HOME")
                .map(|home| PathBuf::from(home).join(".config"))
                .unwrap_or_else(|| PathBuf::from("."))
        });
        base.join("turnos").join("config.toml")
    }

    /// Reject formats chrono cannot use
    pub fn validate(&self) -> Result<()> {
        check_format("display.datetime_format", &self.display.datetime_format)?;
        check_format("display.date_format", &self.display.date_format)?;
        if self.logging.level.trim().is_empty() {
            return Err(Error::Config("logging.level must not be empty".into()));
        }
        Ok(())
    }

    /// Save the current configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path();
        self.save_to(&config_path)
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}
