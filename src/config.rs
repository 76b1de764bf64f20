//! # Configuration Management
//!
//! This module handles loading and parsing configuration from the
//! `moon-config.toml` file. It provides a centralized way to configure the
//! observer location, its UTC offset, and how the daily moon table is printed.
//!
//! ```toml
//! [observer]
//! name = "Seattle, WA"
//! latitude = 47.6062
//! longitude = -122.3321
//! utc_offset_hours = -7.0
//!
//! [forecast]
//! days = 8
//! time_format = "%-I:%M %p %:z"
//! ```

use crate::GeoPosition;
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "moon-config.toml";

/// Errors from reading or validating the configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read or written
    #[error("config IO: {0}")]
    Io(#[from] io::Error),

    /// Config file is not valid TOML for [`Config`]
    #[error("invalid config format: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config could not be rendered back to TOML
    #[error("could not serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("latitude {0} is outside -90..=90")]
    InvalidLatitude(f64),

    #[error("longitude {0} is outside -180..=180")]
    InvalidLongitude(f64),

    /// UTC offset that chrono cannot represent (beyond ±24 h)
    #[error("UTC offset of {0} hours is not representable")]
    InvalidOffset(f64),

    #[error("invalid date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// Application configuration loaded from moon-config.toml
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Where the observer stands
    pub observer: ObserverConfig,
    /// How many days to report and how to print times
    pub forecast: ForecastConfig,
}

/// Observer location configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObserverConfig {
    /// Human-readable location name for reference
    pub name: String,
    /// Degrees north of the equator
    pub latitude: f64,
    /// Degrees east of Greenwich (west is negative)
    pub longitude: f64,
    /// Local clock offset from UTC in hours (e.g. -7.0 for PDT, 5.5 for IST)
    pub utc_offset_hours: f64,
}

/// Forecast table configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ForecastConfig {
    /// Number of consecutive days to report, starting today
    pub days: u32,
    /// chrono format string for moonrise times
    pub time_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            observer: ObserverConfig {
                name: "Seattle, WA".to_string(),
                latitude: 47.6062,
                longitude: -122.3321,
                utc_offset_hours: -7.0, // Pacific daylight time
            },
            forecast: ForecastConfig {
                days: 8, // length of a typical daily weather forecast
                time_format: crate::forecast::DEFAULT_TIME_FORMAT.to_string(),
            },
        }
    }
}

impl Config {
    /// Load configuration from moon-config.toml
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load() -> Self {
        Self::load_from_path(CONFIG_FILE)
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        match Self::try_load_from_path(&path) {
            Ok(config) => {
                log::info!("Loaded configuration for observer: {}", config.observer.name);
                config
            }
            Err(ConfigError::Io(_)) => {
                log::info!("No config file found, using default configuration (Seattle, WA)");
                Self::default()
            }
            Err(e) => {
                log::warn!("{e}; using default configuration (Seattle, WA)");
                Self::default()
            }
        }
    }

    /// Load and validate configuration, reporting every failure to the caller.
    pub fn try_load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save current configuration to `path`
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(&path, contents)?;
        log::info!("Configuration saved to {}", path.as_ref().display());
        Ok(())
    }

    /// Check that the observer location and offset are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let observer = &self.observer;
        if !(-90.0..=90.0).contains(&observer.latitude) {
            return Err(ConfigError::InvalidLatitude(observer.latitude));
        }
        if !(-180.0..=180.0).contains(&observer.longitude) {
            return Err(ConfigError::InvalidLongitude(observer.longitude));
        }
        self.observer_offset()?;
        Ok(())
    }

    /// The configured observer location.
    pub fn position(&self) -> GeoPosition {
        GeoPosition::new(self.observer.latitude, self.observer.longitude)
    }

    /// The observer's UTC offset as a chrono [`FixedOffset`].
    pub fn observer_offset(&self) -> Result<FixedOffset, ConfigError> {
        let hours = self.observer.utc_offset_hours;
        let seconds = (hours * 3600.0).round();
        if !seconds.is_finite() {
            return Err(ConfigError::InvalidOffset(hours));
        }
        FixedOffset::east_opt(seconds as i32).ok_or(ConfigError::InvalidOffset(hours))
    }
}
