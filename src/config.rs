//! Configuration module
//!
//! Loaded from `~/.config/parking-service/config.toml` (see
//! [`default_config_path`]). Every section has defaults, so a missing file
//! or an empty one yields a working configuration.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{FarePolicy, VehicleClass};

const APP_DIR: &str = "parking-service";

/// Default location of the configuration file
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join("config.toml")
}

fn default_database_path() -> PathBuf {
    dirs_next::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join("parking.db")
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Application configuration (config.toml)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseSection,
    pub logging: LoggingSection,
    pub lot: LotSection,
    pub fares: FaresSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    /// Full connection URL. Defaults to a SQLite file in the data directory.
    pub url: Option<String>,
}

impl DatabaseSection {
    pub fn connection_url(&self) -> String {
        match &self.url {
            Some(url) => url.clone(),
            None => format!("sqlite://{}?mode=rwc", default_database_path().display()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// Spot layout used to seed an empty database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LotSection {
    pub car_spots: u32,
    pub bike_spots: u32,
}

impl Default for LotSection {
    fn default() -> Self {
        Self {
            car_spots: 3,
            bike_spots: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaresSection {
    pub currency: String,
    pub grace_period_minutes: i64,
    pub loyalty_discount_percent: Decimal,
    /// Price of one hour, keyed by vehicle class (`car`, `bike`)
    pub hourly_rates: BTreeMap<VehicleClass, Decimal>,
}

impl Default for FaresSection {
    fn default() -> Self {
        Self {
            currency: "EUR".to_string(),
            grace_period_minutes: FarePolicy::GRACE_PERIOD_MINUTES,
            loyalty_discount_percent: FarePolicy::LOYALTY_DISCOUNT_PERCENT,
            hourly_rates: BTreeMap::from([
                (VehicleClass::Car, FarePolicy::CAR_RATE_PER_HOUR),
                (VehicleClass::Bike, FarePolicy::BIKE_RATE_PER_HOUR),
            ]),
        }
    }
}

impl AppConfig {
    /// Read the config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lot.car_spots == 0 && self.lot.bike_spots == 0 {
            return Err(ConfigError::Invalid("lot has no parking spots".into()));
        }
        if self.fares.grace_period_minutes < 0 {
            return Err(ConfigError::Invalid(
                "fares.grace_period_minutes must not be negative".into(),
            ));
        }
        if !(Decimal::ZERO..=Decimal::ONE_HUNDRED).contains(&self.fares.loyalty_discount_percent) {
            return Err(ConfigError::Invalid(
                "fares.loyalty_discount_percent must be between 0 and 100".into(),
            ));
        }
        for class in VehicleClass::ALL {
            match self.fares.hourly_rates.get(&class) {
                None => {
                    return Err(ConfigError::Invalid(format!(
                        "fares.hourly_rates has no rate for {}",
                        class.as_str().to_lowercase()
                    )))
                }
                Some(rate) if *rate < Decimal::ZERO => {
                    return Err(ConfigError::Invalid(format!(
                        "fares.hourly_rates.{} must be a non-negative amount",
                        class.as_str().to_lowercase()
                    )))
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    /// Fare policy described by the `[fares]` section.
    pub fn fare_policy(&self) -> Result<FarePolicy, ConfigError> {
        self.validate()?;
        Ok(FarePolicy::new(
            self.fares.hourly_rates.clone(),
            self.fares.grace_period_minutes,
            self.fares.loyalty_discount_percent,
        ))
    }
}
