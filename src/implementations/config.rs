use std::fs;
use std::path::Path;

use chrono::{ DateTime, NaiveDate, Utc };
use log::{ debug, info };
use serde::{ Deserialize, Serialize };
use thiserror::Error;

use crate::config::{ Thresholds, WorkflowApiOptions };
use crate::errors::ParcelflowError;
use crate::traits::clock::{ Clock, FixedClock, SystemClock };

/// Overrides the workflow API base URL
pub const API_URL_ENV: &str = "PARCELFLOW_API_URL";
/// Pins the reference clock (RFC 3339) for reproducible reports
pub const NOW_ENV: &str = "PARCELFLOW_NOW";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Invalid timestamp in {var}: {value}")]
    InvalidTimestamp { var: String, value: String },
}

impl From<ConfigError> for ParcelflowError {
    fn from(err: ConfigError) -> Self {
        ParcelflowError::ConfigurationError(err.to_string())
    }
}

/// File-backed configuration. Every section is optional in the YAML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParcelflowConfig {
    pub thresholds: Thresholds,
    pub workflow_api: WorkflowApiOptions,
}

impl ParcelflowConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config = Self::from_yaml(&contents)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Load from `path` when given, defaults otherwise, then apply
    /// environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                debug!("No config file given, using defaults");
                Self::default()
            }
        };
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            debug!("Using workflow API URL from {}", API_URL_ENV);
            self.workflow_api.base_url = url;
        }
    }
}

/// Resolve the reference clock: explicit value, then `PARCELFLOW_NOW`, then
/// the system clock.
pub fn resolve_clock(explicit: Option<&str>) -> Result<Box<dyn Clock>, ConfigError> {
    let (var, raw) = match explicit {
        Some(value) => ("--now".to_string(), Some(value.to_string())),
        None => (NOW_ENV.to_string(), std::env::var(NOW_ENV).ok()),
    };

    match raw {
        Some(value) => {
            let pinned = parse_timestamp(&value).ok_or(ConfigError::InvalidTimestamp { var, value })?;
            debug!("Reference clock pinned to {}", pinned);
            Ok(Box::new(FixedClock(pinned)))
        }
        None => Ok(Box::new(SystemClock)),
    }
}

/// RFC 3339 timestamp, or a bare `YYYY-MM-DD` taken as midnight UTC
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
