use anyhow::{Context, Result};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::error::ConfigError;

/// Environment variable that overrides the config file location
pub const CONFIG_ENV_VAR: &str = "WXCHECK_CONFIG";

/// Largest accepted `mse_precision`
pub const MAX_MSE_PRECISION: usize = 15;

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Latitude of the observed location
    #[serde(default = "default_latitude")]
    pub latitude: f64,

    /// Longitude of the observed location
    #[serde(default = "default_longitude")]
    pub longitude: f64,

    /// IANA time zone used for API requests and record timestamps
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Seconds between collection cycles
    #[serde(default = "default_interval_seconds")]
    pub interval_seconds: u64,

    /// Record store (CSV) location
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,

    /// Open-Meteo API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// HTTP request timeout. Unset means the client default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,

    /// Largest accepted gap between the current hour and the nearest
    /// forecast hour. 0 disables the check.
    #[serde(default = "default_max_forecast_distance_hours")]
    pub max_forecast_distance_hours: u32,

    /// Decimal places for MSE values in the viewer
    #[serde(default = "default_mse_precision")]
    pub mse_precision: usize,
}

fn default_latitude() -> f64 {
    3.139
}

fn default_longitude() -> f64 {
    101.6869
}

fn default_timezone() -> String {
    "Asia/Kuala_Lumpur".to_string()
}

fn default_interval_seconds() -> u64 {
    3600
}

fn default_store_path() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("wxcheck"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("weather_data.csv")
}

fn default_api_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_max_forecast_distance_hours() -> u32 {
    3
}

fn default_mse_precision() -> usize {
    2
}

impl Default for Config {
    fn default() -> Self {
        Self {
            latitude: default_latitude(),
            longitude: default_longitude(),
            timezone: default_timezone(),
            interval_seconds: default_interval_seconds(),
            store_path: default_store_path(),
            api_base_url: default_api_base_url(),
            request_timeout_secs: None,
            max_forecast_distance_hours: default_max_forecast_distance_hours(),
            mse_precision: default_mse_precision(),
        }
    }
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from an explicit path, writing defaults there if missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("No config at {}, writing defaults", path.display());
            let config = Self::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let contents = std::fs::read_to_string(path).context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()))
            .context("Failed to parse config file")?;

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()).into());
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        if !(-90.0..=90.0).contains(&self.latitude) {
            result.add_error("latitude", "Latitude must be between -90 and 90");
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            result.add_error("longitude", "Longitude must be between -180 and 180");
        }

        if let Err(e) = self.tz() {
            result.add_error("timezone", e.to_string());
        }

        if self.interval_seconds == 0 {
            result.add_error("interval_seconds", "Interval must be greater than 0");
        } else if self.interval_seconds < 60 {
            result.add_warning(
                "interval_seconds",
                "Interval under a minute will hammer the weather API",
            );
        } else if self.interval_seconds > 86_400 {
            result.add_warning("interval_seconds", "Interval is more than 24 hours");
        }

        if self.store_path.as_os_str().is_empty() {
            result.add_error("store_path", "Store path must not be empty");
        }

        self.validate_url(&self.api_base_url, "api_base_url", &mut result);

        if self.mse_precision > MAX_MSE_PRECISION {
            result.add_error(
                "mse_precision",
                format!("Precision must be at most {MAX_MSE_PRECISION} decimals"),
            );
        } else if self.mse_precision > 6 {
            result.add_warning("mse_precision", "More than 6 decimals is rarely useful");
        }

        result
    }

    /// Validate a URL field
    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }

                if url.port() == Some(0) {
                    result.add_error(field_name, "Port cannot be 0");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Parsed time zone
    pub fn tz(&self) -> Result<Tz, ConfigError> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| ConfigError::UnknownTimezone(self.timezone.clone()))
    }

    /// Collection interval as a duration
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_seconds)
    }

    /// Alignment cap in hours, `None` when disabled
    pub fn max_forecast_distance(&self) -> Option<u32> {
        (self.max_forecast_distance_hours > 0).then_some(self.max_forecast_distance_hours)
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Directory holding config.toml and the viewer log
    pub fn config_dir() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Failed to get config directory")?
            .join("wxcheck"))
    }

    /// Get the path to the configuration file
    fn config_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            return Ok(PathBuf::from(path));
        }
        Ok(Self::config_dir()?.join("config.toml"))
    }
}
