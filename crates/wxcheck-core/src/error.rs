//! Centralized error types for wxcheck.
//!
//! This module provides a typed error hierarchy that:
//! - Separates cycle-local collection failures from fatal store failures
//! - Provides user-friendly messages suitable for the viewer and report
//! - Preserves full error context for logging

use std::path::PathBuf;

use thiserror::Error;

/// Top-level application error type.
///
/// Use `user_message()` to get a display-appropriate message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Weather service error: {0}")]
    Weather(#[from] WeatherError),

    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("Record store error: {0}")]
    Store(#[from] StoreError),

}

impl AppError {
    /// Returns a user-friendly message suitable for display.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Weather(e) => e.user_message(),
            AppError::Analysis(e) => e.user_message(),
            AppError::Store(e) => e.user_message(),
        }
    }

    /// Whether the error only affects the current collection cycle.
    ///
    /// Everything else stops the collector.
    pub fn is_cycle_local(&self) -> bool {
        matches!(self, AppError::Weather(_))
    }
}

/// Network-related errors (HTTP, connectivity).
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl NetworkError {
    pub fn user_message(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed(_) => {
                "Unable to reach the weather service. Check your internet connection."
            }
            NetworkError::Timeout => "The weather service did not answer in time.",
            NetworkError::ServerError { status, .. } if *status >= 500 => {
                "The weather service is experiencing issues."
            }
            NetworkError::ServerError { .. } => "The weather service rejected the request.",
            NetworkError::InvalidResponse(_) => "Received an unexpected response.",
        }
    }
}

/// Weather source errors. All of them skip the current collection cycle.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Invalid weather response: {0}")]
    InvalidResponse(String),

    #[error("Invalid forecast timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Forecast series is empty")]
    NoForecastData,

    #[error("Nearest forecast hour is {distance_hours}h away (limit {max_hours}h)")]
    ForecastOutOfRange { distance_hours: i64, max_hours: u32 },
}

impl WeatherError {
    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::Network(e) => e.user_message(),
            WeatherError::InvalidResponse(_) | WeatherError::InvalidTimestamp(_) => {
                "The weather service returned data that could not be read."
            }
            WeatherError::NoForecastData => "The weather service returned no forecast.",
            WeatherError::ForecastOutOfRange { .. } => {
                "The forecast does not cover the current hour."
            }
        }
    }
}

/// Errors computing statistics over the aligned dataset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("Series lengths differ: {forecast} forecast values vs {actual} actual values")]
    DimensionMismatch { forecast: usize, actual: usize },

    #[error("Not enough data: at least one record is required")]
    InsufficientData,
}

impl AnalysisError {
    pub fn user_message(&self) -> &'static str {
        match self {
            AnalysisError::DimensionMismatch { .. } => {
                "Forecast and actual series do not line up."
            }
            AnalysisError::InsufficientData => {
                "No readings collected yet. Run the collector first."
            }
        }
    }
}

/// Record store errors (the CSV file).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error on {path}: {message}")]
    Csv { path: PathBuf, message: String },

    #[error("Malformed record on line {line}: {reason}")]
    Malformed { line: u64, reason: String },
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            StoreError::Io { .. } => "The record file could not be read or written.",
            StoreError::Csv { .. } => "The record file could not be encoded.",
            StoreError::Malformed { .. } => "The record file contains a malformed line.",
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),

    #[error("Unknown time zone: {0}")]
    UnknownTimezone(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::ParseError(_) => "Configuration file is malformed. Check your settings.",
            ConfigError::UnknownTimezone(_) => "The configured time zone is not recognized.",
        }
    }
}

/// Extension trait for converting reqwest errors to our error types.
pub trait ReqwestErrorExt {
    fn into_network_error(self) -> NetworkError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_network_error(self) -> NetworkError {
        if self.is_timeout() {
            NetworkError::Timeout
        } else if self.is_decode() {
            NetworkError::InvalidResponse(self.to_string())
        } else if let Some(status) = self.status() {
            NetworkError::ServerError {
                status: status.as_u16(),
                message: self.to_string(),
            }
        } else {
            NetworkError::ConnectionFailed(self.to_string())
        }
    }
}
