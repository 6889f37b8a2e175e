pub mod config;
pub mod error;

pub use config::{Config, ConfigValidationError, ValidationResult, MAX_MSE_PRECISION};
pub use error::{
    AnalysisError, AppError, ConfigError, NetworkError, ReqwestErrorExt, StoreError, WeatherError,
};

use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};

fn env_filter() -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
}

/// Initialize logging to stderr
pub fn init() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter(env_filter()).init();

    tracing::info!("wxcheck core initialized");
    Ok(())
}

/// Initialize logging into a file.
///
/// Used by the terminal viewer, which owns stdout/stderr while it runs.
pub fn init_with_log_file(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create log directory")?;
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();

    tracing::info!("wxcheck core initialized (logging to {})", path.display());
    Ok(())
}
