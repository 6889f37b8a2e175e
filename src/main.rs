//! wxcheck-collector - records forecast vs actual weather once per interval.

use anyhow::{Context, Result};
use tokio::signal;
use wxcheck_core::Config;
use wxcheck_services::{Collector, RecordStore};
use wxcheck_weather::WeatherProvider;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    wxcheck_core::init()?;

    let (config, _warnings) = Config::load_validated().context("Failed to load configuration")?;
    let timezone = config.tz()?;
    let provider = WeatherProvider::from_config(&config)?;
    let store = RecordStore::new(&config.store_path);

    tracing::info!(
        latitude = config.latitude,
        longitude = config.longitude,
        timezone = %config.timezone,
        "Collecting for {}",
        store.path().display()
    );

    let collector = Collector::new(provider, store, timezone)
        .with_max_forecast_distance(config.max_forecast_distance());

    let summary = collector
        .run(config.interval(), shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("{}: {}", e.user_message(), e))?;

    tracing::info!("Recorded {} of {} cycles", summary.recorded, summary.cycles);
    Ok(())
}

/// Resolves on Ctrl+C, or SIGTERM on unix
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
