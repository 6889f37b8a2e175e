//! Hourly collection of forecast-vs-actual readings.

use chrono::NaiveDateTime;
use chrono_tz::Tz;
use std::future::Future;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use wxcheck_core::{AppError, WeatherError};
use wxcheck_weather::{align, current_hour, WeatherSource};

use crate::record_store::{RecordStore, WeatherRecord};

/// Counters for one [`Collector::run`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub cycles: u64,
    pub recorded: u64,
    pub skipped: u64,
}

/// Sole writer of the record store
pub struct Collector<S> {
    source: S,
    store: RecordStore,
    timezone: Tz,
    max_forecast_hours: Option<u32>,
}

impl<S: WeatherSource> Collector<S> {
    pub fn new(source: S, store: RecordStore, timezone: Tz) -> Self {
        Self {
            source,
            store,
            timezone,
            max_forecast_hours: None,
        }
    }

    /// Reject forecasts whose nearest hour is further than `hours` away
    pub fn with_max_forecast_distance(mut self, hours: Option<u32>) -> Self {
        self.max_forecast_hours = hours;
        self
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Run one cycle for `hour` (already truncated).
    ///
    /// The record is appended only after every value is known; any earlier
    /// failure leaves the store untouched.
    pub async fn collect_once(&self, hour: NaiveDateTime) -> Result<WeatherRecord, AppError> {
        let current = self.source.current().await?;
        let forecast = self.source.hourly_forecast().await?;

        let alignment = align(&forecast, hour, self.max_forecast_hours)?;
        let entry = forecast
            .get(alignment.index)
            .ok_or(WeatherError::NoForecastData)?;

        let record = WeatherRecord {
            timestamp: hour,
            forecast_temperature: entry.temperature,
            actual_temperature: current.temperature,
            forecast_wind: entry.wind_speed,
            actual_wind: current.wind_speed,
        };

        self.store.append(&record)?;

        tracing::info!(
            timestamp = %record.timestamp,
            exact = alignment.exact,
            "Collected at: {}",
            record.timestamp.format(crate::record_store::TIMESTAMP_FORMAT)
        );
        Ok(record)
    }

    /// Collect every `interval` until `shutdown` resolves.
    ///
    /// Weather failures skip the cycle. Store failures end the run with an error.
    pub async fn run<F>(&self, interval: Duration, shutdown: F) -> Result<RunSummary, AppError>
    where
        F: Future<Output = ()>,
    {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        let mut summary = RunSummary::default();
        tracing::info!(
            interval_secs = interval.as_secs(),
            store = %self.store.path().display(),
            "Starting data collection (press Ctrl+C to stop)"
        );

        loop {
            // shutdown is polled first so signal handlers are installed before any cycle
            tokio::select! {
                biased;
                () = &mut shutdown => {
                    tracing::info!("Stopped by user");
                    break;
                }
                _ = ticker.tick() => {}
            }

            summary.cycles += 1;
            match self.collect_once(current_hour(self.timezone)).await {
                Ok(_) => summary.recorded += 1,
                Err(e) if e.is_cycle_local() => {
                    summary.skipped += 1;
                    tracing::warn!("Skipping collection cycle: {}", e);
                }
                Err(e) => {
                    tracing::error!("Collection stopped: {}", e);
                    return Err(e);
                }
            }
        }

        tracing::info!(
            cycles = summary.cycles,
            recorded = summary.recorded,
            skipped = summary.skipped,
            "Collection finished"
        );
        Ok(summary)
    }
}
