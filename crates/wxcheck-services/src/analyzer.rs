//! Forecast accuracy analysis over the record store.
//!
//! Nothing is computed ahead of time. Each [`Analyzer::run`] goes through
//! load store → align series → check non-empty → compute → return report.

use chrono::NaiveDateTime;
use wxcheck_core::{AnalysisError, AppError, StoreError, MAX_MSE_PRECISION};

use crate::mse::mean_squared_error;
use crate::record_store::{RecordStore, WeatherRecord};

/// Parallel, index-aligned series built from the records in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlignedDataset {
    pub timestamps: Vec<NaiveDateTime>,
    pub forecast_temperatures: Vec<f64>,
    pub actual_temperatures: Vec<f64>,
    pub forecast_winds: Vec<f64>,
    pub actual_winds: Vec<f64>,
}

impl AlignedDataset {
    pub fn from_records(records: &[WeatherRecord]) -> Self {
        let mut dataset = Self {
            timestamps: Vec::with_capacity(records.len()),
            forecast_temperatures: Vec::with_capacity(records.len()),
            actual_temperatures: Vec::with_capacity(records.len()),
            forecast_winds: Vec::with_capacity(records.len()),
            actual_winds: Vec::with_capacity(records.len()),
        };

        for record in records {
            dataset.timestamps.push(record.timestamp);
            dataset.forecast_temperatures.push(record.forecast_temperature);
            dataset.actual_temperatures.push(record.actual_temperature);
            dataset.forecast_winds.push(record.forecast_wind);
            dataset.actual_winds.push(record.actual_wind);
        }

        dataset
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}

/// Computed accuracy for one analysis run
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    pub temperature_mse: f64,
    pub wind_mse: f64,
    pub dataset: AlignedDataset,
}

impl AnalysisReport {
    pub fn record_count(&self) -> usize {
        self.dataset.len()
    }

    /// One-line summary with `precision` decimals, capped at [`MAX_MSE_PRECISION`]
    pub fn summary(&self, precision: usize) -> String {
        let precision = precision.min(MAX_MSE_PRECISION);
        format!(
            "Temperature MSE: {:.p$}     |     Wind Speed MSE: {:.p$}",
            self.temperature_mse,
            self.wind_mse,
            p = precision
        )
    }
}

/// Compute both MSE values for a dataset
pub fn analyze(dataset: AlignedDataset) -> Result<AnalysisReport, AnalysisError> {
    if dataset.is_empty() {
        return Err(AnalysisError::InsufficientData);
    }

    let temperature_mse =
        mean_squared_error(&dataset.forecast_temperatures, &dataset.actual_temperatures)?;
    let wind_mse = mean_squared_error(&dataset.forecast_winds, &dataset.actual_winds)?;

    Ok(AnalysisReport {
        temperature_mse,
        wind_mse,
        dataset,
    })
}

/// Read-only consumer of the record store
#[derive(Debug, Clone)]
pub struct Analyzer {
    store: RecordStore,
}

impl Analyzer {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Load the store into an aligned dataset
    pub fn load(&self) -> Result<AlignedDataset, StoreError> {
        let records = self.store.load()?;
        Ok(AlignedDataset::from_records(&records))
    }

    /// Run one full analysis
    pub fn run(&self) -> Result<AnalysisReport, AppError> {
        let dataset = self.load()?;
        let report = analyze(dataset)?;

        tracing::info!(
            records = report.record_count(),
            temperature_mse = report.temperature_mse,
            wind_mse = report.wind_mse,
            "Analysis complete"
        );
        Ok(report)
    }
}
