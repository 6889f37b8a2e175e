//! Mean squared error between paired forecast and actual values.

use wxcheck_core::AnalysisError;

/// `sum((forecast[i] - actual[i])^2) / n`
///
/// Both slices must be non-empty and of equal length.
pub fn mean_squared_error(forecast: &[f64], actual: &[f64]) -> Result<f64, AnalysisError> {
    if forecast.len() != actual.len() {
        return Err(AnalysisError::DimensionMismatch {
            forecast: forecast.len(),
            actual: actual.len(),
        });
    }
    if forecast.is_empty() {
        return Err(AnalysisError::InsufficientData);
    }

    let sum: f64 = forecast
        .iter()
        .zip(actual)
        .map(|(f, a)| (f - a).powi(2))
        .sum();

    Ok(sum / forecast.len() as f64)
}
