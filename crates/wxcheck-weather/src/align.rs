//! Nearest-hour lookup between "now" and a forecast series.

use chrono::NaiveDateTime;
use wxcheck_core::WeatherError;

use crate::types::ForecastSeries;

/// Outcome of aligning an hour against a forecast series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alignment {
    /// Index into the series
    pub index: usize,
    /// Whether the entry's hour equals the requested hour
    pub exact: bool,
    /// Entry time minus requested hour
    pub offset: chrono::Duration,
}

impl Alignment {
    /// Absolute distance in whole hours
    pub fn distance_hours(&self) -> i64 {
        self.offset.num_hours().abs()
    }
}

/// Find the series entry matching `hour`.
///
/// Exact matches win (first occurrence). Otherwise the entry with the smallest
/// absolute time difference is chosen; on ties the earliest index wins.
pub fn nearest_index(series: &ForecastSeries, hour: NaiveDateTime) -> Result<Alignment, WeatherError> {
    if series.is_empty() {
        return Err(WeatherError::NoForecastData);
    }

    if let Some(index) = series.entries().iter().position(|e| e.time == hour) {
        return Ok(Alignment {
            index,
            exact: true,
            offset: chrono::Duration::zero(),
        });
    }

    let mut best: Option<(usize, i64)> = None;
    for (index, entry) in series.entries().iter().enumerate() {
        let distance = (entry.time - hour).num_seconds().abs();
        // strict less-than keeps the first index on ties
        if best.map_or(true, |(_, d)| distance < d) {
            best = Some((index, distance));
        }
    }

    let (index, _) = best.ok_or(WeatherError::NoForecastData)?;
    let offset = series
        .get(index)
        .map(|e| e.time - hour)
        .ok_or(WeatherError::NoForecastData)?;

    Ok(Alignment {
        index,
        exact: false,
        offset,
    })
}

/// [`nearest_index`] with an optional cap on the distance in hours.
pub fn align(
    series: &ForecastSeries,
    hour: NaiveDateTime,
    max_hours: Option<u32>,
) -> Result<Alignment, WeatherError> {
    let alignment = nearest_index(series, hour)?;

    if let Some(max_hours) = max_hours {
        if alignment.offset.num_seconds().abs() > i64::from(max_hours) * 3600 {
            return Err(WeatherError::ForecastOutOfRange {
                distance_hours: alignment.distance_hours(),
                max_hours,
            });
        }
    }

    if !alignment.exact {
        tracing::debug!(
            index = alignment.index,
            offset_hours = alignment.offset.num_hours(),
            "No exact forecast hour, using nearest entry"
        );
    }

    Ok(alignment)
}
