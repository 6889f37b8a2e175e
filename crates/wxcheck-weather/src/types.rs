use chrono::{NaiveDateTime, NaiveTime, Timelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use wxcheck_core::WeatherError;

/// Geographic location the collector observes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Current conditions as reported for "now"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Observation time, local to the requested time zone
    pub time: NaiveDateTime,
    /// Temperature in Celsius
    pub temperature: f64,
    /// Wind speed in km/h
    pub wind_speed: f64,
}

/// One hour of the forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub time: NaiveDateTime,
    pub temperature: f64,
    pub wind_speed: f64,
}

/// Hourly forecast, ordered by time.
///
/// Fetched once per collection cycle and dropped after alignment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForecastSeries {
    entries: Vec<ForecastEntry>,
}

impl ForecastSeries {
    pub fn new(entries: Vec<ForecastEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[ForecastEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&ForecastEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<ForecastEntry> for ForecastSeries {
    fn from_iter<I: IntoIterator<Item = ForecastEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Parse an ISO-8601 hour stamp as Open-Meteo emits it.
///
/// Accepts `2024-01-01T05`, `2024-01-01T05:00` and `2024-01-01T05:00:00`.
pub fn parse_hour_timestamp(s: &str) -> Result<NaiveDateTime, WeatherError> {
    let s = s.trim();

    // chrono needs a minute field
    if s.len() == 13 {
        return NaiveDateTime::parse_from_str(&format!("{s}:00"), "%Y-%m-%dT%H:%M")
            .map_err(|_| WeatherError::InvalidTimestamp(s.to_string()));
    }

    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|_| WeatherError::InvalidTimestamp(s.to_string()))
}

/// Zero the minutes, seconds and sub-seconds of a timestamp
pub fn truncate_to_hour(dt: NaiveDateTime) -> NaiveDateTime {
    NaiveTime::from_hms_opt(dt.hour(), 0, 0)
        .map(|t| dt.date().and_time(t))
        .unwrap_or(dt)
}

/// Current wall-clock hour in the given time zone
pub fn current_hour(tz: Tz) -> NaiveDateTime {
    truncate_to_hour(Utc::now().with_timezone(&tz).naive_local())
}
