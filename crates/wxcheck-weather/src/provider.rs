//! Open-Meteo client for current conditions and the hourly forecast.
//! Free, no API key required.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};
use wxcheck_core::{Config, NetworkError, ReqwestErrorExt, WeatherError};

use crate::types::{
    parse_hour_timestamp, Coordinates, CurrentConditions, ForecastEntry, ForecastSeries,
};

const VARIABLES: &str = "temperature_2m,wind_speed_10m";
const USER_AGENT: &str = concat!("wxcheck/", env!("CARGO_PKG_VERSION"));

/// Source of current conditions and hourly forecasts for one fixed location.
#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Conditions right now
    async fn current(&self) -> Result<CurrentConditions, WeatherError>;

    /// Hourly forecast covering the next few days
    async fn hourly_forecast(&self) -> Result<ForecastSeries, WeatherError>;
}

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    current: Option<CurrentData>,
}

#[derive(Debug, Deserialize)]
struct CurrentData {
    time: String,
    temperature_2m: f64,
    wind_speed_10m: f64,
}

#[derive(Debug, Deserialize)]
struct HourlyResponse {
    hourly: Option<HourlyData>,
}

#[derive(Debug, Deserialize)]
struct HourlyData {
    time: Vec<String>,
    temperature_2m: Vec<Option<f64>>,
    wind_speed_10m: Vec<Option<f64>>,
}

#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Client,
    base_url: String,
    coordinates: Coordinates,
    timezone: String,
}

impl WeatherProvider {
    pub fn new(
        base_url: impl Into<String>,
        coordinates: Coordinates,
        timezone: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, WeatherError> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| e.into_network_error())?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            coordinates,
            timezone: timezone.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, WeatherError> {
        Self::new(
            config.api_base_url.clone(),
            Coordinates {
                latitude: config.latitude,
                longitude: config.longitude,
            },
            config.timezone.clone(),
            config.request_timeout_secs.map(Duration::from_secs),
        )
    }

    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    /// Query parameters shared by both endpoints plus `block=VARIABLES`
    fn query(&self, block: &'static str) -> Vec<(&'static str, String)> {
        vec![
            ("latitude", self.coordinates.latitude.to_string()),
            ("longitude", self.coordinates.longitude.to_string()),
            (block, VARIABLES.to_string()),
            ("timezone", self.timezone.clone()),
        ]
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        query: &[(&'static str, String)],
    ) -> Result<T, WeatherError> {
        let url = format!("{}/forecast", self.base_url);
        debug!(url = %url, "Requesting Open-Meteo");

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| e.into_network_error())?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(NetworkError::ServerError {
                status: status.as_u16(),
                message,
            }
            .into());
        }

        let body = response.text().await.map_err(|e| e.into_network_error())?;
        serde_json::from_str(&body).map_err(|e| WeatherError::InvalidResponse(e.to_string()))
    }

    fn parse_hourly(data: HourlyData) -> Result<ForecastSeries, WeatherError> {
        if data.time.len() != data.temperature_2m.len()
            || data.time.len() != data.wind_speed_10m.len()
        {
            return Err(WeatherError::InvalidResponse(format!(
                "hourly arrays differ in length: {} times, {} temperatures, {} wind speeds",
                data.time.len(),
                data.temperature_2m.len(),
                data.wind_speed_10m.len()
            )));
        }

        let mut entries = Vec::with_capacity(data.time.len());
        for ((time, temperature), wind_speed) in data
            .time
            .iter()
            .zip(data.temperature_2m)
            .zip(data.wind_speed_10m)
        {
            let time = parse_hour_timestamp(time)?;
            match (temperature, wind_speed) {
                (Some(temperature), Some(wind_speed)) => entries.push(ForecastEntry {
                    time,
                    temperature,
                    wind_speed,
                }),
                _ => debug!(%time, "Skipping forecast hour with missing values"),
            }
        }

        Ok(ForecastSeries::new(entries))
    }
}

#[async_trait]
impl WeatherSource for WeatherProvider {
    #[instrument(skip(self))]
    async fn current(&self) -> Result<CurrentConditions, WeatherError> {
        let response: CurrentResponse = self.get_json(&self.query("current")).await?;
        let data = response.current.ok_or_else(|| {
            WeatherError::InvalidResponse("No current weather data in response".to_string())
        })?;

        Ok(CurrentConditions {
            time: parse_hour_timestamp(&data.time)?,
            temperature: data.temperature_2m,
            wind_speed: data.wind_speed_10m,
        })
    }

    #[instrument(skip(self))]
    async fn hourly_forecast(&self) -> Result<ForecastSeries, WeatherError> {
        let response: HourlyResponse = self.get_json(&self.query("hourly")).await?;
        let data = response.hourly.ok_or_else(|| {
            WeatherError::InvalidResponse("No hourly forecast data in response".to_string())
        })?;

        let series = Self::parse_hourly(data)?;
        debug!(entries = series.len(), "Parsed hourly forecast");
        Ok(series)
    }
}
