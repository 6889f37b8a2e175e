//! Collector and analyzer driven end to end against a mock Open-Meteo server.

use chrono::NaiveDateTime;
use std::time::Duration;
use tempfile::tempdir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use wxcheck_core::{AppError, WeatherError};
use wxcheck_services::{Analyzer, Collector, RecordStore};
use wxcheck_weather::{parse_hour_timestamp, Coordinates, WeatherProvider};

fn hour(s: &str) -> NaiveDateTime {
    parse_hour_timestamp(s).unwrap()
}

fn provider(server: &MockServer) -> WeatherProvider {
    WeatherProvider::new(
        server.uri(),
        Coordinates {
            latitude: 3.139,
            longitude: 101.6869,
        },
        "UTC",
        Some(Duration::from_secs(5)),
    )
    .unwrap()
}

async fn mount_current(server: &MockServer, temperature: f64, wind: f64) {
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("current", "temperature_2m,wind_speed_10m"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "current": {
                "time": "2024-01-01T01:00",
                "temperature_2m": temperature,
                "wind_speed_10m": wind
            }
        })))
        .mount(server)
        .await;
}

async fn mount_hourly(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("hourly", "temperature_2m,wind_speed_10m"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "hourly": {
                "time": ["2024-01-01T00:00", "2024-01-01T01:00", "2024-01-01T02:00"],
                "temperature_2m": [25.0, 26.0, 27.0],
                "wind_speed_10m": [4.0, 5.0, 6.0]
            }
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_successful_cycle_appends_one_line() {
    let server = MockServer::start().await;
    mount_current(&server, 27.0, 7.0).await;
    mount_hourly(&server).await;

    let dir = tempdir().unwrap();
    let store = RecordStore::new(dir.path().join("weather_data.csv"));
    let collector = Collector::new(provider(&server), store.clone(), chrono_tz::UTC)
        .with_max_forecast_distance(Some(3));

    collector.collect_once(hour("2024-01-01T01")).await.unwrap();

    let contents = std::fs::read_to_string(store.path()).unwrap();
    assert_eq!(contents, "2024-01-01 01:00:00,26.0,27.0,5.0,7.0\n");
}

#[tokio::test]
async fn test_failed_fetch_leaves_store_unchanged() {
    let server = MockServer::start().await;
    mount_hourly(&server).await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("current", "temperature_2m,wind_speed_10m"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let store = RecordStore::new(dir.path().join("weather_data.csv"));
    store
        .append(&wxcheck_services::WeatherRecord {
            timestamp: hour("2024-01-01T00"),
            forecast_temperature: 25.0,
            actual_temperature: 25.5,
            forecast_wind: 4.0,
            actual_wind: 4.5,
        })
        .unwrap();
    let before = std::fs::read_to_string(store.path()).unwrap();

    let collector = Collector::new(provider(&server), store.clone(), chrono_tz::UTC);
    let err = collector
        .collect_once(hour("2024-01-01T01"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Weather(WeatherError::Network(_))));
    assert_eq!(std::fs::read_to_string(store.path()).unwrap(), before);
}

#[tokio::test]
async fn test_collected_records_feed_the_analyzer() {
    let server = MockServer::start().await;
    mount_current(&server, 27.0, 7.0).await;
    mount_hourly(&server).await;

    let dir = tempdir().unwrap();
    let store = RecordStore::new(dir.path().join("weather_data.csv"));
    let collector = Collector::new(provider(&server), store.clone(), chrono_tz::UTC);

    // exact match at 01, nearest (02) for 05
    collector.collect_once(hour("2024-01-01T01")).await.unwrap();
    collector.collect_once(hour("2024-01-01T05")).await.unwrap();

    let report = Analyzer::new(store).run().unwrap();
    assert_eq!(report.record_count(), 2);
    // ((26-27)^2 + (27-27)^2) / 2
    assert!((report.temperature_mse - 0.5).abs() < 1e-12);
    // ((5-7)^2 + (6-7)^2) / 2
    assert!((report.wind_mse - 2.5).abs() < 1e-12);
}

#[tokio::test]
async fn test_out_of_range_forecast_is_skipped() {
    let server = MockServer::start().await;
    mount_current(&server, 27.0, 7.0).await;
    mount_hourly(&server).await;

    let dir = tempdir().unwrap();
    let store = RecordStore::new(dir.path().join("weather_data.csv"));
    let collector = Collector::new(provider(&server), store.clone(), chrono_tz::UTC)
        .with_max_forecast_distance(Some(3));

    let err = collector
        .collect_once(hour("2024-01-03T00"))
        .await
        .unwrap_err();

    assert!(err.is_cycle_local());
    assert!(store.is_empty().unwrap());
}

#[tokio::test]
async fn test_run_stops_on_shutdown_signal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let store = RecordStore::new(dir.path().join("weather_data.csv"));
    let collector = Collector::new(provider(&server), store.clone(), chrono_tz::UTC);

    let (tx, rx) = tokio::sync::oneshot::channel::<()>();
    let shutdown = async {
        let _ = rx.await;
    };

    let run = collector.run(Duration::from_secs(3600), shutdown);
    let stop = async {
        tokio::time::sleep(Duration::from_millis(200)).await;
        let _ = tx.send(());
    };
    let (summary, ()) = tokio::join!(run, stop);

    let summary = summary.unwrap();
    assert_eq!(summary.cycles, 1);
    assert_eq!(summary.skipped, 1);
    assert!(store.is_empty().unwrap());
}
