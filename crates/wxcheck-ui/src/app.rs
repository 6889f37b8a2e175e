//! Application state for the viewer.

use std::time::Instant;

use wxcheck_services::{AnalysisReport, Analyzer};

const ZOOM_FACTOR: f64 = 1.1;
const PAN_FRACTION: f64 = 0.1;
const MIN_WINDOW: f64 = 1.0;

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Home,
    Chart,
}

/// Visible x range over record indices `0..len`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub start: f64,
    pub end: f64,
    len: usize,
}

impl Viewport {
    /// Whole series visible
    pub fn full(len: usize) -> Self {
        Self {
            start: 0.0,
            end: Self::max_x(len),
            len,
        }
    }

    fn max_x(len: usize) -> f64 {
        (len.saturating_sub(1) as f64).max(MIN_WINDOW)
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    /// Fraction of the full y range to show; follows the x zoom level
    pub fn y_scale(&self) -> f64 {
        (self.width() / Self::max_x(self.len)).clamp(0.0, 1.0)
    }

    pub fn zoom_in(&mut self) {
        let width = (self.width() / ZOOM_FACTOR).max(MIN_WINDOW);
        self.set_around(self.center(), width);
    }

    pub fn zoom_out(&mut self) {
        let width = (self.width() * ZOOM_FACTOR).min(Self::max_x(self.len));
        self.set_around(self.center(), width);
    }

    pub fn pan_left(&mut self) {
        let shift = self.width() * PAN_FRACTION;
        self.shift(-shift);
    }

    pub fn pan_right(&mut self) {
        let shift = self.width() * PAN_FRACTION;
        self.shift(shift);
    }

    pub fn reset(&mut self) {
        *self = Self::full(self.len);
    }

    /// Index range `[first, last]` covered by the window, clamped to the data
    pub fn index_range(&self) -> (usize, usize) {
        if self.len == 0 {
            return (0, 0);
        }
        let last_index = self.len - 1;
        let first = (self.start.floor().max(0.0) as usize).min(last_index);
        let last = (self.end.ceil().max(0.0) as usize).min(last_index);
        (first, last)
    }

    fn set_around(&mut self, center: f64, width: f64) {
        self.start = center - width / 2.0;
        self.end = center + width / 2.0;
        self.clamp();
    }

    fn shift(&mut self, by: f64) {
        self.start += by;
        self.end += by;
        self.clamp();
    }

    /// Keep the window inside `[0, max_x]` without changing its width
    fn clamp(&mut self) {
        let max = Self::max_x(self.len);
        let width = self.width().min(max);
        if self.start < 0.0 {
            self.start = 0.0;
            self.end = width;
        }
        if self.end > max {
            self.end = max;
            self.start = max - width;
        }
    }
}

/// Main application state.
pub struct App {
    pub view: View,
    pub should_quit: bool,
    /// Decimals for the MSE header
    pub precision: usize,
    /// Record count shown on the home screen, or why it could not be read
    pub record_count: Result<usize, String>,
    /// Result of the last analysis; `None` until the chart is first opened
    pub analysis: Option<Result<AnalysisReport, String>>,
    pub viewport: Viewport,
    /// Status message with the time it was set
    pub status_message: Option<(String, Instant)>,
    analyzer: Analyzer,
}

impl App {
    pub fn new(analyzer: Analyzer, precision: usize) -> Self {
        let mut app = Self {
            view: View::Home,
            should_quit: false,
            precision,
            record_count: Ok(0),
            analysis: None,
            viewport: Viewport::full(0),
            status_message: None,
            analyzer,
        };
        app.refresh_record_count();
        app
    }

    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    /// Home → Chart; always runs a fresh analysis
    pub fn open_chart(&mut self) {
        self.view = View::Chart;
        self.reload();
    }

    /// Chart → Home
    pub fn go_home(&mut self) {
        self.view = View::Home;
        self.refresh_record_count();
    }

    /// Re-run the analysis against the store as it is now
    pub fn reload(&mut self) {
        match self.analyzer.run() {
            Ok(report) => {
                self.viewport = Viewport::full(report.record_count());
                self.set_status(format!("Loaded {} records", report.record_count()));
                self.analysis = Some(Ok(report));
            }
            Err(e) => {
                tracing::warn!("Analysis failed: {}", e);
                self.viewport = Viewport::full(0);
                self.analysis = Some(Err(format!("{}: {}", e.user_message(), e)));
            }
        }
    }

    pub fn report(&self) -> Option<&AnalysisReport> {
        self.analysis.as_ref().and_then(|r| r.as_ref().ok())
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now()));
    }

    /// Clear status messages older than 5 seconds.
    pub fn clear_expired_status(&mut self) {
        if let Some((_, instant)) = &self.status_message {
            if instant.elapsed().as_secs() > 5 {
                self.status_message = None;
            }
        }
    }

    fn refresh_record_count(&mut self) {
        self.record_count = self
            .analyzer
            .store()
            .len()
            .map_err(|e| e.to_string());
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;
    use wxcheck_services::{RecordStore, WeatherRecord};

    /// Store with `n` hourly records under a temp dir
    pub(crate) fn app_with_records(n: u32) -> (TempDir, App) {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::new(dir.path().join("weather_data.csv"));
        for hour in 0..n {
            store
                .append(&WeatherRecord {
                    timestamp: NaiveDate::from_ymd_opt(2024, 1, 1)
                        .and_then(|d| d.and_hms_opt(hour, 0, 0))
                        .unwrap(),
                    forecast_temperature: 25.0 + hour as f64,
                    actual_temperature: 26.0 + hour as f64,
                    forecast_wind: 5.0,
                    actual_wind: 7.0,
                })
                .unwrap();
        }
        (dir, App::new(Analyzer::new(store), 2))
    }

    #[test]
    fn test_full_viewport_covers_series() {
        let viewport = Viewport::full(11);
        assert_eq!(viewport.start, 0.0);
        assert_eq!(viewport.end, 10.0);
        assert_eq!(viewport.index_range(), (0, 10));
    }

    #[test]
    fn test_zoom_in_keeps_center() {
        let mut viewport = Viewport::full(101);
        viewport.zoom_in();
        assert!((viewport.center() - 50.0).abs() < 1e-9);
        assert!((viewport.width() - 100.0 / 1.1).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_out_never_exceeds_data() {
        let mut viewport = Viewport::full(101);
        viewport.zoom_out();
        assert_eq!(viewport, Viewport::full(101));
    }

    #[test]
    fn test_zoom_in_has_a_floor() {
        let mut viewport = Viewport::full(5);
        for _ in 0..50 {
            viewport.zoom_in();
        }
        assert!((viewport.width() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_pan_is_clamped() {
        let mut viewport = Viewport::full(101);
        viewport.zoom_in();
        let width = viewport.width();

        for _ in 0..100 {
            viewport.pan_right();
        }
        assert_eq!(viewport.end, 100.0);
        assert!((viewport.width() - width).abs() < 1e-9);

        for _ in 0..100 {
            viewport.pan_left();
        }
        assert_eq!(viewport.start, 0.0);
        assert!((viewport.width() - width).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_scales_y_with_x() {
        let mut viewport = Viewport::full(101);
        assert_eq!(viewport.y_scale(), 1.0);

        viewport.zoom_in();
        assert!((viewport.y_scale() - 1.0 / 1.1).abs() < 1e-9);

        viewport.pan_left();
        assert!((viewport.y_scale() - 1.0 / 1.1).abs() < 1e-9);

        viewport.reset();
        assert_eq!(viewport.y_scale(), 1.0);
    }

    #[test]
    fn test_reset_restores_full_view() {
        let mut viewport = Viewport::full(30);
        viewport.zoom_in();
        viewport.pan_left();
        viewport.reset();
        assert_eq!(viewport, Viewport::full(30));
    }

    #[test]
    fn test_empty_viewport_range() {
        assert_eq!(Viewport::full(0).index_range(), (0, 0));
    }

    #[test]
    fn test_home_shows_record_count() {
        let (_dir, app) = app_with_records(3);
        assert_eq!(app.view, View::Home);
        assert_eq!(app.record_count, Ok(3));
        assert!(app.analysis.is_none());
    }

    #[test]
    fn test_open_chart_runs_analysis() {
        let (_dir, mut app) = app_with_records(4);
        app.open_chart();

        assert_eq!(app.view, View::Chart);
        let report = app.report().unwrap();
        assert_eq!(report.temperature_mse, 1.0);
        assert_eq!(report.wind_mse, 4.0);
        assert_eq!(app.viewport, Viewport::full(4));
    }

    #[test]
    fn test_open_chart_on_empty_store_shows_error() {
        let (_dir, mut app) = app_with_records(0);
        app.open_chart();

        assert_eq!(app.view, View::Chart);
        assert!(app.report().is_none());
        assert!(matches!(app.analysis, Some(Err(_))));
    }

    #[test]
    fn test_go_home_refreshes_count() {
        let (_dir, mut app) = app_with_records(2);
        app.open_chart();
        app.analyzer()
            .store()
            .append(&WeatherRecord {
                timestamp: NaiveDate::from_ymd_opt(2024, 1, 2)
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
                    .unwrap(),
                forecast_temperature: 1.0,
                actual_temperature: 1.0,
                forecast_wind: 1.0,
                actual_wind: 1.0,
            })
            .unwrap();

        app.go_home();
        assert_eq!(app.view, View::Home);
        assert_eq!(app.record_count, Ok(3));
    }
}
