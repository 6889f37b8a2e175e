//! Forecast-vs-actual line chart.

use ratatui::{
    prelude::*,
    symbols::Marker,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
};

pub const FORECAST_TEMPERATURE: Color = Color::Rgb(0x4F, 0xC3, 0xF7);
pub const ACTUAL_TEMPERATURE: Color = Color::Rgb(0xFF, 0xA7, 0x26);
pub const FORECAST_WIND: Color = Color::Rgb(0x66, 0xBB, 0x6A);
pub const ACTUAL_WIND: Color = Color::Rgb(0xEF, 0x53, 0x50);

/// One quantity to plot, forecast and actual sharing an x axis
pub struct SeriesPair<'a> {
    pub title: &'a str,
    pub unit: &'a str,
    pub forecast: &'a [(f64, f64)],
    pub actual: &'a [(f64, f64)],
    pub forecast_color: Color,
    pub actual_color: Color,
}

/// Pad so flat series still get a visible band, then shrink around the centre by `scale`
fn y_bounds(pair: &SeriesPair<'_>, scale: f64) -> [f64; 2] {
    let (min, max) = pair
        .forecast
        .iter()
        .chain(pair.actual)
        .map(|&(_, y)| y)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| {
            (lo.min(y), hi.max(y))
        });
    if !min.is_finite() || !max.is_finite() {
        return [0.0, 1.0];
    }
    let pad = ((max - min) * 0.1).max(0.5);
    let (lo, hi) = (min - pad, max + pad);
    let center = (lo + hi) / 2.0;
    let half = (hi - lo) / 2.0 * scale.clamp(0.01, 1.0);
    [center - half, center + half]
}

pub fn create_comparison_chart<'a>(
    pair: &SeriesPair<'a>,
    x_bounds: [f64; 2],
    y_scale: f64,
    x_labels: Vec<Span<'a>>,
) -> Chart<'a> {
    let [y_min, y_max] = y_bounds(pair, y_scale);

    let datasets = vec![
        Dataset::default()
            .name("Forecast")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(pair.forecast_color))
            .data(pair.forecast),
        Dataset::default()
            .name("Actual")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(pair.actual_color))
            .data(pair.actual),
    ];

    Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", pair.title)),
        )
        .x_axis(
            Axis::default()
                .title("Time")
                .style(Style::default().fg(Color::Gray))
                .bounds(x_bounds)
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title(pair.unit)
                .style(Style::default().fg(Color::Gray))
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::raw(format!("{y_min:.1}")),
                    Span::raw(format!("{:.1}", (y_min + y_max) / 2.0)),
                    Span::raw(format!("{y_max:.1}")),
                ]),
        )
}
