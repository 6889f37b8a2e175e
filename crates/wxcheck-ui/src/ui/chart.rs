//! Chart view: MSE header over temperature and wind charts.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};
use wxcheck_services::AnalysisReport;

use crate::app::{App, Viewport};
use crate::widgets::chart::{
    create_comparison_chart, SeriesPair, ACTUAL_TEMPERATURE, ACTUAL_WIND, FORECAST_TEMPERATURE,
    FORECAST_WIND,
};

const LABEL_FORMAT: &str = "%m-%d %H:%M";

pub fn draw_chart_view(frame: &mut Frame, area: Rect, app: &App) {
    match &app.analysis {
        Some(Ok(report)) => draw_report(frame, area, app, report),
        Some(Err(message)) => draw_message(frame, area, message, Color::Red),
        None => draw_message(frame, area, "No analysis yet. Press R to load.", Color::Gray),
    }
}

fn draw_message(frame: &mut Frame, area: Rect, message: &str, color: Color) {
    let paragraph = Paragraph::new(message.to_string())
        .style(Style::default().fg(color))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Analysis "));
    frame.render_widget(paragraph, area);
}

fn draw_report(frame: &mut Frame, area: Rect, app: &App, report: &AnalysisReport) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Percentage(50),
            Constraint::Percentage(50),
        ])
        .split(area);

    let summary = Paragraph::new(report.summary(app.precision))
        .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} records ", report.record_count())),
        );
    frame.render_widget(summary, chunks[0]);

    let dataset = &report.dataset;
    let viewport = app.viewport;
    let x_bounds = [viewport.start, viewport.end];

    let forecast_temperature = visible_points(&dataset.forecast_temperatures, &viewport);
    let actual_temperature = visible_points(&dataset.actual_temperatures, &viewport);
    let temperature = SeriesPair {
        title: "Temperature",
        unit: "°C",
        forecast: &forecast_temperature,
        actual: &actual_temperature,
        forecast_color: FORECAST_TEMPERATURE,
        actual_color: ACTUAL_TEMPERATURE,
    };
    frame.render_widget(
        create_comparison_chart(
            &temperature,
            x_bounds,
            viewport.y_scale(),
            x_labels(report, &viewport),
        ),
        chunks[1],
    );

    let forecast_wind = visible_points(&dataset.forecast_winds, &viewport);
    let actual_wind = visible_points(&dataset.actual_winds, &viewport);
    let wind = SeriesPair {
        title: "Wind Speed",
        unit: "km/h",
        forecast: &forecast_wind,
        actual: &actual_wind,
        forecast_color: FORECAST_WIND,
        actual_color: ACTUAL_WIND,
    };
    frame.render_widget(
        create_comparison_chart(
            &wind,
            x_bounds,
            viewport.y_scale(),
            x_labels(report, &viewport),
        ),
        chunks[2],
    );
}

/// `(index, value)` points inside the viewport
fn visible_points(values: &[f64], viewport: &Viewport) -> Vec<(f64, f64)> {
    if values.is_empty() {
        return Vec::new();
    }
    let (first, last) = viewport.index_range();
    values[first..=last.min(values.len() - 1)]
        .iter()
        .enumerate()
        .map(|(offset, &v)| ((first + offset) as f64, v))
        .collect()
}

/// Timestamps at the start, middle and end of the viewport
fn x_labels(report: &AnalysisReport, viewport: &Viewport) -> Vec<Span<'static>> {
    let timestamps = &report.dataset.timestamps;
    if timestamps.is_empty() {
        return Vec::new();
    }
    let (first, last) = viewport.index_range();
    [first, (first + last) / 2, last]
        .iter()
        .filter_map(|&i| timestamps.get(i))
        .map(|t| Span::raw(t.format(LABEL_FORMAT).to_string()))
        .collect()
}
