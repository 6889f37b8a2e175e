//! Home screen.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::App;

pub fn draw_home_view(frame: &mut Frame, area: Rect, app: &App) {
    let label = Style::default().fg(Color::Gray);
    let value = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);

    let count = match &app.record_count {
        Ok(n) => Span::styled(n.to_string(), value),
        Err(e) => Span::styled(format!("unreadable ({e})"), Style::default().fg(Color::Red)),
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Weather Forecast Accuracy",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Store:   ", label),
            Span::styled(app.analyzer().store().path().display().to_string(), value),
        ]),
        Line::from(vec![Span::styled("Records: ", label), count]),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter or g to compare forecasts with observations",
            Style::default().fg(Color::Yellow),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Home "));

    frame.render_widget(paragraph, area);
}
