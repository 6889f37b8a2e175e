//! Header bar.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::{App, View};

pub fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let subtitle = match app.view {
        View::Home => "Home",
        View::Chart => "Forecast vs Actual",
    };
    let title = Paragraph::new(format!(
        "wxcheck v{} - Weather Forecast Accuracy - {subtitle}",
        env!("CARGO_PKG_VERSION")
    ))
    .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::BOTTOM));

    frame.render_widget(title, area);
}
