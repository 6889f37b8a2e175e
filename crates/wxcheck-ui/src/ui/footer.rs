//! Footer bar with keyboard shortcuts.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::{App, View};

/// Draw the footer bar with context-sensitive help.
pub fn draw_footer(frame: &mut Frame, area: Rect, app: &App) {
    let help_text = match app.view {
        View::Home => "[Enter/g] Chart  [q] Quit",
        View::Chart => "[+/-] Zoom  [←→] Pan  [r] Reset  [R/F5] Reload  [Esc/b] Home  [q] Quit",
    };

    let display_text = match &app.status_message {
        Some((status, _)) => format!("{status} | {help_text}"),
        None => help_text.to_string(),
    };

    let footer = Paragraph::new(display_text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::TOP));

    frame.render_widget(footer, area);
}
