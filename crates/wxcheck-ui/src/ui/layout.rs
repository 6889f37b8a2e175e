//! Main layout.

use ratatui::prelude::*;

use super::chart::draw_chart_view;
use super::footer::draw_footer;
use super::header::draw_header;
use super::home::draw_home_view;
use crate::app::{App, View};

/// Draw the main UI layout.
pub fn draw_ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Min(8),    // Content
            Constraint::Length(2), // Footer
        ])
        .split(frame.area());

    draw_header(frame, chunks[0], app);

    match app.view {
        View::Home => draw_home_view(frame, chunks[1], app),
        View::Chart => draw_chart_view(frame, chunks[1], app),
    }

    draw_footer(frame, chunks[2], app);
}
