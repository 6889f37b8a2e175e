//! Keyboard handling for the viewer.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;

use crate::app::{App, View};

/// Handle keyboard events.
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // Global shortcuts
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('q') => {
            app.should_quit = true;
            return;
        }
        _ => {}
    }

    match app.view {
        View::Home => handle_home_keys(app, key),
        View::Chart => handle_chart_keys(app, key),
    }
}

fn handle_home_keys(app: &mut App, key: KeyEvent) {
    if let KeyCode::Enter | KeyCode::Char('g') = key.code {
        app.open_chart();
    }
}

fn handle_chart_keys(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('b') => app.go_home(),
        KeyCode::Char('R') | KeyCode::F(5) => app.reload(),

        // Viewport only moves when there is something plotted
        _ if app.report().is_none() => {}
        KeyCode::Char('+') | KeyCode::Char('=') => app.viewport.zoom_in(),
        KeyCode::Char('-') => app.viewport.zoom_out(),
        KeyCode::Left | KeyCode::Char('h') => app.viewport.pan_left(),
        KeyCode::Right | KeyCode::Char('l') => app.viewport.pan_right(),
        KeyCode::Char('r') => app.viewport.reset(),
        _ => {}
    }
}

/// Poll for events with a timeout.
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}
