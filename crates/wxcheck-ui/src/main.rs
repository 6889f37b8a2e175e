//! wxcheck-viewer - terminal charts of forecast accuracy.

mod app;
mod event;
mod ui;
mod widgets;

use std::io;
use std::time::Duration;

use anyhow::Context;
use crossterm::{
    event::{Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use wxcheck_core::Config;
use wxcheck_services::{Analyzer, RecordStore};

use app::App;
use event::{handle_key_event, poll_event};
use ui::draw_ui;

fn main() -> anyhow::Result<()> {
    let log_path = Config::config_dir()?.join("viewer.log");
    wxcheck_core::init_with_log_file(&log_path)?;

    let (config, _warnings) = Config::load_validated().context("Failed to load configuration")?;
    let analyzer = Analyzer::new(RecordStore::new(&config.store_path));
    let mut app = App::new(analyzer, config.mse_precision);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        tracing::error!("Viewer failed: {:#}", err);
        eprintln!("Error: {err}");
        std::process::exit(1);
    }

    tracing::info!("Viewer closed");
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> anyhow::Result<()> {
    let tick_rate = Duration::from_millis(100);

    loop {
        terminal.draw(|frame| draw_ui(frame, app))?;

        app.clear_expired_status();

        if let Some(Event::Key(key)) = poll_event(tick_rate)? {
            if key.kind == KeyEventKind::Press {
                handle_key_event(app, key);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
