//! question-bank - a terminal panel for a competition's question bank
//!
//! Questions are grouped by round, kept in a bank, and activated in batches
//! for the spin wheel. Uses the Component Architecture pattern from ratatui.

mod action;
mod app;
mod component;
mod components;
mod config;
mod logging;
mod model;
mod services;
mod tui;

use crate::action::Action;
use crate::app::App;
use crate::component::Component;
use crate::config::Config;
use crate::services::QuestionStore;
use crate::tui::Tui;
use anyhow::{Context, Result};
use crossterm::event::Event;
use std::time::Duration;

fn main() -> Result<()> {
    let mut config = Config::load_or_init()?;
    // First argument overrides the configured data file
    if let Some(path) = std::env::args().nth(1) {
        config.data_file = path;
    }

    let logging = logging::init(config.log_filter.as_deref());

    // A corrupt data file is reported before the terminal is taken over
    let store = QuestionStore::open(config.data_path())
        .with_context(|| format!("Could not open question bank {}", config.data_file))?;

    // Setup terminal
    let mut tui = Tui::new()?.with_tick_rate(Duration::from_millis(100));
    tui.enter()?;

    // Create app state
    let mut app = App::new(config, store);
    app.init()?;

    // Main event loop
    let result = run_app(&mut tui, &mut app);

    // Cleanup terminal
    tui.exit()?;

    // Handle any errors
    if let Err(err) = result {
        tracing::error!(error = ?err, "application error");
        eprintln!("Error: {:?}", err);
        if let Some(guard) = &logging {
            eprintln!("Logs: {}", guard.log_dir().display());
        }
        // process::exit skips destructors; flush the log writer first
        drop(logging);
        std::process::exit(1);
    }

    Ok(())
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        // Draw the UI
        let mut draw_result = Ok(());
        tui.draw(|frame| {
            let area = frame.area();
            draw_result = app.draw(frame, area);
        })?;
        draw_result?;

        // Poll for events
        if let Some(event) = tui.next_event()? {
            // Convert event to action
            let action = match event {
                Event::Key(key) => app.handle_key_event(key)?,
                Event::Resize(w, h) => Some(Action::Resize(w, h)),
                _ => None,
            };

            // Action might produce a follow-up action
            let mut current_action = action;
            while let Some(a) = current_action {
                tracing::debug!(action = %a, "update");
                current_action = app.update(a)?;
            }
        } else {
            // No event - tick so expired notifications leave the status bar
            app.update(Action::Tick)?;
        }
    }

    Ok(())
}
