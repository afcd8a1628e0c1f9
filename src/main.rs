//! skillhub-tui - SkillShare Hub in the terminal
//!
//! Entry point: loads config, sets up logging, wires the simulated backend
//! into the App and runs the event loop.

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
use crate::config::{Config, ConfigOrigin};
use crate::model::Catalog;
use crate::services::SimulatedBackend;
use crate::tui::Tui;
use anyhow::Result;
use crossterm::event::Event;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

fn main() -> Result<()> {
    let (config, origin) = Config::load_or_init();
    logging::init(&config)?;
    match origin {
        ConfigOrigin::Loaded(path) => debug!(path = %path.display(), "config loaded"),
        ConfigOrigin::Created(path) => info!(path = %path.display(), "default config written"),
        ConfigOrigin::Fallback(reason) => warn!(%reason, "running on default config"),
    }

    let catalog = Catalog::bundled()?;
    let quiz = catalog.quiz.clone();
    let backend = SimulatedBackend::new(catalog).with_latency(config.simulated_latency());

    let mut app = App::new(&config, Arc::new(backend), &quiz);
    app.init()?;

    // Setup terminal
    let mut tui = Tui::new()?.with_tick_rate(config.tick_rate());
    tui.enter()?;

    let result = run_app(&mut tui, &mut app);

    // Cleanup terminal
    tui.exit()?;

    if let Err(err) = result {
        error!(error = ?err, "application error");
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    Ok(())
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        tui.draw(|frame| {
            if let Err(e) = app.draw(frame, frame.area()) {
                error!(error = %e, "draw failed");
            }
        })?;

        if let Some(event) = tui.next_event()? {
            let action = match event {
                Event::Key(key) => app.handle_key_event(key)?,
                Event::Mouse(mouse) => app.handle_mouse_event(mouse)?,
                Event::Resize(w, h) => Some(Action::Resize(w, h)),
                _ => None,
            };

            // Action might produce a follow-up action
            let mut current_action = action;
            while let Some(a) = current_action {
                current_action = app.update(a)?;
            }
        } else {
            // No event - send a tick for time-based updates
            app.update(Action::Tick)?;
        }
    }

    Ok(())
}
