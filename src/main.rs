//! spinword - spin the wheel, call letters, solve the puzzle
//!
//! A terminal word-puzzle game against a computer opponent.

mod app;
mod config;
mod game;
mod logging;
mod tui;

use app::AppCoordinator;
use clap::Parser;
use config::{Cli, GameConfig};
use crossterm::event::{self, Event, KeyEventKind};
use std::error::Error;
use std::time::{Duration, Instant};
use tui::Tui;

/// How often the engine clock is fed when no key arrives.
const TICK_RATE: Duration = Duration::from_millis(50);

fn main() -> Result<(), Box<dyn Error>> {
    let config = match GameConfig::try_from(Cli::parse()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("spinword: {}", e);
            std::process::exit(2);
        }
    };

    // The UI owns the screen, so this is the last chance to say anything
    if let Err(e) = logging::init(config.log_file.as_deref(), config.verbosity) {
        eprintln!("warning: logging disabled: {}", e);
    }
    log::info!(
        "config: {} rounds, {}, pace {}, seed {:?}",
        config.settings.max_rounds,
        config.settings.difficulty,
        config.pace,
        config.seed
    );

    let mut terminal = Tui::new()?;
    terminal.enter()?;

    let mut coordinator = AppCoordinator::new(config);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| tui::render(frame, &coordinator))?;

        let timeout = TICK_RATE
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind == KeyEventKind::Press {
                    coordinator.handle_key(key.code);
                }
            }
        }

        if last_tick.elapsed() >= TICK_RATE {
            let now = Instant::now();
            coordinator.tick(now - last_tick);
            last_tick = now;
        }

        if coordinator.should_quit {
            break;
        }
    }

    terminal.exit()?;
    log::info!("bye");
    Ok(())
}
