//! musicmaker - a terminal music toy
//!
//! Run with: cargo run --bin musicmaker
//!
//! Logs go to `musicmaker.log` (the terminal belongs to the UI). Set
//! `RUST_LOG=debug` for note and sequencer traces.

mod audio;
mod keymap;
mod ui;

use std::{fs::File, path::Path, sync::Mutex, time::Duration};

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::supports_keyboard_enhancement,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use musicmaker::{config::SETTINGS_FILE, io::CpalMicrophone, MusicMaker, Settings};

const LOG_FILE: &str = "musicmaker.log";

fn init_logging() -> EyreResult<()> {
    let file = File::create(LOG_FILE).wrap_err("failed to create log file")?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    init_logging()?;

    let settings = Settings::load_or_default(Path::new(SETTINGS_FILE))
        .wrap_err_with(|| format!("failed to load {SETTINGS_FILE}"))?;

    let (graph, scope, stream) = match audio::start(&settings) {
        Ok(output) => (Some(output.handle), Some(output.scope), Some(output.stream)),
        Err(err) => {
            warn!("audio output unavailable: {err:#}");
            (None, None, None)
        }
    };

    let hold = Duration::from_millis(settings.input.key_hold_ms);
    let app = MusicMaker::new(graph, settings, Box::new(CpalMicrophone::new()));

    // Key release events need the kitty keyboard protocol.
    let release_events = supports_keyboard_enhancement().unwrap_or(false);
    info!(release_events, "starting ui");

    let mut terminal = ratatui::init();
    if release_events {
        execute!(
            std::io::stdout(),
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }

    let result = ui::UiApp::new(app, scope, release_events, hold).run(&mut terminal);

    if release_events {
        execute!(std::io::stdout(), PopKeyboardEnhancementFlags)?;
    }
    ratatui::restore();

    drop(stream);
    info!("bye");
    result
}
