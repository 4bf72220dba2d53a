//! Terminal arcade host (default binary).
//!
//! Replays a recorded engine session in the terminal:
//!
//! ```text
//! tui-arcade demos/attract.json
//! ARCADE_FRAME_DELAY_MS=60 ARCADE_LOG_PATH=arcade.log tui-arcade demos/attract.json
//! ```
//!
//! Press `q`, `Esc` or Ctrl-C to stop early.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};

use tui_arcade::driver::{mount, HostConfig, MountOptions, SessionSummary, StopHandle};
use tui_arcade::engine::{Tape, TapeEngine};
use tui_arcade::input::{handle_key_event, HostAction};
use tui_arcade::term::TerminalRenderer;

const INPUT_POLL: Duration = Duration::from_millis(50);

fn main() -> Result<()> {
    let mut config = HostConfig::from_env();
    if let Some(path) = std::env::args_os().nth(1) {
        config.tape_path = Some(path.into());
    }
    if let Some(path) = &config.log_path {
        init_logging(path)?;
    }

    let tape_path = config
        .tape_path
        .clone()
        .context("no session tape given (pass a path or set ARCADE_TAPE)")?;
    let tape = Tape::from_path(&tape_path)
        .with_context(|| format!("loading tape {}", tape_path.display()))?;
    tracing::info!(path = %tape_path.display(), frames = tape.frame_count(), "tape loaded");

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = rt.block_on(run(TapeEngine::new(tape), &mut term, &config));

    // Always try to restore terminal state.
    let _ = term.exit();

    let summary = result?;
    println!(
        "final score {} after {} frames ({:?})",
        summary.final_score, summary.frames, summary.reason
    );
    Ok(())
}

async fn run(mut engine: TapeEngine, term: &mut TerminalRenderer, config: &HostConfig) -> Result<SessionSummary> {
    let stop = StopHandle::new();
    let input = tokio::task::spawn_blocking({
        let stop = stop.clone();
        move || watch_keys(&stop)
    });

    let summary = mount(&mut engine, term, MountOptions::from(config), &stop).await;
    tracing::info!(
        step = engine.step(),
        tape_finished = engine.is_finished(),
        "session ended"
    );

    stop.stop();
    input.await??;
    Ok(summary?)
}

/// Poll the keyboard until the session ends or the user quits.
fn watch_keys(stop: &StopHandle) -> Result<()> {
    while !stop.is_stopped() {
        if !event::poll(INPUT_POLL)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if handle_key_event(key) == Some(HostAction::Quit) {
                stop.stop();
            }
        }
    }
    Ok(())
}

/// The terminal belongs to the renderer, so logs go to a file.
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .init();
    Ok(())
}
