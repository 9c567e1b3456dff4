//! Terminal memory game runner (default binary).
//!
//! Drives the deterministic core at a fixed timestep. Keys move a board cursor
//! and flip cards, a left click flips the card under the pointer.
//!
//! Environment:
//! - `MEMORY_PAIR_COUNT`, `MEMORY_TIME_LIMIT_SECS`, `MEMORY_MISMATCH_DELAY_MS`: game config
//! - `MEMORY_SEED`: deal seed (defaults to the wall clock)
//! - `MEMORY_LOG_PATH`: write a log file there; `MEMORY_LOG_LEVEL` picks the level

use std::fs::File;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind, MouseButton, MouseEventKind};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use tui_memory::core::{GameConfig, GameEngine, GameSnapshot};
use tui_memory::input::{handle_key_event, should_quit, BoardCursor};
use tui_memory::term::{
    FrameBuffer, FrameClock, GameView, RenderThrottle, TerminalRenderer, Viewport,
};
use tui_memory::types::TICK_MS;

const SEED_KEY: &str = "MEMORY_SEED";
const LOG_PATH_KEY: &str = "MEMORY_LOG_PATH";
const LOG_LEVEL_KEY: &str = "MEMORY_LOG_LEVEL";

/// Repaint at least this often even when nothing changed.
const HEARTBEAT_MS: u64 = 1000;

fn main() -> Result<()> {
    setup_logging()?;

    let config = GameConfig::from_env()?;
    let seed = read_seed()?;
    log::info!(
        "starting: {} pairs, {}s limit, {}ms mismatch delay, seed {}",
        config.pair_count,
        config.time_limit_secs,
        config.mismatch_delay_ms,
        seed
    );

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, GameEngine::new(config, seed));

    // Always try to restore terminal state.
    if let Err(err) = term.exit() {
        log::error!("failed to restore terminal: {err}");
    }
    result
}

fn setup_logging() -> Result<()> {
    let Ok(path) = std::env::var(LOG_PATH_KEY) else {
        return Ok(());
    };
    let level = std::env::var(LOG_LEVEL_KEY)
        .ok()
        .and_then(|raw| raw.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Debug);
    let file = File::create(&path).with_context(|| format!("creating log file {path}"))?;
    WriteLogger::init(
        level,
        ConfigBuilder::new()
            .set_target_level(LevelFilter::Error)
            .build(),
        file,
    )
    .context("installing logger")?;
    Ok(())
}

fn read_seed() -> Result<u32> {
    match std::env::var(SEED_KEY) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{SEED_KEY} must be an unsigned 32-bit integer, got {raw:?}")),
        Err(_) => {
            let nanos = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
                .unwrap_or(1);
            Ok(nanos)
        }
    }
}

fn run(term: &mut TerminalRenderer, mut engine: GameEngine) -> Result<()> {
    let view = GameView::default();
    let mut cursor = BoardCursor::new(engine.deck().len());
    let mut throttle = RenderThrottle::new(HEARTBEAT_MS);
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let started = Instant::now();
    let mut clock = FrameClock::new(TICK_MS, 0);

    loop {
        log_events(&mut engine);

        // Render.
        engine.snapshot_into(&mut snap);
        cursor.set_card_count(snap.card_count());
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        let now_ms = started.elapsed().as_millis() as u64;
        if throttle.should_render(now_ms, frame_fingerprint(&snap, cursor.index())) {
            view.render_into(&snap, Some(cursor.index()), viewport, &mut fb);
            term.draw_swap(&mut fb)?;
        }

        // Input with timeout until next tick.
        let timeout = Duration::from_millis(clock.until_next(now_ms));
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        log::info!("quit requested");
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key).and_then(|ui| cursor.apply(ui)) {
                        let accepted = engine.apply_action(action);
                        log::debug!(
                            "{} at card {}: accepted={accepted}",
                            action.as_str(),
                            cursor.index()
                        );
                    }
                }
                Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                    if let Some(card) = view.card_at(&snap, viewport, mouse.column, mouse.row) {
                        cursor.set_index(card);
                        engine.activate_card(card);
                    }
                }
                Event::Resize(..) => {
                    term.invalidate();
                    throttle.force();
                }
                _ => {}
            }
        }

        // Tick with the measured elapsed time so late frames don't slow the clock.
        if let Some(elapsed_ms) = clock.advance(started.elapsed().as_millis() as u64) {
            engine.tick(elapsed_ms);
        }
    }
}

/// Snapshot fingerprint mixed with the cursor position.
fn frame_fingerprint(snap: &GameSnapshot, cursor: usize) -> u64 {
    snap.fingerprint() ^ (cursor as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

fn log_events(engine: &mut GameEngine) {
    let verbose = log::log_enabled!(log::Level::Debug);
    for ev in engine.drain_events() {
        if !verbose {
            continue;
        }
        match serde_json::to_string(&ev) {
            Ok(json) => log::debug!("event {json}"),
            Err(err) => log::warn!("unserializable {} event: {err}", ev.kind()),
        }
    }
}
