//! Terminal whack-a-mole runner (default binary).
//!
//! The round runs on the engine's own runtime; this loop only draws the
//! latest snapshot and forwards keyboard and mouse input as commands.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind, MouseButton, MouseEventKind};
use log::{debug, error, info};

use tui_whack::config::AppConfig;
use tui_whack::core::{GameSnapshot, GameState};
use tui_whack::engine::Engine;
use tui_whack::input::{handle_key_event, should_quit, Cursor, KeyAction};
use tui_whack::logging;
use tui_whack::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_whack::types::{Command, TICK_MS};

fn main() -> Result<()> {
    let config = AppConfig::from_env();
    logging::init_file(&config)?;
    info!(
        "starting: grid={} difficulty={} seed={}",
        config.settings.grid_size,
        config.settings.difficulty.as_str(),
        config.seed
    );

    let mut engine = Engine::start(GameState::with_settings(config.settings, config.seed))?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut engine);

    // Always try to restore terminal state.
    let _ = term.exit();

    finish(result, engine.shutdown())
}

/// Combine the loop result with the engine shutdown. A loop error wins; a
/// shutdown error behind it is only logged.
fn finish(result: Result<()>, shutdown: Result<GameSnapshot>) -> Result<()> {
    match (result, shutdown) {
        (Ok(()), Ok(snap)) => {
            info!("exiting with {} past score(s)", snap.past_scores.len());
            Ok(())
        }
        (Ok(()), Err(e)) => Err(e),
        (Err(e), Ok(_)) => Err(e),
        (Err(e), Err(shutdown_err)) => {
            error!("engine shutdown failed: {:#}", shutdown_err);
            Err(e)
        }
    }
}

fn run(term: &mut TerminalRenderer, engine: &mut Engine) -> Result<()> {
    let view = GameView::default();
    let mut cursor = Cursor::new();
    let mut snap = engine.snapshot();
    let mut fb = FrameBuffer::new(0, 0);
    let poll = Duration::from_millis(TICK_MS as u64);
    let mut dirty = true;

    loop {
        if engine.snapshot_into(&mut snap) {
            dirty = true;
        }
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);

        if dirty {
            cursor.clamp(snap.grid_size);
            view.render_into(&snap, cursor.index(snap.grid_size), viewport, &mut fb);
            term.draw_swap(&mut fb)?;
            dirty = false;
        }

        if !event::poll(poll)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if should_quit(key) {
                    return Ok(());
                }
                match handle_key_event(key) {
                    Some(KeyAction::Cursor(mv)) => {
                        cursor.apply(mv, snap.grid_size);
                        dirty = true;
                    }
                    Some(KeyAction::Whack) => {
                        if let Some(index) = cursor.index(snap.grid_size) {
                            engine.send(Command::Click(index));
                        }
                    }
                    Some(KeyAction::Command(command)) => {
                        debug!("key command {}", command.as_str());
                        engine.send(command);
                    }
                    None => {}
                }
            }
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                if let Some(index) = view.hit_test(&snap, viewport, mouse.column, mouse.row) {
                    engine.send(Command::Click(index));
                }
            }
            Event::Resize(_, _) => {
                term.invalidate();
                dirty = true;
            }
            _ => {}
        }
    }
}
