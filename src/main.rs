//! Terminal 2048 runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer from `tui_2048::term`.
//! The game resumes from the save file when one exists and is written back
//! whenever a move settles, an undo lands, or a new game starts.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};
use tracing::{info, warn};

use tui_2048::config::Config;
use tui_2048::core::{entropy_seed, seeded_rng, GameSession, SessionEvent};
use tui_2048::input::{handle_key_event, should_quit};
use tui_2048::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_2048::types::TICK_MS;
use tui_2048::{init_logging, storage};

fn main() -> Result<()> {
    let config = Config::from_env();
    if let Some(path) = &config.log_path {
        init_logging(path)?;
    }
    info!(?config, "starting");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, config: &Config) -> Result<()> {
    let seed = config.seed.unwrap_or_else(entropy_seed);
    let rng = seeded_rng(seed);
    info!(seed, "rng seeded");

    let saved = config.save_path.as_deref().and_then(|path| {
        storage::load(path).unwrap_or_else(|err| {
            warn!(error = ?err, "could not read save file");
            None
        })
    });
    let mut session = match saved {
        Some(saved) => GameSession::resume(&saved, rng),
        None => GameSession::with_rng(rng),
    }
    .with_timing(config.timing);

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&session.snapshot(), Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        break;
                    }
                    if let Some(action) = handle_key_event(key) {
                        session.apply_action(action);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            let elapsed_ms = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);
            session.tick(elapsed_ms);
        }

        handle_events(&mut session, config);
    }

    // Land any in-flight move so the save holds a settled board.
    session.finish_move();
    handle_events(&mut session, config);
    info!(score = session.score(), high_score = session.high_score(), "quit");
    Ok(())
}

fn handle_events(session: &mut GameSession, config: &Config) {
    let mut dirty = false;
    for event in session.take_events() {
        match event {
            SessionEvent::Settled { game_over } => {
                dirty = true;
                if game_over {
                    info!(score = session.score(), "no moves left");
                }
            }
            SessionEvent::Undone | SessionEvent::Restarted => dirty = true,
            SessionEvent::Victory => info!(score = session.score(), "2048 reached"),
            SessionEvent::Moved { .. } => {}
        }
    }

    if dirty {
        persist(session, config);
    }
}

fn persist(session: &GameSession, config: &Config) {
    let Some(path) = config.save_path.as_deref() else {
        return;
    };
    if let Err(err) = storage::save(path, &session.to_saved()) {
        warn!(error = ?err, "could not write save file");
    }
}
