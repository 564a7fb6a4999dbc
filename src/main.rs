//! Terminal memory-match runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer from `term`. The
//! score store runs on its own tokio runtime; this loop only polls it.

use std::fs::OpenOptions;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use memory_match::app::{App, Flow};
use memory_match::core::{DeckRng, GameSession, SessionConfig, SessionEvent};
use memory_match::store::{StoreConfig, StoreRuntime};
use memory_match::term::{BoardView, FrameBuffer, TerminalRenderer, Viewport};
use memory_match::types::FRAME_MS;

const DEFAULT_LOG_PATH: &str = "memory-match.log";

fn main() -> Result<()> {
    init_tracing()?;

    let config = SessionConfig::from_env().context("invalid game configuration")?;
    let mut session = GameSession::with_config(config, DeckRng::from_entropy())?;
    session.subscribe(|event: &SessionEvent| debug!(?event, "session event"));
    info!(seed = session.seed(), pairs = session.total_pairs(), "new session");

    let mut store = StoreRuntime::start(StoreConfig::from_env())?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut store, App::new(session));

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// The terminal is in raw mode on the alternate screen, so logs go to a file.
fn init_tracing() -> Result<()> {
    let path = std::env::var("MEMORY_MATCH_LOG").unwrap_or_else(|_| DEFAULT_LOG_PATH.to_string());
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("cannot open log file {path}"))?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, store: &mut StoreRuntime, mut app: App) -> Result<()> {
    let view = BoardView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let frame = Duration::from_millis(FRAME_MS as u64);
    let mut last_frame = Instant::now();

    loop {
        // Store traffic.
        while let Some(reply) = store.try_recv() {
            app.handle_reply(reply);
        }
        for request in app.drain_requests() {
            if let Err(e) = store.submit(request) {
                warn!(error = %e, "score store request dropped");
                app.set_status(e.to_string());
            }
        }

        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        app.render_into(&view, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until the next frame.
        let timeout = frame.saturating_sub(last_frame.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if app.handle_key(key) == Flow::Quit {
                        info!("quit requested");
                        return Ok(());
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Advance by whole elapsed milliseconds; the remainder carries over.
        let elapsed = last_frame.elapsed().as_millis();
        if elapsed > 0 {
            let ms = u32::try_from(elapsed).unwrap_or(u32::MAX);
            last_frame += Duration::from_millis(ms as u64);
            app.tick(ms);
        }
    }
}
