//! Terminal vocabulary-matching runner (default binary).
//!
//! Uses crossterm for keyboard and mouse input and the framebuffer renderer
//! from `verbos_term` (no widget/layout framework).

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind, MouseButton, MouseEventKind};
use tracing::{error, info};

use verbos_reflexivos::core::{Session, SessionSnapshot};
use verbos_reflexivos::input::{map_key, should_quit};
use verbos_reflexivos::term::{
    frame_fingerprint, FrameBuffer, RenderThrottle, SessionView, TerminalRenderer, Viewport,
};
use verbos_reflexivos::types::TICK_MS;
use verbos_reflexivos::{logging, App, AppConfig};

/// Redraw at least this often even when nothing changed.
const STATIC_REDRAW_MS: u64 = 250;

const HELP: &str = "\
Verbos Reflexivos - match Spanish reflexive verbs with their meanings

USAGE:
  verbos [OPTIONS]

OPTIONS:
  --subset <N>        Pairs per round [env: VERBOS_SUBSET] [default: 8]
  --delay-ms <MS>     How long a wrong pair stays shown [env: VERBOS_DELAY_MS] [default: 1000]
  --seed <N>          Fixed shuffle seed [env: VERBOS_SEED]
  --corpus <FILE>     JSON list of {\"source\", \"target\"} pairs [env: VERBOS_CORPUS]
  --log <FILE>        Log file [env: VERBOS_LOG] [default: <tmp>/verbos.log]
  -h, --help          Print help

KEYS:
  arrows / hjkl / wasd   move    enter / space   select
  n   new round    m / esc   menu    q / ctrl-c   quit
  Tiles can also be clicked.
";

fn main() -> Result<()> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    let config = AppConfig::from_env(args).context("invalid configuration")?;
    logging::init(&config.log_path)?;

    let corpus = config.load_corpus().context("failed to load corpus")?;
    let session_config = config.session_config();
    info!(
        entries = corpus.len(),
        subset = session_config.subset_size,
        seed = session_config.seed,
        "starting"
    );
    let session = Session::new(corpus, session_config)?;
    let mut app = App::new(session);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut app);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(e) = &result {
        error!(error = %e, "session aborted");
    }
    result
}

fn run(term: &mut TerminalRenderer, app: &mut App) -> Result<()> {
    let view = SessionView::new();
    let mut throttle = RenderThrottle::new(STATIC_REDRAW_MS);
    let mut snap = SessionSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let started = Instant::now();
    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        app.set_columns(view.columns_for(viewport));
        app.snapshot_into(&mut snap);

        let now_ms = started.elapsed().as_millis() as u64;
        if throttle.should_render(now_ms, frame_fingerprint(&snap, app.cursor(), w, h)) {
            view.render_into(&snap, app.cursor(), viewport, &mut fb);
            term.draw(&fb)?;
        }

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(command) = map_key(key) {
                        app.apply(command)?;
                    }
                }
                Event::Mouse(mouse) => {
                    if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
                        let hit = view.tile_at(&snap, viewport, mouse.column, mouse.row);
                        if let Some(index) = hit {
                            app.click(index);
                        }
                    }
                }
                Event::Resize(..) => {
                    term.invalidate();
                    throttle.invalidate();
                }
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            let elapsed = last_tick.elapsed().as_millis() as u32;
            last_tick = Instant::now();
            app.tick(elapsed);
        }
    }
}
