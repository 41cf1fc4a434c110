//! Terminal falling-block game (default binary).
//!
//! Runs the engine against crossterm input and the framebuffer renderer, or
//! with `--headless` against a simulated clock, writing every rendered frame
//! to stdout as JSON lines.

use std::env;
use std::fs::File;
use std::io::{self, BufWriter};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use env_logger::{Env, Target};
use log::info;

use tui_blocks::core::{GameSession, RandomSource, RenderSink, SimpleRng, TickOutcome};
use tui_blocks::input::{should_quit, KeyEdge, KeyTracker};
use tui_blocks::term::{GameView, JsonLinesSink, TerminalRenderer, TerminalSink};
use tui_blocks::types::{EngineConfig, Key, TICK_MS};

const DEFAULT_HEADLESS_FRAMES: u64 = 20_000;

fn main() -> Result<()> {
    let headless = env::args().skip(1).any(|a| a == "--headless") || env_flag("BLOCKS_HEADLESS");
    init_logging(headless)?;

    let config = EngineConfig::from_env();
    let seed = env::var("BLOCKS_SEED")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or_else(rand::random::<u32>);
    info!(
        "starting {}x{} grid, frequency {}, keyframes {}, seed {}",
        config.rows, config.cols, config.frequency, config.keyframes, seed
    );
    let game = GameSession::new(config, SimpleRng::new(seed))?;

    if headless {
        return run_headless(game);
    }

    let mut sink = TerminalSink::new(TerminalRenderer::new(), GameView::default());
    sink.renderer_mut().enter()?;

    let result = run(game, &mut sink);

    // Always try to restore terminal state.
    let _ = sink.renderer_mut().exit();
    result
}

fn env_flag(name: &str) -> bool {
    env::var(name)
        .map(|v| !v.is_empty() && v != "0" && !v.eq_ignore_ascii_case("false"))
        .unwrap_or(false)
}

fn init_logging(headless: bool) -> Result<()> {
    if headless {
        env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
            .target(Target::Stderr)
            .init();
    } else if let Ok(path) = env::var("BLOCKS_LOG_PATH") {
        let file = File::create(&path).with_context(|| format!("cannot create log file {}", path))?;
        env_logger::Builder::from_env(Env::default().default_filter_or("info"))
            .target(Target::Pipe(Box::new(file)))
            .init();
    } else if env::var_os("RUST_LOG").is_some() {
        env_logger::init();
    }
    Ok(())
}

fn run<R: RandomSource>(mut game: GameSession<R>, sink: &mut TerminalSink) -> Result<()> {
    let mut keys = KeyTracker::new().with_release_events(sink.renderer().enhanced_keys());
    let clock = Instant::now();
    let frame_interval = Duration::from_millis(TICK_MS);
    let mut next_frame = clock + frame_interval;

    game.render(sink)?;

    loop {
        // Input with timeout until the next animation frame.
        let timeout = next_frame.saturating_duration_since(Instant::now());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Release && should_quit(key) {
                        return Ok(());
                    }
                    for edge in keys.handle_event(key, Instant::now()) {
                        apply_edge(&mut game, edge, sink)?;
                    }
                }
                Event::Resize(_, _) => {
                    sink.invalidate();
                    game.render(sink)?;
                }
                _ => {}
            }
        }

        let now = Instant::now();
        if now >= next_frame {
            next_frame = now + frame_interval;
            for edge in keys.update(now) {
                apply_edge(&mut game, edge, sink)?;
            }
            game.tick(now.duration_since(clock).as_millis() as u64, sink)?;
        }
    }
}

fn apply_edge<R: RandomSource, S: RenderSink>(
    game: &mut GameSession<R>,
    edge: KeyEdge,
    sink: &mut S,
) -> Result<(), S::Error> {
    match edge {
        KeyEdge::Down(key) => game.key_down(key, sink),
        KeyEdge::Up(key) => {
            game.key_up(key);
            Ok(())
        }
    }
}

fn run_headless<R: RandomSource>(mut game: GameSession<R>) -> Result<()> {
    let budget = env::var("BLOCKS_HEADLESS_FRAMES")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(DEFAULT_HEADLESS_FRAMES);

    let stdout = io::stdout();
    let mut sink = JsonLinesSink::new(BufWriter::new(stdout.lock()));

    game.key_down(Key::Start, &mut sink)?;
    game.key_up(Key::Start);

    let mut now = 0;
    for _ in 0..budget {
        now += TICK_MS;
        if game.tick(now, &mut sink)? == TickOutcome::GameOver {
            break;
        }
    }

    info!(
        "headless run finished: {:?} after {} frames, {} parts, {} rows",
        game.phase(),
        sink.frames(),
        game.parts_spawned(),
        game.rows_cleared()
    );
    Ok(())
}
