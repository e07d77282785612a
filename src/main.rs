//! Terminal 2048 runner (default binary).
//!
//! Owns the frame clock, the terminal and the single `GameSession`. Each
//! frame it gathers the keys pressed since the last frame, advances the
//! session by the elapsed time, and draws the result.

use std::fs::File;
use std::panic;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tui_2048::core::{GameSession, SessionConfig};
use tui_2048::input::{FrameCollector, KeyOutcome};
use tui_2048::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_2048::types::{MergePolicy, TARGET_FPS};

#[derive(Debug, Parser)]
#[command(name = "tui-2048", version, about = "Slide and merge tiles until one reads 2048")]
struct Args {
    /// RNG seed; defaults to one derived from the current time
    #[arg(long)]
    seed: Option<u32>,

    /// Merge rule: "cascading" lets a merged tile merge again in the same move, "single" does not
    #[arg(long, default_value = "cascading", value_parser = parse_merge_policy)]
    merge: MergePolicy,

    /// Frames per second
    #[arg(long, default_value_t = TARGET_FPS)]
    fps: u32,

    /// Write logs to this file (the terminal is busy drawing the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn parse_merge_policy(s: &str) -> Result<MergePolicy, String> {
    MergePolicy::from_str(s).ok_or_else(|| format!("unknown merge rule '{s}' (expected cascading or single)"))
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    // Restore the terminal before a panic message is printed.
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = TerminalRenderer::new().exit();
        default_hook(panic_info);
    }));

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &args);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .init();
    Ok(())
}

fn time_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn run(term: &mut TerminalRenderer, args: &Args) -> Result<()> {
    let seed = args.seed.unwrap_or_else(time_seed);
    let config = SessionConfig::default().with_merge_policy(args.merge);
    info!(seed, merge = args.merge.as_str(), fps = args.fps, "session created");

    let mut session = GameSession::new(seed, config);
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut collector = FrameCollector::new();

    let frame = Duration::from_secs_f64(1.0 / args.fps.max(1) as f64);
    let mut last_frame = Instant::now();

    loop {
        // Input until the next frame is due.
        let timeout = frame
            .checked_sub(last_frame.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if collector.handle_key(key) == KeyOutcome::Quit {
                        info!("quit requested");
                        return Ok(());
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Frame.
        let elapsed = last_frame.elapsed();
        if elapsed >= frame {
            last_frame = Instant::now();
            session.update(elapsed.as_secs_f32(), &collector.take());

            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            view.render_into(&session, Viewport::new(w, h), &mut fb);
            term.draw_swap(&mut fb)?;
        }
    }
}
