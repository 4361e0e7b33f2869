//! Terminal Flappy Bird runner (default binary).
//!
//! The scene loop and the pipe spawner run on a tokio runtime; terminal input
//! is read on its own thread and forwarded over a channel. Frames go through
//! the framebuffer-based renderer in `tui_flappy::term`.

use std::fs::File;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use tui_flappy::core::{GameConfig, Scene, SessionSummary};
use tui_flappy::input::spawn_terminal_input;
use tui_flappy::term::{SpriteAtlas, TerminalCanvas, TerminalRenderer};

fn main() -> Result<()> {
    init_logging()?;
    let config = GameConfig::from_env();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("flappy-worker")
        .build()?;
    // The pipe spawner is started by Scene::new.
    let _guard = runtime.enter();

    let mut atlas = SpriteAtlas::new();
    let scene = Scene::new(&mut atlas, &config)?;
    let mut canvas = TerminalCanvas::new(atlas, TerminalRenderer::new(), config.width, config.height);
    canvas.renderer_mut().enter()?;

    let result = run(&runtime, scene, &mut canvas);

    // Always try to restore terminal state.
    let _ = canvas.renderer_mut().exit();

    let summary = result?;
    println!(
        "{} frames, {} rounds played",
        summary.frames, summary.rounds
    );
    Ok(())
}

fn run(runtime: &Runtime, scene: Scene, canvas: &mut TerminalCanvas) -> Result<SessionSummary> {
    let (tx, rx) = mpsc::unbounded_channel();
    let input = spawn_terminal_input(tx).context("could not start input thread")?;

    // The receiver is dropped when the scene returns, which stops the input thread.
    let summary = runtime.block_on(scene.run(rx, canvas))?;

    if input.join().is_err() {
        warn!("input thread panicked");
    }
    Ok(summary)
}

/// Log to the file named by `FLAPPY_LOG_PATH`; anything on stderr would land
/// on the game screen.
fn init_logging() -> Result<()> {
    let Some(path) = std::env::var_os("FLAPPY_LOG_PATH") else {
        return Ok(());
    };
    let file = File::create(&path)
        .with_context(|| format!("could not open log file {}", path.to_string_lossy()))?;
    let level = std::env::var("FLAPPY_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(level)?)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
