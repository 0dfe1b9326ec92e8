//! # LED Clock Application Entry Point
//!
//! Resolves where to draw, then either renders a single frame (development
//! modes) or runs the once-per-second clock loop until closed.
//!
//! - `--stdout`: print one frame as text and exit
//! - `--json`: print one recorded frame as JSON and exit
//! - no flag: run the clock in the terminal; type `q` or press Ctrl-C to quit

use anyhow::Context;
use led_clock::animation::{displayed_second, SystemClock, WallClock};
use led_clock::app::ClockApp;
use led_clock::config::Config;
use led_clock::platform::{resolve_target, SurfaceTarget};
use led_clock::scene::Scene;
use led_clock::surface::RecordingSurface;
use led_clock::terminal::{spawn_input, spawn_interrupt, TerminalSurface};
use led_clock::TimeOfDay;
use log::info;
use std::env;
use std::io;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

/// Main application entry point.
fn main() -> anyhow::Result<()> {
    // Logs go to stderr so frames on stdout stay clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let json_mode = env::args().any(|arg| arg == "--json");
    let development_mode = env::args().any(|arg| arg == "--stdout");

    let config = Config::load();

    // An unusable embed id means the host handed us garbage: abort
    let embed_value = env::var(&config.embed.env_var).ok();
    let target = resolve_target(&config.window, embed_value.as_deref())
        .with_context(|| format!("cannot use ${}", config.embed.env_var))?;

    let (width, height) = match &target {
        SurfaceTarget::NewWindow {
            width,
            height,
            title,
        } => {
            info!("opening {:?} at {}x{}", title, width, height);
            (*width, *height)
        }
        SurfaceTarget::Embedded(id) => {
            // Validated only; the terminal surface cannot attach to it
            info!("host window {} requested, drawing to the terminal", id);
            (config.window.width, config.window.height)
        }
    };
    let scene = Scene::new(width, height);
    let now = TimeOfDay::decode(displayed_second(SystemClock.now()));

    if json_mode {
        let mut surface = RecordingSurface::new();
        scene.apply_to(&mut surface);
        scene.render(&mut surface, &now)?;
        println!("{}", serde_json::to_string_pretty(&surface)?);
        return Ok(());
    }

    let mut surface = TerminalSurface::new(width, height, io::stdout(), &config.terminal);

    if development_mode {
        scene.apply_to(&mut surface);
        scene.render(&mut surface, &now)?;
        return Ok(());
    }

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start runtime")?;

    let result = rt.block_on(async {
        let (tx, rx) = mpsc::channel(64);
        spawn_input(tx.clone());
        spawn_interrupt(tx);

        let mut app = ClockApp::new(scene, surface, SystemClock);
        app.run(rx).await
    });

    // The stdin reader may still be parked in a blocking read
    rt.shutdown_background();

    result.context("clock stopped")?;
    Ok(())
}
