//! # Terminal Platform
//!
//! Stand-in window for running the clock without a graphics stack: frames
//! are rasterized into a [`FrameBuffer`] and "swapped" by printing them as
//! shaded text. Commands typed on stdin become window events.
//!
//! The window keeps its pixel size for layout, but each printed character
//! covers a block of window pixels so a frame is at most
//! [`TerminalConfig::columns`] wide.
//!
//! | Input | Event |
//! |---|---|
//! | `q`, `quit`, `exit` | close |
//! | `resize W H` | resize |
//! | empty line | expose |
//! | anything else | input |
//!
//! Ctrl-C also closes.

use crate::app::Event;
use crate::config::TerminalConfig;
use crate::error::ClockError;
use crate::framebuffer::{FrameBuffer, MAX_SIDE};
use crate::geometry::Vec2;
use crate::renderer::{draw_ascii, RasterSurface};
use crate::scene::Viewport;
use crate::surface::{PolygonKind, Rgb, Surface};
use embedded_graphics::prelude::Size;
use log::{debug, warn};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

const CLEAR_AND_HOME: &str = "\x1b[2J\x1b[H";

/// Character cells are about twice as tall as they are wide.
const CELL_ASPECT: u32 = 2;

/// Window pixels per character for a window `width` pixels wide.
fn cell_for(width: u32, columns: u32) -> Size {
    let w = width.div_ceil(columns.max(1)).max(1);
    Size::new(w, w * CELL_ASPECT)
}

pub struct TerminalSurface<W> {
    raster: RasterSurface<FrameBuffer>,
    out: W,
    shades: String,
    clear_screen: bool,
    columns: u32,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(width: u32, height: u32, out: W, config: &TerminalConfig) -> Self {
        let mut surface = Self {
            raster: RasterSurface::new(FrameBuffer::new(0, 0)),
            out,
            shades: config.shades.clone(),
            clear_screen: config.clear_screen,
            columns: config.columns,
        };
        surface.reshape(width, height, Viewport::letterbox(width, height));
        surface
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        self.raster.target()
    }

    pub fn output(&self) -> &W {
        &self.out
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn reshape(&mut self, width: u32, height: u32, viewport: Viewport) {
        self.raster.reshape(width, height, viewport);
        self.raster.set_cell_size(cell_for(width, self.columns));
        let extent = self.raster.target_extent();
        let fb = self.raster.target_mut();
        if fb.width() != extent.width || fb.height() != extent.height {
            fb.resize(extent.width, extent.height);
        }
    }

    fn begin_frame(&mut self, clear: Rgb) {
        self.raster.begin_frame(clear);
    }

    fn fill_polygon(&mut self, kind: PolygonKind, color: Rgb, vertices: &[Vec2]) {
        self.raster.fill_polygon(kind, color, vertices);
    }

    fn end_frame(&mut self) -> Result<(), ClockError> {
        let text = draw_ascii(self.raster.target(), &self.shades);
        if self.clear_screen {
            self.out.write_all(CLEAR_AND_HOME.as_bytes())?;
        }
        self.out.write_all(text.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}

/// Map one line of terminal input to an event.
pub fn parse_command(line: &str) -> Event {
    let mut words = line.split_whitespace();
    match words.next() {
        None => Event::Expose,
        Some("q" | "quit" | "exit") => Event::Close,
        Some("resize") => {
            let width = words.next().and_then(|w| w.parse().ok());
            let height = words.next().and_then(|h| h.parse().ok());
            match (width, height) {
                (Some(width), Some(height)) if width > 0 && height > 0 => {
                    if width > MAX_SIDE || height > MAX_SIDE {
                        warn!("resize {}x{} exceeds {} pixels per side", width, height, MAX_SIDE);
                        return Event::Input;
                    }
                    Event::Resize { width, height }
                }
                _ => {
                    warn!("usage: resize WIDTH HEIGHT");
                    Event::Input
                }
            }
        }
        Some(_) => Event::Input,
    }
}

/// Forward stdin lines as events until stdin closes.
pub fn spawn_input(tx: mpsc::Sender<Event>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            let event = parse_command(&line);
            debug!("stdin {:?} -> {:?}", line, event);
            if tx.send(event).await.is_err() {
                break;
            }
        }
    })
}

/// Turn Ctrl-C into a close event.
pub fn spawn_interrupt(tx: mpsc::Sender<Event>) -> JoinHandle<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tx.send(Event::Close).await.ok();
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::SystemClock;
    use crate::app::{ClockApp, Flow};
    use crate::config::Config;
    use crate::scene::Scene;
    use crate::time24::TimeOfDay;

    #[test]
    fn commands_map_to_events() {
        assert_eq!(parse_command("q"), Event::Close);
        assert_eq!(parse_command("  quit "), Event::Close);
        assert_eq!(parse_command(""), Event::Expose);
        assert_eq!(
            parse_command("resize 800 600"),
            Event::Resize { width: 800, height: 600 }
        );
        assert_eq!(parse_command("resize 800"), Event::Input);
        assert_eq!(parse_command("resize 0 10"), Event::Input);
        assert_eq!(parse_command("hello"), Event::Input);
    }

    #[test]
    fn oversized_resize_command_is_ignored() {
        assert_eq!(parse_command("resize 70000 70000"), Event::Input);
        assert_eq!(
            parse_command("resize 4096 4096"),
            Event::Resize { width: 4096, height: 4096 }
        );

        let config = Config::default().terminal;
        let surface = TerminalSurface::new(640, 480, Vec::new(), &config);
        let mut app = ClockApp::new(Scene::new(640, 480), surface, SystemClock);
        assert_eq!(app.handle_event(parse_command("resize 70000 70000")), Flow::Continue);
        assert_eq!(app.scene().viewport().size, 480);
    }

    #[test]
    fn huge_window_still_prints_a_narrow_frame() {
        let config = Config::default().terminal;
        let mut surface = TerminalSurface::new(640, 480, Vec::new(), &config);
        surface.reshape(70_000, 70_000, Viewport::letterbox(70_000, 70_000));
        assert_eq!(surface.framebuffer().width(), 100);
        assert_eq!(surface.framebuffer().height(), 50);
    }

    #[test]
    fn default_window_fits_the_column_limit() {
        let config = Config::default().terminal;
        let surface = TerminalSurface::new(640, 480, Vec::new(), &config);
        // 7×14 pixel cells.
        assert_eq!(surface.framebuffer().width(), 92);
        assert_eq!(surface.framebuffer().height(), 35);
    }

    #[test]
    fn swap_prints_the_frame() {
        let mut config = Config::default().terminal;
        config.clear_screen = false;
        let mut surface = TerminalSurface::new(400, 200, Vec::new(), &config);
        let scene = Scene::new(400, 200);
        scene.apply_to(&mut surface);
        scene
            .render(&mut surface, &TimeOfDay::new(3, 7, 45).unwrap())
            .unwrap();

        let text = String::from_utf8(surface.output().clone()).unwrap();
        assert!(!text.is_empty());
        assert!(!text.starts_with(CLEAR_AND_HOME));
        assert!(text.lines().all(|l| l.chars().count() <= 100));
    }

    #[test]
    fn reshape_resizes_the_framebuffer() {
        let config = Config::default().terminal;
        let mut surface = TerminalSurface::new(10, 10, Vec::new(), &config);
        surface.reshape(30, 20, Viewport::letterbox(30, 20));
        // One pixel per column, two per row.
        assert_eq!(surface.framebuffer().width(), 30);
        assert_eq!(surface.framebuffer().height(), 10);
    }
}
