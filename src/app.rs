//! # Clock Event Loop
//!
//! One task, one loop. Each pass drains every queued event, then asks the
//! [`AnimationClock`] whether the face is due. If it is, the frame is drawn
//! straight away; if not, the loop blocks on the event channel with a
//! timeout that ends just after the next second boundary. Nothing spins.
//!
//! Resizes only touch the viewport. They and expose events invalidate the
//! current frame so the face is redrawn without waiting for the next second.

use crate::animation::{AnimationClock, Tick, WallClock};
use crate::error::ClockError;
use crate::scene::Scene;
use crate::surface::Surface;
use crate::time24::TimeOfDay;
use log::{debug, info};
use std::time::Duration;
use tokio::sync::mpsc::{self, error::TryRecvError};

/// Input and window events.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// New window size in device pixels.
    Resize { width: u32, height: u32 },
    /// The window contents need repainting.
    Expose,
    /// Any other user input; serviced but otherwise ignored.
    Input,
    /// The window was closed.
    Close,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct ClockApp<S, C> {
    scene: Scene,
    surface: S,
    clock: C,
    animation: AnimationClock,
    frames: u64,
}

impl<S, C> ClockApp<S, C>
where
    S: Surface,
    C: WallClock,
{
    pub fn new(scene: Scene, mut surface: S, clock: C) -> Self {
        scene.apply_to(&mut surface);
        Self {
            scene,
            surface,
            clock,
            animation: AnimationClock::new(),
            frames: 0,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Frames drawn so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn handle_event(&mut self, event: Event) -> Flow {
        match event {
            Event::Resize { width, height } => {
                debug!("resize to {}x{}", width, height);
                self.scene.reshape(width, height);
                self.scene.apply_to(&mut self.surface);
                self.animation.invalidate();
                Flow::Continue
            }
            Event::Expose => {
                self.animation.invalidate();
                Flow::Continue
            }
            Event::Input => Flow::Continue,
            Event::Close => {
                info!("close requested after {} frames", self.frames);
                Flow::Exit
            }
        }
    }

    /// Draw the face for a Unix second.
    pub fn redraw(&mut self, unix_second: i64) -> Result<(), ClockError> {
        let time = TimeOfDay::decode(unix_second);
        debug!("redraw {}", time);
        self.scene.render(&mut self.surface, &time)?;
        self.frames += 1;
        Ok(())
    }

    /// Redraw if due. Returns how long to wait otherwise.
    pub fn tick(&mut self) -> Result<Option<Duration>, ClockError> {
        match self.animation.poll(self.clock.now()) {
            Tick::Redraw(second) => {
                self.redraw(second)?;
                Ok(None)
            }
            Tick::Wait(wait) => Ok(Some(wait)),
        }
    }

    /// Run until a [`Event::Close`] arrives or drawing fails.
    ///
    /// If every sender is dropped the clock keeps running on plain timed
    /// sleeps.
    pub async fn run(&mut self, events: mpsc::Receiver<Event>) -> Result<(), ClockError> {
        let mut events = Some(events);
        loop {
            let mut source_closed = false;
            if let Some(rx) = events.as_mut() {
                loop {
                    match rx.try_recv() {
                        Ok(event) => {
                            if self.handle_event(event) == Flow::Exit {
                                return Ok(());
                            }
                        }
                        Err(TryRecvError::Empty) => break,
                        Err(TryRecvError::Disconnected) => {
                            source_closed = true;
                            break;
                        }
                    }
                }
            }
            if source_closed {
                info!("event source closed, continuing without input");
                events = None;
            }

            let Some(wait) = self.tick()? else {
                continue;
            };

            let outcome = match events.as_mut() {
                Some(rx) => Some(tokio::time::timeout(wait, rx.recv()).await),
                None => {
                    tokio::time::sleep(wait).await;
                    None
                }
            };
            match outcome {
                Some(Ok(Some(event))) => {
                    if self.handle_event(event) == Flow::Exit {
                        return Ok(());
                    }
                }
                Some(Ok(None)) => {
                    info!("event source closed, continuing without input");
                    events = None;
                }
                Some(Err(_)) | None => {}
            }
        }
    }
}
