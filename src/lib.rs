//! # 24-Hour LED Clock Core Library
//!
//! This library renders a seven-segment "LED" clock reading `HH:MM:SS` and
//! drives it with an event loop that redraws exactly once per second.
//!
//! ## Design Philosophy
//!
//! ### One Fixed Composition
//! - **Static digit table**: each digit 0–9 lists its lit bars and the small
//!   shape tweaks (shortened serifs, mitred joints) that make it read like a
//!   real LED display
//! - **Nested transforms**: bars are placed in a digit cell, digits at a
//!   fixed pitch, the readout slanted and scaled into view, all through a
//!   bounded transform stack scoped to one frame
//! - **LED bleed**: every frame draws four dim, slightly offset copies of the
//!   readout and one bright copy on top
//!
//! ### Precise, Idle Animation
//! The loop never busy-polls. When no second boundary has been crossed it
//! blocks on the input channel until just after the next boundary, so input
//! and resizes are still serviced within a second.
//!
//! ### Abstract Surfaces
//! Rendering only needs "fill this polygon in this color":
//! - [`surface::RecordingSurface`]: keeps the frame as data (tests, JSON dump)
//! - [`renderer::RasterSurface`]: rasterizes onto any embedded-graphics target
//! - [`terminal::TerminalSurface`]: prints frames as shaded text
//!
//! ## Data Flow
//! 1. [`animation::AnimationClock`] sees a new displayed second
//! 2. [`time24::TimeOfDay`] decodes it in local time
//! 3. [`scene::Scene::render`] clears, composes the face, swaps
//! 4. [`composer`] → [`segment`] emit polygons through [`surface::DrawContext`]
//!
//! # Example
//! ```
//! use led_clock::scene::Scene;
//! use led_clock::surface::RecordingSurface;
//! use led_clock::time24::TimeOfDay;
//!
//! let scene = Scene::new(640, 480);
//! let mut surface = RecordingSurface::new();
//! scene.apply_to(&mut surface);
//! scene.render(&mut surface, &TimeOfDay::new(3, 7, 45).unwrap()).unwrap();
//! assert_eq!(surface.frames_presented, 1);
//! ```

pub mod animation;
pub mod app;
pub mod composer;
pub mod config;
pub mod digits;
pub mod error;
pub mod framebuffer;
pub mod geometry;
pub mod platform;
pub mod renderer;
pub mod scene;
pub mod segment;
pub mod surface;
pub mod terminal;
pub mod time24;
pub mod transform;

pub use digits::{Digit, SegmentSlot};
pub use error::ClockError;
pub use time24::TimeOfDay;

#[cfg(test)]
mod tests;
