//! # Scene and View State
//!
//! Holds what survives between frames: the window size, the square viewport
//! letterboxed into it, and the orthographic projection. Digit geometry never
//! changes on resize; only the NDC-to-pixel mapping does.

use crate::composer::draw_scene;
use crate::error::ClockError;
use crate::geometry::Mat4;
use crate::surface::{DrawContext, Rgb, Surface};
use crate::time24::TimeOfDay;
use serde::{Deserialize, Serialize};

/// Square region of the window that NDC `[-1, 1]²` maps onto.
///
/// Origin is the window's lower-left corner, as in GL.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub size: u32,
}

impl Viewport {
    /// Largest square that fits, centred on the longer axis.
    pub fn letterbox(width: u32, height: u32) -> Self {
        if height < width {
            Self {
                x: ((width - height) / 2) as i32,
                y: 0,
                size: height,
            }
        } else {
            Self {
                x: 0,
                y: ((height - width) / 2) as i32,
                size: width,
            }
        }
    }
}

/// Background after the first reshape.
pub const CLEAR_COLOR: Rgb = Rgb::BLACK;

#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    width: u32,
    height: u32,
    viewport: Viewport,
    projection: Mat4,
}

impl Scene {
    pub fn new(width: u32, height: u32) -> Self {
        let mut scene = Self {
            width,
            height,
            viewport: Viewport::default(),
            projection: Mat4::IDENTITY,
        };
        scene.reshape(width, height);
        scene
    }

    /// Recompute viewport and projection for a new window size.
    pub fn reshape(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.viewport = Viewport::letterbox(width, height);
        self.projection = Mat4::orthographic(-1.0, 1.0, -1.0, 1.0, -1.0, 1.0);
    }

    /// Tell `surface` about the current view.
    pub fn apply_to(&self, surface: &mut dyn Surface) {
        surface.reshape(self.width, self.height, self.viewport);
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Clear, draw the clock for `time`, and swap.
    ///
    /// The transform stack is scoped to this call; anything left on it when
    /// drawing finishes is reported as [`ClockError::UnbalancedFrame`].
    pub fn render(&self, surface: &mut dyn Surface, time: &TimeOfDay) -> Result<(), ClockError> {
        surface.begin_frame(CLEAR_COLOR);
        {
            let mut ctx = DrawContext::new(surface, self.projection);
            draw_scene(&mut ctx, time)?;
            if ctx.depth() != 0 {
                return Err(ClockError::UnbalancedFrame { depth: ctx.depth() });
            }
        }
        surface.end_frame()
    }
}
