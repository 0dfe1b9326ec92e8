//! # Drawing Surfaces
//!
//! The renderer talks to an immediate-mode surface that only knows how to
//! clear, fill a polygon in a flat color, and swap. Everything above that
//! (positioning, color state, projection) lives in [`DrawContext`], which is
//! built fresh for every frame and handed down the render call tree.

use crate::digits::{Digit, SegmentSlot};
use crate::error::ClockError;
use crate::geometry::{Mat4, Vec2};
use crate::scene::Viewport;
use crate::transform::{StackError, TransformStack};
use serde::{Deserialize, Serialize};

/// An RGB color with components in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Color from 8-bit-style components divided by a common scale.
    pub fn scaled(r: f64, g: f64, b: f64, scale: f64) -> Self {
        Self::new(r / scale, g / scale, b / scale)
    }

    /// Quantize to 8 bits per channel.
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        let q = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        (q(self.r), q(self.g), q(self.b))
    }

    /// Relative luminance, used for terminal shading.
    pub fn luminance(self) -> f64 {
        0.2126 * self.r + 0.7152 * self.g + 0.0722 * self.b
    }
}

/// What a polygon depicts. Surfaces that only rasterize ignore it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PolygonKind {
    Segment { digit: Digit, slot: SegmentSlot },
    ColonDot,
}

/// Immediate-mode target for the clock.
pub trait Surface {
    /// The window was resized; `viewport` is where NDC lands within it.
    fn reshape(&mut self, width: u32, height: u32, viewport: Viewport);

    fn begin_frame(&mut self, clear: Rgb);

    /// Fill a closed polygon given in normalized device coordinates.
    fn fill_polygon(&mut self, kind: PolygonKind, color: Rgb, vertices: &[Vec2]);

    /// Swap the finished frame onto the screen.
    fn end_frame(&mut self) -> Result<(), ClockError>;
}

/// Per-frame drawing state: transform stack, current color, projection.
pub struct DrawContext<'a> {
    stack: TransformStack,
    projection: Mat4,
    color: Rgb,
    surface: &'a mut dyn Surface,
}

impl<'a> DrawContext<'a> {
    pub fn new(surface: &'a mut dyn Surface, projection: Mat4) -> Self {
        Self {
            stack: TransformStack::new(),
            projection,
            color: Rgb::WHITE,
            surface,
        }
    }

    pub fn set_color(&mut self, color: Rgb) {
        self.color = color;
    }

    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    /// Run `f` between a matched push and pop. The pop runs even if `f` fails.
    pub fn scoped<T, F>(&mut self, f: F) -> Result<T, StackError>
    where
        F: FnOnce(&mut Self) -> Result<T, StackError>,
    {
        self.stack.push()?;
        let result = f(self);
        self.stack.pop()?;
        result
    }

    pub fn translate(&mut self, x: f64, y: f64) {
        self.stack.translate(x, y);
    }

    pub fn scale(&mut self, s: f64) {
        self.stack.scale(s);
    }

    pub fn rotate_z(&mut self, degrees: f64) {
        self.stack.rotate_z(degrees);
    }

    pub fn multiply(&mut self, m: &Mat4) {
        self.stack.multiply(m);
    }

    /// Transform local vertices into NDC and fill them in the current color.
    pub fn fill(&mut self, kind: PolygonKind, local: &[Vec2]) {
        let mvp = self.projection * *self.stack.current();
        let ndc: Vec<Vec2> = local.iter().map(|&p| mvp.transform_point(p)).collect();
        self.surface.fill_polygon(kind, self.color, &ndc);
    }
}

/// One recorded fill.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecordedPolygon {
    pub kind: PolygonKind,
    pub color: Rgb,
    pub vertices: Vec<Vec2>,
}

/// Surface that keeps the most recent frame as data.
///
/// Used for structural snapshots of the scene and for the `--json` dump.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RecordingSurface {
    pub width: u32,
    pub height: u32,
    pub viewport: Option<Viewport>,
    pub clear: Rgb,
    pub polygons: Vec<RecordedPolygon>,
    pub frames_presented: u64,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Polygons drawn in exactly `color`.
    pub fn in_color(&self, color: Rgb) -> impl Iterator<Item = &RecordedPolygon> {
        self.polygons.iter().filter(move |p| p.color == color)
    }
}

impl Surface for RecordingSurface {
    fn reshape(&mut self, width: u32, height: u32, viewport: Viewport) {
        self.width = width;
        self.height = height;
        self.viewport = Some(viewport);
    }

    fn begin_frame(&mut self, clear: Rgb) {
        self.clear = clear;
        self.polygons.clear();
    }

    fn fill_polygon(&mut self, kind: PolygonKind, color: Rgb, vertices: &[Vec2]) {
        self.polygons.push(RecordedPolygon {
            kind,
            color,
            vertices: vertices.to_vec(),
        });
    }

    fn end_frame(&mut self) -> Result<(), ClockError> {
        self.frames_presented += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_applies_transform_and_projection() {
        let mut surface = RecordingSurface::new();
        {
            let mut ctx = DrawContext::new(&mut surface, Mat4::scale(0.5, 0.5, 1.0));
            ctx.set_color(Rgb::new(1.0, 0.0, 0.0));
            ctx.translate(1.0, 0.0);
            ctx.fill(PolygonKind::ColonDot, &[Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0)]);
        }
        let poly = &surface.polygons[0];
        assert_eq!(poly.color, Rgb::new(1.0, 0.0, 0.0));
        assert_eq!(poly.vertices, vec![Vec2::new(0.5, 0.0), Vec2::new(1.0, 0.5)]);
    }

    #[test]
    fn scoped_restores_position_and_depth() {
        let mut surface = RecordingSurface::new();
        let mut ctx = DrawContext::new(&mut surface, Mat4::IDENTITY);
        ctx.scoped(|ctx| {
            ctx.translate(5.0, 5.0);
            ctx.scoped(|ctx| {
                ctx.scale(2.0);
                Ok(())
            })
        })
        .unwrap();
        assert_eq!(ctx.depth(), 0);
        ctx.fill(PolygonKind::ColonDot, &[Vec2::new(1.0, 1.0)]);
        drop(ctx);
        assert_eq!(surface.polygons[0].vertices, vec![Vec2::new(1.0, 1.0)]);
    }

    #[test]
    fn scoped_pops_when_the_body_fails() {
        let mut surface = RecordingSurface::new();
        let mut ctx = DrawContext::new(&mut surface, Mat4::IDENTITY);
        let result: Result<(), StackError> = ctx.scoped(|ctx| {
            ctx.translate(1.0, 1.0);
            Err(StackError::Overflow { capacity: 0 })
        });
        assert!(result.is_err());
        assert_eq!(ctx.depth(), 0);
    }

    #[test]
    fn color_scaling_matches_eight_bit_ratios() {
        let bright = Rgb::scaled(160.0, 148.0, 30.0, 255.0);
        assert_eq!(bright.to_rgb8(), (160, 148, 30));
        let dim = Rgb::scaled(160.0, 148.0, 30.0, 377.0);
        assert!(dim.r < bright.r && dim.g < bright.g && dim.b < bright.b);
    }
}
