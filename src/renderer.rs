//! # Raster Rendering
//!
//! Turns the clock's NDC polygons into pixels on any embedded-graphics
//! `DrawTarget`, and turns a finished [`FrameBuffer`] into shaded ASCII for
//! terminal output.
//!
//! Polygons are filled with an even-odd scanline pass sampled at pixel
//! centres, one `fill_solid` span per covered run. A target pixel may stand
//! for a block of window pixels (a terminal cell, say); see
//! [`RasterSurface::set_cell_size`]. LED bars are not always
//! convex once mitred, so a plain triangle fan is not enough.

use crate::error::ClockError;
use crate::framebuffer::FrameBuffer;
use crate::geometry::Vec2;
use crate::scene::Viewport;
use crate::surface::{PolygonKind, Rgb, Surface};
use embedded_graphics::{pixelcolor::Rgb888, prelude::*, primitives::Rectangle};

fn to_rgb888(color: Rgb) -> Rgb888 {
    let (r, g, b) = color.to_rgb8();
    Rgb888::new(r, g, b)
}

/// Surface that rasterizes into an embedded-graphics draw target.
pub struct RasterSurface<D> {
    target: D,
    width: u32,
    height: u32,
    viewport: Viewport,
    cell: Size,
}

impl<D> RasterSurface<D>
where
    D: DrawTarget<Color = Rgb888>,
{
    /// The surface starts with the target's size and a letterboxed viewport.
    pub fn new(target: D) -> Self
    where
        D: OriginDimensions,
    {
        let size = target.size();
        Self {
            target,
            width: size.width,
            height: size.height,
            viewport: Viewport::letterbox(size.width, size.height),
            cell: Size::new(1, 1),
        }
    }

    /// Window pixels covered by one target pixel. Zero sides count as 1.
    pub fn set_cell_size(&mut self, cell: Size) {
        self.cell = Size::new(cell.width.max(1), cell.height.max(1));
    }

    pub fn cell_size(&self) -> Size {
        self.cell
    }

    /// Target pixels needed to cover the window.
    pub fn target_extent(&self) -> Size {
        Size::new(
            self.width.div_ceil(self.cell.width),
            self.height.div_ceil(self.cell.height),
        )
    }

    pub fn target(&self) -> &D {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut D {
        &mut self.target
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// NDC to target pixel coordinates with a top-left origin.
    fn to_pixel(&self, p: Vec2) -> Vec2 {
        let size = f64::from(self.viewport.size);
        let x = f64::from(self.viewport.x) + (p.x + 1.0) / 2.0 * size;
        let y_up = f64::from(self.viewport.y) + (p.y + 1.0) / 2.0 * size;
        Vec2::new(
            x / f64::from(self.cell.width),
            (f64::from(self.height) - y_up) / f64::from(self.cell.height),
        )
    }

    fn fill_pixels(&mut self, points: &[Vec2], color: Rgb888) {
        if points.len() < 3 {
            return;
        }
        let min_y = points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        let max_y = points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
        let extent = self.target_extent();
        let first_row = min_y.floor().max(0.0) as i32;
        let last_row = max_y.ceil().min(f64::from(extent.height)) as i32;

        let mut crossings = Vec::with_capacity(points.len());
        for row in first_row..last_row {
            let yc = f64::from(row) + 0.5;
            crossings.clear();
            for (i, &a) in points.iter().enumerate() {
                let b = points[(i + 1) % points.len()];
                if (a.y <= yc) != (b.y <= yc) {
                    crossings.push(a.x + (yc - a.y) * (b.x - a.x) / (b.y - a.y));
                }
            }
            crossings.sort_by(|l, r| l.total_cmp(r));

            for span in crossings.chunks_exact(2) {
                let first_col = (span[0] - 0.5).ceil().max(0.0) as i32;
                let end_col = ((span[1] - 0.5).ceil() as i32).min(extent.width as i32);
                if end_col > first_col {
                    let run = Rectangle::new(
                        Point::new(first_col, row),
                        Size::new((end_col - first_col) as u32, 1),
                    );
                    self.target.fill_solid(&run, color).ok();
                }
            }
        }
    }
}

impl<D> Surface for RasterSurface<D>
where
    D: DrawTarget<Color = Rgb888>,
{
    fn reshape(&mut self, width: u32, height: u32, viewport: Viewport) {
        self.width = width;
        self.height = height;
        self.viewport = viewport;
    }

    fn begin_frame(&mut self, clear: Rgb) {
        self.target.clear(to_rgb888(clear)).ok();
    }

    fn fill_polygon(&mut self, _kind: PolygonKind, color: Rgb, vertices: &[Vec2]) {
        let points: Vec<Vec2> = vertices.iter().map(|&v| self.to_pixel(v)).collect();
        self.fill_pixels(&points, to_rgb888(color));
    }

    fn end_frame(&mut self) -> Result<(), ClockError> {
        Ok(())
    }
}

/// Render a framebuffer as text, one character per pixel.
///
/// `shades` runs from darkest to brightest. Blank rows are dropped so the
/// readout is not buried in empty lines.
pub fn draw_ascii(buffer: &FrameBuffer, shades: &str) -> String {
    let shades: Vec<char> = shades.chars().collect();
    if shades.is_empty() {
        return String::new();
    }
    let top = (shades.len() - 1) as f64;

    let mut out = String::new();
    for y in 0..buffer.height() {
        let line: String = buffer
            .row(y)
            .iter()
            .map(|p| {
                let lum = Rgb::scaled(f64::from(p.r()), f64::from(p.g()), f64::from(p.b()), 255.0)
                    .luminance();
                shades[(lum * top).round().clamp(0.0, top) as usize]
            })
            .collect();
        if line.chars().any(|c| c != shades[0]) {
            out.push_str(line.trim_end());
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composer::lit_color;
    use crate::scene::Scene;
    use crate::time24::TimeOfDay;
    use embedded_graphics::mock_display::MockDisplay;

    fn unit_square(half: f64) -> Vec<Vec2> {
        vec![
            Vec2::new(-half, -half),
            Vec2::new(half, -half),
            Vec2::new(half, half),
            Vec2::new(-half, half),
        ]
    }

    #[test]
    fn square_covers_expected_pixel_centres() {
        let mut display = MockDisplay::<Rgb888>::new();
        display.set_allow_overdraw(true);
        let mut surface = RasterSurface::new(display);
        surface.reshape(64, 64, Viewport::letterbox(64, 64));

        surface.fill_polygon(PolygonKind::ColonDot, Rgb::WHITE, &unit_square(0.5));

        let display = surface.target();
        assert_eq!(display.get_pixel(Point::new(16, 16)), Some(Rgb888::WHITE));
        assert_eq!(display.get_pixel(Point::new(47, 47)), Some(Rgb888::WHITE));
        assert_eq!(display.get_pixel(Point::new(15, 16)), None);
        assert_eq!(display.get_pixel(Point::new(48, 47)), None);
        assert_eq!(display.get_pixel(Point::new(16, 48)), None);
    }

    #[test]
    fn viewport_offset_moves_the_drawing() {
        let mut surface = RasterSurface::new(FrameBuffer::new(40, 20));
        surface.reshape(40, 20, Viewport::letterbox(40, 20));
        surface.fill_polygon(PolygonKind::ColonDot, Rgb::WHITE, &unit_square(1.0));

        let fb = surface.target();
        // The 20×20 viewport sits at x = 10..30.
        assert_eq!(fb.pixel(9, 10), Some(Rgb888::BLACK));
        assert_eq!(fb.pixel(10, 10), Some(Rgb888::WHITE));
        assert_eq!(fb.pixel(29, 10), Some(Rgb888::WHITE));
        assert_eq!(fb.pixel(30, 10), Some(Rgb888::BLACK));
        assert_eq!(fb.lit_pixels(), 400);
    }

    #[test]
    fn cell_size_shrinks_the_drawing() {
        let mut surface = RasterSurface::new(FrameBuffer::new(20, 10));
        surface.reshape(40, 40, Viewport::letterbox(40, 40));
        surface.set_cell_size(Size::new(0, 4));
        assert_eq!(surface.cell_size(), Size::new(1, 4));
        surface.set_cell_size(Size::new(2, 4));
        assert_eq!(surface.target_extent(), Size::new(20, 10));

        surface.fill_polygon(PolygonKind::ColonDot, Rgb::WHITE, &unit_square(0.5));

        // Window square 10..30 lands on columns 5..15 and row centres 2.5..6.5.
        let fb = surface.target();
        assert_eq!(fb.pixel(5, 5), Some(Rgb888::WHITE));
        assert_eq!(fb.pixel(14, 5), Some(Rgb888::WHITE));
        assert_eq!(fb.pixel(4, 5), Some(Rgb888::BLACK));
        assert_eq!(fb.pixel(15, 5), Some(Rgb888::BLACK));
        assert_eq!(fb.lit_pixels(), 10 * 5);
    }

    #[test]
    fn clock_face_lights_pixels_in_led_color() {
        let scene = Scene::new(200, 100);
        let mut surface = RasterSurface::new(FrameBuffer::new(200, 100));
        scene.apply_to(&mut surface);
        scene
            .render(&mut surface, &TimeOfDay::new(3, 7, 45).unwrap())
            .unwrap();

        let fb = surface.target();
        assert!(fb.lit_pixels() > 100);
        let lit = to_rgb888(lit_color());
        let found = (0..fb.height()).any(|y| fb.row(y).contains(&lit));
        assert!(found, "no pixel in the bright LED color");
    }

    #[test]
    fn ascii_drops_blank_rows_and_shades_by_brightness() {
        let mut fb = FrameBuffer::new(3, 3);
        fb.set_pixel(0, 1, Rgb888::WHITE);
        fb.set_pixel(1, 1, Rgb888::new(128, 128, 128));
        let text = draw_ascii(&fb, " .#");
        assert_eq!(text, "#.\n");
    }
}
