//! Owned RGB pixel buffer.
//!
//! Row-major, top row first. Implements embedded-graphics `DrawTarget` so
//! any embedded-graphics drawing, including [`RasterSurface`](crate::renderer::RasterSurface),
//! can target it.

use core::convert::Infallible;
use embedded_graphics::{pixelcolor::Rgb888, prelude::*, primitives::Rectangle};
use log::warn;

/// Largest width or height a buffer is allocated with.
pub const MAX_SIDE: u32 = 4096;

/// Clamp both sides to [`MAX_SIDE`] and return them with the pixel count.
fn checked_dimensions(width: u32, height: u32) -> (u32, u32, usize) {
    let (w, h) = (width.min(MAX_SIDE), height.min(MAX_SIDE));
    if (w, h) != (width, height) {
        warn!("framebuffer {}x{} clamped to {}x{}", width, height, w, h);
    }
    let len = (w as usize).checked_mul(h as usize).unwrap_or(0);
    (w, h, len)
}

pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgb888>,
}

impl FrameBuffer {
    /// Sides beyond [`MAX_SIDE`] are clamped.
    pub fn new(width: u32, height: u32) -> Self {
        let (width, height, len) = checked_dimensions(width, height);
        Self {
            width,
            height,
            pixels: vec![Rgb888::BLACK; len],
        }
    }

    /// Change dimensions, discarding contents.
    pub fn resize(&mut self, width: u32, height: u32) {
        let (width, height, len) = checked_dimensions(width, height);
        self.width = width;
        self.height = height;
        self.pixels = vec![Rgb888::BLACK; len];
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn fill(&mut self, color: Rgb888) {
        self.pixels.fill(color);
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgb888) {
        if x >= self.width || y >= self.height {
            return;
        }
        self.pixels[(y * self.width + x) as usize] = color;
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb888> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[(y * self.width + x) as usize])
    }

    /// Pixels of row `y`, left to right.
    pub fn row(&self, y: u32) -> &[Rgb888] {
        let start = (y * self.width) as usize;
        &self.pixels[start..start + self.width as usize]
    }

    /// Number of pixels that are not black.
    pub fn lit_pixels(&self) -> usize {
        self.pixels.iter().filter(|&&p| p != Rgb888::BLACK).count()
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x >= 0 && point.y >= 0 {
                self.set_pixel(point.x as u32, point.y as u32, color);
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        if let Some(bottom_right) = area.bottom_right() {
            for y in area.top_left.y..=bottom_right.y {
                let row_start = (y as u32 * self.width) as usize;
                let from = row_start + area.top_left.x as usize;
                let to = row_start + bottom_right.x as usize;
                self.pixels[from..=to].fill(color);
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(color);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_writes_are_ignored() {
        let mut fb = FrameBuffer::new(4, 3);
        fb.set_pixel(4, 0, Rgb888::WHITE);
        fb.set_pixel(0, 3, Rgb888::WHITE);
        assert_eq!(fb.lit_pixels(), 0);
        assert_eq!(fb.pixel(4, 0), None);
    }

    #[test]
    fn fill_solid_clips_to_the_buffer() {
        let mut fb = FrameBuffer::new(4, 3);
        fb.fill_solid(&Rectangle::new(Point::new(2, 1), Size::new(10, 10)), Rgb888::RED)
            .unwrap();
        assert_eq!(fb.lit_pixels(), 4);
        assert_eq!(fb.pixel(3, 2), Some(Rgb888::RED));
        assert_eq!(fb.pixel(1, 1), Some(Rgb888::BLACK));
        assert_eq!(fb.row(1), &[Rgb888::BLACK, Rgb888::BLACK, Rgb888::RED, Rgb888::RED]);
    }

    #[test]
    fn resize_discards_contents() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.clear(Rgb888::WHITE).unwrap();
        fb.resize(3, 1);
        assert_eq!(fb.size(), Size::new(3, 1));
        assert_eq!(fb.lit_pixels(), 0);
    }

    #[test]
    fn oversized_dimensions_are_clamped() {
        let mut fb = FrameBuffer::new(4, 4);
        fb.resize(70_000, 2);
        assert_eq!(fb.size(), Size::new(MAX_SIDE, 2));
        assert_eq!(fb.row(1).len(), MAX_SIDE as usize);
        fb.set_pixel(MAX_SIDE - 1, 1, Rgb888::WHITE);
        assert_eq!(fb.lit_pixels(), 1);
    }
}
