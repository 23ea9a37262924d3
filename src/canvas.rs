//! CPU framebuffer that rasterizes [`DrawPrimitive`]s.
//!
//! The canvas is the host's drawable surface. It knows nothing about stars:
//! it clears to a background color, plots points and lines, and hands out
//! its RGBA8 pixels for presentation or saving.

use crate::error::SnapshotError;
use crate::primitives::{DrawPrimitive, Rgb};
use std::path::Path;

/// Radius of a star point, in pixels.
pub const POINT_RADIUS: i32 = 1;

/// An RGBA8 framebuffer, row-major, origin at the top left.
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
}

impl Canvas {
    /// Create a canvas cleared to black.
    pub fn new(width: u32, height: u32) -> Self {
        let mut canvas = Self {
            width,
            height,
            pixels: vec![[0; 4]; width as usize * height as usize],
        };
        canvas.clear(Rgb::BLACK);
        canvas
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 pixel data.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Fill every pixel with `color`.
    pub fn clear(&mut self, color: Rgb) {
        self.pixels.fill(color.to_rgba());
    }

    /// Color at (`x`, `y`), or `None` outside the canvas.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb> {
        let [r, g, b, _] = self.pixels[self.index(x, y)?];
        Some(Rgb::new(r, g, b))
    }

    /// Set one pixel. Coordinates outside the canvas are ignored.
    #[inline]
    pub fn put(&mut self, x: i32, y: i32, color: Rgb) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color.to_rgba();
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Rasterize one primitive.
    pub fn draw(&mut self, primitive: &DrawPrimitive) {
        match *primitive {
            DrawPrimitive::Point { x, y, color } => self.disc(x, y, POINT_RADIUS, color),
            DrawPrimitive::Line { x1, y1, x2, y2, color } => self.line(x1, y1, x2, y2, color),
        }
    }

    /// Rasterize primitives in order.
    pub fn draw_all(&mut self, primitives: &[DrawPrimitive]) {
        for primitive in primitives {
            self.draw(primitive);
        }
    }

    /// Filled disc centered on (`cx`, `cy`).
    pub fn disc(&mut self, cx: i32, cy: i32, radius: i32, color: Rgb) {
        let r2 = radius * radius;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= r2 {
                    self.put(cx + dx, cy + dy, color);
                }
            }
        }
    }

    /// One-pixel line including both endpoints (Bresenham).
    pub fn line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Rgb) {
        let dx = (x2 - x1).abs();
        let dy = -(y2 - y1).abs();
        let sx = if x1 < x2 { 1 } else { -1 };
        let sy = if y1 < y2 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x1, y1);

        loop {
            self.put(x, y, color);
            if x == x2 && y == y2 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Write the canvas to a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let bytes = self.pixels().to_vec();
        let expected = self.width as usize * self.height as usize * 4;
        let actual = bytes.len();
        let image = image::RgbaImage::from_raw(self.width, self.height, bytes)
            .ok_or(SnapshotError::BufferSize { expected, actual })?;
        image.save(path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = Rgb::new(255, 0, 0);

    fn lit(canvas: &Canvas) -> usize {
        canvas
            .pixels()
            .chunks_exact(4)
            .filter(|px| px[..3] != [0, 0, 0])
            .count()
    }

    #[test]
    fn test_new_canvas_is_black() {
        let c = Canvas::new(4, 3);
        assert_eq!(c.pixels().len(), 48);
        assert_eq!(c.pixel(3, 2), Some(Rgb::BLACK));
        assert_eq!(lit(&c), 0);
    }

    #[test]
    fn test_point_is_small_disc() {
        let mut c = Canvas::new(10, 10);
        c.draw(&DrawPrimitive::Point { x: 5, y: 5, color: RED });
        assert_eq!(c.pixel(5, 5), Some(RED));
        assert_eq!(c.pixel(4, 5), Some(RED));
        assert_eq!(c.pixel(5, 6), Some(RED));
        assert_eq!(c.pixel(4, 4), Some(Rgb::BLACK));
        assert_eq!(lit(&c), 5);
    }

    #[test]
    fn test_out_of_canvas_is_clipped() {
        let mut c = Canvas::new(10, 10);
        c.draw(&DrawPrimitive::Point { x: -1, y: 0, color: RED });
        assert_eq!(c.pixel(0, 0), Some(RED));
        assert_eq!(lit(&c), 1);
        assert_eq!(c.pixel(-1, 0), None);
        assert_eq!(c.pixel(10, 0), None);
    }

    #[test]
    fn test_line_covers_endpoints() {
        let mut c = Canvas::new(20, 20);
        c.draw(&DrawPrimitive::Line { x1: 2, y1: 3, x2: 12, y2: 8, color: RED });
        assert_eq!(c.pixel(2, 3), Some(RED));
        assert_eq!(c.pixel(12, 8), Some(RED));
        // One pixel per column along the major axis
        assert_eq!(lit(&c), 11);
    }

    #[test]
    fn test_line_partially_offscreen() {
        let mut c = Canvas::new(10, 10);
        c.line(-5, 5, 4, 5, RED);
        assert_eq!(lit(&c), 5);
    }

    #[test]
    fn test_clear() {
        let mut c = Canvas::new(2, 2);
        c.clear(RED);
        assert_eq!(lit(&c), 4);
        assert_eq!(c.pixels()[3], 255);
    }

    #[test]
    fn test_save_png() {
        let mut c = Canvas::new(8, 4);
        c.put(7, 3, RED);
        let path = std::env::temp_dir().join(format!("startravel-canvas-{}.png", std::process::id()));
        c.save_png(&path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        let _ = std::fs::remove_file(&path);
        assert_eq!(img.dimensions(), (8, 4));
        assert_eq!(img.get_pixel(7, 3).0, [255, 0, 0, 255]);
    }
}
