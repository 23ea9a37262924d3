//! Draw primitives emitted by the star field.
//!
//! The field never touches pixels. Each frame it describes what should be
//! drawn as a list of [`DrawPrimitive`]s with integer coordinates, and the
//! host decides how to put them on a surface (see [`crate::canvas::Canvas`]).

use serde::{Deserialize, Serialize};

/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    /// Create a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels as an opaque RGBA quadruple.
    #[inline]
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Rgb::WHITE
    }
}

/// A single drawing instruction.
///
/// Coordinates are screen-space pixels, already rounded to integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawPrimitive {
    /// A star at its current position.
    Point { x: i32, y: i32, color: Rgb },
    /// A motion tail from the star (`x1`, `y1`) back to the tail end (`x2`, `y2`).
    Line {
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        color: Rgb,
    },
}

impl DrawPrimitive {
    /// Color the primitive is drawn in.
    pub fn color(&self) -> Rgb {
        match self {
            DrawPrimitive::Point { color, .. } => *color,
            DrawPrimitive::Line { color, .. } => *color,
        }
    }

    /// Whether this is a tail line.
    pub fn is_line(&self) -> bool {
        matches!(self, DrawPrimitive::Line { .. })
    }

    /// Whether this is a star point.
    pub fn is_point(&self) -> bool {
        matches!(self, DrawPrimitive::Point { .. })
    }
}

/// Round a screen-space coordinate to the nearest pixel.
#[inline]
pub(crate) fn to_pixel(v: f32) -> i32 {
    v.round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_is_opaque() {
        assert_eq!(Rgb::new(1, 2, 3).to_rgba(), [1, 2, 3, 255]);
    }

    #[test]
    fn test_to_pixel_rounds() {
        assert_eq!(to_pixel(10.4), 10);
        assert_eq!(to_pixel(10.6), 11);
        assert_eq!(to_pixel(-0.4), 0);
    }

    #[test]
    fn test_primitive_kind() {
        let p = DrawPrimitive::Point { x: 0, y: 0, color: Rgb::WHITE };
        let l = DrawPrimitive::Line { x1: 0, y1: 0, x2: 1, y2: 1, color: Rgb::BLACK };
        assert!(p.is_point() && !p.is_line());
        assert!(l.is_line() && !l.is_point());
        assert_eq!(l.color(), Rgb::BLACK);
    }
}
