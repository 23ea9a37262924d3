//! A single star and its kinematic rules.

use crate::spawn::SpawnContext;
use glam::Vec2;

/// Visible area of the field, in pixels.
///
/// Fixed for the whole session; used for the off-screen test and for
/// normalizing the parallax threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Bounds {
    pub width: u32,
    pub height: u32,
}

impl Bounds {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Nominal center, halving with integer division.
    pub fn center(&self) -> Vec2 {
        Vec2::new((self.width / 2) as f32, (self.height / 2) as f32)
    }

    /// Length of the diagonal.
    pub fn diagonal(&self) -> f32 {
        let w = self.width as f32;
        let h = self.height as f32;
        (w * w + h * h).sqrt()
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(1200, 1200)
    }
}

/// One star: where it is and how far it moves per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
}

impl Particle {
    pub fn new(position: Vec2, velocity: Vec2) -> Self {
        Self { position, velocity }
    }

    /// A fresh star at `origin`, heading in a uniformly random direction with
    /// a speed drawn from the context's range.
    pub fn spawn(origin: Vec2, ctx: &mut SpawnContext) -> Self {
        let angle = ctx.random_angle();
        let speed = ctx.random_speed();
        Self {
            position: origin,
            velocity: SpawnContext::radial_velocity(angle, speed),
        }
    }

    /// Step one tick: move by the current velocity, then scale the velocity
    /// by `1 + accel_percent / 1000`.
    ///
    /// There is no speed ceiling; fast stars simply leave the screen sooner.
    pub fn advance(&mut self, accel_percent: f32) {
        self.position += self.velocity;
        self.velocity *= 1.0 + accel_percent / 1000.0;
    }

    /// True once the star has left the visible area.
    pub fn is_out_of_bounds(&self, bounds: Bounds) -> bool {
        let Vec2 { x, y } = self.position;
        x < 0.0 || x > bounds.width as f32 || y < 0.0 || y > bounds.height as f32
    }

    /// Magnitude of the velocity.
    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Unit direction of travel, or `None` for a stationary star.
    pub fn heading(&self) -> Option<Vec2> {
        let speed = self.speed();
        if speed == 0.0 {
            None
        } else {
            Some(self.velocity / speed)
        }
    }
}
