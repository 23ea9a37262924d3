//! Spawn context for star emission.
//!
//! Owns the session RNG and the initial speed range, and provides the
//! random draws a new star needs: an emission angle, a speed, and the
//! resulting radial velocity.

use crate::primitives::Rgb;
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Default minimum initial speed, in pixels per tick.
pub const MIN_SPEED: f32 = 0.1;
/// Default maximum initial speed, in pixels per tick.
pub const MAX_SPEED: f32 = 2.0;

/// Range of initial star speeds, in pixels per tick.
///
/// Both ends are inclusive. These are session constants, not per-frame
/// tunables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedRange {
    pub min: f32,
    pub max: f32,
}

impl SpeedRange {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Whether `speed` lies within the range, allowing for float rounding.
    pub fn contains(&self, speed: f32) -> bool {
        const EPS: f32 = 1e-4;
        speed >= self.min - EPS && speed <= self.max + EPS
    }
}

impl Default for SpeedRange {
    fn default() -> Self {
        Self {
            min: MIN_SPEED,
            max: MAX_SPEED,
        }
    }
}

/// Random source handed to [`Particle::spawn`](crate::particle::Particle::spawn).
///
/// ```ignore
/// let mut ctx = SpawnContext::seeded(7, SpeedRange::default());
/// let star = Particle::spawn(Vec2::new(600.0, 600.0), &mut ctx);
/// ```
pub struct SpawnContext {
    /// Initial speed range for new stars.
    pub speed: SpeedRange,
    rng: SmallRng,
}

impl SpawnContext {
    /// Context with a fixed seed, for reproducible sessions and tests.
    pub fn seeded(seed: u64, speed: SpeedRange) -> Self {
        Self {
            speed,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Context seeded from the wall clock, different on every run.
    pub fn from_clock(speed: SpeedRange) -> Self {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42);
        Self::seeded(seed, speed)
    }

    /// Seeded if a seed is given, clock-seeded otherwise.
    pub fn new(seed: Option<u64>, speed: SpeedRange) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed, speed),
            None => Self::from_clock(speed),
        }
    }

    /// Emission angle, uniform in `[0, 2π)`.
    #[inline]
    pub fn random_angle(&mut self) -> f32 {
        self.rng.gen_range(0.0..TAU)
    }

    /// Initial speed, uniform in the configured range.
    #[inline]
    pub fn random_speed(&mut self) -> f32 {
        let SpeedRange { min, max } = self.speed;
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..=max)
    }

    /// Velocity pointing along `angle` with magnitude `speed`.
    #[inline]
    pub fn radial_velocity(angle: f32, speed: f32) -> Vec2 {
        Vec2::new(angle.cos() * speed, angle.sin() * speed)
    }

    /// Random opaque color, each channel uniform in `0..=255`.
    pub fn random_color(&mut self) -> Rgb {
        Rgb::new(self.rng.gen(), self.rng.gen(), self.rng.gen())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_speed_in_range() {
        let mut ctx = SpawnContext::seeded(1, SpeedRange::default());
        for _ in 0..1000 {
            let s = ctx.random_speed();
            assert!((MIN_SPEED..=MAX_SPEED).contains(&s));
        }
    }

    #[test]
    fn test_degenerate_speed_range() {
        let mut ctx = SpawnContext::seeded(1, SpeedRange::new(1.5, 1.5));
        assert_eq!(ctx.random_speed(), 1.5);
    }

    #[test]
    fn test_random_angle_in_range() {
        let mut ctx = SpawnContext::seeded(2, SpeedRange::default());
        for _ in 0..1000 {
            let a = ctx.random_angle();
            assert!((0.0..TAU).contains(&a));
        }
    }

    #[test]
    fn test_radial_velocity_magnitude() {
        let v = SpawnContext::radial_velocity(1.0, 2.0);
        assert!((v.length() - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_same_seed_same_draws() {
        let mut a = SpawnContext::seeded(9, SpeedRange::default());
        let mut b = SpawnContext::seeded(9, SpeedRange::default());
        assert_eq!(a.random_angle(), b.random_angle());
        assert_eq!(a.random_color(), b.random_color());
    }
}
