//! The star field: a fixed-size pool of stars and its per-frame rules.
//!
//! The host drives the field once per tick:
//!
//! ```ignore
//! let origin = field.origin(config.origin_mode, pointer);
//! if count_changed {
//!     field.reconcile(config.star_count as usize, origin);
//! }
//! field.update(&config, origin);
//! canvas.draw_all(&field.render(&config));
//! ```
//!
//! Stars never interact, so the order in which they are updated does not
//! matter. Rendering walks the pool in order, so the primitive list is stable
//! from one call to the next.

use crate::config::{FieldSettings, FrameConfig, OriginMode, ResizePolicy};
use crate::particle::{Bounds, Particle};
use crate::primitives::{to_pixel, DrawPrimitive, Rgb};
use crate::spawn::SpawnContext;
use glam::Vec2;

/// Tails are this many pixels long per unit of speed, before the cap.
pub const TAIL_SPEED_FACTOR: f32 = 5.0;

/// A tail segment in float screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tail {
    /// The star's position.
    pub start: Vec2,
    /// Where the tail ends, behind the star.
    pub end: Vec2,
}

impl Tail {
    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }
}

/// A pool of stars emitted from an origin.
pub struct StarField {
    particles: Vec<Particle>,
    bounds: Bounds,
    color: Rgb,
    resize: ResizePolicy,
    spawn: SpawnContext,
}

impl StarField {
    /// Create a field with `count` stars at `origin`.
    ///
    /// The session color comes from `settings.color`, or is drawn from the
    /// field's RNG when unset.
    pub fn new(settings: FieldSettings, count: usize, origin: Vec2) -> Self {
        let mut spawn = SpawnContext::new(settings.seed, settings.speed);
        let color = settings.color.unwrap_or_else(|| spawn.random_color());
        let particles = (0..count).map(|_| Particle::spawn(origin, &mut spawn)).collect();

        log::debug!(
            "star field {}x{} with {} stars, color {:?}",
            settings.bounds.width,
            settings.bounds.height,
            count,
            color
        );

        Self {
            particles,
            bounds: settings.bounds,
            color,
            resize: settings.resize,
            spawn,
        }
    }

    /// Resize the pool to `desired_count` stars.
    ///
    /// Does nothing when the count already matches. Otherwise, under
    /// [`ResizePolicy::Regenerate`] every star is discarded and the whole
    /// pool respawns at `origin`; under [`ResizePolicy::Incremental`] the
    /// pool is truncated or topped up with fresh stars at `origin`.
    ///
    /// Returns `true` if the pool changed.
    pub fn reconcile(&mut self, desired_count: usize, origin: Vec2) -> bool {
        let current = self.particles.len();
        if desired_count == current {
            return false;
        }

        match self.resize {
            ResizePolicy::Regenerate => {
                self.particles.clear();
                self.spawn_at(desired_count, origin);
            }
            ResizePolicy::Incremental => {
                if desired_count < current {
                    self.particles.truncate(desired_count);
                } else {
                    self.spawn_at(desired_count - current, origin);
                }
            }
        }

        log::debug!("reconciled star count {} -> {} ({:?})", current, desired_count, self.resize);
        true
    }

    fn spawn_at(&mut self, count: usize, origin: Vec2) {
        self.particles.reserve(count);
        for _ in 0..count {
            self.particles.push(Particle::spawn(origin, &mut self.spawn));
        }
    }

    /// Advance every star by one tick and respawn the ones that left the
    /// screen at `origin`.
    ///
    /// A respawned star is not tested again in the same call, so each star
    /// is replaced at most once per tick.
    pub fn update(&mut self, config: &FrameConfig, origin: Vec2) {
        let bounds = self.bounds;
        for particle in self.particles.iter_mut() {
            particle.advance(config.acceleration_percent);
            if particle.is_out_of_bounds(bounds) {
                *particle = Particle::spawn(origin, &mut self.spawn);
            }
        }
    }

    /// Describe the current frame as draw primitives.
    ///
    /// Every star yields a point; stars beyond the parallax threshold also
    /// yield a tail line when parallax is enabled.
    pub fn render(&self, config: &FrameConfig) -> Vec<DrawPrimitive> {
        let mut out = Vec::with_capacity(self.particles.len() * 2);
        self.render_into(config, &mut out);
        out
    }

    /// Like [`render`](Self::render), appending into an existing buffer.
    pub fn render_into(&self, config: &FrameConfig, out: &mut Vec<DrawPrimitive>) {
        let color = self.color;
        for particle in &self.particles {
            out.push(DrawPrimitive::Point {
                x: to_pixel(particle.position.x),
                y: to_pixel(particle.position.y),
                color,
            });

            if let Some(tail) = self.tail(particle, config) {
                out.push(DrawPrimitive::Line {
                    x1: to_pixel(tail.start.x),
                    y1: to_pixel(tail.start.y),
                    x2: to_pixel(tail.end.x),
                    y2: to_pixel(tail.end.y),
                    color,
                });
            }
        }
    }

    /// Tail for `particle` under `config`, if one should be drawn.
    ///
    /// Distance is always measured from the fixed center, even when stars
    /// are emitted from the pointer. Stationary stars have no direction and
    /// get no tail.
    pub fn tail(&self, particle: &Particle, config: &FrameConfig) -> Option<Tail> {
        if !config.parallax_enabled {
            return None;
        }
        if particle.position.distance(self.center()) < self.parallax_threshold(config) {
            return None;
        }

        let heading = particle.heading()?;
        let length = (particle.speed() * TAIL_SPEED_FACTOR).min(config.max_tail_length);
        Some(Tail {
            start: particle.position,
            end: particle.position - heading * length,
        })
    }

    /// Distance from the center beyond which tails are drawn.
    pub fn parallax_threshold(&self, config: &FrameConfig) -> f32 {
        self.bounds.diagonal() / config.parallax_divisor
    }

    /// Emission point for `mode`. Falls back to the center when following a
    /// pointer whose position is not known yet.
    pub fn origin(&self, mode: OriginMode, pointer: Option<Vec2>) -> Vec2 {
        match (mode, pointer) {
            (OriginMode::FollowPointer, Some(pointer)) => pointer,
            _ => self.center(),
        }
    }

    /// Nominal center of the field.
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.bounds.center()
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Session color every primitive is drawn in.
    #[inline]
    pub fn color(&self) -> Rgb {
        self.color
    }

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable access to the stars. The pool size cannot change through it.
    #[inline]
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
