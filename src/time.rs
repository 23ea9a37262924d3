//! Fixed-rate frame pacing.
//!
//! The simulation advances one step per tick, so the tick rate is what
//! decides how fast stars appear to move. [`FrameClock`] tells the event
//! loop when the next tick is due and keeps a running FPS estimate.
//!
//! # Example
//!
//! ```ignore
//! use startravel::time::FrameClock;
//! use std::time::Instant;
//!
//! let mut clock = FrameClock::new(100.0);
//!
//! // In your event loop:
//! let now = Instant::now();
//! if clock.is_due(now) {
//!     clock.tick(now);
//!     // update + render
//! }
//! // sleep until clock.next_deadline()
//! ```

use std::time::{Duration, Instant};

/// Paces ticks at a target rate and measures the achieved rate.
#[derive(Debug)]
pub struct FrameClock {
    /// Time between ticks.
    interval: Duration,
    /// When the next tick is due.
    next: Instant,
    /// Total ticks since start.
    frame_count: u64,
    /// Measured ticks per second (updated periodically).
    fps: f32,
    /// Frame count at last FPS update.
    fps_frame_count: u64,
    /// Time of last FPS calculation.
    fps_update_time: Instant,
    /// How often to update the FPS estimate.
    fps_update_interval: Duration,
}

impl FrameClock {
    /// Clock ticking `tick_rate` times per second, starting now.
    pub fn new(tick_rate: f32) -> Self {
        Self::starting_at(tick_rate, Instant::now())
    }

    /// Clock ticking `tick_rate` times per second with the first tick due at
    /// `now`. Non-positive rates are treated as one tick per second.
    pub fn starting_at(tick_rate: f32, now: Instant) -> Self {
        let rate = if tick_rate > 0.0 { tick_rate } else { 1.0 };
        Self {
            interval: Duration::from_secs_f64(1.0 / rate as f64),
            next: now,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
        }
    }

    /// Time between ticks.
    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// When the next tick should run.
    #[inline]
    pub fn next_deadline(&self) -> Instant {
        self.next
    }

    /// Whether a tick is due at `now`.
    #[inline]
    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next
    }

    /// Record a tick at `now` and schedule the next one.
    ///
    /// If the loop fell behind by more than one interval, the schedule is
    /// rebased on `now` rather than firing a burst of catch-up ticks.
    pub fn tick(&mut self, now: Instant) {
        self.frame_count += 1;
        self.next += self.interval;
        if self.next < now {
            self.next = now + self.interval;
        }

        let fps_elapsed = now.duration_since(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }
    }

    /// Total ticks since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Measured ticks per second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_TICK_RATE)
    }
}
