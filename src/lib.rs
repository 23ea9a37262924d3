//! # Star Travel
//!
//! A "traveling through space" star field. Stars burst out of an origin in
//! random directions, speed up every tick, and are recycled at the origin
//! once they leave the screen. Far from the center they can draw a short
//! motion tail.
//!
//! The crate is split in two:
//!
//! - The **core** ([`StarField`], [`Particle`], [`FrameConfig`]) is plain
//!   CPU code. Each tick the host calls [`StarField::reconcile`] when the
//!   star count changed, [`StarField::update`], then [`StarField::render`],
//!   which describes the frame as a list of [`DrawPrimitive`]s.
//! - The **host** ([`StarTravel`]) owns a winit window, rasterizes the
//!   primitives on a [`Canvas`], uploads it with wgpu, and maps keyboard
//!   input (and, with the `egui` feature, a control panel) onto the
//!   [`FrameConfig`].
//!
//! ## Quick Start
//!
//! ```ignore
//! use startravel::prelude::*;
//!
//! fn main() -> Result<(), RunError> {
//!     StarTravel::new()
//!         .with_bounds(1200, 1200)
//!         .with_star_count(500)
//!         .run()
//! }
//! ```
//!
//! ## Driving the core directly
//!
//! ```
//! use startravel::prelude::*;
//!
//! let settings = FieldSettings { seed: Some(3), ..Default::default() };
//! let config = FrameConfig { parallax_enabled: true, ..Default::default() };
//! let mut field = StarField::new(settings, 100, settings.bounds.center());
//!
//! let origin = field.origin(config.origin_mode, None);
//! field.update(&config, origin);
//!
//! let mut canvas = Canvas::new(settings.bounds.width, settings.bounds.height);
//! canvas.draw_all(&field.render(&config));
//! assert_eq!(field.len(), 100);
//! ```
//!
//! ## Controls
//!
//! | Key | Effect |
//! |-----|--------|
//! | Up / Down | star count (Shift for bigger steps) |
//! | Right / Left | acceleration |
//! | M / P | follow the pointer / parallax tails |
//! | `[` `]` / `-` `=` | parallax divisor / tail length |
//! | R / S / Escape | reset / snapshot / quit |

pub mod canvas;
pub mod config;
pub mod controls;
pub mod error;
pub mod field;
mod gpu;
pub mod input;
#[cfg(feature = "egui")]
pub mod panel;
pub mod particle;
pub mod primitives;
mod simulation;
pub mod spawn;
pub mod time;

pub use canvas::Canvas;
pub use config::{AppConfig, FieldSettings, FrameConfig, OriginMode, ResizePolicy};
pub use controls::{ControlAction, ControlOutcome, Controls};
pub use error::{ConfigError, GpuError, RunError, SnapshotError};
pub use field::{StarField, Tail};
pub use glam::Vec2;
pub use particle::{Bounds, Particle};
pub use primitives::{DrawPrimitive, Rgb};
pub use simulation::StarTravel;
pub use spawn::{SpawnContext, SpeedRange};
pub use time::FrameClock;

/// Convenient re-exports for common usage.
///
/// # Usage
///
/// ```ignore
/// use startravel::prelude::*;
/// ```
pub mod prelude {
    pub use crate::canvas::Canvas;
    pub use crate::config::{AppConfig, FieldSettings, FrameConfig, OriginMode, ResizePolicy};
    pub use crate::controls::{ControlAction, Controls};
    pub use crate::error::RunError;
    pub use crate::field::StarField;
    pub use crate::input::{Input, KeyCode};
    pub use crate::particle::{Bounds, Particle};
    pub use crate::primitives::{DrawPrimitive, Rgb};
    pub use crate::simulation::StarTravel;
    pub use crate::Vec2;
    #[cfg(feature = "egui")]
    pub use crate::panel::ControlPanel;
}
