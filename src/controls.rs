//! Keyboard controls for the per-frame configuration.
//!
//! | Key | Effect |
//! |-----|--------|
//! | Up / Down | star count ±10 (±100 with Shift) |
//! | Right / Left | acceleration ±1% (±10% with Shift) |
//! | M | toggle emitting from the pointer |
//! | P | toggle parallax tails |
//! | `]` / `[` | parallax divisor ±1 |
//! | `=` / `-` | max tail length ±1 |
//! | R | reset to the starting values |
//! | S | save a PNG snapshot |
//! | Escape | quit |
//!
//! Every edit is clamped to the ranges in [`crate::config`].

use crate::config::FrameConfig;
use crate::input::{Input, KeyCode};

/// A single edit requested by the user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlAction {
    StarCount(i32),
    Acceleration(f32),
    ToggleOrigin,
    ToggleParallax,
    ParallaxDivisor(f32),
    TailLength(f32),
    Reset,
    Snapshot,
    Quit,
}

impl ControlAction {
    /// Action bound to `key`, with `shift` selecting the coarse step.
    pub fn for_key(key: KeyCode, shift: bool) -> Option<Self> {
        let coarse = |fine: f32, big: f32| if shift { big } else { fine };
        let action = match key {
            KeyCode::Up => ControlAction::StarCount(if shift { 100 } else { 10 }),
            KeyCode::Down => ControlAction::StarCount(if shift { -100 } else { -10 }),
            KeyCode::Right => ControlAction::Acceleration(coarse(1.0, 10.0)),
            KeyCode::Left => ControlAction::Acceleration(-coarse(1.0, 10.0)),
            KeyCode::M => ControlAction::ToggleOrigin,
            KeyCode::P => ControlAction::ToggleParallax,
            KeyCode::BracketRight => ControlAction::ParallaxDivisor(1.0),
            KeyCode::BracketLeft => ControlAction::ParallaxDivisor(-1.0),
            KeyCode::Equal => ControlAction::TailLength(1.0),
            KeyCode::Minus => ControlAction::TailLength(-1.0),
            KeyCode::R => ControlAction::Reset,
            KeyCode::S => ControlAction::Snapshot,
            KeyCode::Escape => ControlAction::Quit,
            KeyCode::Shift | KeyCode::Other(_) => return None,
        };
        Some(action)
    }
}

/// What the host has to do after applying actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlOutcome {
    /// The star count changed; reconcile the field.
    pub star_count_changed: bool,
    pub snapshot: bool,
    pub quit: bool,
}

impl ControlOutcome {
    pub(crate) fn merge(&mut self, other: ControlOutcome) {
        self.star_count_changed |= other.star_count_changed;
        self.snapshot |= other.snapshot;
        self.quit |= other.quit;
    }
}

/// The current [`FrameConfig`] plus the values it started from.
#[derive(Debug, Clone)]
pub struct Controls {
    config: FrameConfig,
    initial: FrameConfig,
}

impl Controls {
    pub fn new(initial: FrameConfig) -> Self {
        let initial = initial.clamped();
        Self {
            config: initial,
            initial,
        }
    }

    #[inline]
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }

    /// Direct access for widget-based editors. Call [`clamp`](Self::clamp)
    /// afterwards.
    #[inline]
    pub fn config_mut(&mut self) -> &mut FrameConfig {
        &mut self.config
    }

    /// Pull every value back into range.
    pub fn clamp(&mut self) {
        self.config = self.config.clamped();
    }

    /// Apply one action.
    pub fn apply(&mut self, action: ControlAction) -> ControlOutcome {
        let before = self.config.star_count;
        let mut outcome = ControlOutcome::default();
        let c = &mut self.config;

        match action {
            ControlAction::StarCount(delta) => {
                c.star_count = (c.star_count as i64 + delta as i64).max(0) as u32;
            }
            ControlAction::Acceleration(delta) => c.acceleration_percent += delta,
            ControlAction::ToggleOrigin => c.origin_mode = c.origin_mode.toggled(),
            ControlAction::ToggleParallax => c.parallax_enabled = !c.parallax_enabled,
            ControlAction::ParallaxDivisor(delta) => c.parallax_divisor += delta,
            ControlAction::TailLength(delta) => c.max_tail_length += delta,
            ControlAction::Reset => *c = self.initial,
            ControlAction::Snapshot => outcome.snapshot = true,
            ControlAction::Quit => outcome.quit = true,
        }

        self.clamp();
        outcome.star_count_changed = self.config.star_count != before;
        if !matches!(action, ControlAction::Snapshot | ControlAction::Quit) {
            log::debug!("{:?} -> {:?}", action, self.config);
        }
        outcome
    }

    /// Apply every key that went down this frame.
    pub fn handle_input(&mut self, input: &Input) -> ControlOutcome {
        let shift = input.key_held(KeyCode::Shift);
        let mut outcome = ControlOutcome::default();
        for key in input.pressed_keys() {
            if let Some(action) = ControlAction::for_key(key, shift) {
                outcome.merge(self.apply(action));
            }
        }
        outcome
    }
}
