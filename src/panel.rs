//! Control panel drawn with egui.

use crate::config::{
    OriginMode, ACCELERATION_RANGE, PARALLAX_DIVISOR_RANGE, STAR_COUNT_RANGE, TAIL_LENGTH_RANGE,
};
use crate::controls::{ControlOutcome, Controls};

/// Sliders and toggles for the per-frame configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct ControlPanel;

impl ControlPanel {
    pub fn new() -> Self {
        Self
    }

    /// Draw the panel and write edits back into `controls`.
    pub fn show(&self, ctx: &egui::Context, controls: &mut Controls) -> ControlOutcome {
        let before = controls.config().star_count;
        let mut outcome = ControlOutcome::default();

        egui::Window::new("Controls")
            .default_pos([10.0, 10.0])
            .resizable(false)
            .show(ctx, |ui| {
                let c = controls.config_mut();

                ui.add(egui::Slider::new(&mut c.star_count, STAR_COUNT_RANGE).text("Star Count"));
                ui.add(
                    egui::Slider::new(&mut c.acceleration_percent, ACCELERATION_RANGE)
                        .text("Accel (%)")
                        .max_decimals(2),
                );

                ui.separator();
                ui.add(
                    egui::Slider::new(&mut c.parallax_divisor, PARALLAX_DIVISOR_RANGE)
                        .text("Parallax")
                        .integer(),
                );
                ui.add(
                    egui::Slider::new(&mut c.max_tail_length, TAIL_LENGTH_RANGE)
                        .text("Tail Len")
                        .integer(),
                );

                ui.separator();
                ui.horizontal(|ui| {
                    let on_mouse = c.origin_mode == OriginMode::FollowPointer;
                    if ui.button(toggle_label("On Mouse", on_mouse)).clicked() {
                        c.origin_mode = c.origin_mode.toggled();
                    }
                    if ui.button(toggle_label("Parallax", c.parallax_enabled)).clicked() {
                        c.parallax_enabled = !c.parallax_enabled;
                    }
                });

                ui.separator();
                ui.horizontal(|ui| {
                    outcome.snapshot = ui.button("Snapshot").clicked();
                    outcome.quit = ui.button("Quit").clicked();
                });
            });

        controls.clamp();
        outcome.star_count_changed = controls.config().star_count != before;
        outcome
    }
}

/// Button text in the `"Name: ON"` / `"Name: OFF"` form.
pub fn toggle_label(name: &str, on: bool) -> String {
    format!("{}: {}", name, if on { "ON" } else { "OFF" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FrameConfig;

    #[test]
    fn test_toggle_label() {
        assert_eq!(toggle_label("On Mouse", false), "On Mouse: OFF");
        assert_eq!(toggle_label("Parallax", true), "Parallax: ON");
    }

    #[test]
    fn test_show_without_input_changes_nothing() {
        let ctx = egui::Context::default();
        let panel = ControlPanel::new();
        let mut controls = Controls::new(FrameConfig::default());

        let mut outcome = ControlOutcome::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            outcome = panel.show(ctx, &mut controls);
        });

        assert_eq!(outcome, ControlOutcome::default());
        assert_eq!(controls.config(), &FrameConfig::default());
    }
}
