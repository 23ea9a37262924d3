//! The control panel drawn over the presented frame with egui.

use winit::event::WindowEvent;
use winit::window::Window;

use crate::controls::{ControlOutcome, Controls};
use crate::panel::ControlPanel;

/// Tessellated panel waiting to be painted.
struct PendingFrame {
    jobs: Vec<egui::ClippedPrimitive>,
    textures: egui::TexturesDelta,
    pixels_per_point: f32,
}

/// egui state for the panel: context, winit glue and wgpu renderer.
pub struct PanelOverlay {
    ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
    pending: Option<PendingFrame>,
}

impl PanelOverlay {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat, window: &Window) -> Self {
        let ctx = egui::Context::default();

        let mut visuals = egui::Visuals::dark();
        visuals.window_shadow = egui::Shadow::NONE;
        // Let the stars show through behind the sliders
        visuals.window_fill = egui::Color32::from_black_alpha(180);
        ctx.set_visuals(visuals);

        let state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let renderer = egui_wgpu::Renderer::new(device, format, None, 1, false);

        Self {
            ctx,
            state,
            renderer,
            pending: None,
        }
    }

    /// Feed a window event to egui. Returns true if a widget used it.
    pub fn on_window_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.state.on_window_event(window, event).consumed
    }

    /// Lay out the panel for this frame, applying edits to `controls`.
    pub fn update(
        &mut self,
        window: &Window,
        panel: &ControlPanel,
        controls: &mut Controls,
    ) -> ControlOutcome {
        let raw_input = self.state.take_egui_input(window);

        self.ctx.begin_pass(raw_input);
        let outcome = panel.show(&self.ctx, controls);
        let output = self.ctx.end_pass();

        self.state.handle_platform_output(window, output.platform_output);
        let jobs = self.ctx.tessellate(output.shapes, output.pixels_per_point);

        // Texture updates of a frame that was never painted carry over
        let mut textures = match self.pending.take() {
            Some(stale) => stale.textures,
            None => egui::TexturesDelta::default(),
        };
        textures.append(output.textures_delta);

        self.pending = Some(PendingFrame {
            jobs,
            textures,
            pixels_per_point: output.pixels_per_point,
        });
        outcome
    }

    /// Paint the pending panel onto `target`. No-op if nothing was laid out.
    pub fn paint(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        size_in_pixels: [u32; 2],
    ) {
        let Some(frame) = self.pending.take() else {
            return;
        };
        let screen = egui_wgpu::ScreenDescriptor {
            size_in_pixels,
            pixels_per_point: frame.pixels_per_point,
        };

        for (id, delta) in &frame.textures.set {
            self.renderer.update_texture(device, queue, *id, delta);
        }
        // The panel registers no paint callbacks, so there are no extra
        // command buffers to submit
        let _ = self
            .renderer
            .update_buffers(device, queue, encoder, &frame.jobs, &screen);

        let pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Panel Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        self.renderer
            .render(&mut pass.forget_lifetime(), &frame.jobs, &screen);

        for id in &frame.textures.free {
            self.renderer.free_texture(id);
        }
    }
}
