//! 3D viewport panel with OpenGL rendering

mod gl_renderer;
mod overlays;
mod renderer;
pub use quadedit_gui_lib::viewport::{camera, mesh, picking};

use std::sync::{Arc, Mutex};

use egui::Ui;
use glam::Vec2;

use crate::build::{MeshCache, MeshStyle};
use crate::state::settings::AppSettings;
use crate::state::{AppState, PointerSample};
use camera::{OrbitCamera, Viewport};
use gl_renderer::{FrameMeshes, GlRenderer};

/// Scroll delta (points) that counts as one wheel step
const SCROLL_STEP_POINTS: f32 = 50.0;

/// 3D viewport panel with OpenGL rendering
pub struct ViewportPanel {
    camera: OrbitCamera,
    viewport: Viewport,
    gl_renderer: Option<Arc<Mutex<GlRenderer>>>,
    cache: MeshCache,
}

impl ViewportPanel {
    pub fn new(settings: &AppSettings) -> Self {
        Self {
            camera: OrbitCamera::from_settings(&settings.camera),
            viewport: Viewport::default(),
            gl_renderer: None,
            cache: MeshCache::new(),
        }
    }

    /// Initialize GL renderer (must be called with a GL context)
    pub fn init_gl(&mut self, gl: &glow::Context) {
        match GlRenderer::new(gl) {
            Ok(renderer) => self.gl_renderer = Some(Arc::new(Mutex::new(renderer))),
            Err(e) => tracing::error!("GL renderer unavailable, using software wireframe: {e}"),
        }
    }

    pub fn reset_camera(&mut self, settings: &AppSettings) {
        self.camera = OrbitCamera::from_settings(&settings.camera);
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn show(&mut self, ui: &mut Ui, state: &mut AppState) {
        let (rect, response) =
            ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());

        // ── Live viewport and projection ─────────────────────
        self.viewport.resize(rect.width(), rect.height());
        let cam = &state.settings.camera;
        self.camera.fov = cam.fov;
        self.camera.near = cam.near;
        self.camera.far = cam.far;

        // ── Interaction ──────────────────────────────────────
        let sample = pointer_sample(ui, &response, rect);
        let report = state.interaction.process(
            &sample,
            &mut state.mesh,
            &mut self.camera,
            &self.viewport,
            &state.settings.interaction,
        );
        if let Some(face) = report.edited_face {
            tracing::debug!("Edited face {face}");
        }

        // ── Render data ──────────────────────────────────────
        let style = MeshStyle::from_settings(&state.settings.viewport);
        if self.cache.refresh(&state.mesh, &style) {
            tracing::trace!("Rebuilt render data for mesh version {}", self.cache.version());
        }

        if !ui.is_rect_visible(rect) {
            return;
        }

        self.render_gl(ui, rect, state);
        self.draw_overlays(ui, rect, state);
    }

    fn render_gl(&self, ui: &mut Ui, rect: egui::Rect, state: &AppState) {
        let Some(gl_renderer) = &self.gl_renderer else {
            // Fallback: software wireframe rendering
            renderer::paint_viewport(ui, rect, &self.camera, state);
            return;
        };

        let renderer_clone = gl_renderer.clone();
        let camera = self.camera.clone();

        let frame = FrameMeshes {
            generation: self.cache.rebuild_count(),
            mesh: self.cache.mesh().clone(),
            edges: self.cache.edges().clone(),
            bounds: self.cache.bounds().cloned(),
        };

        let grid_settings = state.settings.grid.clone();
        let axes_settings = state.settings.axes.clone();
        let edges_visible = state.settings.viewport.show_edges;
        let bounds_visible = state.settings.viewport.show_bounds;
        let bg_color = state.settings.viewport.background_color;

        let callback = egui::PaintCallback {
            rect,
            callback: Arc::new(egui_glow::CallbackFn::new(move |info, painter| {
                let gl = painter.gl();

                let clip = info.clip_rect_in_pixels();
                let viewport = [
                    clip.left_px as f32,
                    clip.from_bottom_px as f32,
                    clip.width_px as f32,
                    clip.height_px as f32,
                ];

                if let Ok(mut r) = renderer_clone.lock() {
                    r.update_grid(gl, &grid_settings);
                    r.update_axes(gl, &axes_settings);
                    r.sync_mesh(gl, &frame);

                    let render_params = gl_renderer::RenderParams {
                        viewport,
                        grid_visible: grid_settings.visible,
                        axes_visible: axes_settings.visible,
                        axes_thickness: axes_settings.thickness,
                        edges_visible,
                        bounds_visible,
                        bg_color,
                    };
                    r.paint(gl, &camera, &render_params);
                }
            })),
        };

        ui.painter().add(callback);
    }

    fn draw_overlays(&self, ui: &mut Ui, rect: egui::Rect, state: &AppState) {
        let painter = ui.painter_at(rect);

        if state.settings.axes.visible && state.settings.axes.show_labels {
            overlays::draw_axis_labels(&painter, rect, &self.camera, state.settings.axes.length);
        }

        overlays::draw_camera_info(&painter, rect, &self.camera);
        overlays::draw_mode_hint(&painter, rect, state);
    }
}

/// Sample the pointer relative to the viewport rect (bottom-left origin).
///
/// Buttons only count when the press started on the viewport, so dragging a
/// panel splitter never edits the mesh.
fn pointer_sample(ui: &Ui, response: &egui::Response, rect: egui::Rect) -> PointerSample {
    let on_viewport = response.is_pointer_button_down_on();
    let hovered = response.hovered();

    ui.input(|i| {
        let position = i
            .pointer
            .latest_pos()
            .filter(|_| hovered || on_viewport)
            .map(|p| Vec2::new(p.x - rect.left(), rect.bottom() - p.y));

        let scroll_steps = if hovered {
            i.raw_scroll_delta.y / SCROLL_STEP_POINTS
        } else {
            0.0
        };

        PointerSample {
            position,
            primary_down: on_viewport && i.pointer.primary_down(),
            secondary_down: on_viewport && i.pointer.secondary_down(),
            scroll_steps,
        }
    })
}
