//! Wireframe rendering for the viewport when no GL context is available

use egui::{Color32, Pos2, Rect, Stroke, Ui};
use glam::Vec3;

use super::camera::{OrbitCamera, Viewport};
use crate::state::settings::{AxisSettings, GridSettings};
use crate::state::AppState;

/// Project a world point into egui coordinates inside `rect`
pub fn to_screen(camera: &OrbitCamera, rect: Rect, point: Vec3) -> Option<Pos2> {
    let viewport = Viewport::new(rect.width(), rect.height());
    let p = camera.project(point, &viewport)?;
    Some(egui::pos2(rect.left() + p.x, rect.bottom() - p.y))
}

/// Paint the 3D viewport using egui's painter (wireframe rendering)
pub fn paint_viewport(ui: &Ui, rect: Rect, camera: &OrbitCamera, state: &AppState) {
    let painter = ui.painter_at(rect);

    // Background
    let bg = &state.settings.viewport.background_color;
    painter.rect_filled(rect, 0.0, Color32::from_rgb(bg[0], bg[1], bg[2]));

    if state.settings.grid.visible {
        draw_grid(&painter, rect, camera, &state.settings.grid);
    }

    if state.settings.axes.visible {
        draw_axes(&painter, rect, camera, &state.settings.axes);
    }

    let mesh = &state.mesh;
    let world = mesh.world_vertices();
    let base = state.settings.viewport.mesh_color;
    let active = state.settings.viewport.active_face_color;

    for (face, quad) in mesh.faces().iter().enumerate() {
        let highlighted = mesh.active_face() == Some(face);
        let color = if highlighted { active } else { base };
        let stroke = Stroke::new(
            if highlighted { 2.0 } else { 1.0 },
            Color32::from_rgb(color[0], color[1], color[2]),
        );
        for (a, b) in quad.edges() {
            if let (Some(pa), Some(pb)) = (
                to_screen(camera, rect, world[a]),
                to_screen(camera, rect, world[b]),
            ) {
                painter.line_segment([pa, pb], stroke);
            }
        }
    }
}

fn draw_grid(painter: &egui::Painter, rect: Rect, camera: &OrbitCamera, settings: &GridSettings) {
    let alpha = (settings.opacity * 255.0) as u8;
    let stroke = Stroke::new(0.5, Color32::from_rgba_premultiplied(60, 60, 60, alpha));

    let range = settings.range;
    let extent = range as f32 * settings.size;

    for i in -range..=range {
        let f = i as f32 * settings.size;
        let segments = [
            (Vec3::new(f, -extent, 0.0), Vec3::new(f, extent, 0.0)),
            (Vec3::new(-extent, f, 0.0), Vec3::new(extent, f, 0.0)),
        ];
        for (a, b) in segments {
            if let (Some(a), Some(b)) = (to_screen(camera, rect, a), to_screen(camera, rect, b)) {
                if rect.contains(a) || rect.contains(b) {
                    painter.line_segment([a, b], stroke);
                }
            }
        }
    }
}

fn draw_axes(painter: &egui::Painter, rect: Rect, camera: &OrbitCamera, settings: &AxisSettings) {
    let Some(o) = to_screen(camera, rect, Vec3::ZERO) else {
        return;
    };
    let axes = [
        (Vec3::X, Color32::from_rgb(220, 50, 50)),
        (Vec3::Y, Color32::from_rgb(50, 200, 50)),
        (Vec3::Z, Color32::from_rgb(50, 100, 220)),
    ];
    for (dir, color) in axes {
        if let Some(end) = to_screen(camera, rect, dir * settings.length) {
            painter.line_segment([o, end], Stroke::new(settings.thickness, color));
        }
    }
}
