//! Viewport overlay drawing (axis labels, camera info, hints)

use egui::Painter;
use glam::Vec3;

use super::camera::OrbitCamera;
use super::renderer::to_screen;
use crate::state::AppState;

/// Draw axis labels in the viewport
pub fn draw_axis_labels(painter: &Painter, rect: egui::Rect, camera: &OrbitCamera, length: f32) {
    let labels = [
        (Vec3::X, "X", egui::Color32::from_rgb(220, 70, 70)),
        (Vec3::Y, "Y", egui::Color32::from_rgb(70, 200, 70)),
        (Vec3::Z, "Z", egui::Color32::from_rgb(70, 110, 220)),
    ];

    // Labels sit a little past the cuboid rather than at the far axis ends
    let reach = length.min(1.6);
    for (dir, label, color) in labels {
        if let Some(screen) = to_screen(camera, rect, dir * reach) {
            if rect.contains(screen) {
                painter.text(
                    screen,
                    egui::Align2::LEFT_BOTTOM,
                    label,
                    egui::FontId::monospace(12.0),
                    color,
                );
            }
        }
    }
}

pub fn draw_camera_info(painter: &Painter, rect: egui::Rect, camera: &OrbitCamera) {
    let overlay_rect = egui::Rect::from_min_size(
        egui::pos2(rect.right() - 160.0, rect.top() + 4.0),
        egui::vec2(156.0, 44.0),
    );
    painter.rect_filled(
        overlay_rect,
        4.0,
        egui::Color32::from_rgba_premultiplied(0, 0, 0, 140),
    );
    let eye = camera.eye_position();
    painter.text(
        overlay_rect.min + egui::vec2(6.0, 4.0),
        egui::Align2::LEFT_TOP,
        format!(
            "Dist: {:.2}\nEye: {:.1} {:.1} {:.1}",
            camera.distance(),
            eye.x,
            eye.y,
            eye.z,
        ),
        egui::FontId::monospace(10.0),
        egui::Color32::from_rgb(160, 160, 170),
    );
}

/// Mode hint along the bottom edge
pub fn draw_mode_hint(painter: &Painter, rect: egui::Rect, state: &AppState) {
    let mode = state.interaction.mode();
    painter.text(
        egui::pos2(rect.center().x, rect.bottom() - 20.0),
        egui::Align2::CENTER_BOTTOM,
        format!(
            "{}: {}  ·  right-drag to orbit, scroll to zoom",
            mode.display_name(),
            mode.hint()
        ),
        egui::FontId::proportional(11.0),
        egui::Color32::from_rgb(100, 100, 110),
    );
}
