use egui::Ui;

use crate::state::AppState;
use crate::viewport::ViewportPanel;

pub fn show(ui: &mut Ui, state: &AppState, viewport: &ViewportPanel) {
    ui.horizontal(|ui| {
        let mesh = &state.mesh;
        ui.weak(format!("Vertices: {}", mesh.vertex_count()));
        ui.weak(format!("Faces: {}", mesh.face_count()));

        ui.separator();

        let mode = state.interaction.mode();
        ui.label(format!("Mode: {}", mode.display_name()));

        ui.separator();

        if mesh.has_pending() {
            ui.colored_label(egui::Color32::YELLOW, "Editing… release to commit");
        } else {
            ui.weak(mode.hint());
        }

        ui.separator();
        ui.weak(format!("Camera distance: {:.2}", viewport.camera().distance()));

        // Right-aligned version
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.weak("QuadEdit v0.1");
        });
    });
}
