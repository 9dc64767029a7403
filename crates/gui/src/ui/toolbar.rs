//! Edit mode toolbar

use egui::Ui;

use crate::state::{AppState, EditMode};

pub fn action_set_mode(state: &mut AppState, mode: EditMode) {
    if !state.interaction.set_mode(mode) {
        tracing::debug!("Mode change to {mode:?} ignored while dragging");
    }
}

pub fn action_reset_mesh(state: &mut AppState) {
    if !state.reset_mesh() {
        tracing::debug!("Reset ignored while dragging");
    }
}

pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        let dragging = state.interaction.is_dragging();
        for &mode in EditMode::all() {
            let selected = state.interaction.mode() == mode;
            let label = format!("{} ({})", mode.display_name(), mode.shortcut());
            let response = ui
                .add_enabled(!dragging || selected, egui::SelectableLabel::new(selected, label))
                .on_hover_text(mode.hint());
            if response.clicked() {
                action_set_mode(state, mode);
            }
        }

        ui.separator();

        if ui
            .add_enabled(!dragging, egui::Button::new("Reset mesh"))
            .on_hover_text("Replace the mesh with a fresh cuboid (R)")
            .clicked()
        {
            action_reset_mesh(state);
        }
    });
}
