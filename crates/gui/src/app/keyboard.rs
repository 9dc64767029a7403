//! Keyboard shortcut handling

use eframe::egui;

use crate::state::{AppState, EditMode};
use crate::ui::toolbar::action_reset_mesh;
use crate::viewport::ViewportPanel;

/// Handle keyboard shortcuts for the application
pub fn handle_keyboard(
    ctx: &egui::Context,
    state: &mut AppState,
    viewport: &mut ViewportPanel,
) {
    // Don't handle shortcuts when a text field is focused
    if ctx.memory(|m| m.focused().is_some()) {
        return;
    }

    ctx.input(|i| {
        if i.modifiers.any() {
            return;
        }
        // 1-4: edit modes
        let modes = [
            (egui::Key::Num1, EditMode::Rotation),
            (egui::Key::Num2, EditMode::Translation),
            (egui::Key::Num3, EditMode::Subdivide),
            (egui::Key::Num4, EditMode::Extrude),
        ];
        for (key, mode) in modes {
            if i.key_pressed(key) {
                state.interaction.set_mode(mode);
            }
        }
        // R: fresh cuboid
        if i.key_pressed(egui::Key::R) {
            action_reset_mesh(state);
        }
        // Home: default camera pose
        if i.key_pressed(egui::Key::Home) {
            viewport.reset_camera(&state.settings);
        }
    });
}
