//! Application menu bar and settings window

use eframe::egui;

use crate::state::settings::{AppSettings, RotationPivot};
use crate::state::{AppState, EditMode};
use crate::ui::toolbar::action_reset_mesh;
use crate::viewport::ViewportPanel;

/// Show the edit menu
pub fn edit_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button("Edit", |ui| {
        for &mode in EditMode::all() {
            let selected = state.interaction.mode() == mode;
            let label = format!("{}\t{}", mode.display_name(), mode.shortcut());
            if ui.selectable_label(selected, label).clicked() {
                state.interaction.set_mode(mode);
                ui.close_menu();
            }
        }
        ui.separator();
        let dragging = state.interaction.is_dragging();
        if ui
            .add_enabled(!dragging, egui::Button::new("Reset mesh\tR"))
            .clicked()
        {
            action_reset_mesh(state);
            ui.close_menu();
        }
    });
}

/// Show the view menu
pub fn view_menu(ui: &mut egui::Ui, state: &mut AppState, viewport: &mut ViewportPanel) {
    ui.menu_button("View", |ui| {
        ui.checkbox(&mut state.settings.grid.visible, "Grid");
        ui.checkbox(&mut state.settings.axes.visible, "Axes");
        ui.checkbox(&mut state.settings.viewport.show_edges, "Quad outlines");
        ui.checkbox(&mut state.settings.viewport.show_bounds, "Bounding box while editing");
        ui.separator();
        if ui.button("Reset camera\tHome").clicked() {
            viewport.reset_camera(&state.settings);
            ui.close_menu();
        }
    });
}

/// Show the settings menu
pub fn settings_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button("Settings", |ui| {
        if ui.button("Preferences…").clicked() {
            state.show_settings_window = true;
            ui.close_menu();
        }
    });
}

/// Show the settings window
pub fn settings_window(ctx: &egui::Context, state: &mut AppState) {
    let mut open = state.show_settings_window;
    egui::Window::new("Settings")
        .open(&mut open)
        .resizable(true)
        .default_width(380.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                show_interaction_settings(ui, &mut state.settings);
                show_camera_settings(ui, &mut state.settings);
                show_mesh_settings(ui, &mut state.settings);
                show_grid_settings(ui, &mut state.settings);
                show_axes_settings(ui, &mut state.settings);
                show_viewport_settings(ui, &mut state.settings);
                show_settings_buttons(ui, state);
            });
        });
    state.show_settings_window = open;
}

fn show_interaction_settings(ui: &mut egui::Ui, settings: &mut AppSettings) {
    let s = &mut settings.interaction;
    ui.heading("Interaction");
    ui.horizontal(|ui| {
        ui.label("Rotation speed");
        ui.add(
            egui::DragValue::new(&mut s.rotation_speed)
                .speed(0.001)
                .range(0.001..=0.1)
                .suffix(" rad/px"),
        );
    });
    ui.horizontal(|ui| {
        ui.label("Orbit speed");
        ui.add(
            egui::DragValue::new(&mut s.orbit_speed)
                .speed(0.001)
                .range(0.001..=0.1)
                .suffix(" rad/px"),
        );
    });
    ui.horizontal(|ui| {
        ui.label("Dead zone");
        ui.add(
            egui::DragValue::new(&mut s.dead_zone)
                .speed(0.1)
                .range(0.0..=10.0)
                .suffix(" px"),
        );
    });
    ui.horizontal(|ui| {
        ui.label("Zoom step");
        ui.add(egui::DragValue::new(&mut s.zoom_step).speed(0.01).range(1.01..=2.0));
    });
    ui.horizontal(|ui| {
        ui.label("Rotation pivot");
        egui::ComboBox::from_id_salt("pivot_combo")
            .selected_text(s.rotation_pivot.display_name())
            .show_ui(ui, |ui| {
                for &pivot in RotationPivot::all() {
                    ui.selectable_value(&mut s.rotation_pivot, pivot, pivot.display_name());
                }
            });
    });
    ui.add_space(10.0);
}

fn show_camera_settings(ui: &mut egui::Ui, settings: &mut AppSettings) {
    let c = &mut settings.camera;
    ui.heading("Camera");
    ui.horizontal(|ui| {
        ui.label("Field of view");
        ui.add(egui::Slider::new(&mut c.fov, 20.0..=120.0).suffix("°"));
    });
    ui.horizontal(|ui| {
        ui.label("Near / far");
        ui.add(egui::DragValue::new(&mut c.near).speed(0.01).range(0.01..=10.0));
        ui.add(egui::DragValue::new(&mut c.far).speed(1.0).range(10.0..=1000.0));
    });
    ui.horizontal(|ui| {
        ui.label("Start distance");
        ui.add(
            egui::DragValue::new(&mut c.distance)
                .speed(0.1)
                .range(c.min_distance..=c.max_distance),
        );
    });
    ui.weak("Pose changes apply on camera reset (Home)");
    ui.add_space(10.0);
}

fn show_mesh_settings(ui: &mut egui::Ui, settings: &mut AppSettings) {
    ui.heading("Mesh");
    ui.horizontal(|ui| {
        ui.label("Half extents");
        for v in settings.mesh.half_extents.iter_mut() {
            ui.add(egui::DragValue::new(v).speed(0.05).range(0.1..=10.0));
        }
    });
    ui.weak("Applies on mesh reset (R)");
    ui.add_space(10.0);
}

fn show_grid_settings(ui: &mut egui::Ui, settings: &mut AppSettings) {
    ui.heading("Grid");
    ui.checkbox(&mut settings.grid.visible, "Visible");

    ui.horizontal(|ui| {
        ui.label("Cell size");
        ui.add(
            egui::DragValue::new(&mut settings.grid.size)
                .speed(0.05)
                .range(0.05..=10.0),
        );
    });

    ui.horizontal(|ui| {
        ui.label("Range");
        ui.add(
            egui::DragValue::new(&mut settings.grid.range)
                .speed(1)
                .range(1..=100),
        );
    });

    ui.horizontal(|ui| {
        ui.label("Opacity");
        ui.add(egui::Slider::new(&mut settings.grid.opacity, 0.0..=1.0));
    });
    ui.add_space(10.0);
}

fn show_axes_settings(ui: &mut egui::Ui, settings: &mut AppSettings) {
    ui.heading("Axes");
    ui.checkbox(&mut settings.axes.visible, "Visible");
    ui.checkbox(&mut settings.axes.show_labels, "Labels");

    ui.horizontal(|ui| {
        ui.label("Length");
        ui.add(
            egui::DragValue::new(&mut settings.axes.length)
                .speed(0.1)
                .range(0.1..=50.0),
        );
    });

    ui.horizontal(|ui| {
        ui.label("Thickness");
        ui.add(
            egui::DragValue::new(&mut settings.axes.thickness)
                .speed(0.1)
                .range(0.5..=5.0),
        );
    });
    ui.add_space(10.0);
}

fn color_row(ui: &mut egui::Ui, label: &str, rgb: &mut [u8; 3]) {
    ui.horizontal(|ui| {
        ui.label(label);
        let mut color = egui::Color32::from_rgb(rgb[0], rgb[1], rgb[2]);
        if ui.color_edit_button_srgba(&mut color).changed() {
            *rgb = [color.r(), color.g(), color.b()];
        }
    });
}

fn show_viewport_settings(ui: &mut egui::Ui, settings: &mut AppSettings) {
    ui.heading("Viewport");
    color_row(ui, "Background", &mut settings.viewport.background_color);
    color_row(ui, "Mesh", &mut settings.viewport.mesh_color);
    color_row(ui, "Extruded face", &mut settings.viewport.active_face_color);
    ui.checkbox(&mut settings.viewport.show_edges, "Quad outlines");
    ui.checkbox(&mut settings.viewport.show_bounds, "Bounding box while editing");
    ui.add_space(10.0);
}

fn show_settings_buttons(ui: &mut egui::Ui, state: &mut AppState) {
    ui.separator();
    ui.horizontal(|ui| {
        if ui.button("Save").clicked() {
            state.settings.save();
        }
        if ui.button("Defaults").clicked() {
            state.settings = AppSettings::default();
        }
        if ui.button("Close").clicked() {
            state.show_settings_window = false;
        }
    });
}
