mod app;
mod ui;
mod viewport;

// Re-export library modules so that `crate::state`, `crate::build`, etc.
// resolve to the lib crate types everywhere in the binary.
pub use quadedit_gui_lib::build;
pub use quadedit_gui_lib::state;

use app::QuadEditApp;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quadedit_gui=info".into()),
        )
        .init();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("QuadEdit")
            .with_inner_size([1000.0, 1000.0])
            .with_min_inner_size([400.0, 300.0]),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "quadedit-gui",
        native_options,
        Box::new(|cc| Ok(Box::new(QuadEditApp::new(cc)))),
    ) {
        tracing::error!("Failed to start application: {e}");
    }
}
