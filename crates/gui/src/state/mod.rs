pub mod interaction;
pub mod mesh;
pub mod settings;

use glam::Vec3;

pub use interaction::{EditMode, InteractionState, PointerSample, TickReport};
pub use mesh::{ExtrudeTarget, Quad, QuadMesh};
pub use settings::AppSettings;

/// Combined application state
pub struct AppState {
    pub mesh: QuadMesh,
    pub interaction: InteractionState,
    pub settings: AppSettings,
    /// Show settings window
    pub show_settings_window: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_settings(AppSettings::load())
    }
}

impl AppState {
    pub fn with_settings(settings: AppSettings) -> Self {
        Self {
            mesh: initial_mesh(&settings),
            interaction: InteractionState::default(),
            settings,
            show_settings_window: false,
        }
    }

    /// Replace the mesh with a fresh cuboid. Refused while a primary drag is
    /// in progress; returns whether the mesh was replaced.
    pub fn reset_mesh(&mut self) -> bool {
        if self.interaction.is_dragging() {
            tracing::debug!("Mesh reset ignored while dragging");
            return false;
        }
        self.mesh.replace_with(initial_mesh(&self.settings));
        self.interaction.reset();
        tracing::info!("Mesh reset");
        true
    }
}

/// Starting cuboid described by the mesh settings
pub fn initial_mesh(settings: &AppSettings) -> QuadMesh {
    QuadMesh::cuboid(Vec3::from_array(settings.mesh.half_extents))
}
