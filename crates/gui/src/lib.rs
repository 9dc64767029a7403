// Library crate: exposes the editing core for integration tests and headless driving.
// GUI-specific modules (app, ui, GL rendering) remain in the binary crate.

pub mod build;
pub mod command;
pub mod fixtures;
pub mod harness;
pub mod state;
pub mod validation;

/// Geometry kernel and render buffers shared with the binary.
/// GL rendering and overlays stay in the binary crate.
pub mod viewport {
    pub mod camera;
    pub mod mesh;
    pub mod picking;
}
