//! Render data building for the quad mesh.
//!
//! Everything here works on world positions, so pending transforms show up in
//! the preview without touching the committed vertices.

mod cache;

pub use cache::MeshCache;

use glam::Vec3;

use crate::state::mesh::QuadMesh;
use crate::state::settings::ViewportSettings;
use crate::viewport::mesh::{LineMeshData, MeshData};
use crate::viewport::picking::BOX_EDGES;

/// Constant light direction for flat shading (normalized (1, 2, 3))
pub const LIGHT_DIRECTION: Vec3 = Vec3::new(0.267_261_24, 0.534_522_5, 0.801_783_7);

const EDGE_COLOR: [f32; 4] = [0.1, 0.1, 0.1, 1.0];
const BOUNDS_COLOR: [f32; 4] = [1.0, 0.0, 1.0, 1.0];

/// Colors used when building render data
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshStyle {
    pub base: [f32; 3],
    pub active_face: [f32; 3],
}

impl MeshStyle {
    pub fn from_settings(settings: &ViewportSettings) -> Self {
        Self {
            base: rgb(settings.mesh_color),
            active_face: rgb(settings.active_face_color),
        }
    }
}

impl Default for MeshStyle {
    fn default() -> Self {
        Self::from_settings(&ViewportSettings::default())
    }
}

pub fn rgb(c: [u8; 3]) -> [f32; 3] {
    [
        c[0] as f32 / 255.0,
        c[1] as f32 / 255.0,
        c[2] as f32 / 255.0,
    ]
}

/// Flat-shaded triangles, one quad (two triangles) per face.
///
/// The face under a pending face transform gets the active color.
pub fn build_mesh_data(mesh: &QuadMesh, style: &MeshStyle) -> MeshData {
    let mut data = MeshData {
        vertices: Vec::with_capacity(mesh.face_count() * 4 * 9),
        indices: Vec::with_capacity(mesh.face_count() * 6),
    };
    let world = mesh.world_vertices();

    for (f, quad) in mesh.faces().iter().enumerate() {
        let corners = quad.indices().map(|i| world[i]);
        let normal = (corners[1] - corners[0])
            .cross(corners[2] - corners[1])
            .normalize_or_zero();
        let color = if mesh.active_face() == Some(f) {
            style.active_face
        } else {
            style.base
        };
        data.push_quad(&corners, normal, color);
    }

    data
}

/// Outline of every quad
pub fn build_edge_lines(mesh: &QuadMesh) -> LineMeshData {
    let mut lines = LineMeshData::default();
    let world = mesh.world_vertices();
    for quad in mesh.faces() {
        for (a, b) in quad.edges() {
            lines.push_line(world[a], world[b], EDGE_COLOR);
        }
    }
    lines
}

/// Local bounding box carried by the pending transform; None when idle
pub fn build_bounds_lines(mesh: &QuadMesh) -> Option<LineMeshData> {
    if !mesh.has_pending() {
        return None;
    }
    let corners = mesh.transformed_corners();
    let mut lines = LineMeshData::default();
    for (a, b) in BOX_EDGES {
        lines.push_line(corners[a], corners[b], BOUNDS_COLOR);
    }
    Some(lines)
}
