//! Factory functions for creating test data.
//!
//! Canned meshes, rays and cameras used by unit and integration tests.

use glam::{Vec2, Vec3};

use crate::state::mesh::{Quad, QuadMesh};
use crate::viewport::camera::{OrbitCamera, Viewport};
use crate::viewport::picking::Ray;

// ── Mesh factories ──────────────────────────────────────────────

/// Cuboid with half extents (1, 1, 1), the editor's starting mesh.
pub fn unit_cube() -> QuadMesh {
    QuadMesh::default()
}

/// Cuboid with the given half extents.
pub fn cuboid(hx: f32, hy: f32, hz: f32) -> QuadMesh {
    QuadMesh::cuboid(Vec3::new(hx, hy, hz))
}

/// Unit cube with its +Z face (index 5) extruded by `height`.
pub fn extruded_cube(height: f32) -> QuadMesh {
    let mut mesh = unit_cube();
    mesh.extrude_face_at(5);
    mesh.apply_face_transform(Some(5), glam::Mat4::from_translation(Vec3::Z * height));
    mesh.commit_transform();
    mesh
}

/// Unit cube with every face subdivided once.
pub fn subdivided_cube() -> QuadMesh {
    let mut mesh = unit_cube();
    for face in 0..6 {
        mesh.subdivide_face_at(face);
    }
    mesh
}

/// Single open square in the XY plane facing +Z.
pub fn open_square() -> Option<QuadMesh> {
    QuadMesh::from_parts(
        vec![
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(-1.0, 1.0, 0.0),
        ],
        vec![Quad::new(0, 1, 2, 3)],
    )
    .ok()
}

// ── Ray factories ───────────────────────────────────────────────

/// Ray from outside the mesh straight at a face centroid, against its normal.
pub fn ray_to_face(mesh: &QuadMesh, face: usize, standoff: f32) -> Ray {
    let normal = mesh.world_face_normal(face);
    let centroid = mesh.world_face_centroid(face);
    Ray::new(centroid + normal * standoff, -normal)
}

/// Ray from (0, 0, 5) down the -Z axis.
pub fn ray_down_z() -> Ray {
    Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z)
}

// ── Camera factories ──────────────────────────────────────────

/// Camera at (0, 0, 5) looking at the origin with +Y up.
pub fn front_camera() -> OrbitCamera {
    let mut camera = OrbitCamera::default();
    camera.look_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
    camera
}

/// Square 800x800 viewport.
pub fn square_viewport() -> Viewport {
    Viewport::new(800.0, 800.0)
}

/// Offset a screen position by (dx, dy) pixels.
pub fn nudge(p: Vec2, dx: f32, dy: f32) -> Vec2 {
    p + Vec2::new(dx, dy)
}
