//! Quad mesh store
//!
//! Vertices are stored in object-local space. At most one whole-object
//! transform and one single-face transform can be pending on top of them;
//! rendering and picking see the pending transforms, and a commit bakes them
//! into the vertex positions.

mod bounds;
mod edit_ops;
mod quad;
mod transform_ops;

use std::collections::HashMap;

use glam::{Mat4, Vec3};

use crate::viewport::picking::{ray_aabb, ray_quad_intersect, Aabb, FaceHit, Ray};

pub use edit_ops::ExtrudeTarget;
pub use quad::Quad;

/// Margin added to the world bounds before culling rays against them
const CULL_MARGIN: f32 = 1e-4;

/// Quad mesh with pending-transform preview state
#[derive(Debug, Clone)]
pub struct QuadMesh {
    pub(crate) vertices: Vec<Vec3>,
    pub(crate) faces: Vec<Quad>,
    /// Edge `(min, max)` -> midpoint vertex created by a subdivision
    pub(crate) split_edges: HashMap<(usize, usize), usize>,
    pub(crate) local_bounds: Aabb,
    pub(crate) local_corners: [Vec3; 8],
    pub(crate) world_bounds: Aabb,
    pub(crate) active_transform: Mat4,
    pub(crate) active_face: Option<usize>,
    pub(crate) active_face_transform: Mat4,
    /// Monotonically increasing version counter for cache invalidation
    pub(crate) version: u64,
}

impl Default for QuadMesh {
    fn default() -> Self {
        Self::cuboid(Vec3::ONE)
    }
}

impl QuadMesh {
    /// Axis-aligned cuboid centered at the origin.
    ///
    /// Vertex `i` sits at the max side of x/y/z when bit 0/1/2 of `i` is set.
    /// Faces are wound outward in the order -X, +X, -Y, +Y, -Z, +Z.
    pub fn cuboid(half_extents: Vec3) -> Self {
        let vertices = (0..8)
            .map(|i| {
                Vec3::new(
                    if i & 1 == 0 { -half_extents.x } else { half_extents.x },
                    if i & 2 == 0 { -half_extents.y } else { half_extents.y },
                    if i & 4 == 0 { -half_extents.z } else { half_extents.z },
                )
            })
            .collect();
        let faces = vec![
            Quad::new(0, 4, 6, 2),
            Quad::new(1, 3, 7, 5),
            Quad::new(0, 1, 5, 4),
            Quad::new(2, 6, 7, 3),
            Quad::new(0, 2, 3, 1),
            Quad::new(4, 5, 7, 6),
        ];
        Self::from_raw(vertices, faces)
    }

    /// Build a mesh from explicit vertices and faces
    pub fn from_parts(vertices: Vec<Vec3>, faces: Vec<Quad>) -> Result<Self, String> {
        if let Some((i, face)) = faces
            .iter()
            .enumerate()
            .find(|(_, f)| f.max_index() >= vertices.len())
        {
            return Err(format!(
                "face {i} references vertex {} but the mesh has {} vertices",
                face.max_index(),
                vertices.len()
            ));
        }
        Ok(Self::from_raw(vertices, faces))
    }

    fn from_raw(vertices: Vec<Vec3>, faces: Vec<Quad>) -> Self {
        let mut mesh = Self {
            vertices,
            faces,
            split_edges: HashMap::new(),
            local_bounds: Aabb::EMPTY,
            local_corners: [Vec3::ZERO; 8],
            world_bounds: Aabb::EMPTY,
            active_transform: Mat4::IDENTITY,
            active_face: None,
            active_face_transform: Mat4::IDENTITY,
            version: 0,
        };
        mesh.update_information(true);
        mesh
    }

    /// Current mesh version (increments on every mutation)
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Committed vertex positions (object-local)
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Quad] {
        &self.faces
    }

    pub fn face(&self, index: usize) -> Quad {
        self.faces[index]
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Transform applied to vertex `index` by the pending state
    fn vertex_transform(&self, index: usize) -> Mat4 {
        match self.active_face {
            Some(face) if self.faces[face].contains(index) => {
                self.active_transform * self.active_face_transform
            }
            _ => self.active_transform,
        }
    }

    /// Position of a vertex with pending transforms applied
    pub fn world_position(&self, index: usize) -> Vec3 {
        self.vertex_transform(index)
            .transform_point3(self.vertices[index])
    }

    /// All vertex positions with pending transforms applied
    pub fn world_vertices(&self) -> Vec<Vec3> {
        let mut out: Vec<Vec3> = self
            .vertices
            .iter()
            .map(|v| self.active_transform.transform_point3(*v))
            .collect();
        if let Some(face) = self.active_face {
            let m = self.active_transform * self.active_face_transform;
            for i in self.faces[face].indices() {
                out[i] = m.transform_point3(self.vertices[i]);
            }
        }
        out
    }

    pub fn face_corners(&self, face: usize) -> [Vec3; 4] {
        self.faces[face].indices().map(|i| self.vertices[i])
    }

    pub fn world_face_corners(&self, face: usize) -> [Vec3; 4] {
        self.faces[face].indices().map(|i| self.world_position(i))
    }

    /// Unit normal of a face from committed positions; zero for a collapsed face
    pub fn face_normal(&self, face: usize) -> Vec3 {
        quad_normal(&self.face_corners(face))
    }

    pub fn world_face_normal(&self, face: usize) -> Vec3 {
        quad_normal(&self.world_face_corners(face))
    }

    pub fn face_centroid(&self, face: usize) -> Vec3 {
        quad_centroid(&self.face_corners(face))
    }

    pub fn world_face_centroid(&self, face: usize) -> Vec3 {
        quad_centroid(&self.world_face_corners(face))
    }

    pub fn face_area(&self, face: usize) -> f32 {
        quad_vector_area(&self.face_corners(face)).length()
    }

    /// Area-weighted normal of a face (half the cross product of its diagonals)
    pub fn face_vector_area(&self, face: usize) -> Vec3 {
        quad_vector_area(&self.face_corners(face))
    }

    /// Closest face hit by a world-space ray, pending transforms included.
    ///
    /// Ties on the ray parameter resolve to the lowest face index.
    pub fn intersect(&self, ray: &Ray) -> Option<FaceHit> {
        ray_aabb(ray, &self.world_bounds.expanded(CULL_MARGIN))?;

        let world = self.world_vertices();
        let mut best: Option<FaceHit> = None;

        for (face, quad) in self.faces.iter().enumerate() {
            let corners = quad.indices().map(|i| world[i]);
            if let Some(t) = ray_quad_intersect(ray, &corners) {
                if best.as_ref().is_none_or(|b| t < b.distance) {
                    best = Some(FaceHit {
                        face,
                        point: ray.at(t),
                        distance: t,
                    });
                }
            }
        }

        best
    }

    /// Swap in another mesh, keeping the version counter increasing
    pub fn replace_with(&mut self, other: QuadMesh) {
        let version = self.version + 1;
        *self = other;
        self.version = self.version.max(version);
    }

    pub(crate) fn push_vertex(&mut self, position: Vec3) -> usize {
        self.vertices.push(position);
        self.vertices.len() - 1
    }
}

pub(crate) fn quad_normal(corners: &[Vec3; 4]) -> Vec3 {
    (corners[1] - corners[0])
        .cross(corners[2] - corners[1])
        .normalize_or_zero()
}

pub(crate) fn quad_centroid(corners: &[Vec3; 4]) -> Vec3 {
    (corners[0] + corners[1] + corners[2] + corners[3]) * 0.25
}

pub(crate) fn quad_vector_area(corners: &[Vec3; 4]) -> Vec3 {
    (corners[2] - corners[0]).cross(corners[3] - corners[1]) * 0.5
}
