//! Mesh validation utilities.
//!
//! `MeshValidator` checks the quad mesh itself: in-range indices, edge
//! pairing, closure and dimensions. `RenderValidator` checks `MeshData`
//! buffers: correct stride, in-range indices, normalized normals.

use std::collections::HashMap;

use glam::Vec3;

use crate::state::mesh::QuadMesh;
use crate::viewport::mesh::{MeshData, MESH_STRIDE};
use crate::viewport::picking::Aabb;

/// Validator for `QuadMesh` integrity checks.
pub struct MeshValidator<'a> {
    mesh: &'a QuadMesh,
}

impl<'a> MeshValidator<'a> {
    pub fn new(mesh: &'a QuadMesh) -> Self {
        Self { mesh }
    }

    pub fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    pub fn face_count(&self) -> usize {
        self.mesh.face_count()
    }

    /// Check that every face references existing vertices.
    pub fn are_indices_in_range(&self) -> bool {
        let n = self.mesh.vertex_count();
        self.mesh.faces().iter().all(|f| f.max_index() < n)
    }

    fn directed_edge_counts(&self) -> HashMap<(usize, usize), usize> {
        let mut counts = HashMap::new();
        for face in self.mesh.faces() {
            for edge in face.edges() {
                *counts.entry(edge).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Directed edges used by more than one face (inconsistent winding).
    pub fn duplicate_edges(&self) -> Vec<(usize, usize)> {
        let mut out: Vec<_> = self
            .directed_edge_counts()
            .into_iter()
            .filter(|(_, c)| *c > 1)
            .map(|(e, _)| e)
            .collect();
        out.sort_unstable();
        out
    }

    /// Directed edges whose reverse is not used by any face.
    ///
    /// T-junctions left by subdividing one side of an edge show up here even
    /// though the surface is still geometrically closed.
    pub fn open_edges(&self) -> Vec<(usize, usize)> {
        let counts = self.directed_edge_counts();
        let mut out: Vec<_> = counts
            .keys()
            .filter(|(a, b)| !counts.contains_key(&(*b, *a)))
            .copied()
            .collect();
        out.sort_unstable();
        out
    }

    /// Every edge is shared by exactly two faces in opposite directions.
    pub fn is_closed(&self) -> bool {
        self.open_edges().is_empty() && self.duplicate_edges().is_empty()
    }

    /// Sum of the face vector areas; zero for any closed surface.
    pub fn vector_area_sum(&self) -> Vec3 {
        (0..self.mesh.face_count())
            .map(|f| self.mesh.face_vector_area(f))
            .sum()
    }

    pub fn total_area(&self) -> f32 {
        (0..self.mesh.face_count())
            .map(|f| self.mesh.face_area(f))
            .sum()
    }

    /// Faces with (near) zero area. Extrusion sides are like this until the
    /// lid is dragged, so this is informational, not an error.
    pub fn collapsed_faces(&self, epsilon: f32) -> Vec<usize> {
        (0..self.mesh.face_count())
            .filter(|f| self.mesh.face_area(*f) <= epsilon)
            .collect()
    }

    /// Bounding box of the committed vertices.
    pub fn aabb(&self) -> Aabb {
        self.mesh.local_bounds()
    }

    /// Compute the dimensions (x, y, z) of the bounding box.
    pub fn dimensions(&self) -> [f32; 3] {
        self.aabb().size().to_array()
    }

    /// Check that the AABB dimensions are approximately equal to `expected`.
    pub fn assert_dimensions_approx(&self, expected: [f32; 3], tolerance: f32) -> bool {
        let dims = self.dimensions();
        (dims[0] - expected[0]).abs() < tolerance
            && (dims[1] - expected[1]).abs() < tolerance
            && (dims[2] - expected[2]).abs() < tolerance
    }

    /// Run all validation checks and return a list of error messages.
    /// An empty list means the mesh is valid.
    pub fn validate_all(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.are_indices_in_range() {
            errors.push(format!(
                "Face indices out of range (vertex_count={})",
                self.vertex_count()
            ));
            return errors;
        }

        let duplicates = self.duplicate_edges();
        if !duplicates.is_empty() {
            errors.push(format!(
                "Directed edges shared by several faces: {:?}",
                &duplicates[..duplicates.len().min(5)]
            ));
        }

        let closure = self.vector_area_sum();
        let tolerance = 1e-4 * self.total_area().max(1.0);
        if closure.length() > tolerance {
            errors.push(format!("Surface is not closed (vector area sum {closure})"));
        }

        errors
    }
}

/// Validator for `MeshData` render buffers.
pub struct RenderValidator<'a> {
    data: &'a MeshData,
}

impl<'a> RenderValidator<'a> {
    pub fn new(data: &'a MeshData) -> Self {
        Self { data }
    }

    /// Number of vertices (vertices buffer length / 9).
    pub fn vertex_count(&self) -> usize {
        self.data.vertices.len() / MESH_STRIDE
    }

    /// Number of triangles (indices buffer length / 3).
    pub fn triangle_count(&self) -> usize {
        self.data.indices.len() / 3
    }

    /// Check that the vertex buffer length is a multiple of 9 (the stride).
    pub fn is_stride_valid(&self) -> bool {
        self.data.vertices.len() % MESH_STRIDE == 0
    }

    /// Check that the index buffer length is a multiple of 3.
    pub fn is_index_stride_valid(&self) -> bool {
        self.data.indices.len() % 3 == 0
    }

    /// Check that all indices are within the valid vertex range.
    pub fn are_indices_in_range(&self) -> bool {
        let max_idx = self.vertex_count() as u32;
        self.data.indices.iter().all(|&i| i < max_idx)
    }

    /// Check that vertex normals have unit length (within epsilon). Zero
    /// normals from collapsed faces are accepted.
    pub fn are_normals_normalized(&self, epsilon: f32) -> bool {
        self.data.vertices.chunks_exact(MESH_STRIDE).all(|v| {
            let len = Vec3::new(v[3], v[4], v[5]).length();
            len == 0.0 || (len - 1.0).abs() <= epsilon
        })
    }

    /// Run all validation checks and return a list of error messages.
    pub fn validate_all(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.is_stride_valid() {
            errors.push(format!(
                "Vertex buffer length {} is not a multiple of 9",
                self.data.vertices.len()
            ));
        }

        if !self.is_index_stride_valid() {
            errors.push(format!(
                "Index buffer length {} is not a multiple of 3",
                self.data.indices.len()
            ));
        }

        if !self.are_indices_in_range() {
            let max_idx = self.vertex_count() as u32;
            let out_of_range: Vec<_> = self
                .data
                .indices
                .iter()
                .filter(|&&i| i >= max_idx)
                .take(5)
                .collect();
            errors.push(format!(
                "Indices out of range (vertex_count={}): {:?}",
                max_idx, out_of_range
            ));
        }

        if !self.are_normals_normalized(0.1) {
            errors.push("Some normals are not unit-length (epsilon=0.1)".to_string());
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::mesh::Quad;

    fn simple_triangle() -> MeshData {
        MeshData {
            vertices: vec![
                // vertex 0: pos(0,0,0) normal(0,0,1) color(0.5,0.5,0.5)
                0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.5, 0.5, 0.5,
                // vertex 1: pos(1,0,0) normal(0,0,1) color(0.5,0.5,0.5)
                1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.5, 0.5, 0.5,
                // vertex 2: pos(0,1,0) normal(0,0,1) color(0.5,0.5,0.5)
                0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.5, 0.5, 0.5,
            ],
            indices: vec![0, 1, 2],
        }
    }

    fn open_square() -> QuadMesh {
        QuadMesh::from_parts(
            vec![Vec3::ZERO, Vec3::X, Vec3::new(1.0, 1.0, 0.0), Vec3::Y],
            vec![Quad::new(0, 1, 2, 3)],
        )
        .unwrap()
    }

    #[test]
    fn test_cuboid_is_valid_and_closed() {
        let mesh = QuadMesh::default();
        let v = MeshValidator::new(&mesh);
        assert!(v.validate_all().is_empty());
        assert!(v.is_closed());
        assert!((v.total_area() - 24.0).abs() < 1e-5);
        assert!(v.assert_dimensions_approx([2.0, 2.0, 2.0], 1e-5));
    }

    #[test]
    fn test_open_square_reported() {
        let mesh = open_square();
        let v = MeshValidator::new(&mesh);
        assert_eq!(v.open_edges().len(), 4);
        assert!(!v.is_closed());
        assert!(v.validate_all().iter().any(|e| e.contains("not closed")));
    }

    #[test]
    fn test_flipped_face_is_duplicate_edge() {
        let mut mesh = QuadMesh::default();
        // Reverse the winding of +Z
        mesh.faces[5] = Quad::new(6, 7, 5, 4);
        let v = MeshValidator::new(&mesh);
        assert!(!v.duplicate_edges().is_empty());
        assert!(!v.validate_all().is_empty());
    }

    #[test]
    fn test_fresh_extrusion_is_valid() {
        let mut mesh = QuadMesh::default();
        mesh.extrude_face_at(2);
        let v = MeshValidator::new(&mesh);
        assert!(v.validate_all().is_empty());
        assert!(v.is_closed());
        assert_eq!(v.collapsed_faces(1e-6), vec![6, 7, 8, 9]);
    }

    #[test]
    fn test_t_junction_is_open_but_closed_geometrically() {
        let mut mesh = QuadMesh::default();
        mesh.subdivide_face_at(0);
        let v = MeshValidator::new(&mesh);
        assert!(!v.open_edges().is_empty());
        assert!(v.validate_all().is_empty());
    }

    #[test]
    fn test_render_stride_invalid() {
        let bad = MeshData {
            vertices: vec![0.0; 10], // not multiple of 9
            indices: vec![],
        };
        let v = RenderValidator::new(&bad);
        assert!(!v.is_stride_valid());
        assert!(v.validate_all().iter().any(|e| e.contains("multiple of 9")));
    }

    #[test]
    fn test_render_indices_out_of_range() {
        let bad = MeshData {
            vertices: vec![0.0; 9], // 1 vertex
            indices: vec![0, 1, 2], // indices 1,2 are out of range
        };
        let v = RenderValidator::new(&bad);
        assert!(!v.are_indices_in_range());
    }

    #[test]
    fn test_render_normals() {
        let mesh = simple_triangle();
        let v = RenderValidator::new(&mesh);
        assert_eq!(v.vertex_count(), 3);
        assert_eq!(v.triangle_count(), 1);
        assert!(v.are_normals_normalized(0.01));
        assert!(v.validate_all().is_empty());

        let bad = MeshData {
            vertices: vec![0.0, 0.0, 0.0, 0.0, 0.0, 5.0, 0.5, 0.5, 0.5],
            indices: vec![0],
        };
        assert!(!RenderValidator::new(&bad).are_normals_normalized(0.01));
    }
}
