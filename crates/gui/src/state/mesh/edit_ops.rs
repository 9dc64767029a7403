//! Topology edits: subdivide and extrude

use glam::{Mat4, Vec3};

use super::{Quad, QuadMesh};
use crate::viewport::picking::Ray;

/// Face picked for an extrusion drag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtrudeTarget {
    /// Lid face (keeps the index of the extruded face)
    pub face: usize,
    /// World-space point under the cursor when the extrusion started
    pub point: Vec3,
    /// World-space lid normal, the axis the lid slides along
    pub normal: Vec3,
}

impl QuadMesh {
    /// Split the face under `ray` into four quads.
    ///
    /// Pending transforms are committed first. Returns the hit face index,
    /// or None (mesh untouched apart from the commit) on a miss.
    pub fn subdivide_face(&mut self, ray: &Ray) -> Option<usize> {
        self.commit_transform();
        let hit = self.intersect(ray)?;
        self.subdivide_face_at(hit.face);
        Some(hit.face)
    }

    /// Split face `face` into four quads around its centroid.
    ///
    /// The first quad takes the original slot, the other three are appended.
    /// Edge midpoints already created by a neighbour are reused.
    pub fn subdivide_face_at(&mut self, face: usize) {
        let [a, b, c, d] = self.faces[face].indices();
        let center = self.push_vertex(self.face_centroid(face));
        let m_ab = self.edge_midpoint(a, b);
        let m_bc = self.edge_midpoint(b, c);
        let m_cd = self.edge_midpoint(c, d);
        let m_da = self.edge_midpoint(d, a);

        self.faces[face] = Quad::new(a, m_ab, center, m_da);
        self.faces.push(Quad::new(m_ab, b, m_bc, center));
        self.faces.push(Quad::new(center, m_bc, c, m_cd));
        self.faces.push(Quad::new(m_da, center, m_cd, d));

        self.update_information(true);
        self.version += 1;
        tracing::debug!(
            "Subdivided face {face} ({} vertices, {} faces)",
            self.vertices.len(),
            self.faces.len()
        );
    }

    /// Midpoint vertex of edge `{a, b}`, created on first use
    fn edge_midpoint(&mut self, a: usize, b: usize) -> usize {
        let key = (a.min(b), a.max(b));
        if let Some(&mid) = self.split_edges.get(&key) {
            return mid;
        }
        let mid = self.push_vertex((self.vertices[a] + self.vertices[b]) * 0.5);
        self.split_edges.insert(key, mid);
        mid
    }

    /// Extrude the face under `ray` and make its lid the active face.
    ///
    /// The lid starts coincident with the original face; the caller drags it
    /// out with `apply_face_transform`. Returns None on a miss.
    pub fn gen_extrude_face(&mut self, ray: &Ray) -> Option<ExtrudeTarget> {
        self.commit_transform();
        let hit = self.intersect(ray)?;
        self.extrude_face_at(hit.face);
        Some(ExtrudeTarget {
            face: hit.face,
            point: hit.point,
            normal: self.world_face_normal(hit.face),
        })
    }

    /// Duplicate the corners of `face`, rewire the face onto the copies and
    /// stitch four side quads between the old and new rims.
    pub fn extrude_face_at(&mut self, face: usize) {
        let old = self.faces[face].indices();
        let new = old.map(|i| self.push_vertex(self.vertices[i]));

        self.faces[face] = Quad::new(new[0], new[1], new[2], new[3]);
        for i in 0..4 {
            let j = (i + 1) % 4;
            self.faces.push(Quad::new(old[i], old[j], new[j], new[i]));
        }

        self.active_face = Some(face);
        self.active_face_transform = Mat4::IDENTITY;
        self.update_information(true);
        self.version += 1;
        tracing::debug!(
            "Extruded face {face} ({} vertices, {} faces)",
            self.vertices.len(),
            self.faces.len()
        );
    }
}
