//! Pending transforms and commit

use glam::Mat4;

use super::QuadMesh;

impl QuadMesh {
    /// Set the pending whole-object transform.
    ///
    /// Replaces any previous pending transform; callers recompute the full drag
    /// transform from the drag start on every move.
    pub fn apply_transform(&mut self, transform: Mat4) {
        self.active_transform = transform;
        self.update_information(false);
        self.version += 1;
    }

    /// Set the pending transform of a single face. Only the face's four corners
    /// are displaced by it. `None` is a no-op.
    ///
    /// Panics if `face` is out of range; face indices must be re-queried after
    /// any topology change.
    pub fn apply_face_transform(&mut self, face: Option<usize>, transform: Mat4) {
        let Some(face) = face else {
            return;
        };
        assert!(
            face < self.faces.len(),
            "face index {face} out of range ({} faces)",
            self.faces.len()
        );
        self.active_face = Some(face);
        self.active_face_transform = transform;
        self.update_information(false);
        self.version += 1;
    }

    /// Whether a transform or an active face is waiting to be committed
    pub fn has_pending(&self) -> bool {
        self.active_face.is_some() || self.active_transform != Mat4::IDENTITY
    }

    pub fn active_transform(&self) -> Mat4 {
        self.active_transform
    }

    /// Face currently targeted by the pending face transform
    pub fn active_face(&self) -> Option<usize> {
        self.active_face
    }

    pub fn active_face_transform(&self) -> Mat4 {
        self.active_face_transform
    }

    /// Bake pending transforms into the vertex positions and reset them.
    ///
    /// Returns false, leaving the vertices untouched, when nothing is pending.
    pub fn commit_transform(&mut self) -> bool {
        if !self.has_pending() {
            return false;
        }
        self.vertices = self.world_vertices();
        self.active_transform = Mat4::IDENTITY;
        self.active_face = None;
        self.active_face_transform = Mat4::IDENTITY;
        self.update_information(true);
        self.version += 1;
        tracing::debug!(
            "Committed transform ({} vertices, {} faces)",
            self.vertices.len(),
            self.faces.len()
        );
        true
    }
}
