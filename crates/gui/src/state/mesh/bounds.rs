//! Cached bounding volumes

use glam::Vec3;

use super::QuadMesh;
use crate::viewport::picking::Aabb;

impl QuadMesh {
    /// Refresh cached bounds.
    ///
    /// With `commit` the local box and its corners are recomputed from the
    /// vertex positions; call it after any topology or vertex change. The world
    /// box (pending transforms applied) is always recomputed.
    pub fn update_information(&mut self, commit: bool) {
        if commit {
            self.local_bounds = Aabb::from_points(self.vertices.iter().copied());
            self.local_corners = self.local_bounds.corners();
        }
        self.world_bounds = Aabb::from_points(self.world_vertices());
    }

    /// Bounds of the committed vertices
    pub fn local_bounds(&self) -> Aabb {
        self.local_bounds
    }

    pub fn local_corners(&self) -> [Vec3; 8] {
        self.local_corners
    }

    /// Local bounding box corners carried through the pending object transform
    pub fn transformed_corners(&self) -> [Vec3; 8] {
        self.local_corners
            .map(|c| self.active_transform.transform_point3(c))
    }

    /// Bounds of the vertices as currently displayed
    pub fn world_bounds(&self) -> Aabb {
        self.world_bounds
    }
}
