//! Render data cache management

use super::{build_bounds_lines, build_edge_lines, build_mesh_data, MeshStyle};
use crate::state::mesh::QuadMesh;
use crate::viewport::mesh::{LineMeshData, MeshData};

/// Cached render data, rebuilt when the mesh version or the style changes
pub struct MeshCache {
    mesh: MeshData,
    edges: LineMeshData,
    bounds: Option<LineMeshData>,
    version: u64,
    style: Option<MeshStyle>,
    rebuild_count: u64,
}

impl Default for MeshCache {
    fn default() -> Self {
        Self::new()
    }
}

impl MeshCache {
    pub fn new() -> Self {
        Self {
            mesh: MeshData::default(),
            edges: LineMeshData::default(),
            bounds: None,
            version: u64::MAX, // force first rebuild
            style: None,
            rebuild_count: 0,
        }
    }

    /// Check if cache is still valid
    pub fn is_valid(&self, mesh_version: u64, style: &MeshStyle) -> bool {
        self.version == mesh_version && self.style.as_ref() == Some(style)
    }

    pub fn rebuild(&mut self, mesh: &QuadMesh, style: &MeshStyle) {
        self.mesh = build_mesh_data(mesh, style);
        self.edges = build_edge_lines(mesh);
        self.bounds = build_bounds_lines(mesh);
        self.version = mesh.version();
        self.style = Some(*style);
        self.rebuild_count += 1;
    }

    /// Rebuild only if the mesh changed; returns whether a rebuild happened
    pub fn refresh(&mut self, mesh: &QuadMesh, style: &MeshStyle) -> bool {
        if self.is_valid(mesh.version(), style) {
            return false;
        }
        self.rebuild(mesh, style);
        true
    }

    pub fn mesh(&self) -> &MeshData {
        &self.mesh
    }

    pub fn edges(&self) -> &LineMeshData {
        &self.edges
    }

    pub fn bounds(&self) -> Option<&LineMeshData> {
        self.bounds.as_ref()
    }

    /// Version of the mesh the cache was built from
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Rebuild counter. Changes whenever the render data does, including
    /// style-only rebuilds where the mesh version stays the same.
    pub fn rebuild_count(&self) -> u64 {
        self.rebuild_count
    }
}

#[cfg(test)]
mod tests {
    use glam::{Mat4, Vec3};

    use super::*;

    #[test]
    fn test_cache_forces_first_rebuild() {
        let cache = MeshCache::new();
        assert!(!cache.is_valid(0, &MeshStyle::default()));
    }

    #[test]
    fn test_cache_follows_mesh_version() {
        let mut cache = MeshCache::new();
        let mut mesh = QuadMesh::default();
        let style = MeshStyle::default();

        assert!(cache.refresh(&mesh, &style));
        assert!(!cache.refresh(&mesh, &style));
        assert_eq!(cache.rebuild_count(), 1);

        mesh.apply_transform(Mat4::from_translation(Vec3::X));
        assert!(cache.refresh(&mesh, &style));
        assert!(cache.bounds().is_some());

        let recolored = MeshStyle {
            base: [1.0, 0.0, 0.0],
            ..style
        };
        assert!(cache.refresh(&mesh, &recolored));
        assert_eq!(cache.rebuild_count(), 3);
    }

    #[test]
    fn test_style_change_rebuilds_at_same_mesh_version() {
        let mut cache = MeshCache::new();
        let mesh = QuadMesh::default();
        let style = MeshStyle::default();
        cache.refresh(&mesh, &style);
        let generation = cache.rebuild_count();
        let version = cache.version();

        let recolored = MeshStyle {
            active_face: [0.0, 1.0, 0.0],
            ..style
        };
        assert!(cache.refresh(&mesh, &recolored));
        assert_eq!(cache.version(), version);
        assert_ne!(cache.rebuild_count(), generation);
        assert_eq!(cache.mesh().vertices.len(), 24 * 9);
    }
}
