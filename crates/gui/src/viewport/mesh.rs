use glam::Vec3;

/// Floats per `MeshData` vertex
pub const MESH_STRIDE: usize = 9;
/// Floats per `LineMeshData` vertex
pub const LINE_STRIDE: usize = 7;

/// CPU-side mesh data: interleaved [pos.x, pos.y, pos.z, norm.x, norm.y, norm.z, r, g, b]
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    /// 9 floats per vertex: position(3) + normal(3) + color(3)
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / MESH_STRIDE
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Position of vertex `i`
    pub fn position(&self, i: usize) -> Vec3 {
        let o = i * MESH_STRIDE;
        Vec3::new(self.vertices[o], self.vertices[o + 1], self.vertices[o + 2])
    }

    /// Append a flat-shaded quad as two triangles (0,1,2) and (0,2,3)
    pub fn push_quad(&mut self, corners: &[Vec3; 4], normal: Vec3, color: [f32; 3]) {
        let base = self.vertex_count() as u32;
        for p in corners {
            push_vert(&mut self.vertices, *p, normal, color);
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
}

/// Lines mesh: interleaved [pos.x, pos.y, pos.z, r, g, b, a]
#[derive(Clone, Debug, Default)]
pub struct LineMeshData {
    /// 7 floats per vertex: position(3) + color(4)
    pub vertices: Vec<f32>,
}

impl LineMeshData {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / LINE_STRIDE
    }

    pub fn push_line(&mut self, a: Vec3, b: Vec3, color: [f32; 4]) {
        push_line_vert(&mut self.vertices, a, color);
        push_line_vert(&mut self.vertices, b, color);
    }

    pub fn extend(&mut self, other: &LineMeshData) {
        self.vertices.extend_from_slice(&other.vertices);
    }
}

// ── Grid and axes ────────────────────────────────────────────

/// Grid in the XY plane (Z is up)
pub fn grid(range: i32, cell_size: f32, opacity: f32) -> LineMeshData {
    let mut lines = LineMeshData::default();
    let grid_color = [0.25_f32, 0.25, 0.25, opacity];
    let origin_color_x = [0.5_f32, 0.2, 0.2, opacity * 0.7];
    let origin_color_y = [0.2_f32, 0.5, 0.2, opacity * 0.7];

    let extent = range as f32 * cell_size;

    for i in -range..=range {
        let f = i as f32 * cell_size;
        let color = if i == 0 { origin_color_y } else { grid_color };
        // Line along Y
        lines.push_line(Vec3::new(f, -extent, 0.0), Vec3::new(f, extent, 0.0), color);

        let color = if i == 0 { origin_color_x } else { grid_color };
        // Line along X
        lines.push_line(Vec3::new(-extent, f, 0.0), Vec3::new(extent, f, 0.0), color);
    }

    lines
}

pub fn axes(length: f32) -> LineMeshData {
    let mut lines = LineMeshData::default();
    let r = [0.9_f32, 0.2, 0.2, 1.0];
    let g = [0.2_f32, 0.8, 0.2, 1.0];
    let b = [0.2_f32, 0.3, 0.9, 1.0];

    lines.push_line(Vec3::ZERO, Vec3::X * length, r);
    lines.push_line(Vec3::ZERO, Vec3::Y * length, g);
    lines.push_line(Vec3::ZERO, Vec3::Z * length, b);

    lines
}

// ── Helpers ──────────────────────────────────────────────────

fn push_vert(v: &mut Vec<f32>, p: Vec3, n: Vec3, c: [f32; 3]) {
    v.extend_from_slice(&[p.x, p.y, p.z, n.x, n.y, n.z, c[0], c[1], c[2]]);
}

fn push_line_vert(v: &mut Vec<f32>, p: Vec3, c: [f32; 4]) {
    v.extend_from_slice(&[p.x, p.y, p.z, c[0], c[1], c[2], c[3]]);
}
