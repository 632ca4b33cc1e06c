// ground/mesh.rs
//
// Fixed-layout vertex/index buffers shared with renderer and collision
// consumers. Buffers are allocated once and only repopulated afterwards;
// normal and bounds recomputation is explicit because most frames only
// shift vertex positions.

use glam::Vec3;

/// Triangle-list mesh buffers.
pub struct MeshData {
    pub positions: Vec<Vec3>,
    pub indices: Vec<u32>,
    pub normals: Vec<Vec3>,
    bounds_min: Vec3,
    bounds_max: Vec3,
}

impl MeshData {
    /// Allocate zeroed buffers for a fixed vertex/index layout.
    pub fn with_counts(vertex_count: usize, index_count: usize) -> Self {
        debug_assert_eq!(index_count % 3, 0);
        Self {
            positions: vec![Vec3::ZERO; vertex_count],
            indices: vec![0; index_count],
            normals: vec![Vec3::ZERO; vertex_count],
            bounds_min: Vec3::ZERO,
            bounds_max: Vec3::ZERO,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Area-weighted vertex normals. Degenerate (zero-area) triangles
    /// contribute nothing, so suppressed wall geometry stays harmless.
    pub fn recalculate_normals(&mut self) {
        self.normals.fill(Vec3::ZERO);

        for tri in self.indices.chunks_exact(3) {
            let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let edge1 = self.positions[b] - self.positions[a];
            let edge2 = self.positions[c] - self.positions[a];
            let face = edge1.cross(edge2);
            self.normals[a] += face;
            self.normals[b] += face;
            self.normals[c] += face;
        }

        for normal in &mut self.normals {
            *normal = normal.normalize_or_zero();
        }
    }

    /// Axis-aligned bounds over all vertex positions.
    pub fn recalculate_bounds(&mut self) {
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        for p in &self.positions {
            min = min.min(*p);
            max = max.max(*p);
        }
        if self.positions.is_empty() {
            min = Vec3::ZERO;
            max = Vec3::ZERO;
        }
        self.bounds_min = min;
        self.bounds_max = max;
    }

    pub fn bounds(&self) -> (Vec3, Vec3) {
        (self.bounds_min, self.bounds_max)
    }

    /// Flat position floats (x, y, z per vertex) for renderer upload.
    pub fn positions_raw(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Flat normal floats for renderer upload.
    pub fn normals_raw(&self) -> &[f32] {
        bytemuck::cast_slice(&self.normals)
    }
}
