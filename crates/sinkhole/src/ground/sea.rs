// ground/sea.rs
//
// Background sea: a zig-zag equilateral triangle strip built once, then
// continuously deformed by 2D coherent noise. Every vertex keeps an
// immutable base position; the rendered position is base plus a
// time-varying height and a small horizontal sway.

use glam::Vec3;
use noise::{NoiseFn, Perlin};
use serde::{Deserialize, Serialize};

use super::mesh::MeshData;

/// Sea grid and animation parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeaConfig {
    /// Grid columns (vertices along x per row).
    pub columns: u32,
    /// Grid rows.
    pub rows: u32,
    /// Triangle edge length.
    pub edge_size: f32,
    /// Noise frequency applied to vertex coordinates.
    pub smooth: f32,
    /// Height amplitude of the waves.
    pub smooth_scale: f32,
    /// How fast the noise field scrolls.
    pub animation_speed: f32,
    /// Horizontal sway amplitude.
    pub sway: f32,
}

impl Default for SeaConfig {
    fn default() -> Self {
        Self {
            columns: 10,
            rows: 30,
            edge_size: 1.5,
            smooth: 0.3,
            smooth_scale: 0.4,
            animation_speed: 1.0,
            sway: 0.6,
        }
    }
}

impl SeaConfig {
    /// Parse a config from a JSON string.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

pub struct SeaMesh {
    mesh: MeshData,
    /// Immutable flat-grid positions the deformation is relative to.
    base: Vec<Vec3>,
    config: SeaConfig,
    perlin: Perlin,
    offset: f32,
}

impl SeaMesh {
    pub fn new(config: SeaConfig, seed: u32) -> Self {
        let (positions, indices) = build_strip(&config);
        let mut mesh = MeshData::with_counts(positions.len(), indices.len());
        mesh.positions.copy_from_slice(&positions);
        mesh.indices.copy_from_slice(&indices);
        mesh.recalculate_normals();
        mesh.recalculate_bounds();

        Self {
            mesh,
            base: positions,
            config,
            perlin: Perlin::new(seed),
            offset: 0.0,
        }
    }

    /// Advance the animation and redeform every vertex. Normals are
    /// recomputed each call since the surface changes continuously.
    pub fn tick(&mut self, dt: f32) {
        self.offset += self.config.animation_speed * dt;
        let s = self.config.smooth;
        let offset = self.offset;
        let perlin = &self.perlin;
        let amplitude = self.config.smooth_scale;
        let sway_amp = self.config.sway;

        for (position, base) in self.mesh.positions.iter_mut().zip(&self.base) {
            let height = sample(perlin, base.x * s + offset, base.z * s + offset) * amplitude;
            let sway =
                sample(perlin, base.x * s - offset * 0.3, base.z * s - offset * 0.3) * sway_amp;
            *position = Vec3::new(base.x + sway, height, base.z - sway);
        }

        self.mesh.recalculate_normals();
    }

    pub fn mesh(&self) -> &MeshData {
        &self.mesh
    }

    pub fn config(&self) -> &SeaConfig {
        &self.config
    }
}

/// Perlin sample remapped from [-1, 1] to [0, 1].
fn sample(perlin: &Perlin, x: f32, z: f32) -> f32 {
    (perlin.get([x as f64, z as f64]) as f32) * 0.5 + 0.5
}

/// Tessellate the zig-zag strip: rows of alternating-orientation
/// equilateral triangles, each row's start shifted by half an edge so the
/// triangles tile. Vertices are duplicated per triangle (flat shading).
fn build_strip(config: &SeaConfig) -> (Vec<Vec3>, Vec<u32>) {
    let mut positions = Vec::new();
    let mut indices = Vec::new();

    let edge = config.edge_size;
    // Height of an equilateral triangle with this edge.
    let row_offset = (edge * edge - edge * edge * 0.25).sqrt();

    let mut sign = 1.0_f32;
    let mut row_start = Vec3::ZERO;

    for i in 0..config.rows {
        for j in 0..config.columns {
            if i + 1 < config.rows && j + 1 < config.columns {
                let x = j as f32 * edge;
                let at = |dx: f32, dz: f32| row_start + Vec3::new(x + dx, 0.0, dz);

                if sign > 0.0 {
                    push_triangle(
                        &mut positions,
                        &mut indices,
                        at(0.0, 0.0),
                        at(edge * 0.5, row_offset),
                        at(edge, 0.0),
                    );
                    push_triangle(
                        &mut positions,
                        &mut indices,
                        at(edge, 0.0),
                        at(edge * 0.5, row_offset),
                        at(edge * 1.5, row_offset),
                    );
                } else {
                    push_triangle(
                        &mut positions,
                        &mut indices,
                        at(0.0, 0.0),
                        at(-edge * 0.5, row_offset),
                        at(edge * 0.5, row_offset),
                    );
                    push_triangle(
                        &mut positions,
                        &mut indices,
                        at(0.0, 0.0),
                        at(edge * 0.5, row_offset),
                        at(edge, 0.0),
                    );
                }
            }
        }

        row_start += Vec3::new(edge * 0.5 * sign, 0.0, row_offset);
        sign = -sign;
    }

    (positions, indices)
}

fn push_triangle(positions: &mut Vec<Vec3>, indices: &mut Vec<u32>, a: Vec3, b: Vec3, c: Vec3) {
    let base = positions.len() as u32;
    positions.extend_from_slice(&[a, b, c]);
    indices.extend_from_slice(&[base, base + 1, base + 2]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_counts_match_grid() {
        let config = SeaConfig::default();
        let sea = SeaMesh::new(config.clone(), 7);
        let cells = (config.rows - 1) as usize * (config.columns - 1) as usize;
        assert_eq!(sea.mesh().vertex_count(), cells * 6);
        assert_eq!(sea.mesh().triangle_count(), cells * 2);
    }

    #[test]
    fn tick_preserves_buffer_sizes() {
        let mut sea = SeaMesh::new(SeaConfig::default(), 7);
        let verts = sea.mesh().vertex_count();
        let indices = sea.mesh().indices.len();
        for _ in 0..10 {
            sea.tick(0.016);
        }
        assert_eq!(sea.mesh().vertex_count(), verts);
        assert_eq!(sea.mesh().indices.len(), indices);
    }

    #[test]
    fn deformation_moves_vertices_but_not_base() {
        let mut sea = SeaMesh::new(SeaConfig::default(), 7);
        let base = sea.base.clone();
        sea.tick(0.5);
        sea.tick(0.5);
        assert_eq!(sea.base, base);
        let moved = sea
            .mesh()
            .positions
            .iter()
            .zip(&base)
            .any(|(p, b)| p.distance_squared(*b) > 1e-8);
        assert!(moved);
    }

    #[test]
    fn same_seed_ticks_identically() {
        let mut a = SeaMesh::new(SeaConfig::default(), 99);
        let mut b = SeaMesh::new(SeaConfig::default(), 99);
        for _ in 0..5 {
            a.tick(0.016);
            b.tick(0.016);
        }
        assert_eq!(a.mesh().positions, b.mesh().positions);
    }

    #[test]
    fn heights_stay_within_amplitude() {
        let mut sea = SeaMesh::new(SeaConfig::default(), 7);
        for _ in 0..20 {
            sea.tick(0.1);
        }
        let amplitude = sea.config().smooth_scale;
        for p in &sea.mesh().positions {
            assert!(p.y >= -1e-4 && p.y <= amplitude + 1e-4, "height {}", p.y);
        }
    }

    #[test]
    fn sea_config_from_json() {
        let config = SeaConfig::from_json(
            r#"{ "columns": 4, "rows": 5, "edge_size": 1.0,
                 "smooth": 0.2, "smooth_scale": 0.3,
                 "animation_speed": 2.0, "sway": 0.5 }"#,
        )
        .unwrap();
        assert_eq!(config.columns, 4);
        assert!((config.animation_speed - 2.0).abs() < 1e-6);
    }
}
