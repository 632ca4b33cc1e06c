// ground/hole.rs
//
// Hole wall template: a vertical cylinder ring in hole-local space whose
// vertices get translated to the hole's position on every stage rebuild,
// plus the four rim chains the collar triangulation fans out from.

use glam::Vec3;

/// Tolerance for assigning rim vertices to quadrants. Vertices sitting on
/// an axis belong to both neighboring chains so the collar fans meet.
const QUADRANT_EPS: f32 = 0.01;

/// Immutable hole geometry shared by both stage meshes.
pub struct HoleTemplate {
    /// Wall vertices, hole-local. Rim at y = 0, bottom ring at y = -depth.
    pub vertices: Vec<Vec3>,
    /// Wall triangle indices into `vertices`.
    pub indices: Vec<u32>,
    /// Rim chains per quadrant: bottom-left, bottom-right, top-right,
    /// top-left. Each is sorted along x so consecutive vertices wind
    /// consistently when fanned against its stage-frame corner.
    pub chains: [Vec<Vec3>; 4],
}

impl HoleTemplate {
    /// Build a cylindrical wall of `segments` quads. Counts below 3
    /// cannot form a ring and are clamped up.
    pub fn cylinder(diameter: f32, depth: f32, segments: usize) -> Self {
        let segments = segments.max(3);
        let radius = diameter * 0.5;

        let mut vertices = Vec::with_capacity(segments * 2);
        for i in 0..segments {
            let theta = std::f32::consts::TAU * i as f32 / segments as f32;
            let (sin, cos) = theta.sin_cos();
            vertices.push(Vec3::new(radius * cos, 0.0, radius * sin));
            vertices.push(Vec3::new(radius * cos, -depth, radius * sin));
        }

        let mut indices = Vec::with_capacity(segments * 6);
        for i in 0..segments {
            let j = (i + 1) % segments;
            let (top_i, bottom_i) = (2 * i as u32, 2 * i as u32 + 1);
            let (top_j, bottom_j) = (2 * j as u32, 2 * j as u32 + 1);
            indices.extend_from_slice(&[top_i, top_j, bottom_i]);
            indices.extend_from_slice(&[top_j, bottom_j, bottom_i]);
        }

        let rim: Vec<Vec3> = vertices.iter().copied().filter(|v| v.y > -0.01).collect();
        let chains = quadrant_chains(&rim);

        Self {
            vertices,
            indices,
            chains,
        }
    }

    pub fn wall_vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn wall_index_count(&self) -> usize {
        self.indices.len()
    }

    /// Total collar vertices appended to a stage mesh.
    pub fn collar_vertex_count(&self) -> usize {
        self.chains.iter().map(Vec::len).sum()
    }

    /// Total collar fan triangles per stage mesh.
    pub fn collar_triangle_count(&self) -> usize {
        self.chains.iter().map(|chain| chain.len() - 1).sum()
    }
}

/// Split rim vertices into the four quadrant chains and sort each along
/// its sweep direction: the bottom chains run x-ascending, the top chains
/// x-descending, so every chain traces its quarter arc in winding order.
fn quadrant_chains(rim: &[Vec3]) -> [Vec<Vec3>; 4] {
    let mut bottom_left = Vec::new();
    let mut bottom_right = Vec::new();
    let mut top_right = Vec::new();
    let mut top_left = Vec::new();

    for &v in rim {
        if v.x <= QUADRANT_EPS && v.z <= QUADRANT_EPS {
            push_unique(&mut bottom_left, v);
        }
        if v.x >= -QUADRANT_EPS && v.z <= QUADRANT_EPS {
            push_unique(&mut bottom_right, v);
        }
        if v.x >= -QUADRANT_EPS && v.z >= -QUADRANT_EPS {
            push_unique(&mut top_right, v);
        }
        if v.x <= QUADRANT_EPS && v.z >= -QUADRANT_EPS {
            push_unique(&mut top_left, v);
        }
    }

    bottom_left.sort_by(|a, b| a.x.total_cmp(&b.x));
    bottom_right.sort_by(|a, b| a.x.total_cmp(&b.x));
    top_right.sort_by(|a, b| b.x.total_cmp(&a.x));
    top_left.sort_by(|a, b| b.x.total_cmp(&a.x));

    [bottom_left, bottom_right, top_right, top_left]
}

fn push_unique(chain: &mut Vec<Vec3>, v: Vec3) {
    if !chain.iter().any(|c| c.distance_squared(v) < 1e-10) {
        chain.push(v);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cylinder_counts() {
        let template = HoleTemplate::cylinder(1.0, 1.2, 24);
        assert_eq!(template.wall_vertex_count(), 48);
        assert_eq!(template.wall_index_count(), 24 * 6);
    }

    #[test]
    fn undersized_segment_count_clamped_to_ring_minimum() {
        let template = HoleTemplate::cylinder(1.0, 1.2, 1);
        assert_eq!(template.wall_vertex_count(), 6);
        assert_eq!(template.wall_index_count(), 3 * 6);
        for chain in &template.chains {
            assert!(!chain.is_empty());
        }
    }

    #[test]
    fn rim_sits_at_zero_height() {
        let template = HoleTemplate::cylinder(1.0, 1.2, 16);
        for chain in &template.chains {
            for v in chain {
                assert_eq!(v.y, 0.0);
                assert!((v.length() - 0.5).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn every_chain_has_at_least_two_vertices() {
        let template = HoleTemplate::cylinder(1.0, 1.2, 24);
        for chain in &template.chains {
            assert!(chain.len() >= 2);
        }
    }

    #[test]
    fn chains_are_sorted_for_winding() {
        let template = HoleTemplate::cylinder(1.0, 1.2, 24);
        let [bottom_left, bottom_right, top_right, top_left] = &template.chains;
        assert!(bottom_left.windows(2).all(|w| w[0].x <= w[1].x));
        assert!(bottom_right.windows(2).all(|w| w[0].x <= w[1].x));
        assert!(top_right.windows(2).all(|w| w[0].x >= w[1].x));
        assert!(top_left.windows(2).all(|w| w[0].x >= w[1].x));
    }

    #[test]
    fn axis_vertices_shared_between_chains() {
        // With a segment count divisible by 4 the rim has vertices exactly
        // on both axes; each must appear in two neighboring chains.
        let template = HoleTemplate::cylinder(1.0, 1.2, 24);
        let [bottom_left, bottom_right, _, _] = &template.chains;
        let shared = bottom_left
            .iter()
            .any(|v| bottom_right.iter().any(|w| v.distance_squared(*w) < 1e-10));
        assert!(shared);
    }
}
