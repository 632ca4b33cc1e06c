// ground/generator.rs
//
// Maintains the renderable/collidable geometry for the two playground
// stages, each with a rectangular cutout tracking the hole, plus the
// connecting path bridging the gap between them. Buffers are allocated
// once and repopulated in place; only vertex positions (and the wall
// translation) change between frames.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::hole::HoleTemplate;
use super::mesh::MeshData;
use crate::api::types::StagePhase;

pub const PLAYGROUND_WIDTH: f32 = 5.5;
pub const PLAYGROUND_HEIGHT: f32 = 9.5;
/// Z-gap between the far edge of stage one and the near edge of stage two.
pub const GROUNDS_OFFSET: f32 = 6.0;
/// Where the hole starts on a freshly initialized stage.
pub const HOLE_INITIAL_OFFSET_Z: f32 = 0.6;
pub const HOLE_DIAMETER: f32 = 1.0;

pub fn playground_center() -> f32 {
    PLAYGROUND_WIDTH * 0.5
}

/// Triangulation of the 4x4 stage frame: 8 quads tiling the stage around
/// the hole's bounding box. Constant because the grid topology never
/// changes; only the vertex positions move.
const FRAME_INDICES: [u32; 48] = [
    0, 1, 4, 1, 5, 4, 1, 2, 5, 2, 6, 5, 2, 3, 6, 3, 7, 6, // left column
    4, 5, 8, 5, 9, 8, 6, 7, 10, 7, 11, 10, // middle column, above and below the hole
    8, 9, 12, 9, 13, 12, 9, 10, 13, 10, 14, 13, 10, 11, 14, 11, 15, 14, // right column
];

/// Frame corner each collar quadrant fans against: the grid vertex
/// nearest to that quadrant of the hole.
const COLLAR_CORNERS: [u32; 4] = [5, 9, 10, 6];

const FRAME_VERTEX_COUNT: usize = 16;
const FRAME_INDEX_COUNT: usize = FRAME_INDICES.len();

/// Hole wall tessellation parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundConfig {
    /// Quads around the hole wall cylinder.
    #[serde(default = "default_segments")]
    pub hole_segments: usize,
    /// Wall drop below ground level.
    #[serde(default = "default_depth")]
    pub hole_depth: f32,
}

fn default_segments() -> usize {
    24
}

fn default_depth() -> f32 {
    1.2
}

impl Default for GroundConfig {
    fn default() -> Self {
        Self {
            hole_segments: default_segments(),
            hole_depth: default_depth(),
        }
    }
}

impl GroundConfig {
    /// Parse a config from a JSON string.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

enum WallMode {
    /// Wall vertices translated to the hole position.
    Normal,
    /// Same index range, origin-collapsed vertices: zero-area triangles
    /// that keep the buffer layout fixed while the wall is hidden.
    Degenerate,
}

pub struct GroundGenerator {
    template: HoleTemplate,
    first: MeshData,
    second: MeshData,
    path: MeshData,
    hole_half: f32,
    need_recalculate_normals: bool,
    stop_vertical_mesh_gen: bool,
    initialized: bool,
}

impl GroundGenerator {
    pub fn new(config: GroundConfig) -> Self {
        let template = HoleTemplate::cylinder(HOLE_DIAMETER, config.hole_depth, config.hole_segments);

        let vertex_count =
            FRAME_VERTEX_COUNT + template.wall_vertex_count() + template.collar_vertex_count();
        let index_count =
            FRAME_INDEX_COUNT + template.wall_index_count() + template.collar_triangle_count() * 3;

        Self {
            first: MeshData::with_counts(vertex_count, index_count),
            second: MeshData::with_counts(vertex_count, index_count),
            path: MeshData::with_counts(8, 12),
            template,
            hole_half: HOLE_DIAMETER * 0.5,
            need_recalculate_normals: true,
            stop_vertical_mesh_gen: false,
            initialized: false,
        }
    }

    /// Rebuild both stages and the connecting path for a fresh level.
    /// Returns the hole's start position for the caller to adopt.
    pub fn init_playground(&mut self) -> Vec3 {
        let start = Vec3::new(playground_center(), 0.0, HOLE_INITIAL_OFFSET_Z);
        self.initialized = true;
        log::debug!("playground init, hole at {start}");

        self.need_recalculate_normals = true;
        self.generate_stage(0, start, WallMode::Normal);

        self.need_recalculate_normals = true;
        self.update_connecting_path(start);

        // The hole starts on stage one, so stage two gets no visible wall.
        self.need_recalculate_normals = true;
        self.generate_stage(1, start, WallMode::Degenerate);

        self.need_recalculate_normals = true;
        start
    }

    /// Rebuild the stage meshes affected by the current phase:
    /// only the stage the hole is on, or both while transitioning.
    pub fn update_ground(&mut self, hole: Vec3, phase: StagePhase) {
        if !self.initialized {
            log::warn!("update_ground called before init_playground");
            return;
        }

        let wall = self.wall_mode();
        match phase {
            StagePhase::First => self.generate_stage(0, hole, wall),
            StagePhase::Second => self.generate_stage(1, hole, wall),
            _ => {
                self.generate_stage(0, hole, self.wall_mode());
                self.need_recalculate_normals = true;
                self.generate_stage(1, hole, self.wall_mode());
            }
        }
    }

    /// Rebuild the 8-vertex path strip between the stages. Cheap enough
    /// to redo wholesale, normals included.
    pub fn update_connecting_path(&mut self, hole: Vec3) {
        let center = playground_center();
        let half = self.hole_half;
        let near = PLAYGROUND_HEIGHT;
        let far = PLAYGROUND_HEIGHT + GROUNDS_OFFSET;
        let z_lo = (hole.z - half).clamp(near, far);
        let z_hi = (hole.z + half).clamp(near, far);

        let positions = &mut self.path.positions;
        positions[0] = Vec3::new(center - half, 0.0, near);
        positions[1] = Vec3::new(center - half, 0.0, z_lo);
        positions[2] = Vec3::new(center - half, 0.0, z_hi);
        positions[3] = Vec3::new(center - half, 0.0, far);
        positions[4] = Vec3::new(center + half, 0.0, near);
        positions[5] = Vec3::new(center + half, 0.0, z_lo);
        positions[6] = Vec3::new(center + half, 0.0, z_hi);
        positions[7] = Vec3::new(center + half, 0.0, far);

        self.path
            .indices
            .copy_from_slice(&[0, 1, 4, 1, 5, 4, 2, 3, 6, 3, 7, 6]);

        self.path.recalculate_normals();
        self.path.recalculate_bounds();
    }

    /// Arm the deferred normal recalculation; the next stage rebuild pays
    /// the O(n) cost. Used on structural changes (init, transition edges).
    pub fn recalculate_normals(&mut self) {
        self.need_recalculate_normals = true;
    }

    /// Suppress the vertical wall geometry (degenerate triangles) while
    /// the hole crosses the gap between stages.
    pub fn set_stop_vertical_mesh_gen(&mut self, stop: bool) {
        self.stop_vertical_mesh_gen = stop;
    }

    pub fn stop_vertical_mesh_gen(&self) -> bool {
        self.stop_vertical_mesh_gen
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn first_ground(&self) -> &MeshData {
        &self.first
    }

    pub fn second_ground(&self) -> &MeshData {
        &self.second
    }

    pub fn connecting_path(&self) -> &MeshData {
        &self.path
    }

    pub fn hole_half(&self) -> f32 {
        self.hole_half
    }

    fn wall_mode(&self) -> WallMode {
        if self.stop_vertical_mesh_gen {
            WallMode::Degenerate
        } else {
            WallMode::Normal
        }
    }

    fn generate_stage(&mut self, stage: usize, hole: Vec3, wall: WallMode) {
        let z_offset = if stage == 0 {
            0.0
        } else {
            PLAYGROUND_HEIGHT + GROUNDS_OFFSET
        };
        let mesh = if stage == 0 {
            &mut self.first
        } else {
            &mut self.second
        };

        build_stage_mesh(&self.template, mesh, z_offset, hole, self.hole_half, wall);

        if self.need_recalculate_normals {
            mesh.recalculate_normals();
            mesh.recalculate_bounds();
            self.need_recalculate_normals = false;
        }
    }
}

impl Default for GroundGenerator {
    fn default() -> Self {
        Self::new(GroundConfig::default())
    }
}

/// Write one stage's full vertex/index layout in place.
fn build_stage_mesh(
    template: &HoleTemplate,
    mesh: &mut MeshData,
    z_offset: f32,
    hole: Vec3,
    hole_half: f32,
    wall: WallMode,
) {
    let z_near = z_offset;
    let z_far = PLAYGROUND_HEIGHT + z_offset;

    // Hole bounding box clamped to the stage rectangle on both axes, so
    // the cutout can never escape the stage no matter where the hole is.
    let left = (hole.x - hole_half).clamp(0.0, PLAYGROUND_WIDTH);
    let right = (hole.x + hole_half).clamp(0.0, PLAYGROUND_WIDTH);
    let near = (hole.z - hole_half).clamp(z_near, z_far);
    let far = (hole.z + hole_half).clamp(z_near, z_far);

    // 4x4 frame: columns at 0 / left / right / width, rows at
    // near-edge / hole-near / hole-far / far-edge.
    let columns = [0.0, left, right, PLAYGROUND_WIDTH];
    let rows = [z_near, near, far, z_far];
    for (c, &x) in columns.iter().enumerate() {
        for (r, &z) in rows.iter().enumerate() {
            mesh.positions[c * 4 + r] = Vec3::new(x, 0.0, z);
        }
    }
    mesh.indices[..FRAME_INDEX_COUNT].copy_from_slice(&FRAME_INDICES);

    // Vertical wall, translated to the hole or collapsed to the origin.
    let mut next_vertex = FRAME_VERTEX_COUNT;
    let mut next_index = FRAME_INDEX_COUNT;

    match wall {
        WallMode::Normal => {
            for &v in &template.vertices {
                mesh.positions[next_vertex] = v + hole;
                next_vertex += 1;
            }
        }
        WallMode::Degenerate => {
            for _ in &template.vertices {
                mesh.positions[next_vertex] = Vec3::ZERO;
                next_vertex += 1;
            }
        }
    }
    for &i in &template.indices {
        mesh.indices[next_index] = i + FRAME_VERTEX_COUNT as u32;
        next_index += 1;
    }

    // Collar: each quadrant chain is translated, z-clamped to the stage
    // span, and fan-triangulated against its nearest frame corner.
    for (chain, &corner) in template.chains.iter().zip(&COLLAR_CORNERS) {
        for (k, &v) in chain.iter().enumerate() {
            let mut p = v + hole;
            p.z = p.z.clamp(z_near, z_far);
            mesh.positions[next_vertex] = p;
            next_vertex += 1;

            if k > 0 {
                mesh.indices[next_index] = next_vertex as u32 - 2;
                mesh.indices[next_index + 1] = next_vertex as u32 - 1;
                mesh.indices[next_index + 2] = corner;
                next_index += 3;
            }
        }
    }

    debug_assert_eq!(next_vertex, mesh.vertex_count());
    debug_assert_eq!(next_index, mesh.indices.len());
}
