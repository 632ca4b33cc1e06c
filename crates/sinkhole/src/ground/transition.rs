// ground/transition.rs
//
// Stage-transition state machine. Replaces a coroutine-style wait loop:
// the caller drives `step` once per fixed timestep until the hole has
// centered on stage one and crossed the gap onto stage two. Abortable at
// any point, leaving the mesh buffers fully rebuilt.

use glam::Vec3;

use super::generator::{
    playground_center, GroundGenerator, GROUNDS_OFFSET, HOLE_INITIAL_OFFSET_Z, PLAYGROUND_HEIGHT,
};
use crate::api::types::StagePhase;

/// Sideways speed while centering the hole on stage one (units/s).
pub const CENTERING_SPEED: f32 = 2.0;
/// Forward speed while crossing the gap (units/s).
pub const CROSSING_SPEED: f32 = 4.0;
/// Distance at which the hole snaps onto its target.
const SNAP_THRESHOLD: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPhase {
    /// Moving the hole x onto the playground center line.
    Centering,
    /// Moving the hole z across the gap, wall geometry suppressed.
    Crossing,
    Done,
}

/// Drives the hole from stage one to stage two over repeated fixed steps.
pub struct StageTransition {
    phase: TransitionPhase,
    target_z: f32,
}

impl StageTransition {
    pub fn new() -> Self {
        log::debug!("stage transition started");
        Self {
            phase: TransitionPhase::Centering,
            target_z: PLAYGROUND_HEIGHT + GROUNDS_OFFSET + HOLE_INITIAL_OFFSET_Z,
        }
    }

    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        self.phase == TransitionPhase::Done
    }

    /// Advance the transition by one fixed step, moving the hole and
    /// rebuilding the affected meshes. Returns true once complete.
    pub fn step(&mut self, hole: &mut Vec3, ground: &mut GroundGenerator, dt: f32) -> bool {
        match self.phase {
            TransitionPhase::Centering => {
                let center = playground_center();
                hole.x = step_towards(hole.x, center, CENTERING_SPEED * dt);
                ground.update_ground(*hole, StagePhase::Transition);

                if (hole.x - center).abs() <= SNAP_THRESHOLD {
                    hole.x = center;
                    ground.set_stop_vertical_mesh_gen(true);
                    self.phase = TransitionPhase::Crossing;
                }
            }
            TransitionPhase::Crossing => {
                hole.z = step_towards(hole.z, self.target_z, CROSSING_SPEED * dt);
                ground.update_ground(*hole, StagePhase::Transition);
                ground.update_connecting_path(*hole);

                if (hole.z - self.target_z).abs() <= SNAP_THRESHOLD {
                    hole.z = self.target_z;
                    ground.set_stop_vertical_mesh_gen(false);
                    ground.recalculate_normals();
                    ground.update_ground(*hole, StagePhase::Transition);
                    self.phase = TransitionPhase::Done;
                    log::debug!("stage transition complete, hole at {hole}");
                }
            }
            TransitionPhase::Done => {}
        }

        self.is_complete()
    }

    /// Abandon the transition: snap the hole to the nearest stage (by the
    /// z midpoint of the gap), restore wall generation, and rebuild
    /// everything so the buffers are consistent.
    pub fn abort(&mut self, hole: &mut Vec3, ground: &mut GroundGenerator) {
        if self.is_complete() {
            return;
        }
        log::warn!("stage transition aborted at {hole}");

        let midpoint = PLAYGROUND_HEIGHT + GROUNDS_OFFSET * 0.5;
        if hole.z >= midpoint {
            *hole = Vec3::new(playground_center(), 0.0, self.target_z);
        } else {
            hole.z = hole.z.min(PLAYGROUND_HEIGHT);
        }

        ground.set_stop_vertical_mesh_gen(false);
        ground.recalculate_normals();
        ground.update_ground(*hole, StagePhase::Transition);
        ground.update_connecting_path(*hole);
        self.phase = TransitionPhase::Done;
    }
}

impl Default for StageTransition {
    fn default() -> Self {
        Self::new()
    }
}

/// Move `current` toward `target` by at most `max_delta`, never
/// overshooting.
fn step_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    let delta = target - current;
    if delta.abs() <= max_delta {
        target
    } else {
        current + max_delta * delta.signum()
    }
}
