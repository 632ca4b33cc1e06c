// ground/mod.rs
//
// Procedural ground geometry: the two playground stage meshes with their
// hole cutouts, the connecting path between stages, the animated
// background sea, and the stage-transition state machine that drives the
// hole across the gap.

pub mod generator;
pub mod hole;
pub mod mesh;
pub mod sea;
pub mod transition;

pub use generator::{GroundConfig, GroundGenerator};
pub use hole::HoleTemplate;
pub use mesh::MeshData;
pub use sea::{SeaConfig, SeaMesh};
pub use transition::{StageTransition, TransitionPhase};
