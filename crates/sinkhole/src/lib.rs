pub mod api;
pub mod core;
pub mod ground;
pub mod tween;

// Re-export key types at crate root for convenience
pub use api::types::{Rgba, StagePhase};
pub use core::time::{FixedTimestep, GameClock, TickDelta};
pub use ground::generator::{
    GroundConfig, GroundGenerator, GROUNDS_OFFSET, HOLE_DIAMETER, HOLE_INITIAL_OFFSET_Z,
    PLAYGROUND_HEIGHT, PLAYGROUND_WIDTH,
};
pub use ground::hole::HoleTemplate;
pub use ground::mesh::MeshData;
pub use ground::sea::{SeaConfig, SeaMesh};
pub use ground::transition::{StageTransition, TransitionPhase};
pub use tween::easing::{ease, ease_vec3, lerp, lerp_vec3, Easing};
pub use tween::scheduler::{TweenError, TweenHandle, TweenScheduler, DEFAULT_MAX_TWEENS};
pub use tween::task::{Tween, TweenPayload};
