// tween/mod.rs
//
// Per-frame interpolation tasks: easing curves, task records, and the
// fixed-capacity slot-array scheduler that advances them once per tick.

pub mod easing;
pub mod scheduler;
pub mod task;

pub use easing::{ease, ease_vec3, lerp, lerp_vec3, Easing};
pub use scheduler::{TweenError, TweenHandle, TweenScheduler, DEFAULT_MAX_TWEENS};
pub use task::{Tween, TweenPayload};
