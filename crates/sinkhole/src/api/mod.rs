pub mod types;

pub use types::{Rgba, StagePhase};
