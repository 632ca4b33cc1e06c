/// Per-frame delta pair handed to the tween scheduler.
///
/// `scaled` already includes the global time-scale (0 while paused);
/// `unscaled` is the raw frame delta for tweens that ignore pause.
#[derive(Debug, Clone, Copy)]
pub struct TickDelta {
    pub scaled: f32,
    pub unscaled: f32,
    /// Effective time-scale this frame. Scaled tweens freeze when it is 0.
    pub time_scale: f32,
}

/// Global game clock: owns the time-scale and the pause switch.
#[derive(Debug, Clone)]
pub struct GameClock {
    time_scale: f32,
    paused: bool,
}

impl GameClock {
    pub fn new() -> Self {
        Self {
            time_scale: 1.0,
            paused: false,
        }
    }

    /// Set the global time-scale. Negative values are clamped to 0.
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Turn a raw frame delta into the scaled/unscaled pair for this frame.
    pub fn frame(&self, frame_dt: f32) -> TickDelta {
        let time_scale = if self.paused { 0.0 } else { self.time_scale };
        TickDelta {
            scaled: frame_dt * time_scale,
            unscaled: frame_dt,
            time_scale,
        }
    }
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed timestep accumulator.
/// Ensures transition stepping runs at a consistent rate regardless of frame time.
pub struct FixedTimestep {
    /// The fixed delta time per step.
    dt: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt;
        // Cap to prevent spiral of death (max 10 steps per frame)
        self.accumulator = self.accumulator.min(self.dt * 10.0);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// Interpolation alpha for rendering between steps (0.0 to 1.0).
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f32 {
        self.dt
    }
}
