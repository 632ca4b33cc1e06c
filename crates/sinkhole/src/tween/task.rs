// tween/task.rs
//
// Tween task records: what a single in-flight interpolation animates,
// plus the builder used to configure one before handing it to the
// scheduler.
//
// Usage:
//   let handle = scheduler.spawn(
//       Tween::float(0.0, 10.0, 2.0, move |v| value.set(v))
//           .easing(Easing::CubicOut)
//           .on_complete(|| log::debug!("done")),
//   )?;

use glam::Vec3;

use super::easing::{lerp, lerp_vec3, Easing};
use crate::api::types::Rgba;

pub(crate) type ApplyFloat = Box<dyn FnMut(f32)>;
pub(crate) type ApplyVec3 = Box<dyn FnMut(Vec3)>;
pub(crate) type ApplyColor = Box<dyn FnMut(Rgba)>;
pub(crate) type ApplyAction = Box<dyn FnMut(f32, f32, f32)>;
pub(crate) type CompleteFn = Box<dyn FnMut()>;

/// What a tween animates each tick.
pub enum TweenPayload {
    /// No per-tick effect; only the completion callback matters.
    Delay,
    /// Interpolated float handed to an apply callback.
    Float {
        from: f32,
        to: f32,
        apply: ApplyFloat,
    },
    /// Interpolated position/vector handed to an apply callback.
    Vec3 {
        from: Vec3,
        to: Vec3,
        apply: ApplyVec3,
    },
    /// Interpolated color handed to an apply callback.
    Color {
        from: Rgba,
        to: Rgba,
        apply: ApplyColor,
    },
    /// Generic action receiving (from, to, eased progress).
    Action {
        from: f32,
        to: f32,
        apply: ApplyAction,
    },
}

/// A tween under construction. Configure it with the builder methods,
/// then hand it to `TweenScheduler::spawn`.
pub struct Tween {
    pub(crate) payload: TweenPayload,
    pub(crate) duration: f32,
    pub(crate) easing: Easing,
    pub(crate) unscaled: bool,
    pub(crate) paused: bool,
    pub(crate) on_complete: Vec<CompleteFn>,
}

impl Tween {
    fn with_payload(payload: TweenPayload, duration: f32) -> Self {
        Self {
            payload,
            duration,
            easing: Easing::Linear,
            unscaled: false,
            paused: false,
            on_complete: Vec::new(),
        }
    }

    /// Interpolate a float from `from` to `to` over `duration` seconds.
    pub fn float(from: f32, to: f32, duration: f32, apply: impl FnMut(f32) + 'static) -> Self {
        Self::with_payload(
            TweenPayload::Float {
                from,
                to,
                apply: Box::new(apply),
            },
            duration,
        )
    }

    /// Interpolate a Vec3 from `from` to `to` over `duration` seconds.
    pub fn vec3(from: Vec3, to: Vec3, duration: f32, apply: impl FnMut(Vec3) + 'static) -> Self {
        Self::with_payload(
            TweenPayload::Vec3 {
                from,
                to,
                apply: Box::new(apply),
            },
            duration,
        )
    }

    /// Interpolate a color from `from` to `to` over `duration` seconds.
    pub fn color(from: Rgba, to: Rgba, duration: f32, apply: impl FnMut(Rgba) + 'static) -> Self {
        Self::with_payload(
            TweenPayload::Color {
                from,
                to,
                apply: Box::new(apply),
            },
            duration,
        )
    }

    /// Generic action tween: the callback receives the endpoints and the
    /// eased progress every tick, and (from, to, 1.0) on completion.
    pub fn action(
        from: f32,
        to: f32,
        duration: f32,
        apply: impl FnMut(f32, f32, f32) + 'static,
    ) -> Self {
        Self::with_payload(
            TweenPayload::Action {
                from,
                to,
                apply: Box::new(apply),
            },
            duration,
        )
    }

    /// A pure delay: does nothing until it completes.
    pub fn delay(duration: f32) -> Self {
        Self::with_payload(TweenPayload::Delay, duration)
    }

    // -- Builder methods --

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Ignore the global time-scale (keeps running while paused).
    pub fn unscaled(mut self, unscaled: bool) -> Self {
        self.unscaled = unscaled;
        self
    }

    /// Start in the paused state.
    pub fn paused(mut self) -> Self {
        self.paused = true;
        self
    }

    /// Subscribe a completion callback. May be called multiple times;
    /// all subscribers fire, in order, on natural completion only
    /// (a cancelled tween never fires them).
    pub fn on_complete(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_complete.push(Box::new(callback));
        self
    }
}

/// One occupied scheduler slot: a tween plus its runtime state.
pub(crate) struct TweenTask {
    pub(crate) id: u64,
    pub(crate) payload: TweenPayload,
    pub(crate) duration: f32,
    /// Linear progress in [0, 1].
    pub(crate) state: f32,
    pub(crate) easing: Easing,
    pub(crate) unscaled: bool,
    pub(crate) paused: bool,
    /// Cleared on kill; a task that is no longer active is never invoked
    /// again, even while it still occupies its slot.
    pub(crate) active: bool,
    /// Set once the task has been marked for removal.
    pub(crate) killing: bool,
    pub(crate) completed: bool,
    pub(crate) on_complete: Vec<CompleteFn>,
}

impl TweenTask {
    pub(crate) fn new(id: u64, tween: Tween) -> Self {
        Self {
            id,
            payload: tween.payload,
            duration: tween.duration,
            state: 0.0,
            easing: tween.easing,
            unscaled: tween.unscaled,
            paused: tween.paused,
            active: true,
            killing: false,
            completed: false,
            on_complete: tween.on_complete,
        }
    }

    /// Advance linear progress by `dt / duration`, clamped to [0, 1].
    pub(crate) fn advance(&mut self, dt: f32) {
        self.state += dt / self.duration;
        self.state = self.state.clamp(0.0, 1.0);
        if self.state >= 1.0 {
            self.completed = true;
        }
    }

    /// Apply the payload at the current eased progress.
    pub(crate) fn invoke(&mut self) {
        let t = self.easing.apply(self.state);
        match &mut self.payload {
            TweenPayload::Delay => {}
            TweenPayload::Float { from, to, apply } => apply(lerp(*from, *to, t)),
            TweenPayload::Vec3 { from, to, apply } => apply(lerp_vec3(*from, *to, t)),
            TweenPayload::Color { from, to, apply } => apply(from.lerp_unclamped(*to, t)),
            TweenPayload::Action { from, to, apply } => apply(*from, *to, t),
        }
    }

    /// Apply the exact terminal value, bypassing the easing curve.
    pub(crate) fn default_complete(&mut self) {
        match &mut self.payload {
            TweenPayload::Delay => {}
            TweenPayload::Float { to, apply, .. } => apply(*to),
            TweenPayload::Vec3 { to, apply, .. } => apply(*to),
            TweenPayload::Color { to, apply, .. } => apply(*to),
            TweenPayload::Action { from, to, apply } => apply(*from, *to, 1.0),
        }
    }

    pub(crate) fn fire_on_complete(&mut self) {
        for callback in &mut self.on_complete {
            callback();
        }
    }
}
