// tween/scheduler.rs
//
// Fixed-capacity slot-array scheduler. All active tweens live in a
// preallocated array; each tick advances them in slot order, applies
// their payloads, and fires completion callbacks. Removal is deferred to
// the end of the tick and slot compaction is amortized onto the next
// spawn or tick, so no slot is reused mid-iteration and steady-state
// ticking does not allocate.

use thiserror::Error;

use super::task::{Tween, TweenTask};
use crate::core::time::TickDelta;

/// Default slot capacity.
pub const DEFAULT_MAX_TWEENS: usize = 100;

/// Errors surfaced at tween creation time.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TweenError {
    /// Every slot is occupied; the tween was not scheduled.
    #[error("tween scheduler is full ({capacity} slots)")]
    CapacityExceeded { capacity: usize },
    /// Durations must be strictly positive.
    #[error("tween duration must be positive")]
    InvalidDuration,
}

/// Stable handle to a scheduled tween. Remains valid across slot
/// compaction; operations on a finished or cancelled handle are no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TweenHandle(u64);

/// Owns and ticks all in-flight tweens.
pub struct TweenScheduler {
    slots: Vec<Option<TweenTask>>,
    /// One past the highest occupied slot since the last compaction.
    span: usize,
    /// Number of occupied slots (including those marked for removal
    /// but not yet swept).
    occupied: usize,
    next_id: u64,
    needs_compaction: bool,
}

impl TweenScheduler {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_TWEENS)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self {
            slots,
            span: 0,
            occupied: 0,
            next_id: 1,
            needs_compaction: false,
        }
    }

    /// Schedule a configured tween. Fails if the duration is not positive
    /// or if every slot is taken.
    pub fn spawn(&mut self, tween: Tween) -> Result<TweenHandle, TweenError> {
        if !(tween.duration > 0.0) {
            return Err(TweenError::InvalidDuration);
        }

        self.sweep();
        self.compact();

        if self.occupied == self.slots.len() {
            log::warn!("tween scheduler full: {} slots", self.slots.len());
            return Err(TweenError::CapacityExceeded {
                capacity: self.slots.len(),
            });
        }

        let id = self.next_id;
        self.next_id += 1;

        // After compaction the occupied slots are a prefix of the array.
        debug_assert!(self.slots[self.span].is_none());
        self.slots[self.span] = Some(TweenTask::new(id, tween));
        self.span += 1;
        self.occupied += 1;

        Ok(TweenHandle(id))
    }

    /// Schedule a callback to fire after `delay` seconds.
    pub fn delayed_call(
        &mut self,
        delay: f32,
        callback: impl FnMut() + 'static,
    ) -> Result<TweenHandle, TweenError> {
        self.spawn(Tween::delay(delay).on_complete(callback))
    }

    /// Advance every active tween by one frame. Returns the number of
    /// tweens that completed this tick.
    ///
    /// Scaled tweens are skipped entirely while `delta.time_scale` is 0;
    /// unscaled tweens keep running off `delta.unscaled`.
    pub fn tick(&mut self, delta: TickDelta) -> usize {
        self.sweep();
        self.compact();

        let mut completed = 0;

        for i in 0..self.span {
            let Some(task) = self.slots[i].as_mut() else {
                continue;
            };
            if !task.active || task.paused {
                continue;
            }

            let dt = if task.unscaled {
                delta.unscaled
            } else {
                if delta.time_scale == 0.0 {
                    continue;
                }
                delta.scaled
            };

            task.advance(dt);
            task.invoke();

            if task.completed {
                task.default_complete();
                task.fire_on_complete();
                task.active = false;
                task.killing = true;
                completed += 1;
            }
        }

        // Removal stays deferred to end-of-tick so a slot is never reused
        // while the loop above may still visit it.
        self.sweep();

        completed
    }

    /// Cancel a tween. Its completion callbacks never fire. Idempotent.
    pub fn cancel(&mut self, handle: TweenHandle) {
        if let Some(task) = self.find_mut(handle) {
            task.active = false;
            task.killing = true;
        }
    }

    /// Skip a tween to its end. The terminal value and completion
    /// callbacks are applied on the next tick, like a natural finish.
    pub fn complete(&mut self, handle: TweenHandle) {
        if let Some(task) = self.find_mut(handle) {
            task.paused = false;
            task.state = 1.0;
        }
    }

    pub fn pause(&mut self, handle: TweenHandle) {
        if let Some(task) = self.find_mut(handle) {
            task.paused = true;
        }
    }

    pub fn resume(&mut self, handle: TweenHandle) {
        if let Some(task) = self.find_mut(handle) {
            task.paused = false;
        }
    }

    /// Pause every currently active tween.
    pub fn pause_all(&mut self) {
        self.for_each_live(|task| task.paused = true);
    }

    /// Resume every currently active tween.
    pub fn resume_all(&mut self) {
        self.for_each_live(|task| task.paused = false);
    }

    /// Cancel every currently active tween.
    pub fn kill_all(&mut self) {
        self.for_each_live(|task| {
            task.active = false;
            task.killing = true;
        });
    }

    /// Linear progress of a tween in [0, 1], or None once it is gone.
    pub fn progress(&self, handle: TweenHandle) -> Option<f32> {
        self.find(handle).map(|task| task.state)
    }

    /// Whether a handle still refers to a live tween.
    pub fn is_alive(&self, handle: TweenHandle) -> bool {
        self.find(handle).is_some()
    }

    /// Number of live tweens.
    pub fn len(&self) -> usize {
        self.slots[..self.span]
            .iter()
            .flatten()
            .filter(|task| !task.killing)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn find(&self, handle: TweenHandle) -> Option<&TweenTask> {
        self.slots[..self.span]
            .iter()
            .flatten()
            .find(|task| task.id == handle.0 && !task.killing)
    }

    fn find_mut(&mut self, handle: TweenHandle) -> Option<&mut TweenTask> {
        self.slots[..self.span]
            .iter_mut()
            .flatten()
            .find(|task| task.id == handle.0 && !task.killing)
    }

    fn for_each_live(&mut self, mut f: impl FnMut(&mut TweenTask)) {
        for task in self.slots[..self.span].iter_mut().flatten() {
            if !task.killing {
                f(task);
            }
        }
    }

    /// Free the slots of tasks marked for removal.
    fn sweep(&mut self) {
        for i in 0..self.span {
            if self.slots[i].as_ref().is_some_and(|task| task.killing) {
                self.slots[i] = None;
                self.occupied -= 1;
                self.needs_compaction = true;
            }
        }
    }

    /// Collapse all holes accumulated since the last compaction, shifting
    /// later slots down. A single pass handles any number of deferred
    /// removals.
    fn compact(&mut self) {
        if !self.needs_compaction {
            return;
        }

        // Trailing holes only need the high-water mark lowered.
        while self.span > 0 && self.slots[self.span - 1].is_none() {
            self.span -= 1;
        }

        if self.occupied < self.span {
            let mut write = 0;
            for read in 0..self.span {
                if self.slots[read].is_some() {
                    if read != write {
                        self.slots.swap(read, write);
                    }
                    write += 1;
                }
            }
            self.span = write;
        }

        debug_assert_eq!(self.span, self.occupied);
        self.needs_compaction = false;
    }
}

impl Default for TweenScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tween::easing::Easing;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn scaled(dt: f32) -> TickDelta {
        TickDelta {
            scaled: dt,
            unscaled: dt,
            time_scale: 1.0,
        }
    }

    fn frozen(dt: f32) -> TickDelta {
        TickDelta {
            scaled: 0.0,
            unscaled: dt,
            time_scale: 0.0,
        }
    }

    #[test]
    fn float_tween_linear_steps() {
        let mut scheduler = TweenScheduler::new();
        let values = Rc::new(RefCell::new(Vec::new()));
        let fired = Rc::new(Cell::new(0));

        let values_in = values.clone();
        let fired_in = fired.clone();
        scheduler
            .spawn(
                Tween::float(0.0, 10.0, 2.0, move |v| values_in.borrow_mut().push(v))
                    .easing(Easing::Linear)
                    .on_complete(move || fired_in.set(fired_in.get() + 1)),
            )
            .unwrap();

        for _ in 0..4 {
            scheduler.tick(scaled(0.5));
        }

        let recorded = values.borrow();
        // Four per-tick applications plus the terminal application.
        assert_eq!(recorded.len(), 5);
        let expected = [2.5, 5.0, 7.5, 10.0, 10.0];
        for (got, want) in recorded.iter().zip(expected) {
            assert!((got - want).abs() < 1e-4, "got {got}, want {want}");
        }
        assert_eq!(fired.get(), 1);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn completion_fires_exactly_once() {
        let mut scheduler = TweenScheduler::new();
        let fired = Rc::new(Cell::new(0));
        let fired_in = fired.clone();
        scheduler
            .delayed_call(1.0, move || fired_in.set(fired_in.get() + 1))
            .unwrap();

        for _ in 0..10 {
            scheduler.tick(scaled(0.5));
        }
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn progress_is_monotonic() {
        let mut scheduler = TweenScheduler::new();
        let handle = scheduler
            .spawn(Tween::float(0.0, 1.0, 1.0, |_| {}).easing(Easing::BounceOut))
            .unwrap();

        let mut last = 0.0;
        for _ in 0..5 {
            scheduler.tick(scaled(0.1));
            let p = scheduler.progress(handle).unwrap();
            assert!(p >= last, "progress went backwards: {p} < {last}");
            last = p;
        }
    }

    #[test]
    fn cancelled_tween_never_fires_callback() {
        let mut scheduler = TweenScheduler::new();
        let fired = Rc::new(Cell::new(false));
        let fired_in = fired.clone();
        let handle = scheduler
            .delayed_call(0.5, move || fired_in.set(true))
            .unwrap();

        scheduler.cancel(handle);
        // Double-cancel is a no-op.
        scheduler.cancel(handle);
        for _ in 0..5 {
            scheduler.tick(scaled(0.5));
        }
        assert!(!fired.get());
        assert!(!scheduler.is_alive(handle));
    }

    #[test]
    fn complete_skips_to_end_and_fires() {
        let mut scheduler = TweenScheduler::new();
        let value = Rc::new(Cell::new(0.0));
        let fired = Rc::new(Cell::new(0));
        let value_in = value.clone();
        let fired_in = fired.clone();
        let handle = scheduler
            .spawn(
                Tween::float(0.0, 8.0, 100.0, move |v| value_in.set(v))
                    .on_complete(move || fired_in.set(fired_in.get() + 1)),
            )
            .unwrap();

        scheduler.complete(handle);
        scheduler.tick(scaled(0.016));

        assert!((value.get() - 8.0).abs() < 1e-5);
        assert_eq!(fired.get(), 1);
        assert!(!scheduler.is_alive(handle));
    }

    #[test]
    fn capacity_boundary() {
        let mut scheduler = TweenScheduler::with_capacity(4);
        let mut handles = Vec::new();
        for _ in 0..4 {
            handles.push(scheduler.spawn(Tween::delay(1.0)).unwrap());
        }

        let err = scheduler.spawn(Tween::delay(1.0)).unwrap_err();
        assert_eq!(err, TweenError::CapacityExceeded { capacity: 4 });

        scheduler.cancel(handles[1]);
        assert!(scheduler.spawn(Tween::delay(1.0)).is_ok());
    }

    #[test]
    fn slot_reuse_after_cancelling_every_other() {
        let mut scheduler = TweenScheduler::with_capacity(10);
        let mut handles = Vec::new();
        for _ in 0..10 {
            handles.push(scheduler.spawn(Tween::delay(1.0)).unwrap());
        }
        for handle in handles.iter().step_by(2) {
            scheduler.cancel(*handle);
        }
        for _ in 0..5 {
            scheduler.spawn(Tween::delay(1.0)).unwrap();
        }
        assert_eq!(scheduler.len(), 10);
        // Survivors are still addressable after compaction.
        for handle in handles.iter().skip(1).step_by(2) {
            assert!(scheduler.is_alive(*handle));
        }
    }

    #[test]
    fn compaction_preserves_surviving_tweens() {
        let mut scheduler = TweenScheduler::with_capacity(8);
        let a = scheduler.spawn(Tween::float(0.0, 1.0, 1.0, |_| {})).unwrap();
        let b = scheduler.spawn(Tween::float(0.0, 1.0, 1.0, |_| {})).unwrap();
        let c = scheduler.spawn(Tween::float(0.0, 1.0, 1.0, |_| {})).unwrap();

        // Remove the middle and the highest slot in one batch; a single
        // compaction must collapse both holes.
        scheduler.cancel(b);
        scheduler.cancel(c);
        scheduler.tick(scaled(0.25));

        assert!(scheduler.is_alive(a));
        assert!(!scheduler.is_alive(b));
        assert!(!scheduler.is_alive(c));
        assert!((scheduler.progress(a).unwrap() - 0.25).abs() < 1e-5);

        // The freed slots are reusable.
        for _ in 0..7 {
            scheduler.spawn(Tween::delay(1.0)).unwrap();
        }
        assert_eq!(scheduler.len(), 8);
    }

    #[test]
    fn scaled_tween_freezes_at_zero_time_scale() {
        let mut scheduler = TweenScheduler::new();
        let normal = scheduler.spawn(Tween::delay(1.0)).unwrap();
        let unscaled = scheduler.spawn(Tween::delay(1.0).unscaled(true)).unwrap();

        scheduler.tick(frozen(0.5));

        assert_eq!(scheduler.progress(normal), Some(0.0));
        assert!((scheduler.progress(unscaled).unwrap() - 0.5).abs() < 1e-5);
    }

    #[test]
    fn pause_all_and_resume_all() {
        let mut scheduler = TweenScheduler::new();
        let handle = scheduler.spawn(Tween::delay(1.0)).unwrap();

        scheduler.pause_all();
        scheduler.tick(scaled(0.5));
        assert_eq!(scheduler.progress(handle), Some(0.0));

        scheduler.resume_all();
        scheduler.tick(scaled(0.5));
        assert!((scheduler.progress(handle).unwrap() - 0.5).abs() < 1e-5);
    }

    #[test]
    fn kill_all_clears_everything() {
        let mut scheduler = TweenScheduler::new();
        for _ in 0..5 {
            scheduler.spawn(Tween::delay(1.0)).unwrap();
        }
        scheduler.kill_all();
        assert!(scheduler.is_empty());
        assert_eq!(scheduler.tick(scaled(1.0)), 0);
    }

    #[test]
    fn non_positive_duration_rejected() {
        let mut scheduler = TweenScheduler::new();
        let err = scheduler.spawn(Tween::delay(0.0)).unwrap_err();
        assert_eq!(err, TweenError::InvalidDuration);
        let err = scheduler
            .spawn(Tween::float(0.0, 1.0, -1.0, |_| {}))
            .unwrap_err();
        assert_eq!(err, TweenError::InvalidDuration);
    }

    #[test]
    fn vec3_and_color_payloads_apply() {
        use crate::api::types::Rgba;
        use glam::Vec3;

        let mut scheduler = TweenScheduler::new();
        let pos = Rc::new(Cell::new(Vec3::ZERO));
        let color = Rc::new(Cell::new(Rgba::BLACK));

        let pos_in = pos.clone();
        scheduler
            .spawn(Tween::vec3(
                Vec3::ZERO,
                Vec3::new(2.0, 0.0, 4.0),
                1.0,
                move |v| pos_in.set(v),
            ))
            .unwrap();
        let color_in = color.clone();
        scheduler
            .spawn(Tween::color(Rgba::BLACK, Rgba::WHITE, 1.0, move |c| {
                color_in.set(c)
            }))
            .unwrap();

        scheduler.tick(scaled(0.5));

        assert!((pos.get() - Vec3::new(1.0, 0.0, 2.0)).length() < 1e-5);
        assert!((color.get().g - 0.5).abs() < 1e-5);
    }
}
