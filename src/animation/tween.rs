use std::cell::Cell;
use std::rc::Rc;

use crate::animation::ease::Ease;
use crate::animation::lerp::Lerp;
use crate::foundation::error::{MorphError, MorphResult};

/// Completion slack so accumulated frame deltas (e.g. 60 x 1/60) finish on the expected frame.
const COMPLETION_EPSILON: f64 = 1e-9;

/// Shared, single-threaded numeric value a tween writes into and renderers read from.
///
/// Cloning yields another handle to the same cell.
#[derive(Clone, Debug, Default)]
pub struct MotionValue(Rc<Cell<f64>>);

impl MotionValue {
    pub fn new(value: f64) -> Self {
        Self(Rc::new(Cell::new(value)))
    }

    pub fn get(&self) -> f64 {
        self.0.get()
    }

    pub fn set(&self, value: f64) {
        self.0.set(value);
    }

    /// True when both handles point at the same cell.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TweenSpec {
    pub duration_secs: f64,
    pub ease: Ease,
}

impl TweenSpec {
    pub fn new(duration_secs: f64, ease: Ease) -> MorphResult<Self> {
        let spec = Self {
            duration_secs,
            ease,
        };
        spec.validate()?;
        Ok(spec)
    }

    pub fn validate(&self) -> MorphResult<()> {
        if !self.duration_secs.is_finite() || self.duration_secs < 0.0 {
            return Err(MorphError::animation(format!(
                "tween duration must be finite and >= 0 (got {})",
                self.duration_secs
            )));
        }
        Ok(())
    }
}

impl Default for TweenSpec {
    fn default() -> Self {
        Self {
            duration_secs: 1.0,
            ease: Ease::HERO,
        }
    }
}

/// Opaque id of a started tween. Ids are never reused by a scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TweenHandle(u64);

/// Time-driven value animation with cancellation.
///
/// Completion is reported by [`TweenScheduler::advance`] rather than through stored callbacks so
/// the caller can react with full `&mut` access to its own state. A cancelled tween never shows up
/// in a completion list.
pub trait TweenScheduler {
    /// Start animating `value` from its current reading to `target`.
    fn start(
        &mut self,
        value: &MotionValue,
        target: f64,
        spec: TweenSpec,
    ) -> MorphResult<TweenHandle>;

    /// Stop a tween, leaving its value where it is. Returns false if it was not active.
    fn cancel(&mut self, handle: TweenHandle) -> bool;

    fn is_active(&self, handle: TweenHandle) -> bool;

    fn active_count(&self) -> usize;

    /// Move every active tween forward by `dt_secs`, returning the handles that finished, in start
    /// order. Finished tweens leave their value exactly at the target.
    fn advance(&mut self, dt_secs: f64) -> MorphResult<Vec<TweenHandle>>;
}

struct ActiveTween {
    handle: TweenHandle,
    value: MotionValue,
    from: f64,
    to: f64,
    spec: TweenSpec,
    elapsed: f64,
}

/// Scheduler advanced explicitly by the host's frame loop.
#[derive(Default)]
pub struct FrameScheduler {
    next_id: u64,
    active: Vec<ActiveTween>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl std::fmt::Debug for FrameScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameScheduler")
            .field("next_id", &self.next_id)
            .field("active", &self.active.len())
            .finish()
    }
}

impl TweenScheduler for FrameScheduler {
    fn start(
        &mut self,
        value: &MotionValue,
        target: f64,
        spec: TweenSpec,
    ) -> MorphResult<TweenHandle> {
        spec.validate()?;
        if !target.is_finite() {
            return Err(MorphError::animation("tween target must be finite"));
        }

        let handle = TweenHandle(self.next_id);
        self.next_id += 1;
        self.active.push(ActiveTween {
            handle,
            value: value.clone(),
            from: value.get(),
            to: target,
            spec,
            elapsed: 0.0,
        });
        tracing::trace!(?handle, from = value.get(), to = target, "tween started");
        Ok(handle)
    }

    fn cancel(&mut self, handle: TweenHandle) -> bool {
        let before = self.active.len();
        self.active.retain(|t| t.handle != handle);
        let removed = self.active.len() != before;
        if removed {
            tracing::trace!(?handle, "tween cancelled");
        }
        removed
    }

    fn is_active(&self, handle: TweenHandle) -> bool {
        self.active.iter().any(|t| t.handle == handle)
    }

    fn active_count(&self) -> usize {
        self.active.len()
    }

    fn advance(&mut self, dt_secs: f64) -> MorphResult<Vec<TweenHandle>> {
        if !dt_secs.is_finite() || dt_secs < 0.0 {
            return Err(MorphError::animation(format!(
                "frame delta must be finite and >= 0 (got {dt_secs})"
            )));
        }

        let mut done = Vec::new();
        for tween in &mut self.active {
            tween.elapsed += dt_secs;
            let finished = tween.elapsed + COMPLETION_EPSILON >= tween.spec.duration_secs;
            if finished {
                tween.value.set(tween.to);
                done.push(tween.handle);
            } else {
                let t = tween.elapsed / tween.spec.duration_secs;
                let eased = tween.spec.ease.apply(t);
                tween.value.set(<f64 as Lerp>::lerp(&tween.from, &tween.to, eased));
            }
        }

        if !done.is_empty() {
            self.active.retain(|t| !done.contains(&t.handle));
        }
        Ok(done)
    }
}
