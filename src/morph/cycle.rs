use crate::animation::tween::{FrameScheduler, MotionValue, TweenHandle, TweenScheduler, TweenSpec};
use crate::foundation::error::{MorphError, MorphResult};

/// Callback invoked with the new current index after each completed step.
pub type StepObserver = Box<dyn FnMut(usize)>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ActiveStep {
    handle: TweenHandle,
    next: usize,
}

/// Drives a progress value around a circular list of `len` shapes, one eased step at a time.
///
/// While attached, exactly one tween is in flight: from the current index toward the next one.
/// Progress is tweened forward (`N-1 -> N` on the last step) and reset to `0` when the step lands
/// on index `0`. `detach` cancels the tween and silences the observer.
pub struct ShapeCycle<S: TweenScheduler = FrameScheduler> {
    len: usize,
    spec: TweenSpec,
    progress: MotionValue,
    current: usize,
    active: Option<ActiveStep>,
    observer: Option<StepObserver>,
    attached: bool,
    steps_completed: u64,
    scheduler: S,
}

impl ShapeCycle<FrameScheduler> {
    pub fn new(len: usize, spec: TweenSpec) -> MorphResult<Self> {
        Self::with_scheduler(len, spec, FrameScheduler::new())
    }
}

impl<S: TweenScheduler> ShapeCycle<S> {
    pub fn with_scheduler(len: usize, spec: TweenSpec, scheduler: S) -> MorphResult<Self> {
        if len == 0 {
            return Err(MorphError::validation("shape cycle needs at least one shape"));
        }
        spec.validate()?;
        Ok(Self {
            len,
            spec,
            progress: MotionValue::new(0.0),
            current: 0,
            active: None,
            observer: None,
            attached: false,
            steps_completed: 0,
            scheduler,
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn next_index(&self) -> usize {
        (self.current + 1) % self.len
    }

    pub fn progress(&self) -> f64 {
        self.progress.get()
    }

    /// Shared handle to the progress value, for readers that outlive a borrow of the cycle.
    pub fn progress_value(&self) -> MotionValue {
        self.progress.clone()
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn steps_completed(&self) -> u64 {
        self.steps_completed
    }

    /// Handle of the tween currently in flight, if any.
    pub fn active_tween(&self) -> Option<TweenHandle> {
        self.active.map(|a| a.handle)
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Start cycling. A second `attach` swaps the observer and leaves the running step alone.
    pub fn attach(&mut self, observer: Option<StepObserver>) -> MorphResult<()> {
        self.observer = observer;
        if self.attached {
            return Ok(());
        }
        self.attached = true;
        tracing::debug!(len = self.len, index = self.current, "shape cycle attached");
        self.restart()
    }

    /// Stop cycling. Cancels the in-flight tween and drops the observer; calling it again is a
    /// no-op.
    pub fn detach(&mut self) {
        if let Some(step) = self.active.take() {
            self.scheduler.cancel(step.handle);
        }
        self.observer = None;
        if self.attached {
            self.attached = false;
            tracing::debug!(index = self.current, "shape cycle detached");
        }
    }

    /// Advance time by `dt_secs`. Returns the new index if a step completed during this tick.
    ///
    /// At most one step completes per tick; time left over after a completion is not carried into
    /// the next step.
    pub fn tick(&mut self, dt_secs: f64) -> MorphResult<Option<usize>> {
        if !self.attached {
            return Ok(None);
        }
        let done = self.scheduler.advance(dt_secs)?;
        let Some(step) = self.active else {
            return Ok(None);
        };
        if !done.contains(&step.handle) {
            tracing::trace!(progress = self.progress.get(), "shape cycle tick");
            return Ok(None);
        }

        self.active = None;
        if step.next == 0 {
            self.progress.set(0.0);
        }
        self.set_index(step.next)?;
        self.steps_completed += 1;
        tracing::debug!(index = step.next, steps = self.steps_completed, "shape cycle step");

        if let Some(observer) = self.observer.as_mut() {
            observer(step.next);
        }
        Ok(Some(step.next))
    }

    /// Jump to `index` (progress snaps to it), restarting the in-flight step toward the one after.
    pub fn set_index(&mut self, index: usize) -> MorphResult<()> {
        if index >= self.len {
            return Err(MorphError::validation(format!(
                "index {index} out of range for a cycle of {}",
                self.len
            )));
        }
        self.current = index;
        self.progress.set(index as f64);
        if self.attached {
            self.restart()?;
        }
        Ok(())
    }

    fn restart(&mut self) -> MorphResult<()> {
        if let Some(prev) = self.active.take() {
            self.scheduler.cancel(prev.handle);
        }
        let next = self.next_index();
        // Always tween forward; the last step runs N-1 -> N and is folded back to 0 on landing.
        let target = (self.current + 1) as f64;
        let handle = self.scheduler.start(&self.progress, target, self.spec)?;
        self.active = Some(ActiveStep { handle, next });
        Ok(())
    }
}

impl<S: TweenScheduler> Drop for ShapeCycle<S> {
    fn drop(&mut self) {
        self.detach();
    }
}

impl<S: TweenScheduler> std::fmt::Debug for ShapeCycle<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShapeCycle")
            .field("len", &self.len)
            .field("current", &self.current)
            .field("progress", &self.progress.get())
            .field("attached", &self.attached)
            .field("active", &self.active)
            .finish()
    }
}
