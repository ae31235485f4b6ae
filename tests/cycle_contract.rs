use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use morphloop::{
    Ease, FrameScheduler, MorphResult, MotionValue, ResampleInterpolator, ShapeCycle, ShapeMorpher,
    ShapeSet, StepObserver, TweenHandle, TweenScheduler, TweenSpec,
};

const FRAME: f64 = 1.0 / 60.0;

fn recorder() -> (Rc<RefCell<Vec<usize>>>, StepObserver) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    (seen, Box::new(move |i| sink.borrow_mut().push(i)))
}

fn hero_cycle() -> ShapeCycle {
    ShapeCycle::new(6, TweenSpec::new(1.0, Ease::HERO).unwrap()).unwrap()
}

fn run_one_step(cycle: &mut ShapeCycle) -> usize {
    for _ in 0..10_000 {
        if let Some(i) = cycle.tick(FRAME).unwrap() {
            return i;
        }
    }
    panic!("step never completed");
}

#[test]
fn index_stays_in_range_for_many_steps() {
    let set = ShapeSet::hero().unwrap();
    assert_eq!(set.shapes().len(), set.colors().len());

    let mut c = hero_cycle();
    c.attach(None).unwrap();
    for _ in 0..(6 * 60 * 4 + 17) {
        c.tick(FRAME).unwrap();
        assert!(c.current_index() < c.len());
        assert!(c.progress() >= 0.0 && c.progress() <= c.len() as f64);
    }
}

#[test]
fn full_cycle_visits_every_index_once_in_order() {
    let mut c = hero_cycle();
    let (seen, obs) = recorder();
    c.attach(Some(obs)).unwrap();

    for _ in 0..6 {
        run_one_step(&mut c);
    }
    assert_eq!(*seen.borrow(), vec![1, 2, 3, 4, 5, 0]);
    assert_eq!(c.current_index(), 0);
    let distinct: BTreeSet<_> = seen.borrow().iter().copied().collect();
    assert_eq!(distinct.len(), 6);
}

#[test]
fn wrap_resets_progress_to_exactly_zero() {
    let mut c = hero_cycle();
    c.attach(None).unwrap();
    for _ in 0..5 {
        run_one_step(&mut c);
    }
    assert_eq!(c.current_index(), 5);
    assert_eq!(c.progress(), 5.0);

    // Halfway through the last step progress is past N-1, heading for N.
    for _ in 0..30 {
        c.tick(FRAME).unwrap();
    }
    assert!(c.progress() > 5.0 && c.progress() < 6.0);

    assert_eq!(run_one_step(&mut c), 0);
    assert_eq!(c.progress(), 0.0);
}

#[test]
fn observer_gets_the_new_current_index() {
    let mut c = hero_cycle();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let progress = c.progress_value();
    c.attach(Some(Box::new(move |i| {
        sink.borrow_mut().push((i, progress.get()));
    })))
    .unwrap();

    for step in 1..=6 {
        let landed = run_one_step(&mut c);
        assert_eq!(landed, c.current_index());
        assert_eq!(seen.borrow().len(), step);
    }
    let seen = seen.borrow();
    assert_eq!(seen[0], (1, 1.0));
    assert_eq!(seen[5], (0, 0.0));
}

#[test]
fn detach_mid_tween_silences_observer() {
    let mut c = hero_cycle();
    let (seen, obs) = recorder();
    c.attach(Some(obs)).unwrap();
    for _ in 0..30 {
        c.tick(FRAME).unwrap();
    }
    c.detach();
    c.detach();
    for _ in 0..600 {
        assert_eq!(c.tick(FRAME).unwrap(), None);
    }
    assert!(seen.borrow().is_empty());
    assert_eq!(c.scheduler().active_count(), 0);
}

#[test]
fn dropping_an_attached_cycle_cancels_its_tween() {
    let (seen, obs) = recorder();
    {
        let mut c = hero_cycle();
        c.attach(Some(obs)).unwrap();
        c.tick(0.5).unwrap();
    }
    assert!(seen.borrow().is_empty());
}

#[test]
fn reattach_after_detach_resumes_from_current_progress() {
    let mut c = hero_cycle();
    let (seen, obs) = recorder();
    c.attach(Some(obs)).unwrap();
    for _ in 0..30 {
        c.tick(FRAME).unwrap();
    }
    let held = c.progress();
    c.detach();

    let (again, obs) = recorder();
    c.attach(Some(obs)).unwrap();
    assert_eq!(c.progress(), held);
    assert_eq!(run_one_step(&mut c), 1);
    assert!(seen.borrow().is_empty());
    assert_eq!(*again.borrow(), vec![1]);
}

/// Completes whatever is active on every `advance`, regardless of time.
#[derive(Default)]
struct ManualScheduler {
    active: Vec<(TweenHandle, MotionValue, f64)>,
    started: Rc<RefCell<Vec<TweenHandle>>>,
    inner: FrameScheduler,
}

impl TweenScheduler for ManualScheduler {
    fn start(
        &mut self,
        value: &MotionValue,
        target: f64,
        spec: TweenSpec,
    ) -> MorphResult<TweenHandle> {
        // Handles are opaque; mint them from a frame scheduler and drop its copy.
        let handle = self.inner.start(value, target, spec)?;
        self.inner.cancel(handle);
        self.active.push((handle, value.clone(), target));
        self.started.borrow_mut().push(handle);
        Ok(handle)
    }

    fn cancel(&mut self, handle: TweenHandle) -> bool {
        let before = self.active.len();
        self.active.retain(|(h, _, _)| *h != handle);
        before != self.active.len()
    }

    fn is_active(&self, handle: TweenHandle) -> bool {
        self.active.iter().any(|(h, _, _)| *h == handle)
    }

    fn active_count(&self) -> usize {
        self.active.len()
    }

    fn advance(&mut self, _dt_secs: f64) -> MorphResult<Vec<TweenHandle>> {
        let done: Vec<_> = self.active.drain(..).collect();
        Ok(done
            .into_iter()
            .map(|(h, v, target)| {
                v.set(target);
                h
            })
            .collect())
    }
}

#[test]
fn restarts_never_double_fire_a_transition() {
    let started = Rc::new(RefCell::new(Vec::new()));
    let scheduler = ManualScheduler {
        started: Rc::clone(&started),
        ..ManualScheduler::default()
    };
    let mut c = ShapeCycle::with_scheduler(4, TweenSpec::default(), scheduler).unwrap();
    let (seen, obs) = recorder();
    c.attach(Some(obs)).unwrap();

    // Jumping around restarts the in-flight step each time; only one tween may survive.
    c.set_index(2).unwrap();
    c.set_index(3).unwrap();
    assert_eq!(c.scheduler().active_count(), 1);
    assert_eq!(started.borrow().len(), 3);

    assert_eq!(c.tick(0.0).unwrap(), Some(0));
    assert_eq!(c.tick(0.0).unwrap(), Some(1));
    assert_eq!(*seen.borrow(), vec![0, 1]);
    assert_eq!(c.scheduler().active_count(), 1);
}

#[test]
fn literal_six_shape_scenario() {
    let set = ShapeSet::hero().unwrap();
    let morpher = ShapeMorpher::new(set.clone(), &ResampleInterpolator::new(Some(0.2)).unwrap())
        .unwrap();
    let mut c = hero_cycle();
    let (seen, obs) = recorder();
    c.attach(Some(obs)).unwrap();

    for _ in 0..59 {
        assert_eq!(c.tick(FRAME).unwrap(), None);
    }
    assert_eq!(c.tick(FRAME).unwrap(), Some(1));
    assert_eq!(*seen.borrow(), vec![1]);

    let v = morpher.visual(c.progress());
    assert_eq!(v.color, set.colors()[1]);
    assert_eq!(v.outline, set.shapes()[1]);

    for _ in 0..5 {
        run_one_step(&mut c);
    }
    assert_eq!(seen.borrow().last(), Some(&0));
    assert_eq!(seen.borrow().len(), 6);
    assert_eq!(c.progress(), 0.0);

    let v = morpher.visual(c.progress());
    assert_eq!(v.color, set.colors()[0]);
    assert_eq!(v.outline, set.shapes()[0]);
}
