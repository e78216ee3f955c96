//! Reveal animation: easing, specs, and a clock-driven animated value.
//!
//! The clock is injected (`Rc<dyn Clock>`) rather than global, so the whole
//! open/close choreography can be driven deterministically in tests.

use std::cell::Cell;
use std::rc::Rc;

use web_time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl Easing {
    pub fn interpolate(&self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => t * (2.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationSpec {
    pub duration: Duration,
    pub easing: Easing,
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(225),
            easing: Easing::EaseInOut,
        }
    }
}

impl AnimationSpec {
    pub fn tween(duration: Duration, easing: Easing) -> Self {
        Self { duration, easing }
    }

    pub fn fade(duration: Duration) -> Self {
        Self {
            duration,
            easing: Easing::EaseInOut,
        }
    }
}

pub trait Interpolate {
    fn interpolate(&self, other: &Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

/// Time source for animations and the scheduler.
pub trait Clock {
    fn now(&self) -> Instant;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Hand-advanced clock for deterministic tests and headless runs.
pub struct TestClock {
    t: Cell<Instant>,
}

impl TestClock {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            t: Cell::new(Instant::now()),
        })
    }

    pub fn advance(&self, d: Duration) {
        self.t.set(self.t.get() + d);
    }
}

impl Clock for TestClock {
    fn now(&self) -> Instant {
        self.t.get()
    }
}

/// Value that transitions smoothly toward a target. At rest it is exactly
/// the target, so a reveal progress sits at precisely 0.0 or 1.0 outside a
/// transition.
pub struct AnimatedValue<T: Interpolate + Clone> {
    current: T,
    target: T,
    start: T,
    spec: AnimationSpec,
    started: Option<Instant>,
}

impl<T: Interpolate + Clone> AnimatedValue<T> {
    pub fn new(initial: T, spec: AnimationSpec) -> Self {
        Self {
            current: initial.clone(),
            target: initial.clone(),
            start: initial,
            spec,
            started: None,
        }
    }

    /// Begin a transition from the current value, wherever it is: a close
    /// that interrupts an opening fade starts from mid-opacity.
    pub fn set_target(&mut self, target: T, now: Instant) {
        self.start = self.current.clone();
        self.target = target;
        self.started = Some(now);
    }

    /// Advance to `now`; returns true while the transition is in flight.
    pub fn update(&mut self, now: Instant) -> bool {
        let Some(started) = self.started else {
            return false;
        };
        let elapsed = now.saturating_duration_since(started);

        if elapsed >= self.spec.duration {
            self.current = self.target.clone();
            self.started = None;
            return false;
        }

        let t = elapsed.as_secs_f32() / self.spec.duration.as_secs_f32();
        self.current = self.start.interpolate(&self.target, self.spec.easing.interpolate(t));
        true
    }

    pub fn get(&self) -> &T {
        &self.current
    }

    pub fn is_animating(&self) -> bool {
        self.started.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tween_is_deterministic() {
        let clock = TestClock::new();
        let mut a = AnimatedValue::new(
            0.0f32,
            AnimationSpec::tween(Duration::from_millis(1000), Easing::Linear),
        );
        a.set_target(10.0, clock.now());

        clock.advance(Duration::from_millis(250));
        assert!(a.update(clock.now()));
        assert!((a.get() - 2.5).abs() < 0.01);

        clock.advance(Duration::from_millis(750));
        assert!(!a.update(clock.now()));
        assert_eq!(*a.get(), 10.0);
        assert!(!a.is_animating());
    }

    #[test]
    fn retarget_starts_from_current_value() {
        let clock = TestClock::new();
        let mut a = AnimatedValue::new(
            0.0f32,
            AnimationSpec::tween(Duration::from_millis(100), Easing::Linear),
        );
        a.set_target(1.0, clock.now());
        clock.advance(Duration::from_millis(50));
        a.update(clock.now());
        assert!((a.get() - 0.5).abs() < 0.01);

        // Reverse mid-flight: the fade back down starts at ~0.5.
        a.set_target(0.0, clock.now());
        clock.advance(Duration::from_millis(50));
        a.update(clock.now());
        assert!((a.get() - 0.25).abs() < 0.01);

        clock.advance(Duration::from_millis(50));
        assert!(!a.update(clock.now()));
        assert_eq!(*a.get(), 0.0);
    }

    #[test]
    fn rest_value_is_exact() {
        let clock = TestClock::new();
        let mut a = AnimatedValue::new(0.0f32, AnimationSpec::default());
        a.set_target(1.0, clock.now());
        clock.advance(Duration::from_millis(225));
        a.update(clock.now());
        assert_eq!(*a.get(), 1.0);
    }
}
