// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A scalar that animates toward a target, with generation-stamped completions.

use core::time::Duration;

use crate::curve::{Curve, SpringConfig, Timing};

/// Spring integration step.
const SPRING_STEP: Duration = Duration::from_millis(1);

/// Speeds are compared per tenth of a second against the rest tolerance.
const REST_SPEED_WINDOW: f64 = 0.1;

/// Identifies one animation run of an [`AnimatedValue`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct AnimationId(u64);

impl AnimationId {
    /// The generation this id was stamped with.
    pub const fn generation(self) -> u64 {
        self.0
    }
}

/// Reported by [`AnimatedValue::tick`] when an animation reaches its target.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Completion {
    /// The animation that finished.
    pub id: AnimationId,
    /// The value it settled on.
    pub value: f64,
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum Motion {
    Idle,
    Timing {
        from: f64,
        to: f64,
        elapsed: Duration,
        timing: Timing,
    },
    Spring {
        to: f64,
        span: f64,
        spring: SpringConfig,
    },
}

/// An animatable scalar.
///
/// The value is advanced explicitly with [`tick`](Self::tick). At most one
/// animation is in flight; starting a new one replaces it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AnimatedValue {
    value: f64,
    velocity: f64,
    motion: Motion,
    generation: u64,
}

impl AnimatedValue {
    /// Create a value at rest.
    pub const fn new(value: f64) -> Self {
        Self {
            value,
            velocity: 0.0,
            motion: Motion::Idle,
            generation: 0,
        }
    }

    /// Current value.
    pub fn get(&self) -> f64 {
        self.value
    }

    /// Current velocity in units per second.
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Where the value is heading: the animation target, or the current value at rest.
    pub fn target(&self) -> f64 {
        match self.motion {
            Motion::Idle => self.value,
            Motion::Timing { to, .. } | Motion::Spring { to, .. } => to,
        }
    }

    /// Current generation. Bumped whenever an animation starts or is cancelled.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns `true` while an animation is in flight.
    pub fn is_animating(&self) -> bool {
        !matches!(self.motion, Motion::Idle)
    }

    /// The in-flight animation, if any.
    pub fn current(&self) -> Option<AnimationId> {
        self.is_animating().then_some(AnimationId(self.generation))
    }

    /// Jump to `value`, cancelling any animation in flight.
    pub fn set(&mut self, value: f64) {
        self.cancel();
        self.value = value;
        self.velocity = 0.0;
    }

    /// Cancel the in-flight animation, leaving the value where it is.
    ///
    /// Returns the id of the cancelled animation. Its completion will never
    /// be reported.
    pub fn cancel(&mut self) -> Option<AnimationId> {
        let cancelled = self.current()?;
        self.motion = Motion::Idle;
        self.bump();
        Some(cancelled)
    }

    /// Start animating toward `target` from the current value.
    pub fn animate_to(&mut self, target: f64, curve: impl Into<Curve>) -> AnimationId {
        self.motion = match curve.into() {
            Curve::Timing(timing) => Motion::Timing {
                from: self.value,
                to: target,
                elapsed: Duration::ZERO,
                timing,
            },
            Curve::Spring(spring) => Motion::Spring {
                to: target,
                span: (target - self.value).abs().max(f64::EPSILON),
                spring,
            },
        };
        self.bump();
        AnimationId(self.generation)
    }

    /// Advance the animation by `dt`.
    ///
    /// Returns a [`Completion`] on the tick where the value reaches its target.
    pub fn tick(&mut self, dt: Duration) -> Option<Completion> {
        match self.motion {
            Motion::Idle => None,
            Motion::Timing {
                from,
                to,
                elapsed,
                timing,
            } => {
                let elapsed = elapsed + dt;
                let previous = self.value;
                if elapsed >= timing.duration {
                    self.value = to;
                    self.velocity = 0.0;
                    return Some(self.finish());
                }
                let t = elapsed.as_secs_f64() / timing.duration.as_secs_f64();
                self.value = from + (to - from) * timing.easing.apply(t);
                let secs = dt.as_secs_f64();
                if secs > 0.0 {
                    self.velocity = (self.value - previous) / secs;
                }
                self.motion = Motion::Timing {
                    from,
                    to,
                    elapsed,
                    timing,
                };
                None
            }
            Motion::Spring { to, span, spring } => {
                let mut remaining = dt;
                while remaining > Duration::ZERO {
                    let step = remaining.min(SPRING_STEP);
                    remaining -= step;
                    let h = step.as_secs_f64();
                    // Semi-implicit Euler keeps the oscillator stable at this step size.
                    self.velocity += spring.acceleration(self.value - to, self.velocity) * h;
                    self.value += self.velocity * h;
                    let rest = span * spring.rest_fraction;
                    if (self.value - to).abs() <= rest
                        && self.velocity.abs() * REST_SPEED_WINDOW <= rest
                    {
                        self.value = to;
                        self.velocity = 0.0;
                        return Some(self.finish());
                    }
                }
                None
            }
        }
    }

    fn finish(&mut self) -> Completion {
        self.motion = Motion::Idle;
        Completion {
            id: AnimationId(self.generation),
            value: self.value,
        }
    }

    fn bump(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}

impl Default for AnimatedValue {
    fn default() -> Self {
        Self::new(0.0)
    }
}
