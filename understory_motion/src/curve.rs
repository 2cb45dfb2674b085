// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animation curves: eased timings and spring physics.

use core::time::Duration;

/// Easing function applied to the normalized progress of a [`Timing`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Fast start, gentle arrival.
    #[default]
    EaseOutCubic,
    /// Gentle start and arrival.
    EaseInOutCubic,
}

impl Easing {
    /// Map normalized progress `t` to eased progress.
    ///
    /// Input outside `[0, 1]` is clamped.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseOutCubic => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Self::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let k = -2.0 * t + 2.0;
                    1.0 - k * k * k / 2.0
                }
            }
        }
    }
}

/// A fixed-duration animation curve.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Timing {
    /// Total duration of the animation.
    pub duration: Duration,
    /// Easing applied to the progress.
    pub easing: Easing,
}

impl Timing {
    /// Create a timing curve.
    pub const fn new(duration: Duration, easing: Easing) -> Self {
        Self { duration, easing }
    }

    /// Create a timing curve of `ms` milliseconds with the default easing.
    pub const fn millis(ms: u64) -> Self {
        Self {
            duration: Duration::from_millis(ms),
            easing: Easing::EaseOutCubic,
        }
    }

    /// Replace the easing function.
    pub const fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}

/// Parameters of a damped spring.
///
/// The spring comes to rest once both its displacement and its speed are
/// below `rest_fraction` of the animated span (speed measured per tenth of a
/// second), at which point the value snaps onto the target.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpringConfig {
    /// Velocity damping coefficient.
    pub damping: f64,
    /// Spring constant pulling toward the target.
    pub stiffness: f64,
    /// Mass of the animated body.
    pub mass: f64,
    /// Rest tolerance relative to the animated span.
    pub rest_fraction: f64,
}

impl SpringConfig {
    /// The slightly underdamped spring used for preview entrances.
    pub const PREVIEW: Self = Self {
        damping: 18.0,
        stiffness: 180.0,
        mass: 1.0,
        rest_fraction: 0.001,
    };

    /// Create a spring with unit mass and the default rest tolerance.
    pub const fn new(damping: f64, stiffness: f64) -> Self {
        Self {
            damping,
            stiffness,
            mass: 1.0,
            rest_fraction: Self::PREVIEW.rest_fraction,
        }
    }

    /// Acceleration for displacement `offset` (value minus target) at `velocity`.
    pub(crate) fn acceleration(&self, offset: f64, velocity: f64) -> f64 {
        let mass = if self.mass > 0.0 { self.mass } else { 1.0 };
        (-self.stiffness * offset - self.damping * velocity) / mass
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::PREVIEW
    }
}

/// How an [`AnimatedValue`](crate::AnimatedValue) travels to its target.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Curve {
    /// Fixed duration with easing.
    Timing(Timing),
    /// Spring physics.
    Spring(SpringConfig),
}

impl From<Timing> for Curve {
    fn from(timing: Timing) -> Self {
        Self::Timing(timing)
    }
}

impl From<SpringConfig> for Curve {
    fn from(spring: SpringConfig) -> Self {
        Self::Spring(spring)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easings_hit_endpoints() {
        for easing in [Easing::Linear, Easing::EaseOutCubic, Easing::EaseInOutCubic] {
            assert_eq!(easing.apply(0.0), 0.0, "{easing:?} at 0");
            assert_eq!(easing.apply(1.0), 1.0, "{easing:?} at 1");
        }
    }

    #[test]
    fn easing_clamps_out_of_range_progress() {
        assert_eq!(Easing::Linear.apply(-0.5), 0.0);
        assert_eq!(Easing::EaseOutCubic.apply(2.0), 1.0);
    }

    #[test]
    fn ease_out_leads_linear() {
        assert!(Easing::EaseOutCubic.apply(0.25) > 0.25);
        assert!(Easing::EaseInOutCubic.apply(0.25) < 0.25);
        assert_eq!(Easing::EaseInOutCubic.apply(0.5), 0.5);
    }

    #[test]
    fn spring_pulls_toward_target() {
        let spring = SpringConfig::PREVIEW;
        assert!(spring.acceleration(10.0, 0.0) < 0.0);
        assert!(spring.acceleration(-10.0, 0.0) > 0.0);
        // Damping opposes motion.
        assert!(spring.acceleration(0.0, 5.0) < 0.0);
    }

    #[test]
    fn millis_uses_default_easing() {
        let t = Timing::millis(180);
        assert_eq!(t.duration, Duration::from_millis(180));
        assert_eq!(t.easing, Easing::EaseOutCubic);
        assert_eq!(t.with_easing(Easing::Linear).easing, Easing::Linear);
    }
}
