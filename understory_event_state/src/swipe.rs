// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Swipe-to-dismiss: live feedback while dragging and a decision on release.
//!
//! [`SwipeDismiss`] is pure arithmetic over a vertical offset `dy`. Upward
//! motion is never accepted: negative offsets are treated as zero.
//!
//! While dragging, [`SwipeDismiss::feedback`] maps `dy` to a transform:
//!
//! - `translate_y = dy`
//! - `progress = min(1, dy / (2 * threshold))`
//! - `opacity = 1 - progress * opacity_damping`
//! - `scale = 1 - progress * scale_damping`
//!
//! On release, [`SwipeDismiss::decide`] dismisses when `dy` is strictly
//! greater than the threshold or the release velocity is strictly greater
//! than the flick velocity; otherwise the surface springs back to rest.

/// Distance and velocity limits for swipe dismissal.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SwipeDismiss {
    /// Drag distance (px) past which a release dismisses.
    pub threshold: f64,
    /// Downward release velocity (px/s) past which a release dismisses.
    pub velocity_threshold: f64,
    /// How much opacity drops at full progress.
    pub opacity_damping: f64,
    /// How much scale drops at full progress.
    pub scale_damping: f64,
}

impl Default for SwipeDismiss {
    fn default() -> Self {
        Self {
            threshold: 80.0,
            velocity_threshold: 1000.0,
            opacity_damping: 0.25,
            scale_damping: 0.03,
        }
    }
}

/// Transform to apply while a drag is in progress.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SwipeFeedback {
    /// Vertical offset of the dragged surface.
    pub translate_y: f64,
    /// Opacity of the dragged surface.
    pub opacity: f64,
    /// Scale of the dragged surface.
    pub scale: f64,
}

impl SwipeFeedback {
    /// The undragged transform.
    pub const REST: Self = Self {
        translate_y: 0.0,
        opacity: 1.0,
        scale: 1.0,
    };
}

/// What to do when the drag is released.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SwipeDecision {
    /// Commit to closing.
    Dismiss,
    /// Spring back to rest.
    Restore,
}

impl SwipeDismiss {
    /// Create limits with the default damping factors.
    pub fn new(threshold: f64, velocity_threshold: f64) -> Self {
        Self {
            threshold,
            velocity_threshold,
            ..Self::default()
        }
    }

    /// Normalized drag progress in `[0, 1]`.
    pub fn progress(&self, dy: f64) -> f64 {
        let dy = dy.max(0.0);
        if self.threshold <= 0.0 {
            return if dy > 0.0 { 1.0 } else { 0.0 };
        }
        (dy / (2.0 * self.threshold)).min(1.0)
    }

    /// Transform for a drag currently at `dy`.
    pub fn feedback(&self, dy: f64) -> SwipeFeedback {
        let p = self.progress(dy);
        SwipeFeedback {
            translate_y: dy.max(0.0),
            opacity: 1.0 - p * self.opacity_damping,
            scale: 1.0 - p * self.scale_damping,
        }
    }

    /// Decide the outcome of a release at `dy` with downward `velocity` (px/s).
    pub fn decide(&self, dy: f64, velocity: f64) -> SwipeDecision {
        if dy.max(0.0) > self.threshold || velocity > self.velocity_threshold {
            SwipeDecision::Dismiss
        } else {
            SwipeDecision::Restore
        }
    }
}
