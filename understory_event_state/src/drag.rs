// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag state helper: offsets from the start position and release velocity.
//!
//! ## Usage
//!
//! 1) Start a drag with [`DragState::start`], passing the initial position and timestamp.
//! 2) On each move, call [`DragState::update`] to get the delta since the previous sample.
//! 3) Use [`DragState::total_offset`] for the cumulative offset from the start.
//! 4) Finish with [`DragState::end`], which returns the final offset and release velocity.
//!
//! Timestamps are milliseconds from any monotonic origin.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use understory_event_state::drag::DragState;
//!
//! let mut drag = DragState::default();
//! drag.start(Point::new(10.0, 20.0), 0);
//!
//! let delta = drag.update(Point::new(10.0, 60.0), 50).unwrap();
//! assert_eq!(delta.y, 40.0);
//!
//! let release = drag.end(Point::new(10.0, 60.0), 60).unwrap();
//! assert_eq!(release.offset.y, 40.0);
//! assert!(release.velocity.y > 0.0);
//! ```

use kurbo::{Point, Vec2};

/// Movement (in px) a pointer must travel before a pan claims the gesture.
pub const PAN_SLOP: f64 = 5.0;

/// Samples older than this at release time no longer count toward velocity.
const VELOCITY_STALE_MS: u64 = 100;

/// Weight of the newest sample in the velocity estimate.
const VELOCITY_SMOOTHING: f64 = 0.8;

/// Summary of a finished drag.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DragRelease {
    /// Offset from the start position at release.
    pub offset: Vec2,
    /// Estimated velocity at release, in px/s.
    pub velocity: Vec2,
}

/// Tracks drag state for move event processing
#[derive(Debug, Clone, Default, Copy)]
pub struct DragState {
    /// Start position of the drag operation
    pub start_pos: Option<Point>,
    /// Last recorded pointer position during drag
    pub last_pos: Option<Point>,
    last_time: u64,
    velocity: Vec2,
}

impl DragState {
    /// Start tracking a new drag operation from the given position.
    pub fn start(&mut self, pos: Point, time_ms: u64) {
        self.start_pos = Some(pos);
        self.last_pos = Some(pos);
        self.last_time = time_ms;
        self.velocity = Vec2::ZERO;
    }

    /// Record a new position, returning the movement delta since the last sample.
    pub fn update(&mut self, pos: Point, time_ms: u64) -> Option<Vec2> {
        self.start_pos?;
        let last = self.last_pos.replace(pos)?;
        let delta = pos - last;
        let dt = time_ms.saturating_sub(self.last_time);
        if dt > 0 {
            let instant = delta * (1000.0 / dt as f64);
            self.velocity =
                instant * VELOCITY_SMOOTHING + self.velocity * (1.0 - VELOCITY_SMOOTHING);
            self.last_time = time_ms;
        }
        Some(delta)
    }

    /// Get total offset from drag start position.
    pub fn total_offset(&self, current_pos: Point) -> Option<Vec2> {
        self.start_pos.map(|start_pos| current_pos - start_pos)
    }

    /// Current velocity estimate in px/s, or zero when not dragging.
    pub fn velocity(&self) -> Vec2 {
        if self.is_dragging() {
            self.velocity
        } else {
            Vec2::ZERO
        }
    }

    /// End the drag at `pos`, returning the release summary and resetting state.
    ///
    /// A pointer that rested before lifting releases with zero velocity.
    pub fn end(&mut self, pos: Point, time_ms: u64) -> Option<DragRelease> {
        let offset = self.total_offset(pos)?;
        let rested = time_ms.saturating_sub(self.last_time) > VELOCITY_STALE_MS;
        self.update(pos, time_ms);
        let velocity = if rested {
            Vec2::ZERO
        } else {
            self.velocity
        };
        self.cancel();
        Some(DragRelease { offset, velocity })
    }

    /// Abandon the current drag without a release.
    pub fn cancel(&mut self) {
        self.start_pos = None;
        self.last_pos = None;
        self.velocity = Vec2::ZERO;
    }

    /// Returns `true` while a drag operation is active
    pub fn is_dragging(&self) -> bool {
        self.start_pos.is_some()
    }
}

/// Returns `true` when `offset` is a vertical pan that should claim the gesture.
///
/// The vertical component must dominate the horizontal one and exceed `slop`.
pub fn is_vertical_pan(offset: Vec2, slop: f64) -> bool {
    offset.y.abs() > offset.x.abs() && offset.y.abs() > slop
}
