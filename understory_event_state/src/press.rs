// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Press recognition: tap and long-press as mutually exclusive outcomes.
//!
//! A [`PressRecognizer`] follows one touch sequence at a time and resolves it
//! to exactly one [`PressOutcome`]:
//!
//! - [`PressOutcome::LongPress`] once the touch has been held for the
//!   long-press delay without leaving the movement tolerance. This fires while
//!   the finger is still down, from [`PressRecognizer::poll`] or whichever event
//!   first observes the elapsed delay.
//! - [`PressOutcome::Tap`] when the touch lifts within the tap ceiling.
//! - [`PressOutcome::Cancelled`] for everything else: moving too far, lifting
//!   between the tap ceiling and the long-press delay, or an explicit cancel.
//!
//! Once a sequence has resolved, later events in the same sequence report
//! `None`. A new [`down`](PressRecognizer::down) starts a fresh sequence.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use understory_event_state::press::{PressOutcome, PressRecognizer};
//!
//! let mut press = PressRecognizer::default();
//! let at = Point::new(40.0, 40.0);
//!
//! press.down(at, 1_000);
//! assert_eq!(press.poll(1_100), None);
//! assert_eq!(press.up(at, 1_120), Some(PressOutcome::Tap));
//! ```

use kurbo::Point;

/// Timing and movement limits for press recognition.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PressConfig {
    /// Hold duration (ms) after which the touch becomes a long-press.
    pub long_press_delay: u64,
    /// Longest press duration (ms) that still counts as a tap.
    pub tap_max_duration: u64,
    /// Movement tolerance (px) before the touch stops being a press.
    pub slop: f64,
}

impl Default for PressConfig {
    fn default() -> Self {
        Self {
            long_press_delay: 350,
            tap_max_duration: 220,
            slop: 10.0,
        }
    }
}

/// How a touch sequence resolved.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PressOutcome {
    /// Short press: ordinary activation.
    Tap,
    /// Held past the delay: open the preview.
    LongPress,
    /// Neither recognizer won.
    Cancelled,
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
enum Phase {
    #[default]
    Idle,
    Pressed {
        origin: Point,
        down_at: u64,
    },
    Resolved,
}

/// Races a tap recognizer against a long-press recognizer for one touch sequence.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PressRecognizer {
    config: PressConfig,
    phase: Phase,
}

impl PressRecognizer {
    /// Create a recognizer with the given limits.
    pub fn new(config: PressConfig) -> Self {
        Self {
            config,
            phase: Phase::Idle,
        }
    }

    /// The recognizer limits.
    pub fn config(&self) -> &PressConfig {
        &self.config
    }

    /// Returns `true` while a touch is down and not yet resolved.
    pub fn is_pressed(&self) -> bool {
        matches!(self.phase, Phase::Pressed { .. })
    }

    /// Begin a new touch sequence.
    pub fn down(&mut self, pos: Point, time_ms: u64) {
        self.phase = Phase::Pressed {
            origin: pos,
            down_at: time_ms,
        };
    }

    /// The pointer moved while down.
    pub fn moved(&mut self, pos: Point, time_ms: u64) -> Option<PressOutcome> {
        if let Some(outcome) = self.poll(time_ms) {
            return Some(outcome);
        }
        let Phase::Pressed { origin, .. } = self.phase else {
            return None;
        };
        let slop = self.config.slop;
        if (pos - origin).hypot2() > slop * slop {
            return self.resolve(PressOutcome::Cancelled);
        }
        None
    }

    /// Check the long-press timer without a new pointer event.
    pub fn poll(&mut self, time_ms: u64) -> Option<PressOutcome> {
        let Phase::Pressed { down_at, .. } = self.phase else {
            return None;
        };
        if time_ms.saturating_sub(down_at) >= self.config.long_press_delay {
            return self.resolve(PressOutcome::LongPress);
        }
        None
    }

    /// The pointer lifted; ends the sequence.
    pub fn up(&mut self, pos: Point, time_ms: u64) -> Option<PressOutcome> {
        let outcome = match self.phase {
            Phase::Pressed { origin, down_at } => {
                let held = time_ms.saturating_sub(down_at);
                let slop = self.config.slop;
                if (pos - origin).hypot2() > slop * slop {
                    Some(PressOutcome::Cancelled)
                } else if held >= self.config.long_press_delay {
                    Some(PressOutcome::LongPress)
                } else if held <= self.config.tap_max_duration {
                    Some(PressOutcome::Tap)
                } else {
                    Some(PressOutcome::Cancelled)
                }
            }
            Phase::Idle | Phase::Resolved => None,
        };
        self.phase = Phase::Idle;
        outcome
    }

    /// The host cancelled the touch (for example, a parent claimed it).
    pub fn cancel(&mut self) -> Option<PressOutcome> {
        let outcome = self.is_pressed().then_some(PressOutcome::Cancelled);
        self.phase = Phase::Idle;
        outcome
    }

    fn resolve(&mut self, outcome: PressOutcome) -> Option<PressOutcome> {
        self.phase = Phase::Resolved;
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AT: Point = Point::new(20.0, 20.0);

    #[test]
    fn quick_release_is_tap() {
        let mut p = PressRecognizer::default();
        p.down(AT, 0);
        assert_eq!(p.up(AT, 100), Some(PressOutcome::Tap));
        assert!(!p.is_pressed());
    }

    #[test]
    fn tap_ceiling_is_inclusive() {
        let mut p = PressRecognizer::default();
        p.down(AT, 0);
        assert_eq!(p.up(AT, 220), Some(PressOutcome::Tap));
    }

    #[test]
    fn release_between_ceiling_and_delay_cancels() {
        let mut p = PressRecognizer::default();
        p.down(AT, 0);
        assert_eq!(p.up(AT, 300), Some(PressOutcome::Cancelled));
    }

    #[test]
    fn long_press_fires_while_held() {
        let mut p = PressRecognizer::default();
        p.down(AT, 0);
        assert_eq!(p.poll(349), None);
        assert_eq!(p.poll(350), Some(PressOutcome::LongPress));
        // Resolved sequences report nothing further.
        assert_eq!(p.poll(500), None);
        assert_eq!(p.up(AT, 600), None);
    }

    #[test]
    fn late_release_without_poll_is_long_press() {
        let mut p = PressRecognizer::default();
        p.down(AT, 0);
        assert_eq!(p.up(AT, 400), Some(PressOutcome::LongPress));
    }

    #[test]
    fn moving_beyond_slop_cancels() {
        let mut p = PressRecognizer::default();
        p.down(AT, 0);
        assert_eq!(p.moved(Point::new(25.0, 25.0), 50), None);
        assert_eq!(
            p.moved(Point::new(40.0, 20.0), 60),
            Some(PressOutcome::Cancelled)
        );
        assert_eq!(p.poll(1_000), None);
        assert_eq!(p.up(AT, 1_000), None);
    }

    #[test]
    fn movement_after_long_press_is_ignored() {
        let mut p = PressRecognizer::default();
        p.down(AT, 0);
        assert_eq!(p.moved(AT, 360), Some(PressOutcome::LongPress));
        assert_eq!(p.moved(Point::new(200.0, 200.0), 400), None);
    }

    #[test]
    fn cancel_only_reports_for_active_touch() {
        let mut p = PressRecognizer::default();
        assert_eq!(p.cancel(), None);
        p.down(AT, 0);
        assert_eq!(p.cancel(), Some(PressOutcome::Cancelled));
        assert_eq!(p.up(AT, 10), None);
    }

    #[test]
    fn custom_delay() {
        let mut p = PressRecognizer::new(PressConfig {
            long_press_delay: 500,
            ..PressConfig::default()
        });
        p.down(AT, 0);
        assert_eq!(p.poll(400), None);
        assert_eq!(p.poll(500), Some(PressOutcome::LongPress));
    }

    #[test]
    fn each_sequence_resolves_once() {
        let mut p = PressRecognizer::default();
        for (hold, expected) in [
            (50, PressOutcome::Tap),
            (600, PressOutcome::LongPress),
            (250, PressOutcome::Cancelled),
        ] {
            p.down(AT, 1_000);
            let mut outcomes = 0;
            let mut last = None;
            for t in (1_000..1_000 + hold).step_by(16) {
                if let Some(o) = p.poll(t) {
                    outcomes += 1;
                    last = Some(o);
                }
            }
            if let Some(o) = p.up(AT, 1_000 + hold) {
                outcomes += 1;
                last = Some(o);
            }
            assert_eq!(outcomes, 1, "hold {hold}");
            assert_eq!(last, Some(expected), "hold {hold}");
        }
    }
}
