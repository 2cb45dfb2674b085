// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Best-effort feedback channels: haptics and screen-reader announcements.
//!
//! Both are optional. A missing engine, or one that reports an error, never
//! affects the preview; failures are logged at debug level and dropped.

use tracing::debug;

use crate::error::FeedbackError;

/// Announced when a preview opens.
pub const OPENED_ANNOUNCEMENT: &str = "Quick preview opened";
/// Announced when a preview closes.
pub const CLOSED_ANNOUNCEMENT: &str = "Quick preview closed";

/// Strength of the impact played when a long-press opens a preview.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum HapticStyle {
    /// No haptic feedback.
    Off,
    /// Light impact.
    Light,
    /// Medium impact.
    #[default]
    Medium,
    /// Heavy impact.
    Heavy,
}

/// Platform haptics.
pub trait HapticEngine {
    /// Play an impact of `style`. Never called with [`HapticStyle::Off`].
    fn impact(&self, style: HapticStyle) -> Result<(), FeedbackError>;
}

/// Platform screen-reader announcements.
pub trait Announcer {
    /// Speak `message` to assistive technology.
    fn announce(&self, message: &str) -> Result<(), FeedbackError>;
}

/// Play `style` on `engine`, ignoring any failure.
pub(crate) fn impact(engine: Option<&dyn HapticEngine>, style: HapticStyle) {
    if style == HapticStyle::Off {
        return;
    }
    let Some(engine) = engine else {
        return;
    };
    if let Err(err) = engine.impact(style) {
        debug!(%err, ?style, "haptic feedback skipped");
    }
}

/// Announce `message` on `announcer`, ignoring any failure.
pub(crate) fn announce(announcer: Option<&dyn Announcer>, message: &str) {
    let Some(announcer) = announcer else {
        return;
    };
    if let Err(err) = announcer.announce(message) {
        debug!(%err, message, "announcement skipped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        played: RefCell<Vec<HapticStyle>>,
        fail: bool,
    }

    impl HapticEngine for Recorder {
        fn impact(&self, style: HapticStyle) -> Result<(), FeedbackError> {
            if self.fail {
                return Err(FeedbackError::Unavailable);
            }
            self.played.borrow_mut().push(style);
            Ok(())
        }
    }

    #[test]
    fn off_never_reaches_engine() {
        let engine = Recorder::default();
        impact(Some(&engine), HapticStyle::Off);
        impact(Some(&engine), HapticStyle::Heavy);
        assert_eq!(*engine.played.borrow(), [HapticStyle::Heavy]);
    }

    #[test]
    fn failures_and_absence_are_silent() {
        let engine = Recorder {
            fail: true,
            ..Recorder::default()
        };
        impact(Some(&engine), HapticStyle::Medium);
        impact(None, HapticStyle::Medium);
        announce(None, OPENED_ANNOUNCEMENT);
        assert!(engine.played.borrow().is_empty());
    }
}
