// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The dimmed scrim behind the preview.
//!
//! The backdrop runs its own fade-in track, independent of the root's content
//! opacity. What the host draws is the product of both: the root opacity fades
//! the whole overlay in and out, while the backdrop track only shapes the
//! scrim's entrance. A custom backdrop renderer receives that product and draws
//! whatever it likes without disturbing the card animation.

use std::time::Duration;

use peniko::Color;
use understory_motion::{AnimatedValue, Timing};

use crate::config::PreviewConfig;

/// Accessibility label of the default, pressable backdrop.
pub const BACKDROP_LABEL: &str = "Close preview";
/// Accessibility role of the default, pressable backdrop.
pub const BACKDROP_ROLE: &str = "button";

/// Result of pressing the backdrop.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BackdropPress {
    /// The press requests a close.
    Dismiss,
    /// Backdrop dismissal is disabled or a custom renderer owns the
    /// backdrop; nothing happens.
    Ignored,
}

/// Scrim state owned by a [`PreviewRoot`](crate::PreviewRoot).
#[derive(Clone, Debug)]
pub struct Backdrop {
    opacity: AnimatedValue,
    fade: Timing,
    color: Color,
    dismiss_on_press: bool,
    custom: bool,
}

impl Backdrop {
    /// A hidden backdrop using `config` for its color and fade.
    pub fn new(config: &PreviewConfig, dismiss_on_press: bool) -> Self {
        Self {
            opacity: AnimatedValue::new(0.0),
            fade: config.backdrop_timing(),
            color: config.backdrop_color(),
            dismiss_on_press,
            custom: false,
        }
    }

    /// Start the fade-in from wherever the scrim currently is.
    pub fn fade_in(&mut self) {
        self.opacity.animate_to(1.0, self.fade);
    }

    /// Hide the scrim immediately.
    pub fn reset(&mut self) {
        self.opacity.set(0.0);
    }

    /// Advance the fade.
    pub fn tick(&mut self, dt: Duration) {
        // Nothing waits on the scrim, so its completion is not reported.
        let _ = self.opacity.tick(dt);
    }

    /// The backdrop's own opacity track, in `[0, 1]`.
    pub fn opacity(&self) -> f64 {
        self.opacity.get()
    }

    /// Enable or disable press-to-dismiss.
    pub fn set_dismiss_on_press(&mut self, dismiss: bool) {
        self.dismiss_on_press = dismiss;
    }

    /// Mark the backdrop as drawn by a custom renderer.
    pub fn set_custom(&mut self, custom: bool) {
        self.custom = custom;
    }

    /// Replace the scrim color.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Handle a press on the backdrop.
    ///
    /// A custom backdrop never dismisses; its renderer decides what a press means.
    pub fn press(&self) -> BackdropPress {
        if self.dismiss_on_press && !self.custom {
            BackdropPress::Dismiss
        } else {
            BackdropPress::Ignored
        }
    }

    /// Snapshot for rendering, combined with the root's overlay opacity.
    pub fn frame(&self, root_opacity: f64) -> BackdropFrame {
        BackdropFrame {
            opacity: (root_opacity * self.opacity.get()).clamp(0.0, 1.0),
            color: (!self.custom).then_some(self.color),
            interactive: self.dismiss_on_press && !self.custom,
        }
    }

    /// Run a custom renderer with the combined opacity.
    pub fn render_with<N>(&self, root_opacity: f64, render: impl FnOnce(f64) -> N) -> N {
        render(self.frame(root_opacity).opacity)
    }
}

/// What the host draws for the scrim.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BackdropFrame {
    /// Combined opacity of the scrim.
    pub opacity: f64,
    /// Scrim color, or `None` when a custom renderer draws the backdrop.
    pub color: Option<Color>,
    /// Whether the default backdrop should accept presses.
    pub interactive: bool,
}

impl BackdropFrame {
    /// Accessibility label for an interactive backdrop.
    pub fn accessibility_label(&self) -> Option<&'static str> {
        self.interactive.then_some(BACKDROP_LABEL)
    }

    /// Accessibility role for an interactive backdrop.
    pub fn accessibility_role(&self) -> Option<&'static str> {
        self.interactive.then_some(BACKDROP_ROLE)
    }
}
