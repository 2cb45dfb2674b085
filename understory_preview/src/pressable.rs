// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A press target that opens a preview on long-press.
//!
//! [`QuickPreviewPressable`] races a tap against a long-press on each touch
//! sequence. A tap runs `on_press`; a long-press plays haptics and presents
//! the preview built by `render_preview`, through a bound controller if one
//! was given and through the [global](crate::global) API otherwise. While the
//! finger is down the target shrinks slightly.

use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use kurbo::Point;
use understory_event_state::press::{PressConfig, PressOutcome, PressRecognizer};
use understory_motion::{AnimatedValue, Timing};

use crate::controller::PreviewController;
use crate::feedback::{self, HapticEngine, HapticStyle};
use crate::global;
use crate::options::{Hook, OptionsPatch, Variant};

/// Press-down shrink duration (ms).
pub const PRESS_IN_MS: u64 = 90;
/// Release grow-back duration (ms).
pub const PRESS_OUT_MS: u64 = 120;

/// Properties of a [`QuickPreviewPressable`].
pub struct PressableProps<C> {
    /// Builds the preview content when a long-press fires.
    pub render_preview: Rc<dyn Fn() -> C>,
    /// Ordinary activation on tap.
    pub on_press: Option<Hook>,
    /// Options layered over the popover defaults.
    pub preview_options: OptionsPatch,
    /// Long-press delay (ms).
    pub delay: u64,
    /// Scale while pressed.
    pub scale: f64,
    /// Impact played when the preview opens.
    pub haptics: HapticStyle,
    /// Ignore all touches.
    pub disabled: bool,
    /// Accessibility label of the target.
    pub accessibility_label: Option<String>,
    /// Identifier for UI tests.
    pub test_id: Option<String>,
}

impl<C> PressableProps<C> {
    /// Props with defaults around `render_preview`.
    pub fn new(render_preview: impl Fn() -> C + 'static) -> Self {
        Self {
            render_preview: Rc::new(render_preview),
            on_press: None,
            preview_options: OptionsPatch::default(),
            delay: PressConfig::default().long_press_delay,
            scale: 0.98,
            haptics: HapticStyle::Medium,
            disabled: false,
            accessibility_label: None,
            test_id: None,
        }
    }
}

impl<C> fmt::Debug for PressableProps<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PressableProps")
            .field("on_press", &self.on_press.is_some())
            .field("preview_options", &self.preview_options)
            .field("delay", &self.delay)
            .field("scale", &self.scale)
            .field("haptics", &self.haptics)
            .field("disabled", &self.disabled)
            .field("accessibility_label", &self.accessibility_label)
            .field("test_id", &self.test_id)
            .finish_non_exhaustive()
    }
}

/// Tap and long-press handling for one trigger element.
pub struct QuickPreviewPressable<C> {
    props: PressableProps<C>,
    press: PressRecognizer,
    scale: AnimatedValue,
    haptics: Option<Rc<dyn HapticEngine>>,
    controller: Option<PreviewController<C>>,
}

impl<C: 'static> QuickPreviewPressable<C> {
    /// A pressable presenting through the global API.
    pub fn new(props: PressableProps<C>) -> Self {
        let press = PressRecognizer::new(PressConfig {
            long_press_delay: props.delay,
            ..PressConfig::default()
        });
        Self {
            props,
            press,
            scale: AnimatedValue::new(1.0),
            haptics: None,
            controller: None,
        }
    }

    /// Present through `controller` instead of the global API.
    pub fn with_controller(mut self, controller: PreviewController<C>) -> Self {
        self.controller = Some(controller);
        self
    }

    /// Play long-press haptics on `engine`.
    pub fn with_haptics(mut self, engine: Rc<dyn HapticEngine>) -> Self {
        self.haptics = Some(engine);
        self
    }

    /// Current press scale.
    pub fn scale(&self) -> f64 {
        self.scale.get()
    }

    /// Whether a touch is down and unresolved.
    pub fn is_pressed(&self) -> bool {
        self.press.is_pressed()
    }

    /// Accessibility label of the target.
    pub fn accessibility_label(&self) -> Option<&str> {
        self.props.accessibility_label.as_deref()
    }

    /// Identifier for UI tests.
    pub fn test_id(&self) -> Option<&str> {
        self.props.test_id.as_deref()
    }

    /// A touch went down.
    pub fn touch_down(&mut self, pos: Point, time_ms: u64) {
        if self.props.disabled {
            return;
        }
        self.press.down(pos, time_ms);
        self.scale
            .animate_to(self.props.scale, Timing::millis(PRESS_IN_MS));
    }

    /// The touch moved.
    pub fn touch_move(&mut self, pos: Point, time_ms: u64) -> Option<PressOutcome> {
        let outcome = self.press.moved(pos, time_ms)?;
        self.resolve(outcome);
        Some(outcome)
    }

    /// Check the long-press timer while the touch is held.
    pub fn poll(&mut self, time_ms: u64) -> Option<PressOutcome> {
        let outcome = self.press.poll(time_ms)?;
        self.resolve(outcome);
        Some(outcome)
    }

    /// The touch lifted.
    pub fn touch_up(&mut self, pos: Point, time_ms: u64) -> Option<PressOutcome> {
        let outcome = self.press.up(pos, time_ms);
        self.release();
        let outcome = outcome?;
        self.resolve(outcome);
        Some(outcome)
    }

    /// The host took the touch away.
    pub fn touch_cancel(&mut self) {
        let _ = self.press.cancel();
        self.release();
    }

    /// Advance the press-scale animation.
    pub fn tick(&mut self, dt: Duration) {
        let _ = self.scale.tick(dt);
    }

    fn release(&mut self) {
        if self.scale.target() != 1.0 {
            self.scale.animate_to(1.0, Timing::millis(PRESS_OUT_MS));
        }
    }

    fn resolve(&self, outcome: PressOutcome) {
        match outcome {
            PressOutcome::Tap => {
                if let Some(on_press) = &self.props.on_press {
                    on_press();
                }
            }
            PressOutcome::LongPress => self.open(),
            PressOutcome::Cancelled => {}
        }
    }

    fn open(&self) {
        feedback::impact(self.haptics.as_deref(), self.props.haptics);
        let content = (self.props.render_preview)();
        let options = OptionsPatch::new()
            .variant(Variant::Popover)
            .dismiss_on_backdrop_press(true)
            .merge(self.props.preview_options.clone());
        match &self.controller {
            Some(controller) => controller.present(content, options),
            None => global::present(content, options),
        }
    }
}

impl<C> fmt::Debug for QuickPreviewPressable<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuickPreviewPressable")
            .field("props", &self.props)
            .field("press", &self.press)
            .field("scale", &self.scale)
            .field("haptics", &self.haptics.is_some())
            .field("controller", &self.controller)
            .finish()
    }
}
