// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The preview root: lifecycle state machine for one presentation surface.
//!
//! [`PreviewRoot`] owns every animated value of a preview: the overlay
//! opacity, the backdrop track and the container transform. It never calls
//! hooks itself. Each transition returns the [`PreviewEvent`]s it produced and
//! the owner dispatches them once it has released any borrows, so a hook may
//! call back into the controller.
//!
//! ```
//! use std::time::Duration;
//! use understory_preview::{Phase, PreviewConfig, PreviewEvent, PreviewOptions, PreviewRoot};
//!
//! let mut root = PreviewRoot::new(PreviewConfig::default(), PreviewOptions::default());
//! assert_eq!(root.open().as_slice(), &[PreviewEvent::OpenStart]);
//! assert_eq!(root.phase(), Phase::Opening);
//!
//! let mut events = Vec::new();
//! for _ in 0..20 {
//!     events.extend(root.tick(Duration::from_millis(16)));
//! }
//! assert_eq!(events, [PreviewEvent::OpenEnd]);
//! assert_eq!(root.phase(), Phase::Open);
//! ```

use std::time::Duration;

use kurbo::{Insets, Point, Size};
use smallvec::SmallVec;
use tracing::debug;
use understory_event_state::drag::DragState;
use understory_event_state::swipe::{SwipeDecision, SwipeDismiss, SwipeFeedback};
use understory_motion::{AnimatedValue, AnimationId};

use crate::backdrop::{Backdrop, BackdropFrame, BackdropPress};
use crate::config::PreviewConfig;
use crate::container::{ContainerFrame, ContainerKind, LayoutCx};
use crate::keyboard::KeyboardAvoidance;
use crate::options::{CloseReason, LifecycleHooks, OptionsPatch, PreviewOptions};

/// Lifecycle phase of a preview.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Nothing presented.
    #[default]
    Closed,
    /// Entrance animation running.
    Opening,
    /// Fully presented.
    Open,
    /// Exit animation running.
    Closing,
}

impl Phase {
    /// Returns `true` while opening or open.
    pub fn is_presented(self) -> bool {
        matches!(self, Self::Opening | Self::Open)
    }
}

/// A lifecycle transition, reported in the order it happened.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PreviewEvent {
    /// Entered [`Phase::Opening`].
    OpenStart,
    /// Entered [`Phase::Open`].
    OpenEnd,
    /// Entered [`Phase::Closing`].
    CloseStart(CloseReason),
    /// Entered [`Phase::Closed`].
    CloseEnd(CloseReason),
}

/// Events produced by a single root operation.
pub type Events = SmallVec<[PreviewEvent; 4]>;

/// Whether a back-button press was handled.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BackButton {
    /// The preview closed; the host must not navigate back.
    Consumed,
    /// Not intercepted; the host handles it as usual.
    Ignored,
}

/// Where the preview is drawn.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Layer {
    /// The overlay layer above all other content.
    #[default]
    Portal,
    /// In place, inside the owner's own layout.
    Inline,
}

/// Everything the host needs to draw one frame of the preview.
#[derive(Clone, Debug, PartialEq)]
pub struct PreviewFrame {
    /// Lifecycle phase.
    pub phase: Phase,
    /// Target layer.
    pub layer: Layer,
    /// Overlay opacity applied to the container.
    pub opacity: f64,
    /// Scrim.
    pub backdrop: BackdropFrame,
    /// Container transform and bounds.
    pub container: ContainerFrame,
}

/// Lifecycle, animation and gesture state of one preview surface.
#[derive(Clone, Debug)]
pub struct PreviewRoot {
    config: PreviewConfig,
    options: PreviewOptions,
    phase: Phase,
    opacity: AnimatedValue,
    pending: Option<AnimationId>,
    backdrop: Backdrop,
    container: ContainerKind,
    swipe: SwipeDismiss,
    drag: DragState,
    close_reason: Option<CloseReason>,
    mounted: bool,
    keyboard: KeyboardAvoidance,
    viewport: Size,
    insets: Insets,
    layer: Layer,
}

impl PreviewRoot {
    /// A closed, unmounted root.
    pub fn new(config: PreviewConfig, options: PreviewOptions) -> Self {
        Self {
            backdrop: Backdrop::new(&config, options.dismiss_on_backdrop_press),
            container: ContainerKind::new(options.variant, &config),
            swipe: config.swipe(options.swipe_threshold),
            keyboard: KeyboardAvoidance::new(config.avoid_keyboard),
            opacity: AnimatedValue::new(0.0),
            phase: Phase::Closed,
            pending: None,
            drag: DragState::default(),
            close_reason: None,
            mounted: false,
            viewport: Size::ZERO,
            insets: Insets::ZERO,
            layer: Layer::Portal,
            config,
            options,
        }
    }

    /// Host configuration.
    pub fn config(&self) -> &PreviewConfig {
        &self.config
    }

    /// Options of the current presentation.
    pub fn options(&self) -> &PreviewOptions {
        &self.options
    }

    /// Lifecycle callbacks of the current presentation.
    pub fn hooks(&self) -> &LifecycleHooks {
        &self.options.hooks
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the root holds rendered content.
    ///
    /// Becomes `true` on open and `false` once the exit completes, unless
    /// the configuration keeps content mounted after exit.
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Overlay opacity.
    pub fn opacity(&self) -> f64 {
        self.opacity.get()
    }

    /// Reason for the current or most recent close.
    pub fn close_reason(&self) -> Option<CloseReason> {
        self.close_reason
    }

    /// Scrim state.
    pub fn backdrop(&self) -> &Backdrop {
        &self.backdrop
    }

    /// Container state.
    pub fn container(&self) -> &ContainerKind {
        &self.container
    }

    /// Whether a swipe is being tracked.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Begin the entrance.
    ///
    /// From [`Phase::Closing`] the exit is abandoned: its close-end is
    /// reported first and the entrance resumes from the current values.
    pub fn open(&mut self) -> Events {
        let mut events = Events::new();
        match self.phase {
            Phase::Opening | Phase::Open => return events,
            Phase::Closing => {
                if let Some(reason) = self.close_reason {
                    events.push(PreviewEvent::CloseEnd(reason));
                }
            }
            Phase::Closed => {
                self.container = ContainerKind::new(self.options.variant, &self.config);
                self.backdrop.reset();
                self.opacity.set(0.0);
            }
        }
        self.phase = Phase::Opening;
        self.mounted = true;
        events.push(PreviewEvent::OpenStart);
        self.pending = Some(self.opacity.animate_to(1.0, self.config.open_timing()));
        self.backdrop.fade_in();
        self.container.get_mut().animate_in(&self.config);
        debug!(variant = ?self.options.variant, "preview opening");
        events
    }

    /// Begin the exit with `reason`.
    ///
    /// Ignored unless opening or open. An in-flight entrance is retargeted
    /// from its current value and its completion is never reported.
    pub fn request_close(&mut self, reason: CloseReason) -> Events {
        let mut events = Events::new();
        if !self.phase.is_presented() {
            return events;
        }
        self.drag.cancel();
        self.phase = Phase::Closing;
        self.close_reason = Some(reason);
        events.push(PreviewEvent::CloseStart(reason));
        self.pending = Some(self.opacity.animate_to(0.0, self.config.close_timing()));
        // A swipe has already started the container on its way out.
        if reason != CloseReason::Swipe {
            self.container.get_mut().animate_out(&self.config);
        }
        debug!(?reason, "preview closing");
        events
    }

    /// Close at once, without animating, as when the owner goes away.
    ///
    /// A presented preview reports both close events with
    /// [`CloseReason::Programmatic`]; one already closing reports its
    /// close-end. Does nothing when closed.
    pub fn teardown(&mut self) -> Events {
        let mut events = self.request_close(CloseReason::Programmatic);
        if self.phase != Phase::Closing {
            return events;
        }
        self.pending = None;
        self.opacity.set(0.0);
        self.backdrop.reset();
        self.phase = Phase::Closed;
        self.mounted = false;
        let reason = self.close_reason.unwrap_or(CloseReason::Programmatic);
        events.push(PreviewEvent::CloseEnd(reason));
        debug!(?reason, "preview torn down");
        events
    }

    /// Advance all animations by `dt`.
    pub fn tick(&mut self, dt: Duration) -> Events {
        let mut events = Events::new();
        self.backdrop.tick(dt);
        self.container.get_mut().tick(dt);
        let Some(done) = self.opacity.tick(dt) else {
            return events;
        };
        if self.pending != Some(done.id) {
            return events;
        }
        self.pending = None;
        match self.phase {
            Phase::Opening => {
                self.phase = Phase::Open;
                events.push(PreviewEvent::OpenEnd);
            }
            Phase::Closing => {
                self.phase = Phase::Closed;
                let reason = self.close_reason.unwrap_or(CloseReason::Programmatic);
                events.push(PreviewEvent::CloseEnd(reason));
                if self.config.unmount_on_exit {
                    self.mounted = false;
                }
                debug!(?reason, "preview closed");
            }
            Phase::Closed | Phase::Open => {}
        }
        events
    }

    /// Handle the hardware back button.
    ///
    /// Consumed only while opening or open, and only when the options allow it.
    pub fn back_button(&mut self) -> (BackButton, Events) {
        if self.phase.is_presented() && self.options.close_on_back_button {
            (BackButton::Consumed, self.request_close(CloseReason::BackButton))
        } else {
            (BackButton::Ignored, Events::new())
        }
    }

    /// Handle a press on the default backdrop.
    pub fn press_backdrop(&mut self) -> Events {
        match self.backdrop.press() {
            BackdropPress::Dismiss => self.request_close(CloseReason::Backdrop),
            BackdropPress::Ignored => Events::new(),
        }
    }

    /// Start tracking a swipe at `pos`.
    ///
    /// Returns `false` when the preview is not fully open or the current
    /// variant does not accept swipes.
    pub fn drag_start(&mut self, pos: Point, time_ms: u64) -> bool {
        if self.phase != Phase::Open || !self.options.swipe_enabled() {
            return false;
        }
        self.drag.start(pos, time_ms);
        true
    }

    /// Follow the pointer during a swipe.
    pub fn drag_move(&mut self, pos: Point, time_ms: u64) -> Option<SwipeFeedback> {
        self.drag.update(pos, time_ms)?;
        let offset = self.drag.total_offset(pos)?;
        let feedback = self.swipe.feedback(offset.y);
        self.container.get_mut().drag(&feedback);
        self.opacity.set(feedback.opacity);
        Some(feedback)
    }

    /// Release a swipe: dismiss past the threshold, otherwise spring back.
    pub fn drag_end(&mut self, pos: Point, time_ms: u64) -> Events {
        let Some(release) = self.drag.end(pos, time_ms) else {
            return Events::new();
        };
        match self.swipe.decide(release.offset.y, release.velocity.y) {
            SwipeDecision::Dismiss => {
                self.container
                    .get_mut()
                    .fling(&self.config, self.viewport);
                self.request_close(CloseReason::Swipe)
            }
            SwipeDecision::Restore => {
                self.restore();
                Events::new()
            }
        }
    }

    /// Abandon a swipe and return to rest.
    pub fn drag_cancel(&mut self) {
        if self.drag.is_dragging() {
            self.drag.cancel();
            self.restore();
        }
    }

    fn restore(&mut self) {
        self.container.get_mut().restore(&self.config);
        self.opacity.animate_to(1.0, self.config.open_timing());
    }

    /// Replace the presentation options.
    pub fn set_options(&mut self, options: PreviewOptions) {
        let variant_changed = options.variant != self.options.variant;
        self.options = options;
        self.backdrop
            .set_dismiss_on_press(self.options.dismiss_on_backdrop_press);
        self.swipe = self.config.swipe(self.options.swipe_threshold);
        if variant_changed {
            self.drag.cancel();
            self.container = ContainerKind::new(self.options.variant, &self.config);
            let container = self.container.get_mut();
            match self.phase {
                Phase::Closed => {}
                Phase::Opening => container.animate_in(&self.config),
                Phase::Open => container.settle(),
                Phase::Closing => {
                    container.settle();
                    container.animate_out(&self.config);
                }
            }
        }
    }

    /// Shallow-merge `patch` into the presentation options.
    pub fn apply_options(&mut self, patch: OptionsPatch) {
        let mut options = self.options.clone();
        options.apply(patch);
        self.set_options(options);
    }

    /// Replace the host configuration, for example after a theme switch.
    ///
    /// The scrim color, swipe limits and keyboard avoidance follow at once.
    /// Running animations keep their curves; later ones use the new timings.
    pub fn set_config(&mut self, config: PreviewConfig) {
        self.backdrop.set_color(config.backdrop_color());
        self.keyboard.set_enabled(config.avoid_keyboard);
        self.swipe = config.swipe(self.options.swipe_threshold);
        self.config = config;
    }

    /// Set the overlay size and its safe-area insets.
    pub fn set_viewport(&mut self, size: Size, insets: Insets) {
        self.viewport = size;
        self.insets = insets;
    }

    /// Choose where the preview is drawn.
    pub fn set_layer(&mut self, layer: Layer) {
        self.layer = layer;
    }

    /// Let a custom renderer draw the backdrop.
    pub fn set_custom_backdrop(&mut self, custom: bool) {
        self.backdrop.set_custom(custom);
    }

    /// The software keyboard appeared.
    pub fn keyboard_shown(&mut self, height: f64) {
        self.keyboard.show(height);
    }

    /// The software keyboard went away.
    pub fn keyboard_hidden(&mut self) {
        self.keyboard.hide();
    }

    /// Layout environment for the container.
    pub fn layout_cx(&self) -> LayoutCx {
        LayoutCx {
            viewport: self.viewport,
            insets: self.insets,
            keyboard_height: self.keyboard.height(),
            avoid_keyboard: self.keyboard.is_enabled(),
        }
    }

    /// Snapshot for rendering, or `None` when nothing is mounted.
    pub fn frame(&self) -> Option<PreviewFrame> {
        if !self.mounted {
            return None;
        }
        let opacity = self.opacity.get();
        Some(PreviewFrame {
            phase: self.phase,
            layer: self.layer,
            opacity,
            backdrop: self.backdrop.frame(opacity),
            container: self
                .container
                .frame(&self.options, &self.config, &self.layout_cx()),
        })
    }
}

/// Invoke the hooks for `events`.
///
/// Close events belong to the presentation that was showing before the
/// operation, open events to the one showing after it.
pub(crate) fn dispatch(events: &[PreviewEvent], before: &LifecycleHooks, after: &LifecycleHooks) {
    for &event in events {
        match event {
            PreviewEvent::CloseStart(_) | PreviewEvent::CloseEnd(_) => before.dispatch(event),
            PreviewEvent::OpenStart | PreviewEvent::OpenEnd => after.dispatch(event),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Variant;

    const FRAME: Duration = Duration::from_millis(16);

    fn root() -> PreviewRoot {
        PreviewRoot::new(PreviewConfig::default(), PreviewOptions::default())
    }

    fn run(root: &mut PreviewRoot, frames: usize) -> Vec<PreviewEvent> {
        let mut events = Vec::new();
        for _ in 0..frames {
            events.extend(root.tick(FRAME));
        }
        events
    }

    #[test]
    fn full_cycle_emits_ordered_events() {
        let mut r = root();
        assert!(r.frame().is_none());
        assert_eq!(r.open().as_slice(), &[PreviewEvent::OpenStart]);
        assert!(r.frame().is_some());
        assert_eq!(run(&mut r, 20), [PreviewEvent::OpenEnd]);
        assert_eq!(r.phase(), Phase::Open);
        assert_eq!(r.opacity(), 1.0);

        assert_eq!(
            r.request_close(CloseReason::Programmatic).as_slice(),
            &[PreviewEvent::CloseStart(CloseReason::Programmatic)]
        );
        assert_eq!(
            run(&mut r, 20),
            [PreviewEvent::CloseEnd(CloseReason::Programmatic)]
        );
        assert_eq!(r.phase(), Phase::Closed);
        assert!(!r.is_mounted());
        assert!(r.frame().is_none());
    }

    #[test]
    fn close_during_opening_skips_open_end_and_does_not_jump() {
        let mut r = root();
        r.open();
        run(&mut r, 4);
        let mid = r.opacity();
        assert!(mid > 0.0 && mid < 1.0);

        r.request_close(CloseReason::Backdrop);
        assert_eq!(r.opacity(), mid);
        let events = run(&mut r, 30);
        assert_eq!(events, [PreviewEvent::CloseEnd(CloseReason::Backdrop)]);
    }

    #[test]
    fn reopen_while_closing_finishes_old_cycle_first() {
        let mut r = root();
        r.open();
        run(&mut r, 20);
        r.request_close(CloseReason::Programmatic);
        run(&mut r, 3);
        let events = r.open();
        assert_eq!(
            events.as_slice(),
            &[
                PreviewEvent::CloseEnd(CloseReason::Programmatic),
                PreviewEvent::OpenStart
            ]
        );
        assert_eq!(run(&mut r, 20), [PreviewEvent::OpenEnd]);
    }

    #[test]
    fn teardown_closes_without_animating() {
        let mut r = root();
        r.open();
        run(&mut r, 3);
        assert_eq!(
            r.teardown().as_slice(),
            &[
                PreviewEvent::CloseStart(CloseReason::Programmatic),
                PreviewEvent::CloseEnd(CloseReason::Programmatic)
            ]
        );
        assert_eq!(r.phase(), Phase::Closed);
        assert!(r.frame().is_none());
        assert!(run(&mut r, 20).is_empty());
        assert!(r.teardown().is_empty());

        r.open();
        run(&mut r, 20);
        r.request_close(CloseReason::Backdrop);
        assert_eq!(
            r.teardown().as_slice(),
            &[PreviewEvent::CloseEnd(CloseReason::Backdrop)]
        );
    }

    #[test]
    fn config_swap_while_open_restyles_backdrop() {
        let mut r = root();
        r.open();
        run(&mut r, 20);
        r.set_viewport(Size::new(390.0, 844.0), Insets::ZERO);
        r.keyboard_shown(300.0);
        assert_eq!(r.frame().unwrap().container.layout.padding_bottom, 16.0);

        let dark = PreviewConfig::default()
            .with_theme(crate::config::ThemeMode::Dark)
            .with_avoid_keyboard(true)
            .with_swipe_threshold(40.0);
        r.set_config(dark.clone());
        let frame = r.frame().unwrap();
        assert_eq!(frame.backdrop.color, Some(dark.backdrop_color()));
        assert_eq!(frame.container.layout.padding_bottom, 300.0);
        assert_eq!(r.phase(), Phase::Open);
    }

    #[test]
    fn close_is_ignored_when_closed() {
        let mut r = root();
        assert!(r.request_close(CloseReason::Programmatic).is_empty());
        assert_eq!(r.back_button(), (BackButton::Ignored, Events::new()));
    }

    #[test]
    fn back_button_respects_option() {
        let mut r = root();
        r.apply_options(OptionsPatch::new().close_on_back_button(false));
        r.open();
        assert_eq!(r.back_button().0, BackButton::Ignored);
        r.apply_options(OptionsPatch::new().close_on_back_button(true));
        let (handled, events) = r.back_button();
        assert_eq!(handled, BackButton::Consumed);
        assert_eq!(
            events.as_slice(),
            &[PreviewEvent::CloseStart(CloseReason::BackButton)]
        );
    }

    #[test]
    fn popover_ignores_swipes_by_default() {
        let mut r = root();
        r.open();
        run(&mut r, 20);
        assert!(!r.drag_start(Point::new(0.0, 0.0), 0));
        r.apply_options(OptionsPatch::new().popover_swipe(true));
        assert!(r.drag_start(Point::new(0.0, 0.0), 0));
    }

    #[test]
    fn swipe_needs_open_phase() {
        let mut r = PreviewRoot::new(
            PreviewConfig::default(),
            PreviewOptions::from_patch(OptionsPatch::new().variant(Variant::Sheet)),
        );
        r.open();
        assert!(!r.drag_start(Point::ZERO, 0));
    }

    #[test]
    fn variant_swap_while_open_settles_new_container() {
        let mut r = root();
        r.open();
        run(&mut r, 60);
        r.apply_options(OptionsPatch::new().variant(Variant::Sheet));
        let frame = r.frame().unwrap();
        assert_eq!(frame.container.variant, Variant::Sheet);
        assert_eq!(frame.container.translate_y, 0.0);
    }

    #[test]
    fn keep_mounted_after_exit() {
        let config = PreviewConfig::default().with_unmount_on_exit(false);
        let mut r = PreviewRoot::new(config, PreviewOptions::default());
        r.open();
        run(&mut r, 20);
        r.request_close(CloseReason::Programmatic);
        run(&mut r, 20);
        assert!(r.is_mounted());
        assert_eq!(r.frame().unwrap().phase, Phase::Closed);
    }

    #[test]
    fn keyboard_feeds_layout() {
        let config = PreviewConfig::default().with_avoid_keyboard(true);
        let mut r = PreviewRoot::new(config, PreviewOptions::default());
        r.set_viewport(Size::new(390.0, 844.0), Insets::ZERO);
        r.open();
        r.keyboard_shown(300.0);
        assert_eq!(r.frame().unwrap().container.layout.padding_bottom, 300.0);
        r.keyboard_hidden();
        assert_eq!(r.frame().unwrap().container.layout.padding_bottom, 16.0);
    }
}
