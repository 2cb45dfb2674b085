// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Controlled, declarative preview.
//!
//! [`QuickPreview`] is driven by a `visible` flag owned by the host instead of
//! a provider. It is the building block for hosts that render the preview
//! themselves, in place or through an overlay layer.
//!
//! When the user dismisses the preview (backdrop, back button or swipe), the
//! exit starts right away and `on_close` tells the host to clear its flag.
//!
//! ```
//! use std::time::Duration;
//! use understory_preview::headless::{QuickPreview, QuickPreviewProps};
//! use understory_preview::Layer;
//!
//! let mut preview = QuickPreview::new(QuickPreviewProps::<()>::default(), "details");
//! assert!(preview.render().is_none());
//!
//! preview.set_visible(true);
//! preview.tick(Duration::from_millis(16));
//! let render = preview.render().unwrap();
//! assert_eq!(render.layer, Layer::Portal);
//! assert_eq!(*render.content, "details");
//! ```

use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use kurbo::{Insets, Point, Size};

use crate::config::PreviewConfig;
use crate::feedback::{self, Announcer, CLOSED_ANNOUNCEMENT, OPENED_ANNOUNCEMENT};
use crate::options::{CloseReason, Hook, OptionsPatch, PreviewOptions};
use crate::root::{self, BackButton, Events, Layer, PreviewEvent, PreviewFrame, PreviewRoot};

/// Renders a custom backdrop from its interpolated opacity.
pub type BackdropRenderer<N> = Rc<dyn Fn(f64) -> N>;

/// Test id reported when none is given.
pub const DEFAULT_TEST_ID: &str = "quicklook";

/// Properties of a [`QuickPreview`].
pub struct QuickPreviewProps<N = ()> {
    /// Theme, timings, keyboard avoidance and unmount behavior.
    pub config: PreviewConfig,
    /// Variant, size, accessibility and lifecycle hooks.
    pub options: OptionsPatch,
    /// Close when the backdrop is pressed.
    pub close_on_backdrop_press: bool,
    /// Close on the hardware back button.
    pub close_on_back_button: bool,
    /// Allow swipe-down dismissal for either variant.
    pub enable_swipe_to_close: bool,
    /// Swipe distance that commits a dismissal.
    pub swipe_threshold: Option<f64>,
    /// Render into the overlay layer rather than in place.
    pub portal: bool,
    /// Identifier for UI tests.
    pub test_id: String,
    /// The user dismissed the preview; the host should clear `visible`.
    pub on_close: Option<Hook>,
    /// The backdrop was pressed, whether or not that closes the preview.
    pub on_backdrop_press: Option<Hook>,
    /// The card itself was pressed.
    pub on_press_card: Option<Hook>,
    /// Custom backdrop renderer replacing the default scrim.
    pub render_backdrop: Option<BackdropRenderer<N>>,
    /// Receives open and close announcements.
    pub announcer: Option<Rc<dyn Announcer>>,
}

impl<N> Default for QuickPreviewProps<N> {
    fn default() -> Self {
        Self {
            config: PreviewConfig::default(),
            options: OptionsPatch::default(),
            close_on_backdrop_press: true,
            close_on_back_button: true,
            enable_swipe_to_close: true,
            swipe_threshold: None,
            portal: true,
            test_id: DEFAULT_TEST_ID.to_owned(),
            on_close: None,
            on_backdrop_press: None,
            on_press_card: None,
            render_backdrop: None,
            announcer: None,
        }
    }
}

impl<N> fmt::Debug for QuickPreviewProps<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuickPreviewProps")
            .field("config", &self.config)
            .field("options", &self.options)
            .field("close_on_backdrop_press", &self.close_on_backdrop_press)
            .field("close_on_back_button", &self.close_on_back_button)
            .field("enable_swipe_to_close", &self.enable_swipe_to_close)
            .field("swipe_threshold", &self.swipe_threshold)
            .field("portal", &self.portal)
            .field("test_id", &self.test_id)
            .finish_non_exhaustive()
    }
}

impl<N> QuickPreviewProps<N> {
    fn resolved_options(&self) -> PreviewOptions {
        let mut options = PreviewOptions::from_patch(self.options.clone());
        options.dismiss_on_backdrop_press = self.close_on_backdrop_press;
        options.close_on_back_button = self.close_on_back_button;
        options.dismiss_on_pan_down = self.enable_swipe_to_close;
        options.popover_swipe = self.enable_swipe_to_close;
        if self.swipe_threshold.is_some() {
            options.swipe_threshold = self.swipe_threshold;
        }
        options
    }
}

/// One rendered frame of a [`QuickPreview`].
#[derive(Debug)]
pub struct PreviewRender<'a, C, N> {
    /// Where to draw.
    pub layer: Layer,
    /// Interpolated values and bounds.
    pub frame: PreviewFrame,
    /// The content to place inside the container.
    pub content: &'a C,
    /// Output of the custom backdrop renderer, if one is set.
    pub backdrop: Option<N>,
    /// Identifier for UI tests.
    pub test_id: &'a str,
}

/// A preview shown while the host's `visible` flag is set.
pub struct QuickPreview<C, N = ()> {
    props: QuickPreviewProps<N>,
    root: PreviewRoot,
    content: C,
    visible: bool,
}

impl<C, N> QuickPreview<C, N> {
    /// A hidden preview of `content`.
    pub fn new(props: QuickPreviewProps<N>, content: C) -> Self {
        let mut root = PreviewRoot::new(props.config.clone(), props.resolved_options());
        root.set_layer(if props.portal {
            Layer::Portal
        } else {
            Layer::Inline
        });
        root.set_custom_backdrop(props.render_backdrop.is_some());
        Self {
            props,
            root,
            content,
            visible: false,
        }
    }

    /// The host's visibility flag.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The underlying state machine.
    pub fn root(&self) -> &PreviewRoot {
        &self.root
    }

    /// Replace the content.
    pub fn set_content(&mut self, content: C) {
        self.content = content;
    }

    /// Follow the host's visibility flag.
    pub fn set_visible(&mut self, visible: bool) {
        if visible == self.visible {
            return;
        }
        self.visible = visible;
        let events = if visible {
            self.root.open()
        } else {
            self.root.request_close(CloseReason::Programmatic)
        };
        self.emit(&events);
    }

    /// Advance animations by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        let events = self.root.tick(dt);
        self.emit(&events);
    }

    /// Forward the hardware back button.
    pub fn back_button(&mut self) -> BackButton {
        let (handled, events) = self.root.back_button();
        self.dismissed(&events);
        handled
    }

    /// Forward a press on the backdrop.
    pub fn press_backdrop(&mut self) {
        if let Some(hook) = &self.props.on_backdrop_press {
            hook();
        }
        let events = self.root.press_backdrop();
        self.dismissed(&events);
    }

    /// Forward a press on the card.
    pub fn press_card(&self) {
        if let Some(hook) = &self.props.on_press_card {
            hook();
        }
    }

    /// Forward a touch-down on the container.
    pub fn drag_start(&mut self, pos: Point, time_ms: u64) -> bool {
        self.root.drag_start(pos, time_ms)
    }

    /// Forward a pointer move.
    pub fn drag_move(&mut self, pos: Point, time_ms: u64) {
        let _ = self.root.drag_move(pos, time_ms);
    }

    /// Forward a touch-up.
    pub fn drag_end(&mut self, pos: Point, time_ms: u64) {
        let events = self.root.drag_end(pos, time_ms);
        self.dismissed(&events);
    }

    /// Forward a touch cancellation.
    pub fn drag_cancel(&mut self) {
        self.root.drag_cancel();
    }

    /// Set the overlay size and safe-area insets.
    pub fn set_viewport(&mut self, size: Size, insets: Insets) {
        self.root.set_viewport(size, insets);
    }

    /// The software keyboard appeared.
    pub fn keyboard_shown(&mut self, height: f64) {
        self.root.keyboard_shown(height);
    }

    /// The software keyboard went away.
    pub fn keyboard_hidden(&mut self) {
        self.root.keyboard_hidden();
    }

    /// The current frame, or `None` when nothing should be drawn.
    pub fn render(&self) -> Option<PreviewRender<'_, C, N>> {
        let frame = self.root.frame()?;
        let backdrop = self
            .props
            .render_backdrop
            .as_ref()
            .map(|render| self.root.backdrop().render_with(frame.opacity, |o| render(o)));
        Some(PreviewRender {
            layer: frame.layer,
            frame,
            content: &self.content,
            backdrop,
            test_id: &self.props.test_id,
        })
    }

    fn dismissed(&mut self, events: &Events) {
        let closing = events
            .iter()
            .any(|e| matches!(e, PreviewEvent::CloseStart(_)));
        if closing {
            self.visible = false;
        }
        self.emit(events);
        if closing {
            if let Some(on_close) = &self.props.on_close {
                on_close();
            }
        }
    }

    fn emit(&self, events: &Events) {
        let hooks = self.root.hooks();
        root::dispatch(events, hooks, hooks);
        for event in events {
            let message = match event {
                PreviewEvent::OpenStart => OPENED_ANNOUNCEMENT,
                PreviewEvent::CloseStart(_) => CLOSED_ANNOUNCEMENT,
                PreviewEvent::OpenEnd | PreviewEvent::CloseEnd(_) => continue,
            };
            feedback::announce(self.props.announcer.as_deref(), message);
        }
    }
}

impl<C: fmt::Debug, N> fmt::Debug for QuickPreview<C, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuickPreview")
            .field("props", &self.props)
            .field("root", &self.root)
            .field("content", &self.content)
            .field("visible", &self.visible)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Variant;
    use crate::root::Phase;
    use std::cell::Cell;

    const FRAME: Duration = Duration::from_millis(16);

    fn run<C, N>(p: &mut QuickPreview<C, N>, frames: usize) {
        for _ in 0..frames {
            p.tick(FRAME);
        }
    }

    #[test]
    fn renders_nothing_until_visible() {
        let mut p = QuickPreview::new(QuickPreviewProps::<()>::default(), 7);
        assert!(p.render().is_none());
        p.set_visible(true);
        assert!(p.render().is_some());
        p.set_visible(false);
        run(&mut p, 30);
        assert!(p.render().is_none());
    }

    #[test]
    fn inline_layer_when_portal_is_off() {
        let props = QuickPreviewProps::<()> {
            portal: false,
            ..QuickPreviewProps::default()
        };
        let mut p = QuickPreview::new(props, ());
        p.set_visible(true);
        assert_eq!(p.render().unwrap().layer, Layer::Inline);
    }

    #[test]
    fn backdrop_press_notifies_and_closes() {
        let closed = Rc::new(Cell::new(0));
        let pressed = Rc::new(Cell::new(0));
        let reason = Rc::new(Cell::new(None));
        let (c, b, r) = (closed.clone(), pressed.clone(), reason.clone());
        let props = QuickPreviewProps::<()> {
            on_close: Some(Rc::new(move || c.set(c.get() + 1))),
            on_backdrop_press: Some(Rc::new(move || b.set(b.get() + 1))),
            options: OptionsPatch::new().on_close_end(move |why| r.set(Some(why))),
            ..QuickPreviewProps::default()
        };
        let mut p = QuickPreview::new(props, ());
        p.set_visible(true);
        run(&mut p, 20);
        p.press_backdrop();
        assert_eq!(pressed.get(), 1);
        assert_eq!(closed.get(), 1);
        assert!(!p.is_visible());
        // The host echoing the flag back does not restart anything.
        p.set_visible(false);
        run(&mut p, 20);
        assert_eq!(reason.get(), Some(CloseReason::Backdrop));
        assert_eq!(p.root().phase(), Phase::Closed);
    }

    #[test]
    fn backdrop_press_without_dismissal_still_reports() {
        let pressed = Rc::new(Cell::new(false));
        let b = pressed.clone();
        let props = QuickPreviewProps::<()> {
            close_on_backdrop_press: false,
            on_backdrop_press: Some(Rc::new(move || b.set(true))),
            ..QuickPreviewProps::default()
        };
        let mut p = QuickPreview::new(props, ());
        p.set_visible(true);
        p.press_backdrop();
        assert!(pressed.get());
        assert!(p.is_visible());
        assert_eq!(p.root().phase(), Phase::Opening);
    }

    #[test]
    fn custom_backdrop_receives_opacity() {
        let props = QuickPreviewProps::<String> {
            render_backdrop: Some(Rc::new(|opacity| format!("{opacity:.1}"))),
            ..QuickPreviewProps::default()
        };
        let mut p = QuickPreview::new(props, ());
        p.set_visible(true);
        assert_eq!(p.render().unwrap().backdrop.as_deref(), Some("0.0"));
        run(&mut p, 20);
        let render = p.render().unwrap();
        assert_eq!(render.backdrop.as_deref(), Some("1.0"));
        assert_eq!(render.frame.backdrop.color, None);
    }

    #[test]
    fn custom_backdrop_press_reports_without_closing() {
        let pressed = Rc::new(Cell::new(0));
        let closed = Rc::new(Cell::new(0));
        let (b, c) = (pressed.clone(), closed.clone());
        let props = QuickPreviewProps::<()> {
            render_backdrop: Some(Rc::new(|_| ())),
            on_backdrop_press: Some(Rc::new(move || b.set(b.get() + 1))),
            on_close: Some(Rc::new(move || c.set(c.get() + 1))),
            ..QuickPreviewProps::default()
        };
        let mut p = QuickPreview::new(props, ());
        p.set_visible(true);
        run(&mut p, 20);
        assert_eq!(p.root().phase(), Phase::Open);
        assert!(!p.render().unwrap().frame.backdrop.interactive);
        p.press_backdrop();
        assert_eq!(pressed.get(), 1);
        assert_eq!(closed.get(), 0);
        assert!(p.is_visible());
        assert_eq!(p.root().phase(), Phase::Open);
    }

    #[test]
    fn swipe_closes_popover_when_enabled() {
        let props = QuickPreviewProps::<()> {
            options: OptionsPatch::new().variant(Variant::Popover),
            ..QuickPreviewProps::default()
        };
        let mut p = QuickPreview::new(props, ());
        p.set_viewport(Size::new(390.0, 844.0), Insets::ZERO);
        p.set_visible(true);
        run(&mut p, 30);
        assert!(p.drag_start(Point::new(100.0, 100.0), 1_000));
        p.drag_move(Point::new(100.0, 160.0), 1_050);
        p.drag_end(Point::new(100.0, 200.0), 1_300);
        assert_eq!(p.root().close_reason(), Some(CloseReason::Swipe));
        assert_eq!(p.render().unwrap().test_id, "quicklook");
    }

    #[test]
    fn press_card_invokes_hook() {
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let props = QuickPreviewProps::<()> {
            on_press_card: Some(Rc::new(move || h.set(h.get() + 1))),
            ..QuickPreviewProps::default()
        };
        let p = QuickPreview::new(props, ());
        p.press_card();
        assert_eq!(hits.get(), 1);
    }
}
