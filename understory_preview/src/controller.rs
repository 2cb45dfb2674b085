// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The provider that owns preview state and the controller handles bound to it.
//!
//! A [`PreviewProvider`] is the single writer of "what is presented". It owns
//! the content, the [`PreviewRoot`] and the host-facing event inputs. Any
//! number of [`PreviewController`]s may point at it; they hold a weak
//! reference, so a controller outliving its provider degrades to a no-op.
//!
//! ```
//! use std::time::Duration;
//! use understory_preview::{OptionsPatch, Phase, PreviewConfig, PreviewProvider, Variant};
//!
//! let provider = PreviewProvider::<&str>::new(PreviewConfig::default());
//! let controller = provider.controller();
//!
//! controller.present("card", OptionsPatch::new().variant(Variant::Sheet));
//! assert!(controller.is_open());
//! assert_eq!(provider.phase(), Phase::Opening);
//!
//! controller.close();
//! controller.close();
//! for _ in 0..20 {
//!     provider.tick(Duration::from_millis(16));
//! }
//! assert_eq!(provider.phase(), Phase::Closed);
//! assert_eq!(provider.with_content(|c| *c), None);
//! ```

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Duration;

use kurbo::{Insets, Point, Size};
use tracing::debug;

use crate::config::PreviewConfig;
use crate::context::PreviewContext;
use crate::feedback::{self, Announcer, CLOSED_ANNOUNCEMENT, OPENED_ANNOUNCEMENT};
use crate::options::{CloseReason, OptionsPatch, PreviewOptions};
use crate::registry::{self, PreviewHandle, RegistrationId};
use crate::root::{self, BackButton, Events, Phase, PreviewEvent, PreviewFrame, PreviewRoot};

struct ProviderState<C> {
    content: Option<C>,
    root: PreviewRoot,
    announcer: Option<Rc<dyn Announcer>>,
}

impl<C> ProviderState<C> {
    fn is_open(&self) -> bool {
        let open = self.root.phase().is_presented();
        debug_assert!(!open || self.content.is_some(), "open preview without content");
        open
    }
}

type Shared<C> = Rc<RefCell<ProviderState<C>>>;

/// Run `op` on the provider state, then dispatch the resulting hooks and
/// announcements with the state released.
fn run<C>(state: &Shared<C>, op: impl FnOnce(&mut ProviderState<C>) -> Events) {
    let (events, before, after, announcer) = {
        let mut state = state.borrow_mut();
        let before = state.root.hooks().clone();
        let events = op(&mut state);
        if events.is_empty() {
            return;
        }
        let unmount = events
            .iter()
            .any(|e| matches!(e, PreviewEvent::CloseEnd(_)))
            && !state.root.is_mounted();
        if unmount {
            state.content = None;
        }
        (
            events,
            before,
            state.root.hooks().clone(),
            state.announcer.clone(),
        )
    };
    root::dispatch(&events, &before, &after);
    for event in &events {
        let message = match event {
            PreviewEvent::OpenStart => OPENED_ANNOUNCEMENT,
            PreviewEvent::CloseStart(_) => CLOSED_ANNOUNCEMENT,
            PreviewEvent::OpenEnd | PreviewEvent::CloseEnd(_) => continue,
        };
        feedback::announce(announcer.as_deref(), message);
    }
}

/// Owner of the single preview state for a UI tree.
///
/// Dropping the provider closes any preview it still shows, reporting the
/// close hooks, then unregisters it.
pub struct PreviewProvider<C: 'static> {
    state: Shared<C>,
    registration: Option<RegistrationId>,
}

impl<C: 'static> PreviewProvider<C> {
    /// A provider that is not globally registered.
    pub fn new(config: PreviewConfig) -> Self {
        Self {
            state: Rc::new(RefCell::new(ProviderState {
                content: None,
                root: PreviewRoot::new(config, PreviewOptions::default()),
                announcer: None,
            })),
            registration: None,
        }
    }

    /// A provider registered as the global one.
    pub fn mount(config: PreviewConfig) -> Self {
        let mut provider = Self::new(config);
        provider.register();
        provider
    }

    /// Register as the global provider. Repeated calls replace the earlier
    /// registration rather than adding one.
    pub fn register(&mut self) {
        if let Some(previous) = self.registration.take() {
            registry::unregister(previous);
        }
        self.registration = Some(registry::register(Rc::new(self.controller())));
    }

    /// Remove the global registration, if this provider still holds it.
    pub fn unmount(&mut self) {
        if let Some(id) = self.registration.take() {
            registry::unregister(id);
        }
    }

    /// Whether this provider is the active global one.
    pub fn is_registered(&self) -> bool {
        self.registration.is_some_and(registry::is_active)
    }

    /// Install an announcer for open and close messages.
    pub fn with_announcer(self, announcer: Rc<dyn Announcer>) -> Self {
        self.state.borrow_mut().announcer = Some(announcer);
        self
    }

    /// A controller bound to this provider.
    pub fn controller(&self) -> PreviewController<C> {
        PreviewController {
            state: Rc::downgrade(&self.state),
        }
    }

    /// A context through which descendants find this provider.
    pub fn context(&self) -> PreviewContext<C> {
        PreviewContext::new(self.controller())
    }

    /// Advance animations by `dt`.
    pub fn tick(&self, dt: Duration) {
        run(&self.state, |s| s.root.tick(dt));
    }

    /// Forward the hardware back button.
    pub fn back_button(&self) -> BackButton {
        let mut handled = BackButton::Ignored;
        run(&self.state, |s| {
            let (result, events) = s.root.back_button();
            handled = result;
            events
        });
        handled
    }

    /// Forward a press on the backdrop.
    pub fn press_backdrop(&self) {
        run(&self.state, |s| s.root.press_backdrop());
    }

    /// Forward a touch-down on the container. Returns `true` if a swipe is now tracked.
    pub fn drag_start(&self, pos: Point, time_ms: u64) -> bool {
        self.state.borrow_mut().root.drag_start(pos, time_ms)
    }

    /// Forward a pointer move.
    pub fn drag_move(&self, pos: Point, time_ms: u64) {
        let _ = self.state.borrow_mut().root.drag_move(pos, time_ms);
    }

    /// Forward a touch-up.
    pub fn drag_end(&self, pos: Point, time_ms: u64) {
        run(&self.state, |s| s.root.drag_end(pos, time_ms));
    }

    /// Forward a touch cancellation.
    pub fn drag_cancel(&self) {
        self.state.borrow_mut().root.drag_cancel();
    }

    /// Replace the configuration; an open preview restyles immediately.
    pub fn set_config(&self, config: PreviewConfig) {
        self.state.borrow_mut().root.set_config(config);
    }

    /// Set the overlay size and safe-area insets.
    pub fn set_viewport(&self, size: Size, insets: Insets) {
        self.state.borrow_mut().root.set_viewport(size, insets);
    }

    /// The software keyboard appeared.
    pub fn keyboard_shown(&self, height: f64) {
        self.state.borrow_mut().root.keyboard_shown(height);
    }

    /// The software keyboard went away.
    pub fn keyboard_hidden(&self) {
        self.state.borrow_mut().root.keyboard_hidden();
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.state.borrow().root.phase()
    }

    /// Snapshot for rendering, or `None` when nothing is mounted.
    pub fn frame(&self) -> Option<PreviewFrame> {
        self.state.borrow().root.frame()
    }

    /// Options of the current presentation.
    pub fn options(&self) -> PreviewOptions {
        self.state.borrow().root.options().clone()
    }

    /// Borrow the presented content.
    ///
    /// The provider is borrowed for the duration of `f`; calling back into it
    /// from `f` panics.
    pub fn with_content<R>(&self, f: impl FnOnce(&C) -> R) -> Option<R> {
        self.state.borrow().content.as_ref().map(f)
    }
}

impl<C: 'static> Drop for PreviewProvider<C> {
    fn drop(&mut self) {
        run(&self.state, |s| s.root.teardown());
        self.unmount();
    }
}

impl<C: 'static> fmt::Debug for PreviewProvider<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreviewProvider")
            .field("phase", &self.phase())
            .field("registration", &self.registration)
            .finish_non_exhaustive()
    }
}

/// Handle for presenting, updating and closing previews.
///
/// Cheap to clone. Every operation is a no-op once the provider is gone.
pub struct PreviewController<C> {
    state: Weak<RefCell<ProviderState<C>>>,
}

impl<C> Clone for PreviewController<C> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<C> fmt::Debug for PreviewController<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreviewController")
            .field("alive", &self.is_alive())
            .finish_non_exhaustive()
    }
}

impl<C> PreviewController<C> {
    /// Whether the provider still exists.
    pub fn is_alive(&self) -> bool {
        self.state.strong_count() > 0
    }

    /// Show `content` with defaults overridden by `options`.
    ///
    /// While a preview is already showing, the content and options are
    /// swapped in place without a close/open cycle.
    pub fn present(&self, content: C, options: OptionsPatch) {
        let Some(state) = self.state.upgrade() else {
            return;
        };
        run(&state, |s| {
            s.content = Some(content);
            s.root.set_options(PreviewOptions::from_patch(options));
            s.root.open()
        });
    }

    /// Close the current preview. Does nothing when already closed or closing.
    pub fn close(&self) {
        let Some(state) = self.state.upgrade() else {
            return;
        };
        run(&state, |s| s.root.request_close(CloseReason::Programmatic));
    }

    /// Merge `patch` into the current options. Does nothing while closed.
    pub fn update(&self, patch: OptionsPatch) {
        let Some(state) = self.state.upgrade() else {
            return;
        };
        let mut state = state.borrow_mut();
        if !state.is_open() {
            debug!("preview update ignored while closed");
            return;
        }
        state.root.apply_options(patch);
    }

    /// Whether a preview is opening or open.
    pub fn is_open(&self) -> bool {
        self.state
            .upgrade()
            .is_some_and(|state| state.borrow().is_open())
    }
}

impl<C: 'static> PreviewHandle for PreviewController<C> {
    fn close(&self) {
        Self::close(self);
    }

    fn update(&self, patch: OptionsPatch) {
        Self::update(self, patch);
    }

    fn is_open(&self) -> bool {
        Self::is_open(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
