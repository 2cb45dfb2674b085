// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-presentation options, partial updates and lifecycle hooks.

use std::fmt;
use std::rc::Rc;

use crate::root::PreviewEvent;

/// Default accessibility label of the preview container.
pub const DEFAULT_LABEL: &str = "Quick preview";
/// Default accessibility role of the preview container.
pub const DEFAULT_ROLE: &str = "dialog";

/// Which container presents the content.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Variant {
    /// Centered card.
    #[default]
    Popover,
    /// Bottom-anchored, full-width sheet.
    Sheet,
}

/// Bounds requested for the container.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub enum PreviewSize {
    /// Responsive defaults from the configuration.
    #[default]
    Auto,
    /// A fixed extent along the variant's main axis: width for popovers,
    /// maximum height for sheets.
    Fixed(f64),
    /// Explicit caps; missing sides fall back to the responsive defaults.
    Bounded {
        /// Maximum width in logical px.
        max_width: Option<f64>,
        /// Maximum height in logical px.
        max_height: Option<f64>,
    },
}

/// How a preview came to be dismissed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub enum CloseReason {
    /// `close()` or the controlled `visible` flag.
    Programmatic,
    /// A press on the backdrop.
    Backdrop,
    /// The hardware back button.
    BackButton,
    /// A swipe past the threshold or a fast flick.
    Swipe,
}

/// A lifecycle callback.
pub type Hook = Rc<dyn Fn()>;

/// A close-completion callback, told how the preview was dismissed.
pub type CloseHook = Rc<dyn Fn(CloseReason)>;

/// Open/close lifecycle callbacks.
///
/// Within one cycle they fire in the order open-start, open-end, close-start,
/// close-end. Open-end is skipped when a close preempts the entrance.
#[derive(Clone, Default)]
pub struct LifecycleHooks {
    /// Entrance animation started.
    pub on_open_start: Option<Hook>,
    /// Entrance animation finished.
    pub on_open_end: Option<Hook>,
    /// Exit animation started.
    pub on_close_start: Option<Hook>,
    /// Exit animation finished; the content is about to be released.
    pub on_close_end: Option<CloseHook>,
}

impl LifecycleHooks {
    /// Invoke the hook matching `event`, if one is set.
    pub fn dispatch(&self, event: PreviewEvent) {
        match event {
            PreviewEvent::OpenStart => call(self.on_open_start.as_ref()),
            PreviewEvent::OpenEnd => call(self.on_open_end.as_ref()),
            PreviewEvent::CloseStart(_) => call(self.on_close_start.as_ref()),
            PreviewEvent::CloseEnd(reason) => {
                if let Some(hook) = &self.on_close_end {
                    hook(reason);
                }
            }
        }
    }
}

fn call(hook: Option<&Hook>) {
    if let Some(hook) = hook {
        hook();
    }
}

impl fmt::Debug for LifecycleHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleHooks")
            .field("on_open_start", &self.on_open_start.is_some())
            .field("on_open_end", &self.on_open_end.is_some())
            .field("on_close_start", &self.on_close_start.is_some())
            .field("on_close_end", &self.on_close_end.is_some())
            .finish()
    }
}

/// Options controlling a single presentation.
#[derive(Clone, Debug)]
pub struct PreviewOptions {
    /// Container variant.
    pub variant: Variant,
    /// Container bounds.
    pub size: PreviewSize,
    /// Close when the backdrop is pressed.
    pub dismiss_on_backdrop_press: bool,
    /// Allow swiping a sheet down to close it.
    pub dismiss_on_pan_down: bool,
    /// Allow swiping a popover down to close it.
    pub popover_swipe: bool,
    /// Close (and consume the event) on the hardware back button.
    pub close_on_back_button: bool,
    /// Swipe distance override; falls back to the configuration.
    pub swipe_threshold: Option<f64>,
    /// Accessibility label of the container.
    pub accessibility_label: Option<String>,
    /// Accessibility role of the container.
    pub accessibility_role: Option<String>,
    /// Lifecycle callbacks.
    pub hooks: LifecycleHooks,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            variant: Variant::Popover,
            size: PreviewSize::Auto,
            dismiss_on_backdrop_press: true,
            dismiss_on_pan_down: true,
            popover_swipe: false,
            close_on_back_button: true,
            swipe_threshold: None,
            accessibility_label: None,
            accessibility_role: None,
            hooks: LifecycleHooks::default(),
        }
    }
}

impl PreviewOptions {
    /// Defaults with `patch` applied.
    pub fn from_patch(patch: OptionsPatch) -> Self {
        let mut options = Self::default();
        options.apply(patch);
        options
    }

    /// Shallow-merge `patch` into these options.
    pub fn apply(&mut self, patch: OptionsPatch) {
        let OptionsPatch {
            variant,
            size,
            dismiss_on_backdrop_press,
            dismiss_on_pan_down,
            popover_swipe,
            close_on_back_button,
            swipe_threshold,
            accessibility_label,
            accessibility_role,
            on_open_start,
            on_open_end,
            on_close_start,
            on_close_end,
        } = patch;
        assign(&mut self.variant, variant);
        assign(&mut self.size, size);
        assign(&mut self.dismiss_on_backdrop_press, dismiss_on_backdrop_press);
        assign(&mut self.dismiss_on_pan_down, dismiss_on_pan_down);
        assign(&mut self.popover_swipe, popover_swipe);
        assign(&mut self.close_on_back_button, close_on_back_button);
        if swipe_threshold.is_some() {
            self.swipe_threshold = swipe_threshold;
        }
        if accessibility_label.is_some() {
            self.accessibility_label = accessibility_label;
        }
        if accessibility_role.is_some() {
            self.accessibility_role = accessibility_role;
        }
        if on_open_start.is_some() {
            self.hooks.on_open_start = on_open_start;
        }
        if on_open_end.is_some() {
            self.hooks.on_open_end = on_open_end;
        }
        if on_close_start.is_some() {
            self.hooks.on_close_start = on_close_start;
        }
        if on_close_end.is_some() {
            self.hooks.on_close_end = on_close_end;
        }
    }

    /// Whether the current variant accepts swipe-to-dismiss.
    pub fn swipe_enabled(&self) -> bool {
        match self.variant {
            Variant::Sheet => self.dismiss_on_pan_down,
            Variant::Popover => self.popover_swipe,
        }
    }

    /// Accessibility label, or the default.
    pub fn label(&self) -> &str {
        self.accessibility_label.as_deref().unwrap_or(DEFAULT_LABEL)
    }

    /// Accessibility role, or the default.
    pub fn role(&self) -> &str {
        self.accessibility_role.as_deref().unwrap_or(DEFAULT_ROLE)
    }
}

fn assign<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

/// A partial [`PreviewOptions`]: only the fields that are set override.
///
/// ```
/// use understory_preview::{OptionsPatch, PreviewOptions, Variant};
///
/// let options = PreviewOptions::from_patch(
///     OptionsPatch::new()
///         .variant(Variant::Sheet)
///         .dismiss_on_backdrop_press(false),
/// );
/// assert_eq!(options.variant, Variant::Sheet);
/// assert!(!options.dismiss_on_backdrop_press);
/// assert!(options.dismiss_on_pan_down);
/// ```
#[derive(Clone, Default)]
pub struct OptionsPatch {
    /// See [`PreviewOptions::variant`].
    pub variant: Option<Variant>,
    /// See [`PreviewOptions::size`].
    pub size: Option<PreviewSize>,
    /// See [`PreviewOptions::dismiss_on_backdrop_press`].
    pub dismiss_on_backdrop_press: Option<bool>,
    /// See [`PreviewOptions::dismiss_on_pan_down`].
    pub dismiss_on_pan_down: Option<bool>,
    /// See [`PreviewOptions::popover_swipe`].
    pub popover_swipe: Option<bool>,
    /// See [`PreviewOptions::close_on_back_button`].
    pub close_on_back_button: Option<bool>,
    /// See [`PreviewOptions::swipe_threshold`].
    pub swipe_threshold: Option<f64>,
    /// See [`PreviewOptions::accessibility_label`].
    pub accessibility_label: Option<String>,
    /// See [`PreviewOptions::accessibility_role`].
    pub accessibility_role: Option<String>,
    /// See [`LifecycleHooks::on_open_start`].
    pub on_open_start: Option<Hook>,
    /// See [`LifecycleHooks::on_open_end`].
    pub on_open_end: Option<Hook>,
    /// See [`LifecycleHooks::on_close_start`].
    pub on_close_start: Option<Hook>,
    /// See [`LifecycleHooks::on_close_end`].
    pub on_close_end: Option<CloseHook>,
}

impl OptionsPatch {
    /// An empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the variant.
    pub fn variant(mut self, variant: Variant) -> Self {
        self.variant = Some(variant);
        self
    }

    /// Set the size.
    pub fn size(mut self, size: PreviewSize) -> Self {
        self.size = Some(size);
        self
    }

    /// Set backdrop-press dismissal.
    pub fn dismiss_on_backdrop_press(mut self, enabled: bool) -> Self {
        self.dismiss_on_backdrop_press = Some(enabled);
        self
    }

    /// Set sheet pan-down dismissal.
    pub fn dismiss_on_pan_down(mut self, enabled: bool) -> Self {
        self.dismiss_on_pan_down = Some(enabled);
        self
    }

    /// Set popover swipe dismissal.
    pub fn popover_swipe(mut self, enabled: bool) -> Self {
        self.popover_swipe = Some(enabled);
        self
    }

    /// Set back-button handling.
    pub fn close_on_back_button(mut self, enabled: bool) -> Self {
        self.close_on_back_button = Some(enabled);
        self
    }

    /// Set the swipe distance threshold.
    pub fn swipe_threshold(mut self, threshold: f64) -> Self {
        self.swipe_threshold = Some(threshold);
        self
    }

    /// Set the accessibility label.
    pub fn accessibility_label(mut self, label: impl Into<String>) -> Self {
        self.accessibility_label = Some(label.into());
        self
    }

    /// Set the accessibility role.
    pub fn accessibility_role(mut self, role: impl Into<String>) -> Self {
        self.accessibility_role = Some(role.into());
        self
    }

    /// Set the open-start hook.
    pub fn on_open_start(mut self, hook: impl Fn() + 'static) -> Self {
        self.on_open_start = Some(Rc::new(hook));
        self
    }

    /// Set the open-end hook.
    pub fn on_open_end(mut self, hook: impl Fn() + 'static) -> Self {
        self.on_open_end = Some(Rc::new(hook));
        self
    }

    /// Set the close-start hook.
    pub fn on_close_start(mut self, hook: impl Fn() + 'static) -> Self {
        self.on_close_start = Some(Rc::new(hook));
        self
    }

    /// Set the close-end hook.
    pub fn on_close_end(mut self, hook: impl Fn(CloseReason) + 'static) -> Self {
        self.on_close_end = Some(Rc::new(hook));
        self
    }

    /// Layer `other` on top of this patch; fields set in `other` win.
    pub fn merge(mut self, other: Self) -> Self {
        macro_rules! take {
            ($($field:ident),*) => {
                $(if other.$field.is_some() { self.$field = other.$field; })*
            };
        }
        take!(
            variant,
            size,
            dismiss_on_backdrop_press,
            dismiss_on_pan_down,
            popover_swipe,
            close_on_back_button,
            swipe_threshold,
            accessibility_label,
            accessibility_role,
            on_open_start,
            on_open_end,
            on_close_start,
            on_close_end
        );
        self
    }
}

impl fmt::Debug for OptionsPatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionsPatch")
            .field("variant", &self.variant)
            .field("size", &self.size)
            .field("dismiss_on_backdrop_press", &self.dismiss_on_backdrop_press)
            .field("dismiss_on_pan_down", &self.dismiss_on_pan_down)
            .field("popover_swipe", &self.popover_swipe)
            .field("close_on_back_button", &self.close_on_back_button)
            .field("swipe_threshold", &self.swipe_threshold)
            .field("accessibility_label", &self.accessibility_label)
            .field("accessibility_role", &self.accessibility_role)
            .finish_non_exhaustive()
    }
}
