// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Container variants: the surface that holds the preview content.
//!
//! Both variants implement [`Container`], and [`ContainerKind`] selects
//! between them. A root never branches on the variant itself; it drives the
//! container through the trait and asks it for a [`ContainerFrame`].
//!
//! Containers never size themselves to the viewport. They report bounds
//! (a width, maximum width and maximum height) and the host lays the content
//! out inside them, so a short preview produces a short card.

mod popover;
mod sheet;

use std::time::Duration;

use kurbo::{Insets, Size};
use understory_event_state::swipe::SwipeFeedback;

use crate::config::PreviewConfig;
use crate::options::{PreviewOptions, Variant};

pub use popover::Popover;
pub use sheet::{GRABBER_SIZE, Sheet};

/// Environment a container lays itself out in.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LayoutCx {
    /// Size of the overlay (usually the window).
    pub viewport: Size,
    /// Safe-area insets of the viewport.
    pub insets: Insets,
    /// Height of the on-screen keyboard, or zero.
    pub keyboard_height: f64,
    /// Whether the container should stay clear of the keyboard.
    pub avoid_keyboard: bool,
}

impl Default for LayoutCx {
    fn default() -> Self {
        Self {
            viewport: Size::ZERO,
            insets: Insets::ZERO,
            keyboard_height: 0.0,
            avoid_keyboard: false,
        }
    }
}

/// Bounds a container offers to its content.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ContainerLayout {
    /// Preferred width, if the container has one.
    pub width: Option<f64>,
    /// Maximum width.
    pub max_width: f64,
    /// Maximum height.
    pub max_height: f64,
    /// Padding below the content.
    pub padding_bottom: f64,
    /// Size of the drag handle drawn above the content, if any.
    pub grabber: Option<Size>,
}

/// Behavior shared by the container variants.
pub trait Container {
    /// Which variant this is.
    fn variant(&self) -> Variant;

    /// Start the entrance transform from wherever the container currently is.
    fn animate_in(&mut self, config: &PreviewConfig);

    /// Start the exit transform toward the dismissed position.
    fn animate_out(&mut self, config: &PreviewConfig);

    /// Jump to the resting, fully presented transform.
    fn settle(&mut self);

    /// Follow an in-progress swipe.
    fn drag(&mut self, feedback: &SwipeFeedback);

    /// Spring back to rest after a swipe that did not commit.
    fn restore(&mut self, config: &PreviewConfig);

    /// Continue a committed swipe off screen.
    fn fling(&mut self, config: &PreviewConfig, viewport: Size);

    /// Advance the transform animations.
    fn tick(&mut self, dt: Duration);

    /// Current scale.
    fn scale(&self) -> f64;

    /// Current vertical offset from the resting position.
    fn translate_y(&self) -> f64;

    /// Bounds for the content.
    fn layout(&self, options: &PreviewOptions, config: &PreviewConfig, cx: &LayoutCx)
    -> ContainerLayout;
}

/// One of the two container variants.
#[derive(Clone, Debug)]
pub enum ContainerKind {
    /// Centered card.
    Popover(Popover),
    /// Bottom sheet.
    Sheet(Sheet),
}

impl ContainerKind {
    /// A container of `variant` in its pre-entrance position.
    pub fn new(variant: Variant, config: &PreviewConfig) -> Self {
        match variant {
            Variant::Popover => Self::Popover(Popover::new(config)),
            Variant::Sheet => Self::Sheet(Sheet::new(config)),
        }
    }

    /// The variant as a trait object.
    pub fn get(&self) -> &dyn Container {
        match self {
            Self::Popover(p) => p,
            Self::Sheet(s) => s,
        }
    }

    /// The variant as a mutable trait object.
    pub fn get_mut(&mut self) -> &mut dyn Container {
        match self {
            Self::Popover(p) => p,
            Self::Sheet(s) => s,
        }
    }

    /// Snapshot for rendering.
    pub fn frame(
        &self,
        options: &PreviewOptions,
        config: &PreviewConfig,
        cx: &LayoutCx,
    ) -> ContainerFrame {
        let c = self.get();
        ContainerFrame {
            variant: c.variant(),
            scale: c.scale(),
            translate_y: c.translate_y(),
            layout: c.layout(options, config, cx),
            accessibility_label: options.label().to_owned(),
            accessibility_role: options.role().to_owned(),
        }
    }
}

/// What the host draws for the container.
#[derive(Clone, Debug, PartialEq)]
pub struct ContainerFrame {
    /// Variant being drawn.
    pub variant: Variant,
    /// Scale around the container center.
    pub scale: f64,
    /// Vertical offset from the resting position.
    pub translate_y: f64,
    /// Bounds for the content.
    pub layout: ContainerLayout,
    /// Accessibility label.
    pub accessibility_label: String,
    /// Accessibility role.
    pub accessibility_role: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_dispatches_to_variant() {
        let config = PreviewConfig::default();
        let popover = ContainerKind::new(Variant::Popover, &config);
        assert_eq!(popover.get().variant(), Variant::Popover);
        assert_eq!(popover.get().scale(), 0.92);

        let sheet = ContainerKind::new(Variant::Sheet, &config);
        assert_eq!(sheet.get().variant(), Variant::Sheet);
        assert_eq!(sheet.get().translate_y(), 1000.0);
    }

    #[test]
    fn frame_carries_accessibility() {
        let config = PreviewConfig::default();
        let options = PreviewOptions::default();
        let frame =
            ContainerKind::new(Variant::Popover, &config).frame(&options, &config, &LayoutCx::default());
        assert_eq!(frame.accessibility_label, "Quick preview");
        assert_eq!(frame.accessibility_role, "dialog");
    }
}
