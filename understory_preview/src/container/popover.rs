// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Centered card.

use std::time::Duration;

use kurbo::Size;
use understory_event_state::swipe::SwipeFeedback;
use understory_motion::AnimatedValue;

use super::{Container, ContainerLayout, LayoutCx};
use crate::config::PreviewConfig;
use crate::options::{PreviewOptions, PreviewSize, Variant};

/// A card centered in the viewport that scales in on entrance.
#[derive(Clone, Debug)]
pub struct Popover {
    scale: AnimatedValue,
    translate_y: AnimatedValue,
    initial_scale: f64,
}

impl Popover {
    /// A popover at its pre-entrance scale.
    pub fn new(config: &PreviewConfig) -> Self {
        Self {
            scale: AnimatedValue::new(config.popover_initial_scale),
            translate_y: AnimatedValue::new(0.0),
            initial_scale: config.popover_initial_scale,
        }
    }
}

impl Container for Popover {
    fn variant(&self) -> Variant {
        Variant::Popover
    }

    fn animate_in(&mut self, config: &PreviewConfig) {
        self.scale.animate_to(1.0, config.spring());
        if self.translate_y.get() != 0.0 {
            self.translate_y.animate_to(0.0, config.spring());
        }
    }

    fn animate_out(&mut self, config: &PreviewConfig) {
        self.scale
            .animate_to(self.initial_scale, config.close_timing());
    }

    fn settle(&mut self) {
        self.scale.set(1.0);
        self.translate_y.set(0.0);
    }

    fn drag(&mut self, feedback: &SwipeFeedback) {
        self.scale.set(feedback.scale);
        self.translate_y.set(feedback.translate_y);
    }

    fn restore(&mut self, config: &PreviewConfig) {
        self.scale.animate_to(1.0, config.spring());
        self.translate_y.animate_to(0.0, config.spring());
    }

    fn fling(&mut self, config: &PreviewConfig, viewport: Size) {
        let distance = if viewport.height > 0.0 {
            viewport.height * config.popover_fling_fraction
        } else {
            config.sheet_fling_offset
        };
        let target = self.translate_y.get().max(distance);
        self.translate_y.animate_to(target, config.fling_timing());
    }

    fn tick(&mut self, dt: Duration) {
        let _ = self.scale.tick(dt);
        let _ = self.translate_y.tick(dt);
    }

    fn scale(&self) -> f64 {
        self.scale.get()
    }

    fn translate_y(&self) -> f64 {
        self.translate_y.get()
    }

    fn layout(
        &self,
        options: &PreviewOptions,
        config: &PreviewConfig,
        cx: &LayoutCx,
    ) -> ContainerLayout {
        let viewport = cx.viewport;
        let responsive_width = (viewport.width * config.popover_width_fraction)
            .min(config.popover_max_width);
        let responsive_height = viewport.height * config.popover_max_height_fraction;
        let (width, max_width, max_height) = match options.size {
            PreviewSize::Auto => (responsive_width, responsive_width, responsive_height),
            PreviewSize::Fixed(width) => {
                let width = width.min(viewport.width).max(0.0);
                (width, width, responsive_height)
            }
            PreviewSize::Bounded {
                max_width,
                max_height,
            } => {
                let max_width = max_width
                    .map_or(responsive_width, |w| w.min(viewport.width))
                    .max(0.0);
                let max_height = max_height
                    .map_or(responsive_height, |h| h.min(viewport.height))
                    .max(0.0);
                (responsive_width.min(max_width), max_width, max_height)
            }
        };
        let padding_bottom = if cx.avoid_keyboard {
            cx.keyboard_height.max(config.keyboard_min_padding)
        } else {
            config.keyboard_min_padding
        };
        ContainerLayout {
            width: Some(width),
            max_width,
            max_height,
            padding_bottom,
            grabber: None,
        }
    }
}
