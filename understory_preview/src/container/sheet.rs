// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bottom sheet.

use std::time::Duration;

use kurbo::Size;
use understory_event_state::swipe::SwipeFeedback;
use understory_motion::AnimatedValue;

use super::{Container, ContainerLayout, LayoutCx};
use crate::config::PreviewConfig;
use crate::options::{PreviewOptions, PreviewSize, Variant};

/// Size of the drag handle drawn at the top of a sheet.
pub const GRABBER_SIZE: Size = Size::new(40.0, 4.0);

/// A full-width panel anchored to the bottom of the viewport.
#[derive(Clone, Debug)]
pub struct Sheet {
    translate_y: AnimatedValue,
    entrance_offset: f64,
}

impl Sheet {
    /// A sheet parked below the viewport.
    pub fn new(config: &PreviewConfig) -> Self {
        Self {
            translate_y: AnimatedValue::new(config.sheet_entrance_offset),
            entrance_offset: config.sheet_entrance_offset,
        }
    }
}

impl Container for Sheet {
    fn variant(&self) -> Variant {
        Variant::Sheet
    }

    fn animate_in(&mut self, config: &PreviewConfig) {
        self.translate_y.animate_to(0.0, config.spring());
    }

    fn animate_out(&mut self, config: &PreviewConfig) {
        self.translate_y
            .animate_to(self.entrance_offset, config.close_timing());
    }

    fn settle(&mut self) {
        self.translate_y.set(0.0);
    }

    fn drag(&mut self, feedback: &SwipeFeedback) {
        self.translate_y.set(feedback.translate_y);
    }

    fn restore(&mut self, config: &PreviewConfig) {
        self.translate_y.animate_to(0.0, config.spring());
    }

    fn fling(&mut self, config: &PreviewConfig, _viewport: Size) {
        let target = self.translate_y.get().max(config.sheet_fling_offset);
        self.translate_y.animate_to(target, config.fling_timing());
    }

    fn tick(&mut self, dt: Duration) {
        let _ = self.translate_y.tick(dt);
    }

    fn scale(&self) -> f64 {
        1.0
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
        let available = (viewport.height - cx.insets.y0).max(0.0);
        let (max_width, max_height) = match options.size {
            PreviewSize::Auto => (viewport.width, available),
            PreviewSize::Fixed(height) => (viewport.width, height.clamp(0.0, available)),
            PreviewSize::Bounded {
                max_width,
                max_height,
            } => (
                max_width.map_or(viewport.width, |w| w.clamp(0.0, viewport.width)),
                max_height.map_or(available, |h| h.clamp(0.0, available)),
            ),
        };
        let mut padding_bottom = cx.insets.y1.max(config.sheet_min_bottom_padding);
        if cx.avoid_keyboard {
            padding_bottom = padding_bottom.max(cx.keyboard_height);
        }
        ContainerLayout {
            width: Some(max_width),
            max_width,
            max_height,
            padding_bottom,
            grabber: Some(GRABBER_SIZE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Insets;

    const FRAME: Duration = Duration::from_millis(16);

    fn phone(bottom_inset: f64) -> LayoutCx {
        LayoutCx {
            viewport: Size::new(390.0, 844.0),
            insets: Insets::new(0.0, 47.0, 0.0, bottom_inset),
            ..LayoutCx::default()
        }
    }

    fn run(s: &mut Sheet, frames: usize) {
        for _ in 0..frames {
            s.tick(FRAME);
        }
    }

    #[test]
    fn slides_up_from_below() {
        let config = PreviewConfig::default();
        let mut s = Sheet::new(&config);
        assert_eq!(s.translate_y(), 1000.0);
        s.animate_in(&config);
        s.tick(FRAME);
        assert!(s.translate_y() < 1000.0);
        run(&mut s, 200);
        assert_eq!(s.translate_y(), 0.0);
        assert_eq!(s.scale(), 1.0);
    }

    #[test]
    fn exit_slides_back_down() {
        let config = PreviewConfig::default();
        let mut s = Sheet::new(&config);
        s.settle();
        s.animate_out(&config);
        run(&mut s, 20);
        assert_eq!(s.translate_y(), 1000.0);
    }

    #[test]
    fn bottom_padding_honors_safe_area() {
        let config = PreviewConfig::default();
        let s = Sheet::new(&config);
        let options = PreviewOptions::default();
        assert_eq!(s.layout(&options, &config, &phone(34.0)).padding_bottom, 34.0);
        assert_eq!(s.layout(&options, &config, &phone(0.0)).padding_bottom, 12.0);
    }

    #[test]
    fn full_width_with_grabber() {
        let config = PreviewConfig::default();
        let s = Sheet::new(&config);
        let layout = s.layout(&PreviewOptions::default(), &config, &phone(34.0));
        assert_eq!(layout.width, Some(390.0));
        assert_eq!(layout.max_height, 797.0);
        assert_eq!(layout.grabber, Some(Size::new(40.0, 4.0)));
    }

    #[test]
    fn fixed_size_caps_height() {
        let config = PreviewConfig::default();
        let s = Sheet::new(&config);
        let options = PreviewOptions {
            size: PreviewSize::Fixed(320.0),
            ..PreviewOptions::default()
        };
        assert_eq!(s.layout(&options, &config, &phone(34.0)).max_height, 320.0);
    }

    #[test]
    fn keyboard_lifts_content() {
        let config = PreviewConfig::default();
        let s = Sheet::new(&config);
        let mut cx = phone(34.0);
        cx.keyboard_height = 291.0;
        cx.avoid_keyboard = true;
        let layout = s.layout(&PreviewOptions::default(), &config, &cx);
        assert_eq!(layout.padding_bottom, 291.0);
    }

    #[test]
    fn fling_continues_downward() {
        let config = PreviewConfig::default();
        let mut s = Sheet::new(&config);
        s.settle();
        s.drag(&SwipeFeedback {
            translate_y: 150.0,
            opacity: 1.0,
            scale: 1.0,
        });
        s.fling(&config, Size::ZERO);
        s.tick(FRAME);
        assert!(s.translate_y() > 150.0);
        run(&mut s, 20);
        assert_eq!(s.translate_y(), 800.0);
    }
}
