// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-wide preview configuration: timings, physics, thresholds and theme.
//!
//! [`PreviewConfig`] carries the values a host may want to tune once for the
//! whole application, as opposed to [`PreviewOptions`](crate::PreviewOptions),
//! which belong to a single presentation. With the `serde` feature every
//! field has a default, so a partial JSON object is a valid configuration:
//!
//! ```
//! # #[cfg(feature = "serde")]
//! # {
//! use understory_preview::{PreviewConfig, ThemeMode};
//!
//! let config: PreviewConfig =
//!     serde_json::from_str(r#"{ "theme": "dark", "swipe_threshold": 60.0 }"#).unwrap();
//! assert_eq!(config.theme, ThemeMode::Dark);
//! assert_eq!(config.swipe_threshold, 60.0);
//! assert_eq!(config.open_duration_ms, 180);
//! # }
//! ```

use peniko::Color;
use understory_event_state::swipe::SwipeDismiss;
use understory_motion::{SpringConfig, Timing};

/// Light or dark appearance.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum ThemeMode {
    /// Light appearance; lighter scrim.
    #[default]
    Light,
    /// Dark appearance; denser scrim.
    Dark,
}

impl ThemeMode {
    /// Scrim alpha used when no explicit backdrop opacity is configured.
    pub fn default_backdrop_opacity(self) -> f64 {
        match self {
            Self::Light => 0.5,
            Self::Dark => 0.8,
        }
    }
}

/// Tunables shared by every presentation in a provider.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct PreviewConfig {
    /// Entrance fade of the content (ms).
    pub open_duration_ms: u64,
    /// Exit fade of the content (ms).
    pub close_duration_ms: u64,
    /// Backdrop fade-in (ms).
    pub backdrop_fade_ms: u64,
    /// Entrance spring damping.
    pub spring_damping: f64,
    /// Entrance spring stiffness.
    pub spring_stiffness: f64,
    /// Popover scale before the entrance.
    pub popover_initial_scale: f64,
    /// Sheet offset below its resting position before the entrance.
    pub sheet_entrance_offset: f64,
    /// How far a dismissed sheet travels after a swipe.
    pub sheet_fling_offset: f64,
    /// How far a dismissed popover travels after a swipe, relative to the viewport height.
    pub popover_fling_fraction: f64,
    /// Duration of the post-swipe fling (ms).
    pub fling_duration_ms: u64,
    /// Swipe distance that commits a dismissal.
    pub swipe_threshold: f64,
    /// Release velocity (px/s) that commits a dismissal.
    pub swipe_velocity: f64,
    /// Popover width relative to the viewport width.
    pub popover_width_fraction: f64,
    /// Absolute cap on the popover width.
    pub popover_max_width: f64,
    /// Popover max height relative to the viewport height.
    pub popover_max_height_fraction: f64,
    /// Minimum sheet bottom padding when the safe-area inset is smaller.
    pub sheet_min_bottom_padding: f64,
    /// Minimum popover bottom padding; grows with the keyboard when avoiding it.
    pub keyboard_min_padding: f64,
    /// Appearance.
    pub theme: ThemeMode,
    /// Scrim alpha override.
    pub backdrop_opacity: Option<f64>,
    /// Release the content once the exit animation completes.
    pub unmount_on_exit: bool,
    /// Lift the container above the on-screen keyboard.
    pub avoid_keyboard: bool,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            open_duration_ms: 180,
            close_duration_ms: 180,
            backdrop_fade_ms: 160,
            spring_damping: SpringConfig::PREVIEW.damping,
            spring_stiffness: SpringConfig::PREVIEW.stiffness,
            popover_initial_scale: 0.92,
            sheet_entrance_offset: 1000.0,
            sheet_fling_offset: 800.0,
            popover_fling_fraction: 0.35,
            fling_duration_ms: 200,
            swipe_threshold: 80.0,
            swipe_velocity: 1000.0,
            popover_width_fraction: 0.92,
            popover_max_width: 520.0,
            popover_max_height_fraction: 0.86,
            sheet_min_bottom_padding: 12.0,
            keyboard_min_padding: 16.0,
            theme: ThemeMode::Light,
            backdrop_opacity: None,
            unmount_on_exit: true,
            avoid_keyboard: false,
        }
    }
}

impl PreviewConfig {
    /// Set the theme.
    pub fn with_theme(mut self, theme: ThemeMode) -> Self {
        self.theme = theme;
        self
    }

    /// Set the scrim alpha.
    pub fn with_backdrop_opacity(mut self, opacity: f64) -> Self {
        self.backdrop_opacity = Some(opacity);
        self
    }

    /// Set both entrance and exit fade durations.
    pub fn with_animation_duration(mut self, ms: u64) -> Self {
        self.open_duration_ms = ms;
        self.close_duration_ms = ms;
        self
    }

    /// Set the swipe distance threshold.
    pub fn with_swipe_threshold(mut self, threshold: f64) -> Self {
        self.swipe_threshold = threshold;
        self
    }

    /// Set the flick velocity threshold.
    pub fn with_swipe_velocity(mut self, velocity: f64) -> Self {
        self.swipe_velocity = velocity;
        self
    }

    /// Keep the root mounted after the exit animation.
    pub fn with_unmount_on_exit(mut self, unmount: bool) -> Self {
        self.unmount_on_exit = unmount;
        self
    }

    /// Enable keyboard avoidance.
    pub fn with_avoid_keyboard(mut self, avoid: bool) -> Self {
        self.avoid_keyboard = avoid;
        self
    }

    /// Entrance fade curve.
    pub fn open_timing(&self) -> Timing {
        Timing::millis(self.open_duration_ms)
    }

    /// Exit fade curve.
    pub fn close_timing(&self) -> Timing {
        Timing::millis(self.close_duration_ms)
    }

    /// Backdrop fade-in curve.
    pub fn backdrop_timing(&self) -> Timing {
        Timing::millis(self.backdrop_fade_ms)
    }

    /// Post-swipe fling curve.
    pub fn fling_timing(&self) -> Timing {
        Timing::millis(self.fling_duration_ms)
    }

    /// Entrance and spring-back physics.
    pub fn spring(&self) -> SpringConfig {
        SpringConfig::new(self.spring_damping, self.spring_stiffness)
    }

    /// Swipe limits, with an optional per-presentation threshold override.
    pub fn swipe(&self, threshold: Option<f64>) -> SwipeDismiss {
        SwipeDismiss::new(
            threshold.unwrap_or(self.swipe_threshold),
            self.swipe_velocity,
        )
    }

    /// Effective scrim alpha in `[0, 1]`.
    pub fn scrim_alpha(&self) -> f64 {
        self.backdrop_opacity
            .unwrap_or_else(|| self.theme.default_backdrop_opacity())
            .clamp(0.0, 1.0)
    }

    /// Scrim color at full backdrop opacity.
    pub fn backdrop_color(&self) -> Color {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "alpha is clamped to [0, 1] so the scaled value fits in u8"
        )]
        let alpha = (self.scrim_alpha() * 255.0).round() as u8;
        Color::from_rgba8(0, 0, 0, alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_picks_scrim_alpha() {
        let light = PreviewConfig::default();
        assert_eq!(light.scrim_alpha(), 0.5);
        let dark = PreviewConfig::default().with_theme(ThemeMode::Dark);
        assert_eq!(dark.scrim_alpha(), 0.8);
        let custom = dark.with_backdrop_opacity(1.7);
        assert_eq!(custom.scrim_alpha(), 1.0);
    }

    #[test]
    fn backdrop_color_is_black_with_alpha() {
        let config = PreviewConfig::default();
        assert_eq!(config.backdrop_color(), Color::from_rgba8(0, 0, 0, 128));
    }

    #[test]
    fn swipe_override_wins() {
        let config = PreviewConfig::default();
        assert_eq!(config.swipe(None).threshold, 80.0);
        assert_eq!(config.swipe(Some(140.0)).threshold, 140.0);
        assert_eq!(config.swipe(None).velocity_threshold, 1000.0);
    }

    #[test]
    fn animation_duration_sets_both_fades() {
        let config = PreviewConfig::default().with_animation_duration(220);
        assert_eq!(config.open_duration_ms, 220);
        assert_eq!(config.close_duration_ms, 220);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_json_fills_defaults() {
        let config: PreviewConfig = serde_json::from_str(
            r#"{ "backdrop_opacity": 0.3, "avoid_keyboard": true, "theme": "dark" }"#,
        )
        .unwrap();
        assert_eq!(config.backdrop_opacity, Some(0.3));
        assert!(config.avoid_keyboard);
        assert_eq!(config.theme, ThemeMode::Dark);
        assert_eq!(config.sheet_entrance_offset, 1000.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn config_serializes_back() {
        let config = PreviewConfig::default().with_swipe_threshold(64.0);
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["swipe_threshold"], 64.0);
        assert_eq!(json["theme"], "light");
    }
}
