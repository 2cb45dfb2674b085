// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! On-screen keyboard tracking.

/// Tracks the software keyboard so the container can stay clear of it.
///
/// The height is recorded even while avoidance is disabled, so enabling it
/// later takes effect without waiting for the next keyboard event.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct KeyboardAvoidance {
    enabled: bool,
    height: f64,
}

impl KeyboardAvoidance {
    /// Tracker with avoidance `enabled` and no keyboard shown.
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            height: 0.0,
        }
    }

    /// Whether the container should avoid the keyboard.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Turn avoidance on or off.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// The keyboard appeared with the given height.
    pub fn show(&mut self, height: f64) {
        self.height = height.max(0.0);
    }

    /// The keyboard went away.
    pub fn hide(&mut self) {
        self.height = 0.0;
    }

    /// Current keyboard height, or zero when hidden.
    pub fn height(&self) -> f64 {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_height_regardless_of_enabled() {
        let mut k = KeyboardAvoidance::new(false);
        k.show(280.0);
        assert_eq!(k.height(), 280.0);
        k.set_enabled(true);
        assert!(k.is_enabled());
        k.hide();
        assert_eq!(k.height(), 0.0);
    }

    #[test]
    fn negative_heights_clamp() {
        let mut k = KeyboardAvoidance::new(true);
        k.show(-5.0);
        assert_eq!(k.height(), 0.0);
    }
}
