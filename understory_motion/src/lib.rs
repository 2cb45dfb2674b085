// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_motion --heading-base-level=0

//! Understory Motion: time-based interpolated values for UI animation.
//!
//! This crate drives scalar values (opacity, scale, offsets) toward targets
//! along a [`Curve`]. It owns no clock: the host advances every value with
//! [`AnimatedValue::tick`] from its frame callback and reacts to the
//! [`Completion`] returned when an animation finishes.
//!
//! ## Curves
//!
//! - [`Timing`]: fixed duration with an [`Easing`] function.
//! - [`SpringConfig`]: damped harmonic oscillator. Duration is whatever the
//!   physics needs to come to rest.
//!
//! ## Cancellation and generations
//!
//! Every call that starts or cancels an animation bumps the value's
//! generation. [`AnimatedValue::animate_to`] returns an [`AnimationId`]
//! stamped with that generation, and completions report the id they belong
//! to. A state machine that remembers the id it is waiting for can discard
//! completions of superseded animations without any further bookkeeping.
//!
//! Retargeting never snaps: a new animation starts from the current value,
//! and springs also inherit the current velocity.
//!
//! ```rust
//! use core::time::Duration;
//! use understory_motion::{AnimatedValue, Timing};
//!
//! let mut opacity = AnimatedValue::new(0.0);
//! let open = opacity.animate_to(1.0, Timing::millis(180));
//!
//! // Halfway through, a close request retargets toward zero.
//! assert!(opacity.tick(Duration::from_millis(90)).is_none());
//! let mid = opacity.get();
//! let close = opacity.animate_to(0.0, Timing::millis(180));
//! assert_eq!(opacity.get(), mid);
//! assert_ne!(open, close);
//!
//! let done = opacity.tick(Duration::from_millis(180)).unwrap();
//! assert_eq!(done.id, close);
//! assert_eq!(opacity.get(), 0.0);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod curve;
mod value;

pub use curve::{Curve, Easing, SpringConfig, Timing};
pub use value::{AnimatedValue, AnimationId, Completion};
