// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_event_state --heading-base-level=0

//! Understory Event State: gesture state managers for UI interactions.
//!
//! This crate provides small, focused state machines for touch interactions
//! that need state across several events. Each module handles one pattern:
//!
//! - [`drag`]: Track drag offsets and estimate release velocity
//! - [`press`]: Resolve a touch sequence into exactly one of tap or long-press
//! - [`swipe`]: Map a vertical drag to dismiss feedback and a release decision
//!
//! ## Design Philosophy
//!
//! Each state manager is designed to be:
//!
//! - **Minimal and focused**: Each handles one specific interaction pattern
//! - **Clock-free**: Timestamps are passed in as milliseconds, so managers are
//!   deterministic and trivially testable
//! - **Integration-friendly**: Work with any event routing or animation system
//!
//! The managers never mutate anything outside themselves. They report what a
//! gesture means (a delta, an outcome, a decision) and the caller applies it.
//!
//! ## Usage Patterns
//!
//! ### Tap versus long-press
//!
//! ```rust
//! # #[cfg(feature = "press")]
//! # fn example() {
//! use kurbo::Point;
//! use understory_event_state::press::{PressOutcome, PressRecognizer};
//!
//! let mut press = PressRecognizer::default();
//!
//! press.down(Point::new(10.0, 10.0), 0);
//! // Still holding after the long-press delay: the long-press wins.
//! assert_eq!(press.poll(400), Some(PressOutcome::LongPress));
//! // Lifting the finger reports nothing new; the sequence already resolved.
//! assert_eq!(press.up(Point::new(10.0, 10.0), 500), None);
//! # }
//! ```
//!
//! ### Swipe to dismiss
//!
//! ```rust
//! use understory_event_state::swipe::{SwipeDecision, SwipeDismiss};
//!
//! let swipe = SwipeDismiss::default();
//! assert_eq!(swipe.decide(79.0, 0.0), SwipeDecision::Restore);
//! assert_eq!(swipe.decide(81.0, 0.0), SwipeDecision::Dismiss);
//! // A fast flick dismisses regardless of distance.
//! assert_eq!(swipe.decide(10.0, 1500.0), SwipeDecision::Dismiss);
//! ```
//!
//! ## Features
//!
//! - `drag`: Enable drag state tracking (requires `kurbo` dependency)
//! - `press`: Enable tap/long-press recognition (requires `kurbo` dependency)
//!
//! This crate is `no_std` compatible for all modules.

#![no_std]

#[cfg(feature = "drag")]
pub mod drag;
#[cfg(feature = "press")]
pub mod press;
pub mod swipe;
