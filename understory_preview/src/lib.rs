// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_preview --heading-base-level=0

//! Understory Preview: a headless quick-preview overlay.
//!
//! A quick preview shows transient content above the current screen, either
//! as a centered card ([`Variant::Popover`]) or as a bottom sheet
//! ([`Variant::Sheet`]). This crate owns everything about it except drawing:
//! the open/close lifecycle, entrance and exit animation, swipe-to-dismiss,
//! the backdrop, keyboard avoidance and the controller API. The host feeds it
//! discrete events (frame ticks, touches, back button, keyboard changes) and
//! draws from the [`PreviewFrame`] it reports.
//!
//! ## Layers
//!
//! - [`PreviewRoot`]: the `Closed → Opening → Open → Closing` state machine.
//!   Operations return [`PreviewEvent`]s rather than calling hooks.
//! - [`container`]: the popover and sheet variants behind one trait.
//! - [`PreviewProvider`] / [`PreviewController`]: the single owner of what is
//!   presented, and cheap handles to it.
//! - [`registry`] and [`global`]: a process-wide pointer to the mounted
//!   provider, so any code can present without wiring.
//! - [`headless::QuickPreview`]: a controlled variant driven by a `visible` flag.
//! - [`pressable::QuickPreviewPressable`]: tap versus long-press to open.
//!
//! ## Example
//!
//! ```rust
//! use std::time::Duration;
//! use kurbo::{Insets, Point, Size};
//! use understory_preview::{
//!     CloseReason, OptionsPatch, Phase, PreviewConfig, PreviewProvider, Variant,
//! };
//!
//! let provider = PreviewProvider::<String>::new(PreviewConfig::default());
//! provider.set_viewport(Size::new(390.0, 844.0), Insets::new(0.0, 47.0, 0.0, 34.0));
//!
//! let preview = provider.controller();
//! preview.present(
//!     "Trail map".to_owned(),
//!     OptionsPatch::new()
//!         .variant(Variant::Sheet)
//!         .on_close_end(|reason| assert_eq!(reason, CloseReason::Swipe)),
//! );
//! for _ in 0..60 {
//!     provider.tick(Duration::from_millis(16));
//! }
//! assert_eq!(provider.phase(), Phase::Open);
//!
//! // Drag the sheet down past the threshold and let go.
//! assert!(provider.drag_start(Point::new(200.0, 500.0), 1_000));
//! provider.drag_move(Point::new(200.0, 560.0), 1_040);
//! provider.drag_end(Point::new(200.0, 600.0), 1_200);
//! assert_eq!(provider.phase(), Phase::Closing);
//! ```
//!
//! ## Features
//!
//! - `serde` (enabled by default): `Serialize`/`Deserialize` for
//!   [`PreviewConfig`] and the plain option enums.

pub mod container;
pub mod feedback;
pub mod global;
pub mod headless;
pub mod pressable;
pub mod registry;

mod backdrop;
mod config;
mod context;
mod controller;
mod error;
mod keyboard;
mod options;
mod root;

pub use backdrop::{BACKDROP_LABEL, BACKDROP_ROLE, Backdrop, BackdropFrame, BackdropPress};
pub use config::{PreviewConfig, ThemeMode};
pub use container::{ContainerFrame, ContainerKind, ContainerLayout};
pub use context::{PreviewContext, use_quick_preview};
pub use controller::{PreviewController, PreviewProvider};
pub use error::{FeedbackError, PreviewError};
pub use keyboard::KeyboardAvoidance;
pub use options::{
    CloseHook, CloseReason, DEFAULT_LABEL, DEFAULT_ROLE, Hook, LifecycleHooks, OptionsPatch,
    PreviewOptions, PreviewSize, Variant,
};
pub use root::{BackButton, Events, Layer, Phase, PreviewEvent, PreviewFrame, PreviewRoot};
