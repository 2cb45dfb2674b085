// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Imperative access to the registered provider, from anywhere.
//!
//! These functions route through the [registry](crate::registry). Without a
//! mounted provider they do nothing (and [`is_open`] returns `false`); debug
//! builds log a warning so a missing provider is noticed during development.
//!
//! ```
//! use understory_preview::{OptionsPatch, PreviewConfig, PreviewProvider, global};
//!
//! // Before any provider mounts, calls are harmless no-ops.
//! global::present("too early", OptionsPatch::new());
//! assert!(!global::is_open());
//!
//! let provider = PreviewProvider::<&str>::mount(PreviewConfig::default());
//! global::present("card", OptionsPatch::new());
//! assert!(global::is_open());
//! assert_eq!(provider.with_content(|c| *c), Some("card"));
//! ```

use std::any::type_name;

use tracing::warn;

use crate::controller::PreviewController;
use crate::options::OptionsPatch;
use crate::registry;

fn not_mounted(op: &'static str) {
    if cfg!(debug_assertions) {
        warn!(op, "PreviewProvider not mounted yet");
    }
}

/// Present `content` through the registered provider.
///
/// The provider must have been created for content of type `C`.
pub fn present<C: 'static>(content: C, options: OptionsPatch) {
    let Some(handle) = registry::current() else {
        not_mounted("present");
        return;
    };
    match handle.as_any().downcast_ref::<PreviewController<C>>() {
        Some(controller) => controller.present(content, options),
        None => {
            if cfg!(debug_assertions) {
                warn!(
                    content = type_name::<C>(),
                    "registered PreviewProvider holds a different content type"
                );
            }
        }
    }
}

/// Close the current preview.
pub fn close() {
    match registry::current() {
        Some(handle) => handle.close(),
        None => not_mounted("close"),
    }
}

/// Merge `patch` into the current preview's options.
pub fn update(patch: OptionsPatch) {
    match registry::current() {
        Some(handle) => handle.update(patch),
        None => not_mounted("update"),
    }
}

/// Whether a preview is opening or open. `false` without a provider.
pub fn is_open() -> bool {
    registry::current().is_some_and(|handle| handle.is_open())
}
