// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Context-bound access to the nearest provider.

use crate::controller::PreviewController;
use crate::error::PreviewError;

/// What a UI tree passes down so descendants can reach its provider.
///
/// An empty context stands for a subtree with no provider above it.
#[derive(Debug)]
pub struct PreviewContext<C> {
    controller: Option<PreviewController<C>>,
}

impl<C> PreviewContext<C> {
    /// A context bound to `controller`.
    pub fn new(controller: PreviewController<C>) -> Self {
        Self {
            controller: Some(controller),
        }
    }

    /// A context with no provider.
    pub fn empty() -> Self {
        Self { controller: None }
    }
}

impl<C> Default for PreviewContext<C> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<C> Clone for PreviewContext<C> {
    fn clone(&self) -> Self {
        Self {
            controller: self.controller.clone(),
        }
    }
}

/// The controller of the provider behind `cx`.
///
/// Fails with [`PreviewError::ProviderNotMounted`] when `cx` has no provider
/// or its provider has been dropped. This is a setup mistake, so callers
/// usually propagate it rather than recover.
pub fn use_quick_preview<C>(cx: &PreviewContext<C>) -> Result<PreviewController<C>, PreviewError> {
    match &cx.controller {
        Some(controller) if controller.is_alive() => Ok(controller.clone()),
        _ => Err(PreviewError::ProviderNotMounted),
    }
}
