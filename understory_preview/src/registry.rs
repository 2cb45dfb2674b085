// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The process-wide slot pointing at the mounted provider.
//!
//! Exactly one provider can be registered at a time. Registering replaces the
//! previous entry instead of adding a second one, and unregistering only
//! clears the slot if it still holds the caller's own registration. A stale
//! provider tearing down after its replacement mounted (as happens across a
//! hot reload) therefore cannot evict the live one.
//!
//! The slot is per thread: all preview work happens on the UI thread.
//!
//! Only [`PreviewProvider`](crate::PreviewProvider) writes the slot, through
//! its `register` and `unmount`. Other code can observe it but not replace the
//! mounted provider:
//!
//! ```compile_fail
//! use std::any::Any;
//! use std::rc::Rc;
//! use understory_preview::OptionsPatch;
//! use understory_preview::registry::{self, PreviewHandle};
//!
//! struct Stray;
//!
//! impl PreviewHandle for Stray {
//!     fn close(&self) {}
//!     fn update(&self, _patch: OptionsPatch) {}
//!     fn is_open(&self) -> bool {
//!         false
//!     }
//!     fn as_any(&self) -> &dyn Any {
//!         self
//!     }
//! }
//!
//! registry::register(Rc::new(Stray));
//! ```

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::debug;

use crate::options::OptionsPatch;

/// The content-type-independent operations of a mounted provider.
pub trait PreviewHandle {
    /// Close the current preview, if any.
    fn close(&self);
    /// Merge `patch` into the current options.
    fn update(&self, patch: OptionsPatch);
    /// Whether a preview is opening or open.
    fn is_open(&self) -> bool;
    /// Downcast hook for the typed `present`.
    fn as_any(&self) -> &dyn Any;
}

/// Token identifying one registration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct RegistrationId(u64);

struct Entry {
    id: RegistrationId,
    handle: Rc<dyn PreviewHandle>,
}

thread_local! {
    static SLOT: RefCell<Option<Entry>> = const { RefCell::new(None) };
    static NEXT_ID: Cell<u64> = const { Cell::new(0) };
}

/// Install `handle` as the active provider, replacing any previous one.
pub(crate) fn register(handle: Rc<dyn PreviewHandle>) -> RegistrationId {
    let id = NEXT_ID.with(|next| {
        let id = next.get().wrapping_add(1);
        next.set(id);
        RegistrationId(id)
    });
    let previous = SLOT.with(|slot| slot.borrow_mut().replace(Entry { id, handle }));
    debug!(
        id = id.0,
        replaced = previous.as_ref().map(|entry| entry.id.0),
        "preview provider registered"
    );
    id
}

/// Clear the slot if it still holds registration `id`.
///
/// Returns `true` if this call removed the registration.
pub(crate) fn unregister(id: RegistrationId) -> bool {
    let removed = SLOT.with(|slot| {
        let mut slot = slot.borrow_mut();
        if slot.as_ref().is_some_and(|entry| entry.id == id) {
            slot.take()
        } else {
            None
        }
    });
    debug!(id = id.0, removed = removed.is_some(), "preview provider unregistered");
    removed.is_some()
}

/// Whether any provider is registered.
pub fn is_registered() -> bool {
    SLOT.with(|slot| slot.borrow().is_some())
}

/// Whether registration `id` is the active one.
pub fn is_active(id: RegistrationId) -> bool {
    SLOT.with(|slot| slot.borrow().as_ref().is_some_and(|entry| entry.id == id))
}

/// The active provider.
///
/// The slot is released before this returns, so calls on the handle may
/// register or unregister.
pub(crate) fn current() -> Option<Rc<dyn PreviewHandle>> {
    SLOT.with(|slot| slot.borrow().as_ref().map(|entry| entry.handle.clone()))
}
