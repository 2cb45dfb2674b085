// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the global controller and its registry.
//!
//! The registry slot is per thread and every test runs on its own thread, so
//! tests do not see each other's providers.

use std::time::Duration;

use understory_preview::{
    OptionsPatch, Phase, PreviewConfig, PreviewContext, PreviewError, PreviewProvider, Variant,
    global, registry, use_quick_preview,
};

#[test]
fn calls_without_provider_are_harmless() {
    assert!(!registry::is_registered());
    global::present("nothing", OptionsPatch::new());
    global::update(OptionsPatch::new().variant(Variant::Sheet));
    global::close();
    assert!(!global::is_open());
}

#[test]
fn global_and_context_share_state() {
    let provider = PreviewProvider::<&str>::mount(PreviewConfig::default());
    let cx = provider.context();
    let local = use_quick_preview(&cx).unwrap();

    global::present("from anywhere", OptionsPatch::new());
    assert!(local.is_open());
    assert_eq!(provider.with_content(|c| *c), Some("from anywhere"));

    local.close();
    assert!(!global::is_open());
    assert_eq!(provider.phase(), Phase::Closing);
}

#[test]
fn global_update_merges_into_open_preview() {
    let provider = PreviewProvider::<u32>::mount(PreviewConfig::default());
    global::present(7_u32, OptionsPatch::new());
    global::update(OptionsPatch::new().variant(Variant::Sheet));
    assert_eq!(provider.options().variant, Variant::Sheet);
}

#[test]
fn remount_replaces_without_duplicates() {
    let old = PreviewProvider::<u32>::mount(PreviewConfig::default());
    let new = PreviewProvider::<u32>::mount(PreviewConfig::default());
    assert!(!old.is_registered());
    assert!(new.is_registered());

    // The stale provider tearing down must not evict the live one.
    drop(old);
    assert!(registry::is_registered());
    global::present(1_u32, OptionsPatch::new());
    assert_eq!(new.with_content(|n| *n), Some(1));

    drop(new);
    assert!(!registry::is_registered());
    assert!(!global::is_open());
}

#[test]
fn unmount_then_mount_again() {
    let mut provider = PreviewProvider::<u32>::mount(PreviewConfig::default());
    provider.unmount();
    assert!(!registry::is_registered());
    provider.register();
    provider.register();
    assert!(provider.is_registered());
    global::present(3_u32, OptionsPatch::new());
    assert!(global::is_open());
}

#[test]
fn mismatched_content_type_is_ignored() {
    let provider = PreviewProvider::<u32>::mount(PreviewConfig::default());
    global::present("not a number", OptionsPatch::new());
    assert!(!global::is_open());
    assert_eq!(provider.phase(), Phase::Closed);
}

#[test]
fn hook_accessor_requires_provider() {
    let cx = PreviewContext::<u32>::empty();
    assert_eq!(
        use_quick_preview(&cx).unwrap_err(),
        PreviewError::ProviderNotMounted
    );
}

#[test]
fn global_close_runs_exit() {
    let provider = PreviewProvider::<()>::mount(PreviewConfig::default());
    global::present((), OptionsPatch::new());
    for _ in 0..30 {
        provider.tick(Duration::from_millis(16));
    }
    global::close();
    global::close();
    for _ in 0..30 {
        provider.tick(Duration::from_millis(16));
    }
    assert_eq!(provider.phase(), Phase::Closed);
}

#[test]
fn unregistered_provider_cannot_displace_mounted_one() {
    let mounted = PreviewProvider::<u32>::mount(PreviewConfig::default());
    let local = PreviewProvider::<u32>::new(PreviewConfig::default());
    local.controller().present(9_u32, OptionsPatch::new());

    assert!(mounted.is_registered());
    assert!(!local.is_registered());
    global::present(1_u32, OptionsPatch::new());
    assert_eq!(mounted.phase(), Phase::Opening);
    assert_eq!(mounted.with_content(|n| *n), Some(1));
    assert_eq!(local.with_content(|n| *n), Some(9));
}
