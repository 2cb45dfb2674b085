// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Long-press a product tile to peek at it.
//!
//! A `PreviewProvider` is mounted globally. The tile is a
//! `QuickPreviewPressable` that presents through the global API, so it needs
//! no handle to the provider. The script taps once, then long-presses, then
//! dismisses the popover by pressing the backdrop.
//!
//! Run:
//! - `cargo run -p understory_demos --example product_preview`

use kurbo::{Insets, Point, Size};
use understory_demos::{Card, FRAME, catalog, init_tracing, print_frame};
use understory_event_state::press::PressOutcome;
use understory_preview::pressable::{PressableProps, QuickPreviewPressable};
use understory_preview::{OptionsPatch, Phase, PreviewConfig, PreviewProvider, PreviewSize};

fn main() -> Result<(), serde_json::Error> {
    init_tracing();

    let product = catalog()?
        .into_iter()
        .find(|card| matches!(card, Card::Product { .. }))
        .unwrap_or(Card::Travel {
            place: "Nowhere".into(),
            country: "Nowhere".into(),
        });
    tracing::info!(card = %product.title(), "catalog loaded");

    let provider = PreviewProvider::<Card>::mount(PreviewConfig::default());
    provider.set_viewport(Size::new(390.0, 844.0), Insets::new(0.0, 47.0, 0.0, 34.0));

    let tile = product.clone();
    let mut props = PressableProps::new(move || tile.clone());
    props.on_press = Some(std::rc::Rc::new(|| println!("tap: open product page")));
    props.preview_options = OptionsPatch::new()
        .size(PreviewSize::Bounded {
            max_width: Some(360.0),
            max_height: None,
        })
        .accessibility_label("Product preview")
        .on_close_end(|reason| println!("closed: {reason:?}"));
    let mut pressable = QuickPreviewPressable::new(props);

    println!("== tap ==");
    let at = Point::new(120.0, 300.0);
    pressable.touch_down(at, 0);
    if let Some(outcome) = pressable.touch_up(at, 120) {
        println!("outcome: {outcome:?}");
    }

    println!("== long press ==");
    pressable.touch_down(at, 1_000);
    let mut now = 1_000;
    while pressable.poll(now) != Some(PressOutcome::LongPress) {
        pressable.tick(FRAME);
        now += 16;
    }
    println!("long press after {} ms, scale {:.2}", now - 1_000, pressable.scale());
    pressable.touch_up(at, now + 100);

    if let Some(title) = provider.with_content(Card::title) {
        println!("presenting: {title}");
    }
    let mut elapsed = 0;
    while provider.phase() != Phase::Open {
        provider.tick(FRAME);
        elapsed += 16;
        print_frame(elapsed, provider.frame().as_ref());
    }
    if let Some(frame) = provider.frame() {
        println!(
            "card bounds: width {:?}, max height {:.0}",
            frame.container.layout.width, frame.container.layout.max_height
        );
    }

    println!("== backdrop press ==");
    provider.press_backdrop();
    while provider.phase() != Phase::Closed {
        provider.tick(FRAME);
        elapsed += 16;
        print_frame(elapsed, provider.frame().as_ref());
    }
    Ok(())
}
