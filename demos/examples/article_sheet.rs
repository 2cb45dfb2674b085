// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A controlled article sheet, dismissed with a swipe.
//!
//! Uses the headless `QuickPreview`: the host owns the `visible` flag and is
//! told through `on_close` when the user swipes the sheet away. The first
//! swipe is too short and springs back; the second one commits.
//!
//! Run:
//! - `cargo run -p understory_demos --example article_sheet`
//! - `RUST_LOG=understory_preview=debug cargo run -p understory_demos --example article_sheet`

use std::cell::Cell;
use std::rc::Rc;

use kurbo::{Insets, Point, Size};
use understory_demos::{Card, FRAME, catalog, init_tracing, print_frame};
use understory_preview::headless::{QuickPreview, QuickPreviewProps};
use understory_preview::{OptionsPatch, Phase, PreviewConfig, ThemeMode, Variant};

fn settle(preview: &mut QuickPreview<Card>, elapsed: &mut u64, until: Phase) {
    while preview.root().phase() != until {
        preview.tick(FRAME);
        *elapsed += 16;
        print_frame(*elapsed, preview.render().map(|r| r.frame).as_ref());
    }
}

fn swipe(preview: &mut QuickPreview<Card>, distance: f64, t0: u64) {
    let start = Point::new(195.0, 520.0);
    if !preview.drag_start(start, t0) {
        println!("swipe refused");
        return;
    }
    for step in 1..=5_u32 {
        let y = start.y + distance * f64::from(step) / 5.0;
        preview.drag_move(Point::new(start.x, y), t0 + u64::from(step) * 40);
    }
    // Rest before lifting so the release carries no velocity.
    preview.drag_end(Point::new(start.x, start.y + distance), t0 + 500);
}

fn main() -> Result<(), serde_json::Error> {
    init_tracing();

    let article = catalog()?
        .into_iter()
        .find(|card| matches!(card, Card::Article { .. }))
        .unwrap_or(Card::Travel {
            place: "Nowhere".into(),
            country: "Nowhere".into(),
        });
    tracing::info!(card = %article.title(), "catalog loaded");

    let host_visible = Rc::new(Cell::new(true));
    let visible = host_visible.clone();
    let props = QuickPreviewProps {
        config: PreviewConfig::default().with_theme(ThemeMode::Dark),
        options: OptionsPatch::new()
            .variant(Variant::Sheet)
            .accessibility_label("Article preview"),
        on_close: Some(Rc::new(move || visible.set(false))),
        ..QuickPreviewProps::default()
    };
    let mut preview = QuickPreview::new(props, article);
    preview.set_viewport(Size::new(390.0, 844.0), Insets::new(0.0, 47.0, 0.0, 34.0));

    let mut elapsed = 0;
    println!("== open ==");
    preview.set_visible(host_visible.get());
    settle(&mut preview, &mut elapsed, Phase::Open);
    if let Some(render) = preview.render() {
        let layout = render.frame.container.layout;
        println!(
            "sheet: grabber {:?}, bottom padding {:.0}, scrim {:?}",
            layout.grabber, layout.padding_bottom, render.frame.backdrop.color
        );
    }

    println!("== short swipe (60 px) ==");
    swipe(&mut preview, 60.0, 10_000);
    for _ in 0..40 {
        preview.tick(FRAME);
        elapsed += 16;
    }
    print_frame(elapsed, preview.render().map(|r| r.frame).as_ref());

    println!("== long swipe (120 px) ==");
    swipe(&mut preview, 120.0, 20_000);
    settle(&mut preview, &mut elapsed, Phase::Closed);
    println!(
        "host visible flag: {}, reason: {:?}",
        host_visible.get(),
        preview.root().close_reason()
    );
    preview.set_visible(host_visible.get());
    Ok(())
}
