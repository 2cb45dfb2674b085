// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::time::Duration;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Insets, Point, Size};
use understory_preview::{OptionsPatch, Phase, PreviewConfig, PreviewProvider, Variant};

const FRAME: Duration = Duration::from_millis(16);

fn provider() -> PreviewProvider<u32> {
    let provider = PreviewProvider::new(PreviewConfig::default());
    provider.set_viewport(Size::new(390.0, 844.0), Insets::new(0.0, 47.0, 0.0, 34.0));
    provider
}

fn settle(provider: &PreviewProvider<u32>, phase: Phase) {
    while provider.phase() != phase {
        provider.tick(FRAME);
    }
}

fn bench_open_close(c: &mut Criterion) {
    let provider = provider();
    let preview = provider.controller();
    c.bench_function("preview/popover_open_close", |b| {
        b.iter(|| {
            preview.present(black_box(1), OptionsPatch::new());
            settle(&provider, Phase::Open);
            preview.close();
            settle(&provider, Phase::Closed);
        });
    });
}

fn bench_swipe_dismiss(c: &mut Criterion) {
    let provider = provider();
    let preview = provider.controller();
    c.bench_function("preview/sheet_swipe_dismiss", |b| {
        b.iter(|| {
            preview.present(2, OptionsPatch::new().variant(Variant::Sheet));
            settle(&provider, Phase::Open);
            provider.drag_start(Point::new(195.0, 500.0), 0);
            for step in 1..=10_u32 {
                let y = 500.0 + f64::from(step) * 12.0;
                provider.drag_move(Point::new(195.0, y), u64::from(step) * 16);
            }
            provider.drag_end(Point::new(195.0, 620.0), 400);
            settle(&provider, Phase::Closed);
        });
    });
}

fn bench_frame_snapshot(c: &mut Criterion) {
    let provider = provider();
    provider.controller().present(3, OptionsPatch::new());
    settle(&provider, Phase::Open);
    c.bench_function("preview/frame_snapshot", |b| {
        b.iter(|| black_box(provider.frame()));
    });
}

fn bench_config_from_json(c: &mut Criterion) {
    let json = r#"{ "theme": "dark", "swipe_threshold": 64.0, "avoid_keyboard": true }"#;
    c.bench_function("preview/config_from_json", |b| {
        b.iter(|| {
            let config: PreviewConfig =
                serde_json::from_str(black_box(json)).expect("valid config");
            black_box(config)
        });
    });
}

criterion_group!(
    benches,
    bench_open_close,
    bench_swipe_dismiss,
    bench_frame_snapshot,
    bench_config_from_json
);
criterion_main!(benches);
