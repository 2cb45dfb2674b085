// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::time::Duration;

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use understory_event_state::swipe::SwipeDismiss;
use understory_motion::{AnimatedValue, SpringConfig, Timing};

const FRAME: Duration = Duration::from_millis(16);

fn bench_spring_settle(c: &mut Criterion) {
    c.bench_function("motion/spring_settle_1000px", |b| {
        b.iter_batched(
            || {
                let mut v = AnimatedValue::new(1000.0);
                v.animate_to(0.0, SpringConfig::PREVIEW);
                v
            },
            |mut v| {
                let mut frames = 0_u32;
                while v.tick(FRAME).is_none() {
                    frames += 1;
                }
                black_box(frames)
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_timing_frame(c: &mut Criterion) {
    c.bench_function("motion/timing_tick", |b| {
        let mut v = AnimatedValue::new(0.0);
        b.iter(|| {
            if !v.is_animating() {
                v.animate_to(1.0, Timing::millis(180));
            }
            black_box(v.tick(FRAME))
        });
    });
}

fn bench_swipe_feedback(c: &mut Criterion) {
    let swipe = SwipeDismiss::default();
    c.bench_function("motion/swipe_feedback_sweep", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for dy in 0..200 {
                let fb = swipe.feedback(black_box(f64::from(dy)));
                acc += fb.opacity + fb.scale;
            }
            black_box(acc)
        });
    });
}

criterion_group!(
    benches,
    bench_spring_settle,
    bench_timing_frame,
    bench_swipe_feedback
);
criterion_main!(benches);
