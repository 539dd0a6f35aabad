// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Insets, Size};
use understory_sheet::{
    Detent, DetentKey, DetentResolver, PanSample, SheetConfig, SheetController, SheetMetrics,
};

fn detents(count: usize) -> Vec<Detent> {
    (0..count)
        .map(|i| {
            let ratio = (i + 1) as f64 / count as f64;
            Detent::fraction(DetentKey::from(format!("d{i}")), ratio)
        })
        .collect()
}

fn metrics(height: f64) -> SheetMetrics {
    SheetMetrics::new(Size::new(430.0, height)).with_safe_area(Insets::new(0.0, 59.0, 0.0, 34.0))
}

fn bench_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("sheet/resolve");

    for count in [2usize, 4, 16, 64] {
        group.throughput(Throughput::Elements(count as u64));
        let mut resolver = DetentResolver::new(detents(count), None).unwrap();

        // Alternate heights so every call actually re-resolves.
        let mut tall = false;
        group.bench_function(BenchmarkId::new("invalidate", count), |b| {
            b.iter(|| {
                tall = !tall;
                resolver.set_metrics(metrics(if tall { 932.0 } else { 844.0 }));
                black_box(resolver.resolve_largest_detent_value());
            });
        });

        group.bench_function(BenchmarkId::new("nearest", count), |b| {
            let mut target = 0.0;
            b.iter(|| {
                target = (target + 37.0) % 900.0;
                black_box(resolver.nearest_detent(black_box(target)));
            });
        });
    }

    group.finish();
}

fn bench_drag(c: &mut Criterion) {
    let mut group = c.benchmark_group("sheet/drag");
    let host = &mut ();

    let mut sheet = SheetController::new(SheetConfig {
        detents: vec![Detent::content(), Detent::medium(), Detent::large()],
        ..SheetConfig::default()
    })
    .unwrap();
    sheet.set_metrics(metrics(932.0));
    sheet.set_content_height(Some(240.0), host);
    sheet.begin_presentation();
    sheet.complete_transition(true, host);

    group.bench_function("gesture_60_samples", |b| {
        b.iter(|| {
            sheet.handle_pan(PanSample::began(), host);
            for step in 1..=60 {
                sheet.handle_pan(PanSample::changed(-(step as f64) * 8.0), host);
                black_box(sheet.frame());
            }
            black_box(sheet.handle_pan(PanSample::ended(-480.0, -900.0), host));
        });
    });

    group.finish();
}

criterion_group!(benches, bench_resolution, bench_drag);
criterion_main!(benches);
