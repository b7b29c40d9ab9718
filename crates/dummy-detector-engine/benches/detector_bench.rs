// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the per-frame detection path in
// dummy-detector-engine.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use dummy_detector_core::FrameSize;
use dummy_detector_engine::Detector;

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Benchmark `detect_objects` at common camera resolutions.
///
/// The QVGA case exercises the early return below the area threshold; the
/// others produce one synthetic box each.
fn bench_detect_objects(c: &mut Criterion) {
    let detector = Detector::default();
    let sizes: &[(&str, FrameSize)] = &[
        ("320x240", FrameSize::new(320, 240)),
        ("640x480", FrameSize::new(640, 480)),
        ("1920x1080", FrameSize::new(1920, 1080)),
        ("4032x3024", FrameSize::new(4032, 3024)),
    ];

    let mut group = c.benchmark_group("detect_objects");
    for &(label, size) in sizes {
        group.bench_function(label, |b| {
            b.iter(|| black_box(detector.detect_objects(black_box(size), None)));
        });
    }
    group.finish();
}

/// Benchmark a 1080p call that carries a full RGBA buffer.
///
/// With the stub backend the buffer is never read, so this measures the
/// lock and readiness check on top of the synthetic path.
fn bench_detect_with_pixels(c: &mut Criterion) {
    let detector = Detector::default();
    let size = FrameSize::new(1920, 1080);
    let pixels = vec![0x80u8; 1920 * 1080 * 4];

    c.bench_function("detect_objects_with_pixels (1080p RGBA)", |b| {
        b.iter(|| black_box(detector.detect_objects(size, Some(black_box(&pixels)))));
    });
}

criterion_group!(benches, bench_detect_objects, bench_detect_with_pixels);
criterion_main!(benches);
