//! Pipeline performance - segmentation, shaping and reporting
//!
//! Measures how each stage scales with text length and script mix, using
//! metadata-only fonts so the numbers reflect scriptrun itself.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use scriptrun::fontdb::MetricsFont;
use scriptrun::prelude::*;
use scriptrun::shape_cluster::ClusterShaper;

const MIXED: &str = "Hello, Java; 世界;! مرحبا بالعالم שלום नमस्ते 💇\u{200D}♀\u{FE0F}🌍 ";

fn analyzer() -> Analyzer {
    let mut db = FontDatabase::new();
    db.insert("fallback", Arc::new(MetricsFont::last_resort()))
        .unwrap();
    Analyzer::builder()
        .database(db)
        .config(FontConfig::new().with_default("fallback"))
        .shaper(Arc::new(ClusterShaper::new()))
        .build()
}

/// Segmentation alone, from a short label to a long mixed document
fn bench_segment(c: &mut Criterion) {
    let analyzer = analyzer();

    c.bench_function("segment_short_latin", |b| {
        b.iter(|| analyzer.segment(black_box("Hello World")))
    });

    let medium = MIXED.repeat(5);
    c.bench_function("segment_medium_mixed", |b| {
        b.iter(|| analyzer.segment(black_box(&medium)))
    });

    let long = MIXED.repeat(100);
    c.bench_function("segment_long_mixed", |b| {
        b.iter(|| analyzer.segment(black_box(&long)))
    });
}

/// Font resolution plus shaping over an existing segmentation
fn bench_shape(c: &mut Criterion) {
    let analyzer = analyzer();
    let text = MIXED.repeat(20);
    let seg = analyzer.segment(&text);

    c.bench_function("shape_mixed_runs", |b| {
        b.iter(|| analyzer.shape(black_box(&text), &seg, 16.0).unwrap())
    });
}

/// Both entry operations end to end, report included
fn bench_end_to_end(c: &mut Criterion) {
    let analyzer = analyzer();
    let text = MIXED.repeat(20);

    c.bench_function("analyze_runs", |b| {
        b.iter(|| {
            let mut out = Vec::with_capacity(4096);
            analyzer
                .analyze_runs(black_box(text.as_bytes()), 16.0, &mut out)
                .unwrap();
            out
        })
    });

    c.bench_function("analyze_shaped_runs", |b| {
        b.iter(|| {
            let mut out = Vec::with_capacity(16384);
            analyzer
                .analyze_shaped_runs(black_box(text.as_bytes()), 16.0, &mut out)
                .unwrap();
            out
        })
    });
}

criterion_group!(benches, bench_segment, bench_shape, bench_end_to_end);
criterion_main!(benches);
