//! Performance measurement for per-pixel synthesis at varying output sizes

// Criterion macros generate undocumented functions
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use hexblend::synthesis::engine::{SynthesisConfig, Synthesizer};
use ndarray::Array2;
use std::hint::black_box;

// Deterministic synthetic exemplar with a mix of gradients and repetition
fn exemplar_channels(side: usize) -> Vec<Array2<f64>> {
    (0..3_usize)
        .map(|c| {
            Array2::from_shape_fn((side, side), |(row, col)| {
                let phase = (row * 31 + col * 17 + c * 7) % 64;
                phase as f64 / 63.0
            })
        })
        .collect()
}

/// Measures channel synthesis cost as the output grows from 64 to 256 pixels square
fn bench_synthesize_channel(c: &mut Criterion) {
    let mut group = c.benchmark_group("synthesize_channel");

    for size in &[64_usize, 128, 256] {
        let channels = exemplar_channels(32);
        let Ok(synthesizer) = Synthesizer::from_channels(
            &channels,
            SynthesisConfig::with_output_size(*size, *size),
        ) else {
            group.finish();
            return;
        };

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let output = synthesizer.synthesize_channel_with(black_box(0), || {});
                black_box(output)
            });
        });
    }

    group.finish();
}

/// Measures a single pure per-point evaluation
fn bench_single_sample(c: &mut Criterion) {
    let channels = exemplar_channels(32);
    let Ok(synthesizer) =
        Synthesizer::from_channels(&channels, SynthesisConfig::with_output_size(64, 64))
    else {
        return;
    };

    c.bench_function("sample_single_point", |b| {
        b.iter(|| synthesizer.sample(black_box(0), black_box(0.37), black_box(0.61)));
    });
}

criterion_group!(benches, bench_synthesize_channel, bench_single_sample);
criterion_main!(benches);
