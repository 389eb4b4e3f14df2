use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use musicmaker::dsp::compressor::Compressor;

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_compressor(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/compressor");

    for &size in BLOCK_SIZES {
        // Loud enough to sit in the knee most of the time
        let input: Vec<f32> = (0..size).map(|i| 0.8 * (i as f32 * 0.05).sin()).collect();
        let mut buffer = input.clone();
        let mut compressor = Compressor::default();

        group.bench_with_input(BenchmarkId::new("master", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                compressor.process_buffer(black_box(&mut buffer), SAMPLE_RATE);
            })
        });
    }

    group.finish();
}
