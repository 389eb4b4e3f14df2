//! Benchmarks for the render path.
//!
//! Run with: cargo bench
//!
//! Everything here runs inside the audio callback, so it has to finish well
//! inside the block deadline. At 48kHz:
//!   - 128 samples = 2.67ms
//!   - 256 samples = 5.33ms
//!   - 512 samples = 10.67ms
//!
//! Benchmark groups:
//!   - dsp/*        Primitives (oscillator, filter, shaper, compressor, params)
//!   - scenarios/*  Full renderer blocks: chords, drum kit, everything at once

use criterion::{criterion_group, criterion_main};

mod dsp;
mod scenarios;

pub const SAMPLE_RATE: f32 = 48_000.0;

/// Common callback sizes.
pub const BLOCK_SIZES: &[usize] = &[128, 256, 512];

criterion_group!(
    benches,
    dsp::bench_oscillator,
    dsp::bench_filter,
    dsp::bench_shaper,
    dsp::bench_compressor,
    dsp::bench_param,
    scenarios::bench_renderer,
);
criterion_main!(benches);
