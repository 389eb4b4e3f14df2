//! Filter and waveshaper on a sawtooth input.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use musicmaker::dsp::{distortion::WaveShaper, filter::SvFilter, oscillator::Oscillator, Waveform};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

fn saw(size: usize) -> Vec<f32> {
    let mut input = vec![0.0; size];
    Oscillator::new(Waveform::Sawtooth).render(&mut input, 220.0, SAMPLE_RATE);
    input
}

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");

    for &size in BLOCK_SIZES {
        let input = saw(size);
        let mut buffer = input.clone();

        let mut lowpass = SvFilter::lowpass(1_200.0);
        group.bench_with_input(BenchmarkId::new("lowpass", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                lowpass.render(black_box(&mut buffer), SAMPLE_RATE);
            })
        });

        // Drum voices use a bandpass with a higher Q
        let mut bandpass = SvFilter::bandpass(2_000.0).with_q(4.0);
        group.bench_with_input(BenchmarkId::new("bandpass", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                bandpass.render(black_box(&mut buffer), SAMPLE_RATE);
            })
        });
    }

    group.finish();
}

pub fn bench_shaper(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/shaper");

    for &size in BLOCK_SIZES {
        let input = saw(size);
        let mut buffer = input.clone();

        for drive in [0.0, 50.0] {
            let shaper = WaveShaper::new(drive);
            let id = BenchmarkId::new(format!("drive_{drive:.0}"), size);
            group.bench_with_input(id, &size, |b, _| {
                b.iter(|| {
                    buffer.copy_from_slice(&input);
                    shaper.process_buffer(black_box(&mut buffer));
                })
            });
        }

        // Rebuilding the curve happens on the control thread, but it is
        // worth knowing what a drive sweep costs.
        let mut shaper = WaveShaper::new(0.0);
        group.bench_with_input(BenchmarkId::new("set_amount", size), &size, |b, _| {
            b.iter(|| shaper.set_amount(black_box(25.0)))
        });
    }

    group.finish();
}
