//! Automation timelines rendered at audio rate.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use musicmaker::dsp::AudioParam;

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_param(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/param");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        let mut steady = AudioParam::new(0.5);
        group.bench_with_input(BenchmarkId::new("steady", size), &size, |b, _| {
            b.iter(|| steady.render(black_box(&mut buffer), 0.0, SAMPLE_RATE))
        });

        // Attack then exponential decay. Rescheduled every iteration since
        // rendering consumes events that have passed.
        let mut envelope = AudioParam::new(0.0);
        group.bench_with_input(BenchmarkId::new("envelope", size), &size, |b, _| {
            b.iter(|| {
                envelope.reset(0.0);
                envelope.linear_ramp_to_value_at_time(1.0, 0.002);
                envelope.exponential_ramp_to_value_at_time(0.01, 0.5);
                envelope.render(black_box(&mut buffer), 0.0, SAMPLE_RATE);
            })
        });
    }

    group.finish();
}
