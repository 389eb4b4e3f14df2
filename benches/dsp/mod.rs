mod dynamics;
mod oscillator;
mod param;
mod shaping;

pub use dynamics::bench_compressor;
pub use oscillator::bench_oscillator;
pub use param::bench_param;
pub use shaping::{bench_filter, bench_shaper};
