//! Low-level DSP primitives used by the graph nodes and voices.
//!
//! These components are allocation-free once constructed, making them safe to
//! embed directly inside pooled voices. They stay focused on signal math; the
//! graph layer adds block rendering against a clock.

/// Feed-forward dynamics compressor for the master stage.
pub mod compressor;
/// Waveshaping curve and table lookup.
pub mod distortion;
/// Summing and gain helpers for buses.
pub mod mix;
/// Cached white noise buffer and per-voice readers.
pub mod noise;
/// Periodic waveforms and a phase accumulator.
pub mod oscillator;
/// Scheduled parameter automation (set, ramps, cancel, hold).
pub mod param;
/// State-variable filter implementation with multiple responses.
pub mod filter;

pub use oscillator::Waveform;
pub use param::{AudioParam, ParamOp};
