//! Render nodes built on the DSP primitives.
//!
//! Each node owns its parameters as `AudioParam` timelines, so every change
//! arrives as a scheduled event and is evaluated against the block clock in
//! `RenderCtx`. Voices and the effects chain are assembled from these.

/// Dynamics compressor stage.
pub mod compressor;
/// Waveshaper node with a live drive control.
pub mod distortion;
/// Filter node with an automatable cutoff.
pub mod filter;
/// Automatable gain stage.
pub mod gain;
/// Core traits shared by all graph nodes.
pub mod node;
/// Oscillator with an automatable frequency.
pub mod oscillator;

pub use node::{GraphNode, RenderCtx};
