//! The seam between the control side and the audio callback.
//!
//! The control side talks to an [`AudioGraph`]: it reads the audio clock and
//! submits [`GraphCommand`]s stamped with clock times. In the app that is a
//! [`GraphHandle`] feeding a lock-free queue into the [`Renderer`] running
//! on the audio thread. In tests it is an [`OfflineGraph`] that owns the
//! renderer and pulls samples on demand.

pub mod clips;
pub mod handle;
pub mod offline;
pub mod renderer;

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use rtrb::RingBuffer;

use crate::{config::Settings, synth::message::GraphCommand};

pub use handle::GraphHandle;
pub use offline::OfflineGraph;
pub use renderer::Renderer;

/// Commands the queue can hold between two audio callbacks.
pub const COMMAND_CAPACITY: usize = 1024;

pub trait AudioGraph {
    fn sample_rate(&self) -> f32;

    /// Seconds of audio rendered so far.
    fn current_time(&self) -> f64;

    /// Queue a command for the render side. False when it was dropped.
    fn submit(&mut self, command: GraphCommand) -> bool;
}

/// Frames rendered, published by the audio thread.
#[derive(Debug, Clone, Default)]
pub struct AudioClock {
    frames: Arc<AtomicU64>,
}

impl AudioClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames.load(Ordering::Acquire)
    }

    pub fn seconds(&self, sample_rate: f32) -> f64 {
        self.frames() as f64 / sample_rate as f64
    }

    pub(crate) fn publish(&self, frames: u64) {
        self.frames.store(frames, Ordering::Release);
    }
}

/// Build a connected handle/renderer pair.
pub fn channel(sample_rate: f32, settings: &Settings) -> (GraphHandle, Renderer) {
    let (tx, rx) = RingBuffer::<GraphCommand>::new(COMMAND_CAPACITY);
    let clock = AudioClock::new();
    let handle = GraphHandle::new(tx, clock.clone(), sample_rate);
    let renderer = Renderer::new(sample_rate, settings, rx, clock);
    (handle, renderer)
}
