// Purpose - the outside world: microphone capture, WAV containers and the
// recorded takes built from them

pub mod microphone;
pub mod recorder;
pub mod wav;

use std::{fmt, sync::Arc};

pub use microphone::{Capture, CpalMicrophone, Microphone};
pub use recorder::{timestamp_label, RecordedTrack, Recorder};

/// Decoded mono audio ready for playback. Cloning shares the samples.
#[derive(Clone)]
pub struct Clip {
    samples: Arc<[f32]>,
    sample_rate: u32,
}

impl Clip {
    pub fn new(samples: impl Into<Arc<[f32]>>, sample_rate: u32) -> Self {
        Self {
            samples: samples.into(),
            sample_rate: sample_rate.max(1),
        }
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// True when both handles point at the same sample buffer.
    pub fn shares_samples(&self, other: &Clip) -> bool {
        Arc::ptr_eq(&self.samples, &other.samples)
    }
}

impl fmt::Debug for Clip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Clip")
            .field("len", &self.samples.len())
            .field("sample_rate", &self.sample_rate)
            .finish()
    }
}
