//! White noise for the drum voices.
//!
//! One half-second buffer of uniform samples is generated up front and shared.
//! Each voice gets its own reader with its own cursor, so overlapping hits
//! never disturb each other. A reader starts at a random offset and wraps,
//! which keeps simultaneous hits decorrelated, and it goes silent after one
//! buffer length just like a one-shot buffer source.

use std::sync::Arc;

use rand::Rng;

pub const NOISE_SECONDS: f32 = 0.5;

#[derive(Clone)]
pub struct NoiseBuffer {
    samples: Arc<[f32]>,
}

impl NoiseBuffer {
    pub fn new(sample_rate: f32) -> Self {
        Self::with_rng(sample_rate, &mut rand::thread_rng())
    }

    pub fn with_rng<R: Rng + ?Sized>(sample_rate: f32, rng: &mut R) -> Self {
        let len = ((sample_rate * NOISE_SECONDS) as usize).max(1);
        let samples: Arc<[f32]> = (0..len).map(|_| rng.gen_range(-1.0..=1.0)).collect();
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// A fresh reader starting at `offset` (wrapped into range).
    pub fn reader(&self, offset: usize) -> NoiseReader {
        NoiseReader {
            samples: Arc::clone(&self.samples),
            start: offset % self.samples.len(),
            played: 0,
        }
    }
}

pub struct NoiseReader {
    samples: Arc<[f32]>,
    start: usize,
    played: usize,
}

impl NoiseReader {
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        let len = self.samples.len();
        if self.played >= len {
            return 0.0;
        }
        let sample = self.samples[(self.start + self.played) % len];
        self.played += 1;
        sample
    }

    pub fn is_exhausted(&self) -> bool {
        self.played >= self.samples.len()
    }
}
