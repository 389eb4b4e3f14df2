//! Crash cymbal voice.
//!
//! Band-passed noise around 3 kHz with a one second decay.
//!
//! # How It Works
//!
//! 1. White noise through a band-pass at 3 kHz
//! 2. Gain 0.4 decaying exponentially to 0.01 over 1.0 s
//!
//! The noise buffer is only half a second long and is not looped, so the
//! second half of the decay is silent. That cut is part of the sound.

use super::recipe::{DrumRecipe, DrumSource};
use crate::dsp::filter::FilterKind;

pub const fn crash() -> DrumRecipe {
    DrumRecipe {
        source: DrumSource::Noise,
        filter: Some((FilterKind::BandPass, 3_000.0)),
        peak: 0.4,
        decay: 1.0,
    }
}
