//! Snare drum voice.
//!
//! Unfiltered white noise with a short decay. Full-band noise reads as the
//! rattle of the snare wires; there is no tonal body.
//!
//! # How It Works
//!
//! 1. White noise from the shared buffer
//! 2. Gain 0.3 decaying exponentially to 0.01 over 0.2 s

use super::recipe::{DrumRecipe, DrumSource};

pub const fn snare() -> DrumRecipe {
    DrumRecipe {
        source: DrumSource::Noise,
        filter: None,
        peak: 0.3,
        decay: 0.2,
    }
}
