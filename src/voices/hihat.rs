//! Hi-hat voice (closed).
//!
//! A tight burst of bright noise: everything under 7 kHz is filtered away and
//! the decay is only a tenth of a second.
//!
//! # Variations
//!
//! - Longer decay = open hi-hat (see openhat.rs)
//! - Lower filter = darker, jazzier hat

use super::recipe::{DrumRecipe, DrumSource};
use crate::dsp::filter::FilterKind;

pub const fn hihat() -> DrumRecipe {
    DrumRecipe {
        source: DrumSource::Noise,
        filter: Some((FilterKind::HighPass, 7_000.0)),
        peak: 0.2,
        decay: 0.1,
    }
}
