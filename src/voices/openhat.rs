//! Open hi-hat voice.
//!
//! Same idea as the closed hat, but the high-pass sits lower at 5 kHz and
//! the noise rings three times as long, at a slightly lower level so it sits
//! behind the closed hat when both play.

use super::recipe::{DrumRecipe, DrumSource};
use crate::dsp::filter::FilterKind;

pub const fn openhat() -> DrumRecipe {
    DrumRecipe {
        source: DrumSource::Noise,
        filter: Some((FilterKind::HighPass, 5_000.0)),
        peak: 0.15,
        decay: 0.3,
    }
}
