//! Kick drum voice.
//!
//! A sine wave whose pitch falls away underneath an exponential decay. The
//! sweep is what gives the kick its thump: it starts at a low 60 Hz and dives
//! towards nothing over half a second, so the body turns into a pressure
//! wave rather than a note.
//!
//! # How It Works
//!
//! 1. Sine oscillator at 60 Hz
//! 2. Exponential pitch sweep to 0.1 Hz over 0.5 s
//! 3. Gain jumps to 0.8 and decays exponentially to 0.01 over 0.5 s
//!
//! # Variations
//!
//! - Longer sweep = boomy 808-style kick
//! - Higher start pitch = more "click" on the attack

use super::recipe::{DrumRecipe, DrumSource};

pub const fn kick() -> DrumRecipe {
    DrumRecipe {
        source: DrumSource::Sweep {
            from_hz: 60.0,
            to_hz: 0.1,
        },
        filter: None,
        peak: 0.8,
        decay: 0.5,
    }
}
