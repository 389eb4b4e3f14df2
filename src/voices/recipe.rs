use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{dsp::filter::FilterKind, error::MusicError};

use super::{crash, hihat, kick, openhat, snare};

/// Level every drum decays towards. Exponential ramps cannot reach zero.
pub const DECAY_FLOOR: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrumKind {
    Kick,
    Snare,
    Hihat,
    Openhat,
    Crash,
}

impl DrumKind {
    /// Sequencer track order, top to bottom.
    pub const ALL: [DrumKind; 5] = [
        DrumKind::Kick,
        DrumKind::Snare,
        DrumKind::Hihat,
        DrumKind::Openhat,
        DrumKind::Crash,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DrumKind::Kick => "kick",
            DrumKind::Snare => "snare",
            DrumKind::Hihat => "hihat",
            DrumKind::Openhat => "openhat",
            DrumKind::Crash => "crash",
        }
    }

    pub fn recipe(self) -> DrumRecipe {
        match self {
            DrumKind::Kick => kick(),
            DrumKind::Snare => snare(),
            DrumKind::Hihat => hihat(),
            DrumKind::Openhat => openhat(),
            DrumKind::Crash => crash(),
        }
    }
}

impl fmt::Display for DrumKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DrumKind {
    type Err = MusicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DrumKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| MusicError::UnknownDrum(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrumSource {
    /// Sine with an exponential pitch sweep over the decay.
    Sweep { from_hz: f32, to_hz: f32 },
    /// A reader on the shared white noise buffer.
    Noise,
}

/// Everything needed to voice one drum hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrumRecipe {
    pub source: DrumSource,
    pub filter: Option<(FilterKind, f32)>,
    /// Gain at the hit.
    pub peak: f32,
    /// Seconds until the gain reaches the floor and the voice stops.
    pub decay: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_in_track_order() {
        let names: Vec<_> = DrumKind::ALL.iter().map(|k| k.name()).collect();
        assert_eq!(names, ["kick", "snare", "hihat", "openhat", "crash"]);
        for kind in DrumKind::ALL {
            assert_eq!(kind.name().parse::<DrumKind>().unwrap(), kind);
        }
        assert!("cowbell".parse::<DrumKind>().is_err());
    }

    #[test]
    fn recipes_match_the_voice_table() {
        let kick = DrumKind::Kick.recipe();
        assert_eq!(
            kick.source,
            DrumSource::Sweep {
                from_hz: 60.0,
                to_hz: 0.1
            }
        );
        assert_eq!((kick.peak, kick.decay), (0.8, 0.5));

        assert_eq!(DrumKind::Snare.recipe().filter, None);
        assert_eq!(
            DrumKind::Hihat.recipe().filter,
            Some((FilterKind::HighPass, 7_000.0))
        );
        assert_eq!(
            DrumKind::Openhat.recipe().filter,
            Some((FilterKind::HighPass, 5_000.0))
        );
        let crash = DrumKind::Crash.recipe();
        assert_eq!(crash.filter, Some((FilterKind::BandPass, 3_000.0)));
        assert_eq!((crash.peak, crash.decay), (0.4, 1.0));
    }
}
