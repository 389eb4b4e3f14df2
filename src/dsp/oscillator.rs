use std::{f32::consts::TAU, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::MusicError;

/*
Periodic Waveforms
==================

The keyboard offers four shapes. Each is evaluated from a normalized phase in
[0, 1) so one accumulator drives them all:

  Sine      pure fundamental, soft and round
  Square    odd harmonics, hollow and loud
  Sawtooth  every harmonic, bright and buzzy
  Triangle  odd harmonics falling off fast, mellow

All four start at zero and rise, so a note that begins on a phase reset never
opens with a step discontinuity.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    #[default]
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

impl Waveform {
    pub const ALL: [Waveform; 4] = [
        Waveform::Sine,
        Waveform::Square,
        Waveform::Sawtooth,
        Waveform::Triangle,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Waveform::Sine => "sine",
            Waveform::Square => "square",
            Waveform::Sawtooth => "sawtooth",
            Waveform::Triangle => "triangle",
        }
    }

    /// Waveform value at `phase` in [0, 1).
    #[inline]
    pub fn sample(self, phase: f32) -> f32 {
        match self {
            Waveform::Sine => (TAU * phase).sin(),
            Waveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Sawtooth => 2.0 * (phase + 0.5).fract() - 1.0,
            Waveform::Triangle => {
                if phase < 0.25 {
                    4.0 * phase
                } else if phase < 0.75 {
                    2.0 - 4.0 * phase
                } else {
                    4.0 * phase - 4.0
                }
            }
        }
    }
}

impl fmt::Display for Waveform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Waveform {
    type Err = MusicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Waveform::ALL
            .into_iter()
            .find(|w| w.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| MusicError::UnknownWaveform(s.to_string()))
    }
}

/// Phase accumulator producing one of the periodic waveforms.
pub struct Oscillator {
    waveform: Waveform,
    phase: f32,
}

impl Oscillator {
    pub fn new(waveform: Waveform) -> Self {
        Self { waveform, phase: 0.0 }
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    /// Switch shape and restart from phase zero.
    pub fn reset(&mut self, waveform: Waveform) {
        self.waveform = waveform;
        self.phase = 0.0;
    }

    #[inline]
    pub fn next_sample(&mut self, frequency: f32, sample_rate: f32) -> f32 {
        let out = self.waveform.sample(self.phase);
        self.phase += frequency / sample_rate;
        self.phase -= self.phase.floor();
        out
    }

    pub fn render(&mut self, out: &mut [f32], frequency: f32, sample_rate: f32) {
        for sample in out.iter_mut() {
            *sample = self.next_sample(frequency, sample_rate);
        }
    }
}
