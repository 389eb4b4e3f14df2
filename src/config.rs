//! Startup settings.
//!
//! Everything here has a default, so a missing `musicmaker.toml` (or a file
//! that only sets a couple of keys) is fine. Out-of-range values are clamped
//! rather than rejected; only a file that fails to parse is an error.
//!
//! ```toml
//! [synth]
//! waveform = "sawtooth"
//! volume = 0.4
//!
//! [sequencer]
//! tempo = 96
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{dsp::Waveform, error::Result};

pub const SETTINGS_FILE: &str = "musicmaker.toml";

pub const MIN_TEMPO: u32 = 60;
pub const MAX_TEMPO: u32 = 200;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub synth: SynthSettings,
    pub sequencer: SequencerSettings,
    pub effects: EffectSettings,
    pub master: MasterSettings,
    pub input: InputSettings,
    pub recorder: RecorderSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthSettings {
    pub waveform: Waveform,
    pub volume: f32,
    /// Seconds from silence to full volume.
    pub attack: f32,
    /// Seconds from the held level back to silence.
    pub release: f32,
}

impl Default for SynthSettings {
    fn default() -> Self {
        Self {
            waveform: Waveform::Sine,
            volume: 0.5,
            attack: 0.1,
            release: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequencerSettings {
    pub tempo: u32,
    pub lookahead_ms: u32,
}

impl Default for SequencerSettings {
    fn default() -> Self {
        Self {
            tempo: 120,
            lookahead_ms: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectSettings {
    pub cutoff_hz: f32,
    pub drive: f32,
    pub reverb_wet: f32,
    pub delay_wet: f32,
}

impl Default for EffectSettings {
    fn default() -> Self {
        Self {
            cutoff_hz: 8_000.0,
            drive: 0.0,
            reverb_wet: 0.0,
            delay_wet: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MasterSettings {
    pub gain: f32,
    pub threshold_db: f32,
    pub knee_db: f32,
    pub ratio: f32,
    pub attack: f32,
    pub release: f32,
}

impl Default for MasterSettings {
    fn default() -> Self {
        Self {
            gain: 0.7,
            threshold_db: -24.0,
            knee_db: 30.0,
            ratio: 12.0,
            attack: 0.003,
            release: 0.25,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSettings {
    /// How long a note sounds after its key press on terminals that never
    /// report key releases.
    pub key_hold_ms: u64,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self { key_hold_ms: 180 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecorderSettings {
    pub export_dir: PathBuf,
}

impl Default for RecorderSettings {
    fn default() -> Self {
        Self {
            export_dir: PathBuf::from("."),
        }
    }
}

impl Settings {
    pub fn parse(content: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(content)?;
        Ok(settings.clamped())
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings = Self::parse(&content)?;
        info!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Load `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!(path = %path.display(), "no settings file, using defaults");
            Ok(Self::default())
        }
    }

    pub fn clamped(mut self) -> Self {
        let synth = &mut self.synth;
        synth.volume = clamp_or(synth.volume, 0.0, 1.0, 0.5);
        synth.attack = clamp_or(synth.attack, 0.0, 10.0, 0.1);
        synth.release = clamp_or(synth.release, 0.0, 10.0, 0.5);

        let sequencer = &mut self.sequencer;
        sequencer.tempo = sequencer.tempo.clamp(MIN_TEMPO, MAX_TEMPO);
        sequencer.lookahead_ms = sequencer.lookahead_ms.clamp(10, 1_000);

        let effects = &mut self.effects;
        effects.cutoff_hz = clamp_or(effects.cutoff_hz, 20.0, 20_000.0, 8_000.0);
        effects.drive = clamp_or(effects.drive, 0.0, 400.0, 0.0);
        effects.reverb_wet = clamp_or(effects.reverb_wet, 0.0, 1.0, 0.0);
        effects.delay_wet = clamp_or(effects.delay_wet, 0.0, 1.0, 0.0);

        let master = &mut self.master;
        master.gain = clamp_or(master.gain, 0.0, 1.0, 0.7);

        self.input.key_hold_ms = self.input.key_hold_ms.clamp(20, 2_000);
        self
    }
}

fn clamp_or(value: f32, min: f32, max: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        fallback
    }
}
