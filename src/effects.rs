/*
Effects Chain
=============

Fixed topology, built once:

  tone voices ──▶ lowpass (Q 1) ──▶ waveshaper ──┐
                                                 ├──▶ master gain ──▶ compressor ──┐
  drum voices ───────────────────────────────────┘                                 ├──▶ out
  recorded takes ──────────────────────────────────────────────────────────────────┘

Drums join at the master gain, so the cutoff and drive only color the
keyboard. Takes skip the master stage and play back at their recorded level.

The control side keeps `EffectParameters` and turns every change into a
command: cutoff as "set value now" on the filter's timeline, drive as a new
transfer curve. Reverb and delay wet amounts are stored and reported, but no
reverb or delay stage exists in the signal path.
*/

use crate::{
    config::{EffectSettings, MasterSettings},
    dsp::compressor::Compressor,
    graph::{
        compressor::CompressorNode, distortion::ShaperNode, filter::FilterNode, gain::GainNode,
        GraphNode, RenderCtx,
    },
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectParameters {
    pub cutoff_hz: f32,
    pub drive: f32,
    pub reverb_wet: f32,
    pub delay_wet: f32,
}

impl Default for EffectParameters {
    fn default() -> Self {
        Self::from(&EffectSettings::default())
    }
}

impl From<&EffectSettings> for EffectParameters {
    fn from(settings: &EffectSettings) -> Self {
        Self {
            cutoff_hz: settings.cutoff_hz,
            drive: settings.drive.max(0.0),
            reverb_wet: settings.reverb_wet.clamp(0.0, 1.0),
            delay_wet: settings.delay_wet.clamp(0.0, 1.0),
        }
    }
}

/// Filter then waveshaper, applied to the keyboard bus.
pub struct EffectsChain {
    filter: FilterNode,
    shaper: ShaperNode,
}

impl EffectsChain {
    pub fn new(params: &EffectParameters) -> Self {
        Self {
            filter: FilterNode::lowpass(params.cutoff_hz),
            shaper: ShaperNode::new(params.drive),
        }
    }

    pub fn filter(&mut self) -> &mut FilterNode {
        &mut self.filter
    }

    pub fn set_drive(&mut self, drive: f32) {
        self.shaper.set_drive(drive);
    }
}

impl GraphNode for EffectsChain {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.filter.render_block(out, ctx);
        self.shaper.render_block(out, ctx);
    }
}

/// Master gain into the compressor.
pub struct MasterStage {
    gain: GainNode,
    compressor: CompressorNode,
}

impl MasterStage {
    pub fn new(settings: &MasterSettings) -> Self {
        Self {
            gain: GainNode::new(settings.gain),
            compressor: CompressorNode::new(Compressor::new(
                settings.threshold_db,
                settings.knee_db,
                settings.ratio,
                settings.attack,
                settings.release,
            )),
        }
    }
}

impl GraphNode for MasterStage {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.gain.render_block(out, ctx);
        self.compressor.render_block(out, ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::{mix::peak, oscillator::Oscillator, Waveform};

    #[test]
    fn parameters_clamp_wet_amounts() {
        let params = EffectParameters::from(&EffectSettings {
            cutoff_hz: 500.0,
            drive: -3.0,
            reverb_wet: 1.5,
            delay_wet: -0.5,
        });
        assert_eq!(params.drive, 0.0);
        assert_eq!(params.reverb_wet, 1.0);
        assert_eq!(params.delay_wet, 0.0);
    }

    #[test]
    fn default_chain_is_nearly_transparent_for_quiet_input() {
        let sample_rate = 48_000.0;
        let mut chain = EffectsChain::new(&EffectParameters::default());
        let mut osc = Oscillator::new(Waveform::Sine);
        let mut buffer = vec![0.0; 1024];
        osc.render(&mut buffer, 220.0, sample_rate);
        for s in buffer.iter_mut() {
            *s *= 0.1;
        }

        chain.render_block(&mut buffer, &RenderCtx::new(sample_rate, 0.0));
        // Drive 0 is x / 3 around zero; the filter barely touches 220 Hz.
        let level = peak(&buffer[512..]);
        assert!((level - 0.1 / 3.0).abs() < 0.005, "level {level}");
    }

    #[test]
    fn master_gain_follows_settings() {
        let mut master = MasterStage::new(&MasterSettings::default());
        let mut buffer = vec![0.01; 64];
        master.render_block(&mut buffer, &RenderCtx::new(48_000.0, 0.0));
        // Far below threshold: only the 0.7 gain applies.
        assert!((buffer[63] - 0.007).abs() < 1e-4);
    }
}
