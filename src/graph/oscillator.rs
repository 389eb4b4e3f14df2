use crate::{
    dsp::{oscillator::Oscillator, AudioParam, Waveform},
    graph::node::{GraphNode, RenderCtx},
    MAX_BLOCK_SIZE,
};

/// Periodic source whose frequency is an automation timeline.
///
/// Keyboard tones hold one frequency for their whole life; the kick drum
/// sweeps it exponentially. Both are just different event lists on the same
/// parameter.
pub struct OscNode {
    osc: Oscillator,
    frequency: AudioParam,
    freq_buffer: Vec<f32>,
}

impl OscNode {
    pub fn new(waveform: Waveform, frequency: f32) -> Self {
        Self {
            osc: Oscillator::new(waveform),
            frequency: AudioParam::new(frequency),
            freq_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }

    pub fn sine(frequency: f32) -> Self {
        Self::new(Waveform::Sine, frequency)
    }

    /// Restart from phase zero with a new shape and a flat frequency.
    pub fn restart(&mut self, waveform: Waveform, frequency: f32) {
        self.osc.reset(waveform);
        self.frequency.reset(frequency);
    }

    pub fn frequency(&mut self) -> &mut AudioParam {
        &mut self.frequency
    }
}

impl GraphNode for OscNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let len = out.len().min(MAX_BLOCK_SIZE);
        let freqs = &mut self.freq_buffer[..len];
        self.frequency.render(freqs, ctx.time, ctx.sample_rate);

        for (sample, &freq) in out[..len].iter_mut().zip(freqs.iter()) {
            *sample = self.osc.next_sample(freq, ctx.sample_rate);
        }
    }
}
