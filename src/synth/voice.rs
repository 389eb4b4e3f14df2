use crate::{
    dsp::{ParamOp, Waveform},
    graph::{gain::GainNode, oscillator::OscNode, GraphNode, RenderCtx},
    synth::message::VoiceId,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceState {
    Free,      // Available for allocation
    Active,    // Started, no stop time yet
    Releasing, // Stop time scheduled, fading out
}

/// One pooled keyboard tone: oscillator into its own envelope gain.
///
/// The envelope is driven entirely by `Automate` commands addressed to the
/// voice's id; the voice itself only knows when it starts and when it stops.
pub struct ToneVoice {
    id: Option<VoiceId>,
    state: VoiceState,
    age: u64,
    start_at: f64,
    stop_at: f64,
    osc: OscNode,
    envelope: GainNode,
}

impl Default for ToneVoice {
    fn default() -> Self {
        Self::new()
    }
}

impl ToneVoice {
    pub fn new() -> Self {
        Self {
            id: None,
            state: VoiceState::Free,
            age: 0,
            start_at: 0.0,
            stop_at: f64::INFINITY,
            osc: OscNode::sine(440.0),
            envelope: GainNode::new(0.0),
        }
    }

    pub fn start(&mut self, id: VoiceId, waveform: Waveform, frequency: f32, at: f64, age: u64) {
        self.id = Some(id);
        self.state = VoiceState::Active;
        self.age = age;
        self.start_at = at;
        self.stop_at = f64::INFINITY;
        self.osc.restart(waveform, frequency);
        self.envelope.gain().reset(0.0);
    }

    pub fn stop(&mut self, at: f64) {
        if self.state == VoiceState::Active {
            self.state = VoiceState::Releasing;
            self.stop_at = at;
        }
    }

    pub fn automate(&mut self, op: ParamOp) {
        self.envelope.gain().apply(op);
    }

    pub fn render(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        out.fill(0.0);
        if self.is_free() {
            return;
        }

        let len = out.len();
        let start = ctx.index_of(self.start_at, len);
        let end = ctx.index_of(self.stop_at, len);

        if start < end {
            let sub_ctx = RenderCtx::new(ctx.sample_rate, ctx.sample_time(start));
            let span = &mut out[start..end];
            self.osc.render_block(span, &sub_ctx);
            self.envelope.render_block(span, &sub_ctx);
        }

        if end < len {
            self.free();
        }
    }

    pub fn free(&mut self) {
        self.state = VoiceState::Free;
        self.id = None;
    }

    pub fn is_free(&self) -> bool {
        self.state == VoiceState::Free
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, VoiceState::Active | VoiceState::Releasing)
    }

    pub fn id(&self) -> Option<VoiceId> {
        self.id
    }

    pub fn age(&self) -> u64 {
        self.age
    }

    pub fn state(&self) -> VoiceState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::mix::peak;

    const SR: f32 = 1_000.0;

    #[test]
    fn silent_until_start_and_after_stop() {
        let mut voice = ToneVoice::new();
        voice.start(VoiceId(1), Waveform::Square, 100.0, 0.010, 0);
        voice.automate(ParamOp::SetValueAtTime { value: 1.0, time: 0.0 });
        voice.stop(0.050);

        let mut out = vec![0.0; 64];
        voice.render(&mut out, &RenderCtx::new(SR, 0.0));

        assert_eq!(peak(&out[..10]), 0.0);
        assert!(peak(&out[10..50]) > 0.9);
        assert_eq!(peak(&out[50..]), 0.0);
        assert!(voice.is_free());
    }

    #[test]
    fn stop_only_applies_once() {
        let mut voice = ToneVoice::new();
        voice.start(VoiceId(7), Waveform::Sine, 220.0, 0.0, 3);
        voice.stop(1.0);
        voice.stop(0.2);
        assert_eq!(voice.state(), VoiceState::Releasing);

        let mut out = vec![0.0; 500];
        voice.render(&mut out, &RenderCtx::new(SR, 0.0));
        assert!(voice.is_active(), "first stop time still pending");
    }
}
