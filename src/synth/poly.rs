use crate::{
    dsp::{mix::sum_in_place, ParamOp, Waveform},
    graph::RenderCtx,
    synth::{
        message::VoiceId,
        voice::{ToneVoice, VoiceState},
    },
    MAX_BLOCK_SIZE,
};

pub const MAX_TONES: usize = 32;

/// Render-side pool of keyboard tones.
///
/// Every voice is allocated up front. A start takes a free voice, or steals
/// the oldest voice that is already fading out; with every voice held down
/// the new note is dropped.
pub struct ToneBank {
    voices: Vec<ToneVoice>,
    temp_buffer: Vec<f32>,
    starts: u64,
}

impl Default for ToneBank {
    fn default() -> Self {
        Self::new(MAX_TONES)
    }
}

impl ToneBank {
    pub fn new(max_voices: usize) -> Self {
        Self {
            voices: (0..max_voices).map(|_| ToneVoice::new()).collect(),
            temp_buffer: vec![0.0; MAX_BLOCK_SIZE],
            starts: 0,
        }
    }

    /// Returns false when the pool had no voice to give.
    pub fn start(&mut self, id: VoiceId, waveform: Waveform, frequency: f32, at: f64) -> bool {
        let age = self.starts;
        self.starts += 1;
        match self.allocate_voice() {
            Some(voice) => {
                voice.start(id, waveform, frequency, at, age);
                true
            }
            None => false,
        }
    }

    pub fn stop(&mut self, id: VoiceId, at: f64) {
        if let Some(voice) = self.find_voice(id) {
            voice.stop(at);
        }
    }

    pub fn automate(&mut self, id: VoiceId, op: ParamOp) {
        if let Some(voice) = self.find_voice(id) {
            voice.automate(op);
        }
    }

    /// Sum every sounding voice into `out` (overwrites).
    pub fn render(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let len = out.len().min(MAX_BLOCK_SIZE);
        out.fill(0.0);
        for voice in &mut self.voices {
            if voice.is_active() {
                let scratch = &mut self.temp_buffer[..len];
                voice.render(scratch, ctx);
                sum_in_place(&mut out[..len], scratch);
            }
        }
    }

    pub fn active_count(&self) -> usize {
        self.voices.iter().filter(|v| v.is_active()).count()
    }

    fn allocate_voice(&mut self) -> Option<&mut ToneVoice> {
        // First pass: find free voice index
        let free_idx = self.voices.iter().position(|v| v.is_free());
        if let Some(idx) = free_idx {
            return Some(&mut self.voices[idx]);
        }

        // Second pass: steal oldest releasing voice
        let steal_idx = self
            .voices
            .iter()
            .enumerate()
            .filter(|(_, v)| v.state() == VoiceState::Releasing)
            .min_by_key(|(_, v)| v.age())
            .map(|(idx, _)| idx);

        steal_idx.map(|idx| &mut self.voices[idx])
    }

    fn find_voice(&mut self, id: VoiceId) -> Option<&mut ToneVoice> {
        self.voices.iter_mut().find(|v| v.id() == Some(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steals_oldest_releasing_voice() {
        let mut bank = ToneBank::new(2);
        assert!(bank.start(VoiceId(1), Waveform::Sine, 440.0, 0.0));
        assert!(bank.start(VoiceId(2), Waveform::Sine, 550.0, 0.0));
        bank.stop(VoiceId(2), 5.0);

        assert!(bank.start(VoiceId(3), Waveform::Sine, 660.0, 0.0));
        assert_eq!(bank.active_count(), 2);

        // Voice 2 was the only one releasing, so it is the one gone.
        bank.stop(VoiceId(1), 5.0);
        bank.stop(VoiceId(3), 5.0);
        assert!(bank.start(VoiceId(4), Waveform::Sine, 770.0, 0.0));
    }

    #[test]
    fn drops_note_when_every_voice_is_held() {
        let mut bank = ToneBank::new(1);
        assert!(bank.start(VoiceId(1), Waveform::Sine, 440.0, 0.0));
        assert!(!bank.start(VoiceId(2), Waveform::Sine, 440.0, 0.0));
    }

    #[test]
    fn voices_sum_on_the_bus() {
        let ctx = RenderCtx::new(1_000.0, 0.0);
        let mut bank = ToneBank::new(4);
        for id in 1..=2 {
            bank.start(VoiceId(id), Waveform::Square, 50.0, 0.0);
            bank.automate(VoiceId(id), ParamOp::SetValueAtTime { value: 0.5, time: 0.0 });
        }

        let mut out = vec![0.0; 8];
        bank.render(&mut out, &ctx);
        assert!(out.iter().all(|s| (s.abs() - 1.0).abs() < 1e-6));
    }
}
