use crate::{graph::RenderCtx, io::Clip};

/// Takes that can sound at once; a new one replaces the oldest.
pub const MAX_CLIPS: usize = 4;

#[derive(Default)]
struct ClipVoice {
    clip: Option<Clip>,
    start_at: f64,
    position: f64,
    age: u64,
}

/// Plays recorded takes at their own sample rate, resampled linearly.
pub struct ClipPlayer {
    voices: Vec<ClipVoice>,
    plays: u64,
}

impl Default for ClipPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipPlayer {
    pub fn new() -> Self {
        Self {
            voices: (0..MAX_CLIPS).map(|_| ClipVoice::default()).collect(),
            plays: 0,
        }
    }

    pub fn play(&mut self, clip: Clip, at: f64) {
        let age = self.plays;
        self.plays += 1;

        let idx = self
            .voices
            .iter()
            .position(|v| v.clip.is_none())
            .or_else(|| {
                self.voices
                    .iter()
                    .enumerate()
                    .min_by_key(|(_, v)| v.age)
                    .map(|(idx, _)| idx)
            });

        if let Some(voice) = idx.and_then(|idx| self.voices.get_mut(idx)) {
            voice.clip = Some(clip);
            voice.start_at = at;
            voice.position = 0.0;
            voice.age = age;
        }
    }

    /// Silence every voice playing `clip`'s samples.
    pub fn stop(&mut self, clip: &Clip) {
        for voice in &mut self.voices {
            if voice.clip.as_ref().is_some_and(|c| c.shares_samples(clip)) {
                voice.clip = None;
            }
        }
    }

    pub fn stop_all(&mut self) {
        for voice in &mut self.voices {
            voice.clip = None;
        }
    }

    pub fn active_count(&self) -> usize {
        self.voices.iter().filter(|v| v.clip.is_some()).count()
    }

    /// Add every playing take into `out`.
    pub fn render(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        for voice in &mut self.voices {
            let Some(clip) = voice.clip.as_ref() else {
                continue;
            };

            let samples = clip.samples();
            let step = clip.sample_rate() as f64 / ctx.sample_rate as f64;
            let start = ctx.index_of(voice.start_at, out.len());
            let mut finished = false;

            for sample in out[start..].iter_mut() {
                let index = voice.position as usize;
                if index + 1 >= samples.len() {
                    finished = true;
                    break;
                }
                let frac = (voice.position - index as f64) as f32;
                *sample += samples[index] + (samples[index + 1] - samples[index]) * frac;
                voice.position += step;
            }

            if finished {
                voice.clip = None;
            }
        }
    }
}
