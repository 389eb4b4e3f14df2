use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    dsp::{
        mix::sum_in_place,
        noise::{NoiseBuffer, NoiseReader},
        Waveform,
    },
    graph::{filter::FilterNode, gain::GainNode, oscillator::OscNode, GraphNode, RenderCtx},
    MAX_BLOCK_SIZE,
};

use super::recipe::{DrumKind, DrumRecipe, DrumSource, DECAY_FLOOR};

pub const MAX_DRUMS: usize = 32;

/// One pooled drum hit. Every part of the chain is preallocated; a trigger
/// only rewrites parameters.
pub struct DrumVoice {
    kind: Option<DrumKind>,
    source: DrumSource,
    age: u64,
    start_at: f64,
    stop_at: f64,
    osc: OscNode,
    noise: Option<NoiseReader>,
    filter: FilterNode,
    filtered: bool,
    envelope: GainNode,
}

impl Default for DrumVoice {
    fn default() -> Self {
        Self::new()
    }
}

impl DrumVoice {
    pub fn new() -> Self {
        Self {
            kind: None,
            source: DrumSource::Noise,
            age: 0,
            start_at: 0.0,
            stop_at: 0.0,
            osc: OscNode::sine(60.0),
            noise: None,
            filter: FilterNode::lowpass(1_000.0),
            filtered: false,
            envelope: GainNode::new(0.0),
        }
    }

    pub fn trigger(
        &mut self,
        kind: DrumKind,
        recipe: &DrumRecipe,
        at: f64,
        noise: Option<NoiseReader>,
        age: u64,
    ) {
        let end = at + recipe.decay as f64;

        self.kind = Some(kind);
        self.source = recipe.source;
        self.age = age;
        self.start_at = at;
        self.stop_at = end;
        self.noise = None;

        match recipe.source {
            DrumSource::Sweep { from_hz, to_hz } => {
                self.osc.restart(Waveform::Sine, from_hz);
                let freq = self.osc.frequency();
                freq.set_value_at_time(from_hz, at);
                freq.exponential_ramp_to_value_at_time(to_hz, end);
            }
            DrumSource::Noise => self.noise = noise,
        }

        self.filtered = recipe.filter.is_some();
        if let Some((kind, cutoff)) = recipe.filter {
            self.filter.configure(kind, cutoff);
        }

        let gain = self.envelope.gain();
        gain.reset(recipe.peak);
        gain.set_value_at_time(recipe.peak, at);
        gain.exponential_ramp_to_value_at_time(DECAY_FLOOR, end);
    }

    pub fn render(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        out.fill(0.0);
        if !self.is_active() {
            return;
        }

        let len = out.len();
        let start = ctx.index_of(self.start_at, len);
        let end = ctx.index_of(self.stop_at, len);

        if start < end {
            let sub_ctx = RenderCtx::new(ctx.sample_rate, ctx.sample_time(start));
            let span = &mut out[start..end];

            match self.source {
                DrumSource::Sweep { .. } => self.osc.render_block(span, &sub_ctx),
                DrumSource::Noise => {
                    if let Some(reader) = self.noise.as_mut() {
                        for sample in span.iter_mut() {
                            *sample = reader.next_sample();
                        }
                    }
                }
            }
            if self.filtered {
                self.filter.render_block(span, &sub_ctx);
            }
            self.envelope.render_block(span, &sub_ctx);
        }

        if end < len {
            self.kind = None;
            self.noise = None;
        }
    }

    pub fn kind(&self) -> Option<DrumKind> {
        self.kind
    }

    pub fn is_active(&self) -> bool {
        self.kind.is_some()
    }

    pub fn age(&self) -> u64 {
        self.age
    }
}

/// Render-side pool of drum hits sharing one noise buffer.
///
/// Hits are fire-and-forget: a voice frees itself at its stop time. When
/// every voice is busy the oldest hit is cut off.
pub struct DrumBank {
    voices: Vec<DrumVoice>,
    noise: NoiseBuffer,
    rng: StdRng,
    temp_buffer: Vec<f32>,
    triggers: u64,
}

impl DrumBank {
    pub fn new(sample_rate: f32) -> Self {
        Self::with_rng(sample_rate, StdRng::from_entropy())
    }

    /// Deterministic noise and offsets, for tests and benchmarks.
    pub fn with_seed(sample_rate: f32, seed: u64) -> Self {
        Self::with_rng(sample_rate, StdRng::seed_from_u64(seed))
    }

    fn with_rng(sample_rate: f32, mut rng: StdRng) -> Self {
        let noise = NoiseBuffer::with_rng(sample_rate, &mut rng);
        Self {
            voices: (0..MAX_DRUMS).map(|_| DrumVoice::new()).collect(),
            noise,
            rng,
            temp_buffer: vec![0.0; MAX_BLOCK_SIZE],
            triggers: 0,
        }
    }

    pub fn trigger(&mut self, kind: DrumKind, at: f64) {
        let recipe = kind.recipe();
        let noise = match recipe.source {
            DrumSource::Noise => {
                let offset = self.rng.gen_range(0..self.noise.len());
                Some(self.noise.reader(offset))
            }
            DrumSource::Sweep { .. } => None,
        };

        let age = self.triggers;
        self.triggers += 1;

        let idx = self
            .voices
            .iter()
            .position(|v| !v.is_active())
            .or_else(|| {
                self.voices
                    .iter()
                    .enumerate()
                    .min_by_key(|(_, v)| v.age())
                    .map(|(idx, _)| idx)
            });

        if let Some(idx) = idx {
            self.voices[idx].trigger(kind, &recipe, at, noise, age);
        }
    }

    /// Sum every sounding hit into `out` (overwrites).
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
}
