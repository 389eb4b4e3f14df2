/*
Renderer
========

Runs inside the audio callback. Per block:

  1. drain the command queue
  2. tone voices ──▶ effects chain            (keyboard bus)
  3. drum voices                              (drum bus)
  4. keyboard + drums ──▶ master gain ──▶ compressor
  5. recorded takes added after the master    (clip bus, unity gain)
  6. publish the new frame count as the clock

Nothing here allocates or locks. Pools and scratch buffers are sized up
front; a burst bigger than the pools steals voices instead of growing.
*/

use rtrb::{Consumer, Producer};

use crate::{
    config::Settings,
    dsp::mix::sum_in_place,
    effects::{EffectParameters, EffectsChain, MasterStage},
    engine::{clips::ClipPlayer, AudioClock},
    graph::{GraphNode, RenderCtx},
    synth::{
        message::{GraphCommand, ParamTarget},
        poly::ToneBank,
    },
    voices::DrumBank,
    MAX_BLOCK_SIZE,
};

pub struct Renderer {
    sample_rate: f32,
    commands: Consumer<GraphCommand>,
    clock: AudioClock,
    frames: u64,

    tones: ToneBank,
    drums: DrumBank,
    clips: ClipPlayer,
    effects: EffectsChain,
    master: MasterStage,

    drum_bus: Vec<f32>,
    scope: Option<Producer<f32>>,
}

impl Renderer {
    pub fn new(
        sample_rate: f32,
        settings: &Settings,
        commands: Consumer<GraphCommand>,
        clock: AudioClock,
    ) -> Self {
        Self {
            sample_rate,
            commands,
            clock,
            frames: 0,
            tones: ToneBank::default(),
            drums: DrumBank::new(sample_rate),
            clips: ClipPlayer::new(),
            effects: EffectsChain::new(&EffectParameters::from(&settings.effects)),
            master: MasterStage::new(&settings.master),
            drum_bus: vec![0.0; MAX_BLOCK_SIZE],
            scope: None,
        }
    }

    /// Fixed noise and hit offsets.
    pub fn with_drum_seed(mut self, seed: u64) -> Self {
        self.drums = DrumBank::with_seed(self.sample_rate, seed);
        self
    }

    /// Copy every output sample into `scope` while it has room.
    pub fn with_scope(mut self, scope: Producer<f32>) -> Self {
        self.scope = Some(scope);
        self
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn time(&self) -> f64 {
        self.frames as f64 / self.sample_rate as f64
    }

    pub fn active_tones(&self) -> usize {
        self.tones.active_count()
    }

    pub fn active_drums(&self) -> usize {
        self.drums.active_count()
    }

    pub fn active_clips(&self) -> usize {
        self.clips.active_count()
    }

    /// Render mono output of any length.
    pub fn render(&mut self, out: &mut [f32]) {
        for block in out.chunks_mut(MAX_BLOCK_SIZE) {
            self.process_block(block);
        }
    }

    /// Render into an interleaved buffer, duplicating mono to every channel.
    pub fn render_interleaved(&mut self, data: &mut [f32], channels: usize, scratch: &mut [f32]) {
        let channels = channels.max(1);
        let total_frames = data.len() / channels;
        let mut frames_written = 0;

        while frames_written < total_frames {
            let frames = (total_frames - frames_written)
                .min(MAX_BLOCK_SIZE)
                .min(scratch.len());
            if frames == 0 {
                break;
            }
            let block = &mut scratch[..frames];
            self.process_block(block);

            let out_off = frames_written * channels;
            for (i, &s) in block.iter().enumerate() {
                let frame = out_off + i * channels;
                data[frame..frame + channels].fill(s);
            }
            frames_written += frames;
        }
    }

    fn process_block(&mut self, out: &mut [f32]) {
        while let Ok(command) = self.commands.pop() {
            self.apply(command);
        }

        let len = out.len();
        let ctx = RenderCtx::new(self.sample_rate, self.time());

        self.tones.render(out, &ctx);
        self.effects.render_block(out, &ctx);

        let drum_bus = &mut self.drum_bus[..len];
        self.drums.render(drum_bus, &ctx);
        sum_in_place(out, drum_bus);

        self.master.render_block(out, &ctx);
        self.clips.render(out, &ctx);

        if let Some(scope) = self.scope.as_mut() {
            for &sample in out.iter() {
                if scope.push(sample).is_err() {
                    break;
                }
            }
        }

        self.frames += len as u64;
        self.clock.publish(self.frames);
    }

    pub(crate) fn apply(&mut self, command: GraphCommand) {
        match command {
            GraphCommand::StartTone {
                voice,
                waveform,
                frequency,
                at,
            } => {
                self.tones.start(voice, waveform, frequency, at);
            }
            GraphCommand::StopTone { voice, at } => self.tones.stop(voice, at),
            GraphCommand::Automate { target, op } => match target {
                ParamTarget::ToneGain(voice) => self.tones.automate(voice, op),
                ParamTarget::FilterCutoff => self.effects.filter().cutoff().apply(op),
            },
            GraphCommand::TriggerDrum { kind, at } => self.drums.trigger(kind, at),
            GraphCommand::SetDrive { amount } => self.effects.set_drive(amount),
            GraphCommand::PlayClip { clip, at } => self.clips.play(clip, at),
            GraphCommand::StopClip { clip } => self.clips.stop(&clip),
            GraphCommand::StopClips => self.clips.stop_all(),
        }
    }
}
