/*
Note Lifecycle
==============

Control-side bookkeeping for keyboard notes. The map answers one question:
"can this note be started again?". It does not say whether the note is
still audible.

  play("A4")                      stop("A4")
      │                               │
      ▼                               ▼
  StartTone ──▶ gain 0 ──ramp──▶ volume ~ ~ hold ──ramp──▶ 0 ──▶ StopTone
      now          now      now + attack        now      now + release

- A note already in the map ignores further plays.
- Stopping removes the entry straight away, while the tone fades out on the
  render side. Playing the same note during that fade starts a second,
  independent tone.
- The release first cancels whatever is still scheduled and pins the level
  the voice is actually at, so letting go mid-attack fades from there
  instead of jumping.
*/

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::{
    config::SynthSettings,
    dsp::ParamOp,
    engine::AudioGraph,
    synth::{
        message::{GraphCommand, ParamTarget, VoiceId},
        notes::NoteFrequencyTable,
    },
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveNote {
    pub note: &'static str,
    pub generator: VoiceId,
    pub envelope: ParamTarget,
    pub started_at: f64,
}

#[derive(Debug, Default)]
pub struct NoteLifecycle {
    table: NoteFrequencyTable,
    active: HashMap<&'static str, ActiveNote>,
    next_voice: u32,
}

impl NoteLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start `note`. Returns true when a new note was registered.
    pub fn play<G: AudioGraph>(&mut self, note: &str, synth: &SynthSettings, graph: &mut G) -> bool {
        let Some((name, frequency)) = self.table.lookup(note) else {
            debug!(note, "ignoring unknown note");
            return false;
        };
        if self.active.contains_key(name) {
            return false;
        }

        let now = graph.current_time();
        let voice = self.allocate_id();
        let envelope = ParamTarget::ToneGain(voice);

        if !graph.submit(GraphCommand::StartTone {
            voice,
            waveform: synth.waveform,
            frequency,
            at: now,
        }) {
            warn!(note = name, "command queue full, note dropped");
            return false;
        }

        let attack = [
            ParamOp::SetValueAtTime { value: 0.0, time: now },
            ParamOp::LinearRampToValueAtTime {
                value: synth.volume,
                time: now + synth.attack as f64,
            },
        ];
        for op in attack {
            if !graph.submit(GraphCommand::Automate { target: envelope, op }) {
                warn!(note = name, "command queue full, attack incomplete");
            }
        }

        debug!(note = name, frequency, voice = voice.0, "note on");
        self.active.insert(
            name,
            ActiveNote {
                note: name,
                generator: voice,
                envelope,
                started_at: now,
            },
        );
        true
    }

    /// Release `note`. Returns true when the note was active.
    pub fn stop<G: AudioGraph>(&mut self, note: &str, synth: &SynthSettings, graph: &mut G) -> bool {
        let Some(active) = self.active.remove(note) else {
            return false;
        };
        Self::release(&active, synth.release, graph);
        debug!(note = active.note, voice = active.generator.0, "note off");
        true
    }

    /// Release everything that is held.
    pub fn stop_all<G: AudioGraph>(&mut self, synth: &SynthSettings, graph: &mut G) {
        for (_, active) in self.active.drain() {
            Self::release(&active, synth.release, graph);
        }
    }

    fn release<G: AudioGraph>(active: &ActiveNote, release: f32, graph: &mut G) {
        let now = graph.current_time();
        let end = now + release as f64;
        let commands = [
            GraphCommand::Automate {
                target: active.envelope,
                op: ParamOp::CancelScheduledValues { time: now },
            },
            GraphCommand::Automate {
                target: active.envelope,
                op: ParamOp::HoldValueAtTime { time: now },
            },
            GraphCommand::Automate {
                target: active.envelope,
                op: ParamOp::LinearRampToValueAtTime { value: 0.0, time: end },
            },
            GraphCommand::StopTone {
                voice: active.generator,
                at: end,
            },
        ];
        for command in commands {
            if !graph.submit(command) {
                warn!(note = active.note, "command queue full, release incomplete");
            }
        }
    }

    pub fn is_active(&self, note: &str) -> bool {
        self.active.contains_key(note)
    }

    pub fn get(&self, note: &str) -> Option<&ActiveNote> {
        self.active.get(note)
    }

    pub fn active_notes(&self) -> impl Iterator<Item = &ActiveNote> {
        self.active.values()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    fn allocate_id(&mut self) -> VoiceId {
        self.next_voice = self.next_voice.wrapping_add(1);
        VoiceId(self.next_voice)
    }
}
