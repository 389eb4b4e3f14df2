/*
MusicMaker
==========

The application context. Owns every piece of control state and is the only
thing the presentation layer talks to:

                     ┌────────────── MusicMaker ───────────────┐
  key / UI input ──▶ │ NoteLifecycle   Sequencer   Recorder    │ ──▶ AudioGraph
                     │ SynthSettings   EffectParameters        │      (commands)
                     └──────────────────┬──────────────────────┘
                                        ▼
                                  StateEvent queue ──▶ UI redraw

It is single-threaded: the host loop calls the operations and `tick`, then
drains events. Audio is optional. Without a graph the keyboard and drums do
nothing (and say so in the log) while the grid, parameters and recorder keep
working.
*/

use std::{collections::VecDeque, path::PathBuf};

use tracing::{debug, info, warn};

use crate::{
    config::{Settings, SynthSettings, MAX_TEMPO, MIN_TEMPO},
    dsp::{ParamOp, Waveform},
    effects::EffectParameters,
    engine::AudioGraph,
    error::Result,
    io::{microphone::Microphone, recorder::RecordedTrack, Clip, Recorder},
    sequencing::{PatternGrid, Sequencer, SequencerState},
    synth::{
        lifecycle::{ActiveNote, NoteLifecycle},
        message::{GraphCommand, ParamTarget},
    },
    voices::DrumKind,
};

pub const MICROPHONE_NOTICE: &str = "Failed to access microphone. Please check permissions.";

pub const MIN_CUTOFF_HZ: f32 = 20.0;
pub const MAX_CUTOFF_HZ: f32 = 20_000.0;

/// Something the presentation layer may want to redraw.
#[derive(Debug, Clone, PartialEq)]
pub enum StateEvent {
    NoteOn { note: &'static str },
    NoteOff { note: &'static str },
    PlaybackChanged { playing: bool },
    StepScheduled { step: usize, at: f64 },
    CellToggled { kind: DrumKind, step: usize, active: bool },
    TempoChanged { tempo: u32 },
    SynthChanged,
    EffectsChanged,
    RecordingChanged { recording: bool },
    TrackAdded { id: u32, name: String },
    TrackDeleted { id: u32 },
    TrackExported { id: u32, path: PathBuf },
    Notice(String),
}

/// A take handed to the renderer, kept alive here until the audio clock
/// passes `until`. The last reference to its samples is dropped on the
/// control side, never in the audio callback.
struct PlayingClip {
    clip: Clip,
    until: f64,
}

pub struct MusicMaker<G: AudioGraph> {
    graph: Option<G>,
    settings: Settings,
    notes: NoteLifecycle,
    sequencer: Sequencer,
    effects: EffectParameters,
    recorder: Recorder,
    playing_clips: Vec<PlayingClip>,
    events: VecDeque<StateEvent>,
}

impl<G: AudioGraph> MusicMaker<G> {
    pub fn new(graph: Option<G>, settings: Settings, mic: Box<dyn Microphone>) -> Self {
        let settings = settings.clamped();
        if graph.is_none() {
            warn!("no audio output; keyboard and drums are disabled");
        }
        Self {
            graph,
            sequencer: Sequencer::new(settings.sequencer.tempo),
            effects: EffectParameters::from(&settings.effects),
            recorder: Recorder::new(mic, settings.recorder.export_dir.clone()),
            notes: NoteLifecycle::new(),
            playing_clips: Vec::new(),
            events: VecDeque::new(),
            settings,
        }
    }

    pub fn has_audio(&self) -> bool {
        self.graph.is_some()
    }

    pub fn graph(&self) -> Option<&G> {
        self.graph.as_ref()
    }

    pub fn graph_mut(&mut self) -> Option<&mut G> {
        self.graph.as_mut()
    }

    /// Audio clock time, or zero without audio.
    pub fn now(&self) -> f64 {
        self.graph.as_ref().map_or(0.0, |g| g.current_time())
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn synth(&self) -> &SynthSettings {
        &self.settings.synth
    }

    pub fn effects(&self) -> &EffectParameters {
        &self.effects
    }

    /// Pending notifications, oldest first.
    pub fn drain_events(&mut self) -> impl Iterator<Item = StateEvent> + '_ {
        self.events.drain(..)
    }

    fn emit(&mut self, event: StateEvent) {
        self.events.push_back(event);
    }

    fn submit(&mut self, command: GraphCommand) -> bool {
        match self.graph.as_mut() {
            Some(graph) => {
                let sent = graph.submit(command);
                if !sent {
                    warn!("command queue full, command dropped");
                }
                sent
            }
            None => false,
        }
    }

    // Keyboard

    pub fn play_note(&mut self, note: &str) -> bool {
        let Some(graph) = self.graph.as_mut() else {
            debug!(note, "no audio output, note ignored");
            return false;
        };
        if !self.notes.play(note, &self.settings.synth, graph) {
            return false;
        }
        if let Some(active) = self.notes.get(note) {
            let note = active.note;
            self.emit(StateEvent::NoteOn { note });
        }
        true
    }

    pub fn stop_note(&mut self, note: &str) -> bool {
        let Some(graph) = self.graph.as_mut() else {
            return false;
        };
        let name = self.notes.get(note).map(|a| a.note);
        if !self.notes.stop(note, &self.settings.synth, graph) {
            return false;
        }
        if let Some(note) = name {
            self.emit(StateEvent::NoteOff { note });
        }
        true
    }

    /// Release every held note and silence recorded takes.
    pub fn stop_all(&mut self) {
        let released: Vec<_> = self.notes.active_notes().map(|a| a.note).collect();
        if let Some(graph) = self.graph.as_mut() {
            self.notes.stop_all(&self.settings.synth, graph);
        }
        for note in released {
            self.emit(StateEvent::NoteOff { note });
        }
        if self.submit(GraphCommand::StopClips) {
            let now = self.now();
            for playing in &mut self.playing_clips {
                playing.until = playing.until.min(now);
            }
        }
    }

    pub fn is_note_active(&self, note: &str) -> bool {
        self.notes.is_active(note)
    }

    pub fn active_notes(&self) -> impl Iterator<Item = &ActiveNote> {
        self.notes.active_notes()
    }

    pub fn set_waveform(&mut self, waveform: Waveform) {
        self.settings.synth.waveform = waveform;
        debug!(%waveform, "waveform set");
        self.emit(StateEvent::SynthChanged);
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.settings.synth.volume = volume.clamp(0.0, 1.0);
        self.emit(StateEvent::SynthChanged);
    }

    pub fn set_attack(&mut self, seconds: f32) {
        self.settings.synth.attack = seconds.max(0.0);
        self.emit(StateEvent::SynthChanged);
    }

    pub fn set_release(&mut self, seconds: f32) {
        self.settings.synth.release = seconds.max(0.0);
        self.emit(StateEvent::SynthChanged);
    }

    // Drums and sequencer

    /// Fire one drum now. Unknown names are ignored.
    pub fn play_drum(&mut self, name: &str) -> bool {
        match name.parse::<DrumKind>() {
            Ok(kind) => self.trigger_drum(kind),
            Err(err) => {
                debug!(%err, "ignoring drum");
                false
            }
        }
    }

    pub fn trigger_drum(&mut self, kind: DrumKind) -> bool {
        let at = self.now();
        self.submit(GraphCommand::TriggerDrum { kind, at })
    }

    pub fn toggle_step(&mut self, kind: DrumKind, step: usize) -> Option<bool> {
        let active = self.sequencer.toggle_cell(kind, step)?;
        self.emit(StateEvent::CellToggled { kind, step, active });
        Some(active)
    }

    pub fn grid(&self) -> &PatternGrid {
        self.sequencer.grid()
    }

    pub fn sequencer_state(&self) -> SequencerState {
        self.sequencer.state()
    }

    pub fn start_playback(&mut self) -> bool {
        let now = self.now();
        if !self.sequencer.start(now) {
            return false;
        }
        info!(tempo = self.sequencer.tempo(), "playback started");
        self.emit(StateEvent::PlaybackChanged { playing: true });
        true
    }

    pub fn stop_playback(&mut self) -> bool {
        if !self.sequencer.stop() {
            return false;
        }
        info!("playback stopped");
        self.emit(StateEvent::PlaybackChanged { playing: false });
        true
    }

    /// Returns the new playing state.
    pub fn toggle_playback(&mut self) -> bool {
        if self.sequencer.is_playing() {
            self.stop_playback();
        } else {
            self.start_playback();
        }
        self.sequencer.is_playing()
    }

    /// Clamped to the UI range; heard from the next start.
    pub fn set_tempo(&mut self, tempo: u32) {
        let tempo = tempo.clamp(MIN_TEMPO, MAX_TEMPO);
        if tempo == self.sequencer.tempo() {
            return;
        }
        self.sequencer.set_tempo(tempo);
        self.settings.sequencer.tempo = tempo;
        self.emit(StateEvent::TempoChanged { tempo });
    }

    /// Schedule every step due within the look-ahead window. Call often.
    pub fn tick(&mut self) {
        self.release_finished_clips();
        if !self.sequencer.is_playing() {
            return;
        }
        let now = self.now();
        let lookahead = self.settings.sequencer.lookahead_ms as f64 / 1_000.0;

        for tick in self.sequencer.poll(now, lookahead) {
            for &kind in &tick.hits {
                self.submit(GraphCommand::TriggerDrum { kind, at: tick.at });
            }
            self.emit(StateEvent::StepScheduled {
                step: tick.step,
                at: tick.at,
            });
        }
    }

    /// Step being heard right now, if playing.
    pub fn playhead(&self) -> Option<usize> {
        self.sequencer.playhead(self.now())
    }

    // Effects

    pub fn set_filter_cutoff(&mut self, hz: f32) {
        let hz = hz.clamp(MIN_CUTOFF_HZ, MAX_CUTOFF_HZ);
        self.effects.cutoff_hz = hz;
        let time = self.now();
        self.submit(GraphCommand::Automate {
            target: ParamTarget::FilterCutoff,
            op: ParamOp::SetValueAtTime { value: hz, time },
        });
        self.emit(StateEvent::EffectsChanged);
    }

    pub fn set_drive(&mut self, amount: f32) {
        let amount = amount.max(0.0);
        self.effects.drive = amount;
        self.submit(GraphCommand::SetDrive { amount });
        self.emit(StateEvent::EffectsChanged);
    }

    /// Stored and reported only; there is no reverb stage to feed.
    pub fn set_reverb_wet(&mut self, wet: f32) {
        self.effects.reverb_wet = wet.clamp(0.0, 1.0);
        self.emit(StateEvent::EffectsChanged);
    }

    /// Stored and reported only; there is no delay stage to feed.
    pub fn set_delay_wet(&mut self, wet: f32) {
        self.effects.delay_wet = wet.clamp(0.0, 1.0);
        self.emit(StateEvent::EffectsChanged);
    }

    // Recording

    pub fn is_recording(&self) -> bool {
        self.recorder.is_recording()
    }

    pub fn start_recording(&mut self) -> bool {
        if self.recorder.is_recording() {
            return false;
        }
        match self.recorder.start() {
            Ok(()) => {
                self.emit(StateEvent::RecordingChanged { recording: true });
                true
            }
            Err(err) => {
                warn!(%err, "could not start recording");
                self.emit(StateEvent::Notice(MICROPHONE_NOTICE.to_string()));
                false
            }
        }
    }

    /// Finish the take. Returns the new track id.
    pub fn stop_recording(&mut self) -> Result<Option<u32>> {
        if !self.recorder.is_recording() {
            return Ok(None);
        }
        let saved = self.recorder.stop();
        self.emit(StateEvent::RecordingChanged { recording: false });

        let id = saved?;
        if let Some(track) = id.and_then(|id| self.recorder.get(id)) {
            let event = StateEvent::TrackAdded {
                id: track.id(),
                name: track.name().to_string(),
            };
            self.emit(event);
        }
        Ok(id)
    }

    pub fn toggle_recording(&mut self) -> Result<bool> {
        if self.recorder.is_recording() {
            self.stop_recording()?;
        } else {
            self.start_recording();
        }
        Ok(self.recorder.is_recording())
    }

    pub fn recordings(&self) -> &[RecordedTrack] {
        self.recorder.tracks()
    }

    pub fn recording(&self, id: u32) -> Option<&RecordedTrack> {
        self.recorder.get(id)
    }

    /// Play a take at its recorded level. False for unknown ids.
    pub fn play_recording(&mut self, id: u32) -> bool {
        let Some(clip) = self.recorder.get(id).map(|t| t.clip().clone()) else {
            return false;
        };
        self.release_finished_clips();
        let at = self.now();
        let until = at + clip.duration();
        if !self.submit(GraphCommand::PlayClip {
            clip: clip.clone(),
            at,
        }) {
            return false;
        }
        self.playing_clips.push(PlayingClip { clip, until });
        true
    }

    /// Forget a take. A take that is still sounding is stopped first.
    pub fn delete_recording(&mut self, id: u32) -> bool {
        let Some(clip) = self.recorder.get(id).map(|t| t.clip().clone()) else {
            return false;
        };
        if self
            .playing_clips
            .iter()
            .any(|p| p.clip.shares_samples(&clip))
            && self.submit(GraphCommand::StopClip { clip: clip.clone() })
        {
            let now = self.now();
            for playing in &mut self.playing_clips {
                if playing.clip.shares_samples(&clip) {
                    playing.until = playing.until.min(now);
                }
            }
        }

        self.recorder.delete(id);
        self.release_finished_clips();
        self.emit(StateEvent::TrackDeleted { id });
        true
    }

    /// Drop takes the renderer can no longer be holding.
    fn release_finished_clips(&mut self) {
        let now = self.now();
        self.playing_clips.retain(|p| p.until >= now);
    }

    pub fn export_recording(&mut self, id: u32) -> Result<Option<PathBuf>> {
        let path = self.recorder.export(id)?;
        if let Some(path) = &path {
            self.emit(StateEvent::TrackExported {
                id,
                path: path.clone(),
            });
        }
        Ok(path)
    }
}
