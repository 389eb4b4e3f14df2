//! Terminal UI for musicmaker
//!
//! One screen: transport, drum grid, piano strip, parameters, recordings,
//! scope and a status line. Drawing reads straight from the app context;
//! the `StateEvent` queue only feeds the status line.

mod grid;
mod keyboard;
mod panels;
mod transport;
mod waveform;

use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::Line,
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::Consumer;
use tracing::{info, warn};

use musicmaker::{
    dsp::Waveform, engine::GraphHandle, sequencing::STEPS, voices::DrumKind, MusicMaker,
    StateEvent,
};

use crate::keymap::note_for_key;

use grid::render_grid;
use keyboard::render_keyboard;
use panels::{render_params, render_recordings};
use transport::render_transport;
use waveform::render_waveform;

pub type App = MusicMaker<GraphHandle>;

/// Audio visualization buffer size
const VIS_BUFFER_SIZE: usize = 1024;

const TEMPO_STEP: u32 = 5;
const VOLUME_STEP: f32 = 0.05;
const CUTOFF_FACTOR: f32 = 1.25;
const DRIVE_STEP: f32 = 5.0;
/// Seconds per attack/release key press.
const ENVELOPE_STEP: f32 = 0.05;
const WET_STEP: f32 = 0.1;

/// Grid cursor: row is the drum track, column the step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub row: usize,
    pub col: usize,
}

/// UI application state
pub struct UiApp {
    app: App,
    /// Output samples from the render thread
    audio_rx: Option<Consumer<f32>>,
    audio_buffer: Vec<f32>,
    cursor: Cursor,
    /// Whether the terminal reports key releases
    release_events: bool,
    /// Without release events, a note stops this long after its last press
    hold: Duration,
    held: HashMap<&'static str, Instant>,
    status: String,
    should_quit: bool,
}

impl UiApp {
    pub fn new(
        app: App,
        audio_rx: Option<Consumer<f32>>,
        release_events: bool,
        hold: Duration,
    ) -> Self {
        let status = if app.has_audio() {
            "Ready".to_string()
        } else {
            "No audio output: keyboard and drums are silent".to_string()
        };
        Self {
            app,
            audio_rx,
            audio_buffer: vec![0.0; VIS_BUFFER_SIZE],
            cursor: Cursor::default(),
            release_events,
            hold,
            held: HashMap::new(),
            status,
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.app.tick();
            self.poll_audio();
            self.release_expired();
            self.poll_events();

            terminal.draw(|frame| self.render(frame))?;

            // ~60fps
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key);
                }
            }
        }

        self.app.stop_all();
        if self.app.is_recording() {
            if let Err(err) = self.app.stop_recording() {
                warn!(%err, "recording lost on exit");
            }
        }
        Ok(())
    }

    /// Keep the most recent VIS_BUFFER_SIZE samples.
    fn poll_audio(&mut self) {
        let Some(rx) = self.audio_rx.as_mut() else {
            return;
        };
        while let Ok(sample) = rx.pop() {
            self.audio_buffer.push(sample);
        }
        if self.audio_buffer.len() > VIS_BUFFER_SIZE {
            let excess = self.audio_buffer.len() - VIS_BUFFER_SIZE;
            self.audio_buffer.drain(0..excess);
        }
    }

    fn poll_events(&mut self) {
        let events: Vec<StateEvent> = self.app.drain_events().collect();
        for event in events {
            match event {
                StateEvent::Notice(message) => self.status = message,
                StateEvent::RecordingChanged { recording: true } => {
                    self.status = "Recording...".to_string()
                }
                StateEvent::TrackAdded { name, .. } => self.status = format!("Saved {name}"),
                StateEvent::TrackDeleted { id } => self.status = format!("Deleted take {id}"),
                StateEvent::TrackExported { path, .. } => {
                    self.status = format!("Exported {}", path.display())
                }
                StateEvent::PlaybackChanged { playing } => {
                    self.status = if playing { "Playing" } else { "Stopped" }.to_string()
                }
                _ => {}
            }
        }
    }

    fn release_expired(&mut self) {
        if self.release_events {
            return;
        }
        let hold = self.hold;
        let now = Instant::now();
        let expired: Vec<_> = self
            .held
            .iter()
            .filter(|(_, pressed)| now.duration_since(**pressed) >= hold)
            .map(|(note, _)| *note)
            .collect();
        for note in expired {
            self.held.remove(note);
            self.app.stop_note(note);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if let KeyCode::Char(c) = key.code {
            if let Some(note) = note_for_key(c) {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    return;
                }
                self.handle_note(note, key.kind);
                return;
            }
        }

        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('q') | KeyCode::Char('c')
                if key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                self.should_quit = true
            }
            KeyCode::Char(' ') => {
                self.app.toggle_playback();
            }
            KeyCode::Up => self.cursor.row = self.cursor.row.saturating_sub(1),
            KeyCode::Down => {
                self.cursor.row = (self.cursor.row + 1).min(DrumKind::ALL.len() - 1)
            }
            KeyCode::Left => self.cursor.col = self.cursor.col.saturating_sub(1),
            KeyCode::Right => self.cursor.col = (self.cursor.col + 1).min(STEPS - 1),
            KeyCode::Enter => {
                let kind = DrumKind::ALL[self.cursor.row];
                self.app.toggle_step(kind, self.cursor.col);
            }
            KeyCode::Char('[') => {
                let tempo = self.app.sequencer_state().tempo;
                self.app.set_tempo(tempo.saturating_sub(TEMPO_STEP));
            }
            KeyCode::Char(']') => {
                let tempo = self.app.sequencer_state().tempo;
                self.app.set_tempo(tempo + TEMPO_STEP);
            }
            KeyCode::Char(c @ '1'..='4') => {
                let index = c as usize - '1' as usize;
                self.app.set_waveform(Waveform::ALL[index]);
            }
            KeyCode::Char('-') => {
                let volume = self.app.synth().volume;
                self.app.set_volume(volume - VOLUME_STEP);
            }
            KeyCode::Char('=') => {
                let volume = self.app.synth().volume;
                self.app.set_volume(volume + VOLUME_STEP);
            }
            KeyCode::Char(',') => {
                let cutoff = self.app.effects().cutoff_hz;
                self.app.set_filter_cutoff(cutoff / CUTOFF_FACTOR);
            }
            KeyCode::Char('.') => {
                let cutoff = self.app.effects().cutoff_hz;
                self.app.set_filter_cutoff(cutoff * CUTOFF_FACTOR);
            }
            KeyCode::Char(';') => {
                let drive = self.app.effects().drive;
                self.app.set_drive(drive - DRIVE_STEP);
            }
            KeyCode::Char('\'') => {
                let drive = self.app.effects().drive;
                self.app.set_drive(drive + DRIVE_STEP);
            }
            KeyCode::Char('z') => {
                let attack = self.app.synth().attack;
                self.app.set_attack(attack - ENVELOPE_STEP);
            }
            KeyCode::Char('c') => {
                let attack = self.app.synth().attack;
                self.app.set_attack(attack + ENVELOPE_STEP);
            }
            KeyCode::Char('b') => {
                let release = self.app.synth().release;
                self.app.set_release(release - ENVELOPE_STEP);
            }
            KeyCode::Char('n') => {
                let release = self.app.synth().release;
                self.app.set_release(release + ENVELOPE_STEP);
            }
            KeyCode::Char('5') => {
                let wet = self.app.effects().reverb_wet;
                self.app.set_reverb_wet(wet - WET_STEP);
            }
            KeyCode::Char('6') => {
                let wet = self.app.effects().reverb_wet;
                self.app.set_reverb_wet(wet + WET_STEP);
            }
            KeyCode::Char('7') => {
                let wet = self.app.effects().delay_wet;
                self.app.set_delay_wet(wet - WET_STEP);
            }
            KeyCode::Char('8') => {
                let wet = self.app.effects().delay_wet;
                self.app.set_delay_wet(wet + WET_STEP);
            }
            KeyCode::Char('r') => {
                if let Err(err) = self.app.toggle_recording() {
                    warn!(%err, "recording failed");
                    self.status = format!("Recording failed: {err}");
                }
            }
            KeyCode::Char('p') => {
                if let Some(id) = self.last_take() {
                    self.app.play_recording(id);
                }
            }
            KeyCode::Char('x') => {
                if let Some(id) = self.last_take() {
                    self.app.delete_recording(id);
                }
            }
            KeyCode::Char('v') => {
                if let Some(id) = self.last_take() {
                    if let Err(err) = self.app.export_recording(id) {
                        warn!(%err, "export failed");
                        self.status = format!("Export failed: {err}");
                    }
                }
            }
            _ => {}
        }
    }

    fn handle_note(&mut self, note: &'static str, kind: KeyEventKind) {
        match (self.release_events, kind) {
            (true, KeyEventKind::Press) => {
                self.app.play_note(note);
            }
            (true, KeyEventKind::Release) => {
                self.app.stop_note(note);
            }
            (true, KeyEventKind::Repeat) => {}
            (false, KeyEventKind::Press | KeyEventKind::Repeat) => {
                // Auto-repeat keeps the note held.
                self.held.insert(note, Instant::now());
                self.app.play_note(note);
            }
            (false, KeyEventKind::Release) => {
                self.held.remove(note);
                self.app.stop_note(note);
            }
        }
    }

    fn last_take(&self) -> Option<u32> {
        let id = self.app.recordings().last().map(|t| t.id());
        if id.is_none() {
            info!("no recordings yet");
        }
        id
    }

    /// Render the UI
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Transport bar
                Constraint::Length(8), // Drum grid
                Constraint::Length(5), // Piano strip
                Constraint::Min(6),    // Parameters + recordings
                Constraint::Length(8), // Waveform
                Constraint::Length(1), // Status line
                Constraint::Length(2), // Help bar
            ])
            .split(area);

        render_transport(frame, rows[0], &self.app, &self.audio_buffer);
        render_grid(frame, rows[1], &self.app, self.cursor);
        render_keyboard(frame, rows[2], &self.app);

        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[3]);
        render_params(frame, middle[0], &self.app);
        render_recordings(frame, middle[1], &self.app);

        render_waveform(frame, rows[4], &self.audio_buffer);

        let status = Paragraph::new(format!(" {}", self.status))
            .style(Style::default().fg(Color::Yellow));
        frame.render_widget(status, rows[5]);

        let help = Paragraph::new(vec![
            Line::from(
                " [Esc] Quit  [Space] Play  [arrows/Enter] Grid  [ [ ] ] Tempo  [1-4] Wave  \
                 [-/=] Vol  [Z/C] Attack  [B/N] Release",
            ),
            Line::from(
                " [,/.] Cutoff  [;/'] Drive  [5/6] Reverb  [7/8] Delay  \
                 [R]ec [P]lay [X] Del [V] Export",
            ),
        ])
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, rows[6]);
    }
}
