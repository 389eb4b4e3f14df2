/*
Recorder
========

Thin wrapper around a `Microphone`. Starting opens the device; stopping
closes it, wraps the capture in a WAV container and files it as a
`RecordedTrack` named after the wall-clock time it was stopped:

    "Recording 14:03:27"  ──export──▶  <export_dir>/Recording 14-03-27.wav

Takes live in memory until deleted. A failed start leaves the recorder
exactly as it was.
*/

use std::{
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

use tracing::{debug, info};

use crate::{
    error::{MicrophoneError, Result},
    io::{microphone::Microphone, wav, Clip},
};

pub struct RecordedTrack {
    id: u32,
    name: String,
    wav: Vec<u8>,
    clip: Clip,
}

impl RecordedTrack {
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The take as a complete WAV file.
    pub fn wav_bytes(&self) -> &[u8] {
        &self.wav
    }

    pub fn clip(&self) -> &Clip {
        &self.clip
    }

    pub fn duration(&self) -> f64 {
        self.clip.duration()
    }

    /// Export file name: the display name with `:` made filesystem-safe.
    pub fn file_name(&self) -> String {
        format!("{}.wav", self.name.replace(':', "-"))
    }
}

/// `HH:MM:SS` for a point in time, in UTC. Take names do not follow the
/// host timezone.
pub fn timestamp_label(time: SystemTime) -> String {
    let secs = time
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let of_day = secs % 86_400;
    format!(
        "{:02}:{:02}:{:02}",
        of_day / 3_600,
        (of_day % 3_600) / 60,
        of_day % 60
    )
}

pub struct Recorder {
    mic: Box<dyn Microphone>,
    recording: bool,
    tracks: Vec<RecordedTrack>,
    next_id: u32,
    export_dir: PathBuf,
}

impl Recorder {
    pub fn new(mic: Box<dyn Microphone>, export_dir: impl Into<PathBuf>) -> Self {
        Self {
            mic,
            recording: false,
            tracks: Vec::new(),
            next_id: 1,
            export_dir: export_dir.into(),
        }
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// Open the microphone. Starting twice is a no-op.
    pub fn start(&mut self) -> std::result::Result<(), MicrophoneError> {
        if self.recording {
            return Ok(());
        }
        self.mic.open()?;
        self.recording = true;
        info!("recording started");
        Ok(())
    }

    /// Finish the take. Returns the new track's id, or `None` when nothing
    /// was being recorded.
    pub fn stop(&mut self) -> Result<Option<u32>> {
        self.stop_at(SystemTime::now())
    }

    pub fn stop_at(&mut self, now: SystemTime) -> Result<Option<u32>> {
        if !self.recording {
            return Ok(None);
        }
        self.recording = false;

        let Some(capture) = self.mic.close() else {
            return Ok(None);
        };

        let wav = wav::encode(&capture.samples, capture.sample_rate)?;
        let id = self.next_id;
        self.next_id += 1;

        let track = RecordedTrack {
            id,
            name: format!("Recording {}", timestamp_label(now)),
            wav,
            clip: Clip::new(capture.samples, capture.sample_rate),
        };
        info!(id, name = %track.name, seconds = track.duration(), "recording saved");
        self.tracks.push(track);
        Ok(Some(id))
    }

    pub fn tracks(&self) -> &[RecordedTrack] {
        &self.tracks
    }

    pub fn get(&self, id: u32) -> Option<&RecordedTrack> {
        self.tracks.iter().find(|t| t.id == id)
    }

    /// Drop a take and its audio. Returns false for unknown ids.
    pub fn delete(&mut self, id: u32) -> bool {
        let Some(index) = self.tracks.iter().position(|t| t.id == id) else {
            return false;
        };
        let track = self.tracks.remove(index);
        debug!(id, name = %track.name, "recording deleted");
        true
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    /// Write a take to the export directory. `None` for unknown ids.
    pub fn export(&self, id: u32) -> Result<Option<PathBuf>> {
        let Some(track) = self.get(id) else {
            return Ok(None);
        };
        std::fs::create_dir_all(&self.export_dir)?;
        let path = self.export_dir.join(track.file_name());
        std::fs::write(&path, track.wav_bytes())?;
        info!(path = %path.display(), "recording exported");
        Ok(Some(path))
    }
}
