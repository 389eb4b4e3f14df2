#![allow(dead_code)]

use musicmaker::{
    engine::OfflineGraph,
    error::MicrophoneError,
    io::{Capture, Microphone},
    MusicMaker, Settings,
};

pub const SAMPLE_RATE: f32 = 48_000.0;

/// Microphone that either refuses to open or hands back a fixed take.
pub struct FakeMic {
    pub fail_with: Option<MicrophoneError>,
    pub take: Vec<f32>,
    open: bool,
}

impl FakeMic {
    pub fn working() -> Self {
        Self {
            fail_with: None,
            take: (0..4_800).map(|i| 0.5 * (i as f32 * 0.05).sin()).collect(),
            open: false,
        }
    }

    pub fn denied() -> Self {
        Self {
            fail_with: Some(MicrophoneError::PermissionDenied("blocked".into())),
            take: Vec::new(),
            open: false,
        }
    }
}

impl Microphone for FakeMic {
    fn open(&mut self) -> Result<(), MicrophoneError> {
        if let Some(err) = self.fail_with.clone() {
            return Err(err);
        }
        self.open = true;
        Ok(())
    }

    fn close(&mut self) -> Option<Capture> {
        if !std::mem::take(&mut self.open) {
            return None;
        }
        Some(Capture {
            samples: self.take.clone(),
            sample_rate: 48_000,
        })
    }

    fn is_open(&self) -> bool {
        self.open
    }
}

pub fn app_with(settings: Settings, mic: FakeMic) -> MusicMaker<OfflineGraph> {
    let graph = OfflineGraph::with_settings(SAMPLE_RATE, &settings);
    MusicMaker::new(Some(graph), settings, Box::new(mic))
}

pub fn app() -> MusicMaker<OfflineGraph> {
    app_with(Settings::default(), FakeMic::working())
}

/// Render `seconds` through the app's graph.
pub fn render(app: &mut MusicMaker<OfflineGraph>, seconds: f64) -> Vec<f32> {
    app.graph_mut().expect("offline graph").render(seconds)
}

/// Host loop: schedule, then let the audio clock run for 10ms.
pub fn run(app: &mut MusicMaker<OfflineGraph>, seconds: f64) {
    let polls = (seconds / 0.01).round() as usize;
    for _ in 0..polls {
        app.tick();
        app.graph_mut().expect("offline graph").advance(0.01);
    }
}
