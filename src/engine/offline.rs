use rtrb::RingBuffer;

use crate::{
    config::Settings,
    engine::{AudioClock, AudioGraph, Renderer},
    synth::message::GraphCommand,
};

/// The real renderer without a device.
///
/// Commands are applied straight away and also kept in a history, so tests
/// can assert both on what the control side asked for and on the audio that
/// came out. Time only moves when the test renders.
pub struct OfflineGraph {
    renderer: Renderer,
    clock: AudioClock,
    sample_rate: f32,
    history: Vec<GraphCommand>,
}

impl OfflineGraph {
    pub fn new(sample_rate: f32) -> Self {
        Self::with_settings(sample_rate, &Settings::default())
    }

    pub fn with_settings(sample_rate: f32, settings: &Settings) -> Self {
        // Nothing is ever queued; commands go to the renderer directly.
        let (_tx, rx) = RingBuffer::<GraphCommand>::new(1);
        let clock = AudioClock::new();
        let renderer = Renderer::new(sample_rate, settings, rx, clock.clone()).with_drum_seed(0);
        Self {
            renderer,
            clock,
            sample_rate,
            history: Vec::new(),
        }
    }

    pub fn history(&self) -> &[GraphCommand] {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Render `seconds` of audio and return it.
    pub fn render(&mut self, seconds: f64) -> Vec<f32> {
        let frames = (seconds * self.sample_rate as f64).round() as usize;
        let mut out = vec![0.0; frames];
        self.renderer.render(&mut out);
        out
    }

    /// Render `seconds` of audio and throw it away.
    pub fn advance(&mut self, seconds: f64) {
        self.render(seconds);
    }
}

impl AudioGraph for OfflineGraph {
    fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    fn current_time(&self) -> f64 {
        self.clock.seconds(self.sample_rate)
    }

    fn submit(&mut self, command: GraphCommand) -> bool {
        self.history.push(command.clone());
        self.renderer.apply(command);
        true
    }
}
