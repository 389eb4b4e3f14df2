use rtrb::Producer;

use crate::{
    engine::{AudioClock, AudioGraph},
    synth::message::GraphCommand,
};

/// Control-side end of the command queue.
pub struct GraphHandle {
    tx: Producer<GraphCommand>,
    clock: AudioClock,
    sample_rate: f32,
}

impl GraphHandle {
    pub fn new(tx: Producer<GraphCommand>, clock: AudioClock, sample_rate: f32) -> Self {
        Self {
            tx,
            clock,
            sample_rate,
        }
    }

    pub fn clock(&self) -> &AudioClock {
        &self.clock
    }

    /// Free slots left in the queue.
    pub fn capacity_left(&self) -> usize {
        self.tx.slots()
    }
}

impl AudioGraph for GraphHandle {
    fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    fn current_time(&self) -> f64 {
        self.clock.seconds(self.sample_rate)
    }

    fn submit(&mut self, command: GraphCommand) -> bool {
        self.tx.push(command).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Settings, engine::channel, voices::DrumKind};

    #[test]
    fn clock_follows_rendered_frames() {
        let (handle, mut renderer) = channel(1_000.0, &Settings::default());
        assert_eq!(handle.current_time(), 0.0);

        let mut out = vec![0.0; 250];
        renderer.render(&mut out);
        assert!((handle.current_time() - 0.25).abs() < 1e-9);
    }

    #[test]
    fn full_queue_rejects_commands() {
        let (mut handle, _renderer) = channel(1_000.0, &Settings::default());
        let mut accepted = 0;
        while handle.submit(GraphCommand::TriggerDrum {
            kind: DrumKind::Kick,
            at: 0.0,
        }) {
            accepted += 1;
        }
        assert_eq!(accepted, crate::engine::COMMAND_CAPACITY);
        assert_eq!(handle.capacity_left(), 0);
    }
}
