pub mod pattern;
pub mod sequencer;

pub use pattern::{DrumPattern, PatternGrid};
pub use sequencer::{step_duration_ms, Sequencer, SequencerState, StepTick, StepTimer, STALE_AFTER};

/// Steps in one bar of sixteenth notes.
pub const STEPS: usize = 16;
