pub mod app; // Application context: the control side of the toy
pub mod config;
pub mod dsp;
pub mod effects;
pub mod engine; // Command queue, renderer and the AudioGraph seam
pub mod error;
pub mod graph; // Render nodes built on the dsp primitives
pub mod io;
pub mod sequencing; // Drum patterns and the step sequencer
pub mod synth; // Note table, lifecycle and tone voices
pub mod voices;

pub use app::{MusicMaker, StateEvent};
pub use config::Settings;
pub use error::MusicError;

pub const MAX_BLOCK_SIZE: usize = 2048;
