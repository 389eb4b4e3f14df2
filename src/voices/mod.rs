//! The five drum sounds of the step sequencer.
//!
//! Each sound is a small recipe (source, optional filter, peak level and
//! decay time) in its own file. The render side keeps a pool of identical
//! drum voices and configures one from a recipe on every hit.
//!
//! # Example
//!
//! ```
//! use musicmaker::voices::DrumKind;
//!
//! let hat = DrumKind::Hihat.recipe();
//! assert_eq!(hat.decay, 0.1);
//! ```

mod bank;
mod crash;
mod hihat;
mod kick;
mod openhat;
mod recipe;
mod snare;

pub use bank::{DrumBank, DrumVoice, MAX_DRUMS};
pub use crash::crash;
pub use hihat::hihat;
pub use kick::kick;
pub use openhat::openhat;
pub use recipe::{DrumKind, DrumRecipe, DrumSource, DECAY_FLOOR};
pub use snare::snare;
