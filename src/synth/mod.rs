// Keyboard side of the toy: note names, the control-to-render message set,
// pooled tone voices on the render side and note lifecycle on the control side.

pub mod lifecycle;
pub mod message;
pub mod notes;
pub mod poly;
pub mod voice;

pub use lifecycle::{ActiveNote, NoteLifecycle};
pub use message::{GraphCommand, ParamTarget, VoiceId};
pub use notes::NoteFrequencyTable;
