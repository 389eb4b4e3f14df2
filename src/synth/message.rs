use crate::{
    dsp::{ParamOp, Waveform},
    io::Clip,
    voices::DrumKind,
};

/// Control-side name for one tone voice. Ids are never reused, so commands
/// for a voice that has since been stolen simply find nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VoiceId(pub u32);

/// Which parameter an automation command addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamTarget {
    ToneGain(VoiceId),
    FilterCutoff,
}

/// Everything the control side can ask of the render side. Times are on the
/// audio clock, in seconds.
#[derive(Debug, Clone)]
pub enum GraphCommand {
    StartTone {
        voice: VoiceId,
        waveform: Waveform,
        frequency: f32,
        at: f64,
    },
    StopTone {
        voice: VoiceId,
        at: f64,
    },
    Automate {
        target: ParamTarget,
        op: ParamOp,
    },
    TriggerDrum {
        kind: DrumKind,
        at: f64,
    },
    SetDrive {
        amount: f32,
    },
    PlayClip {
        clip: Clip,
        at: f64,
    },
    StopClip {
        clip: Clip,
    },
    StopClips,
}
