use std::{fmt, io};

#[derive(Debug)]
pub enum MusicError {
    Config(toml::de::Error),
    ConfigEncode(toml::ser::Error),
    Io(io::Error),
    Wav(hound::Error),
    Microphone(MicrophoneError),
    UnknownWaveform(String),
    UnknownDrum(String),
}

/// Why the input stream could not be opened or kept running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MicrophoneError {
    PermissionDenied(String),
    NoDevice,
    Unsupported(String),
    Stream(String),
}

impl fmt::Display for MusicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MusicError::Config(e) => write!(f, "Invalid settings file: {e}"),
            MusicError::ConfigEncode(e) => write!(f, "Could not encode settings: {e}"),
            MusicError::Io(e) => write!(f, "I/O error: {e}"),
            MusicError::Wav(e) => write!(f, "WAV error: {e}"),
            MusicError::Microphone(e) => write!(f, "Microphone error: {e}"),
            MusicError::UnknownWaveform(name) => write!(f, "Unknown waveform '{name}'"),
            MusicError::UnknownDrum(name) => write!(f, "Unknown drum voice '{name}'"),
        }
    }
}

impl std::error::Error for MusicError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MusicError::Config(e) => Some(e),
            MusicError::ConfigEncode(e) => Some(e),
            MusicError::Io(e) => Some(e),
            MusicError::Wav(e) => Some(e),
            MusicError::Microphone(e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for MicrophoneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MicrophoneError::PermissionDenied(msg) => write!(f, "permission denied: {msg}"),
            MicrophoneError::NoDevice => write!(f, "no input device available"),
            MicrophoneError::Unsupported(msg) => write!(f, "unsupported input format: {msg}"),
            MicrophoneError::Stream(msg) => write!(f, "input stream failed: {msg}"),
        }
    }
}

impl std::error::Error for MicrophoneError {}

impl From<toml::de::Error> for MusicError {
    fn from(e: toml::de::Error) -> Self {
        MusicError::Config(e)
    }
}

impl From<toml::ser::Error> for MusicError {
    fn from(e: toml::ser::Error) -> Self {
        MusicError::ConfigEncode(e)
    }
}

impl From<io::Error> for MusicError {
    fn from(e: io::Error) -> Self {
        MusicError::Io(e)
    }
}

impl From<hound::Error> for MusicError {
    fn from(e: hound::Error) -> Self {
        MusicError::Wav(e)
    }
}

impl From<MicrophoneError> for MusicError {
    fn from(e: MicrophoneError) -> Self {
        MusicError::Microphone(e)
    }
}

pub type Result<T> = std::result::Result<T, MusicError>;
