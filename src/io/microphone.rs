/*
Microphone Capture
==================

The recorder only needs two things from an input device: start capturing,
and hand back what was captured. `Microphone` is that seam. The cpal
implementation lives here; tests substitute a scripted one.

Capture runs on cpal's input thread. Incoming frames are folded to mono and
appended to a shared buffer; `close` drops the stream and takes the buffer.
*/

use std::sync::{Arc, Mutex};

use cpal::{
    traits::{DeviceTrait, HostTrait, StreamTrait},
    BuildStreamError, FromSample, SizedSample,
};
use tracing::{error, info};

use crate::error::MicrophoneError;

/// Everything captured between `open` and `close`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Capture {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

pub trait Microphone {
    fn open(&mut self) -> Result<(), MicrophoneError>;

    /// Stop capturing. `None` if the microphone was not open.
    fn close(&mut self) -> Option<Capture>;

    fn is_open(&self) -> bool;
}

struct OpenStream {
    stream: cpal::Stream,
    buffer: Arc<Mutex<Vec<f32>>>,
    sample_rate: u32,
}

/// The host's default input device.
#[derive(Default)]
pub struct CpalMicrophone {
    open: Option<OpenStream>,
}

impl CpalMicrophone {
    pub fn new() -> Self {
        Self::default()
    }

    fn build_stream<T>(
        device: &cpal::Device,
        config: &cpal::StreamConfig,
        buffer: Arc<Mutex<Vec<f32>>>,
    ) -> Result<cpal::Stream, BuildStreamError>
    where
        T: SizedSample,
        f32: FromSample<T>,
    {
        let channels = config.channels.max(1) as usize;
        device.build_input_stream(
            config,
            move |data: &[T], _: &cpal::InputCallbackInfo| {
                if let Ok(mut captured) = buffer.lock() {
                    captured.extend(data.chunks(channels).map(|frame| {
                        frame.iter().map(|&s| s.to_sample::<f32>()).sum::<f32>() / channels as f32
                    }));
                }
            },
            |err| error!("Input stream error: {}", err),
            None,
        )
    }
}

fn map_build_error(err: BuildStreamError) -> MicrophoneError {
    match err {
        BuildStreamError::DeviceNotAvailable => MicrophoneError::NoDevice,
        BuildStreamError::StreamConfigNotSupported => {
            MicrophoneError::Unsupported("stream configuration".to_string())
        }
        BuildStreamError::BackendSpecific { err } => {
            if err.description.to_lowercase().contains("permission") {
                MicrophoneError::PermissionDenied(err.description)
            } else {
                MicrophoneError::Stream(err.description)
            }
        }
        other => MicrophoneError::Stream(other.to_string()),
    }
}

impl Microphone for CpalMicrophone {
    fn open(&mut self) -> Result<(), MicrophoneError> {
        if self.open.is_some() {
            return Ok(());
        }

        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or(MicrophoneError::NoDevice)?;
        let config = device
            .default_input_config()
            .map_err(|e| MicrophoneError::Unsupported(e.to_string()))?;

        let sample_rate = config.sample_rate().0;
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let stream_config: cpal::StreamConfig = config.clone().into();

        let stream = match config.sample_format() {
            cpal::SampleFormat::F32 => {
                Self::build_stream::<f32>(&device, &stream_config, buffer.clone())
            }
            cpal::SampleFormat::I16 => {
                Self::build_stream::<i16>(&device, &stream_config, buffer.clone())
            }
            cpal::SampleFormat::U16 => {
                Self::build_stream::<u16>(&device, &stream_config, buffer.clone())
            }
            other => {
                return Err(MicrophoneError::Unsupported(format!("{other:?} samples")));
            }
        }
        .map_err(map_build_error)?;

        stream
            .play()
            .map_err(|e| MicrophoneError::Stream(e.to_string()))?;
        info!(sample_rate, "microphone open");

        self.open = Some(OpenStream {
            stream,
            buffer,
            sample_rate,
        });
        Ok(())
    }

    fn close(&mut self) -> Option<Capture> {
        let OpenStream {
            stream,
            buffer,
            sample_rate,
        } = self.open.take()?;
        drop(stream);

        let samples = match buffer.lock() {
            Ok(mut captured) => std::mem::take(&mut *captured),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        };
        info!(frames = samples.len(), "microphone closed");
        Some(Capture {
            samples,
            sample_rate,
        })
    }

    fn is_open(&self) -> bool {
        self.open.is_some()
    }
}
