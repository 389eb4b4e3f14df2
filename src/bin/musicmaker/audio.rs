//! Audio output: the default cpal device driving the renderer.

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::{Consumer, RingBuffer};
use tracing::{error, info};

use musicmaker::{
    engine::{self, GraphHandle},
    Settings, MAX_BLOCK_SIZE,
};

/// Scope samples buffered between two UI frames.
const SCOPE_CAPACITY: usize = 8192;

pub struct AudioOutput {
    pub handle: GraphHandle,
    pub scope: Consumer<f32>,
    pub stream: cpal::Stream,
}

pub fn start(settings: &Settings) -> EyreResult<AudioOutput> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;
    let config = device
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;

    let sample_rate = config.sample_rate().0 as f32;
    let channels = config.channels() as usize;
    info!(
        device = %device.name().unwrap_or_else(|_| "unknown".into()),
        sample_rate,
        channels,
        "audio output"
    );

    let (scope_tx, scope_rx) = RingBuffer::<f32>::new(SCOPE_CAPACITY);
    let (handle, renderer) = engine::channel(sample_rate, settings);
    let mut renderer = renderer.with_scope(scope_tx);
    let mut scratch = vec![0.0f32; MAX_BLOCK_SIZE];

    let stream = device
        .build_output_stream(
            &config.into(),
            move |data: &mut [f32], _| {
                renderer.render_interleaved(data, channels, &mut scratch);
            },
            |err| error!("Audio error: {}", err),
            None,
        )
        .wrap_err("failed to build output stream")?;

    stream.play().wrap_err("failed to start output stream")?;

    Ok(AudioOutput {
        handle,
        scope: scope_rx,
        stream,
    })
}
