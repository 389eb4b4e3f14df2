//! In-memory WAV containers for recorded takes.
//!
//! Takes are stored as 32-bit float mono. Decoding accepts anything `hound`
//! reads (integer or float, any channel count) and folds it down to mono.

use std::io::Cursor;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

use crate::{error::Result, io::Clip};

pub fn spec(sample_rate: u32) -> WavSpec {
    WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    }
}

pub fn encode(samples: &[f32], sample_rate: u32) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = WavWriter::new(&mut cursor, spec(sample_rate))?;
        for &sample in samples {
            writer.write_sample(sample)?;
        }
        writer.finalize()?;
    }
    Ok(cursor.into_inner())
}

pub fn decode(bytes: &[u8]) -> Result<Clip> {
    let mut reader = WavReader::new(Cursor::new(bytes))?;
    let spec = reader.spec();

    let raw: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader.samples::<f32>().collect::<std::result::Result<_, _>>()?,
        SampleFormat::Int => {
            let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<_, _>>()?
        }
    };

    let channels = spec.channels.max(1) as usize;
    let mono: Vec<f32> = if channels == 1 {
        raw
    } else {
        raw.chunks(channels)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
            .collect()
    };

    Ok(Clip::new(mono, spec.sample_rate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_survives_the_container() {
        let samples: Vec<f32> = (0..480).map(|i| (i as f32 / 480.0) - 0.5).collect();
        let bytes = encode(&samples, 48_000).unwrap();
        assert_eq!(&bytes[..4], b"RIFF");

        let clip = decode(&bytes).unwrap();
        assert_eq!(clip.sample_rate(), 48_000);
        assert_eq!(clip.samples(), &samples[..]);
    }

    #[test]
    fn stereo_integer_files_fold_to_mono() {
        let mut cursor = Cursor::new(Vec::new());
        {
            let spec = WavSpec {
                channels: 2,
                sample_rate: 22_050,
                bits_per_sample: 16,
                sample_format: SampleFormat::Int,
            };
            let mut writer = WavWriter::new(&mut cursor, spec).unwrap();
            for _ in 0..10 {
                writer.write_sample(16_384i16).unwrap();
                writer.write_sample(0i16).unwrap();
            }
            writer.finalize().unwrap();
        }

        let clip = decode(cursor.get_ref()).unwrap();
        assert_eq!(clip.len(), 10);
        assert!(clip.samples().iter().all(|&s| (s - 0.25).abs() < 1e-4));
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(decode(b"definitely not a wav file").is_err());
    }
}
