//! Whole renderer blocks, fed through the real command queue.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use musicmaker::{
    dsp::{ParamOp, Waveform},
    engine::{self, AudioGraph, GraphHandle, Renderer},
    synth::{GraphCommand, NoteFrequencyTable, ParamTarget, VoiceId},
    voices::DrumKind,
    Settings,
};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

const CHORD: [&str; 4] = ["C4", "E4", "G4", "B4"];

fn engine() -> (GraphHandle, Renderer) {
    engine::channel(SAMPLE_RATE, &Settings::default())
}

/// Hold `notes` at a fixed level until the end of the benchmark.
fn hold_chord(handle: &mut GraphHandle, notes: &[&str], waveform: Waveform) {
    let table = NoteFrequencyTable;
    for (i, note) in notes.iter().enumerate() {
        let Some(frequency) = table.frequency(note) else {
            continue;
        };
        let voice = VoiceId(i as u32);
        handle.submit(GraphCommand::StartTone {
            voice,
            waveform,
            frequency,
            at: 0.0,
        });
        handle.submit(GraphCommand::Automate {
            target: ParamTarget::ToneGain(voice),
            op: ParamOp::SetValueAtTime {
                value: 0.3,
                time: 0.0,
            },
        });
    }
}

fn hit_kit(handle: &mut GraphHandle) {
    let now = handle.current_time();
    for kind in DrumKind::ALL {
        handle.submit(GraphCommand::TriggerDrum { kind, at: now });
    }
}

pub fn bench_renderer(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/renderer");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Nothing playing: the floor cost of the master chain
        let (_handle, mut idle) = engine();
        group.bench_with_input(BenchmarkId::new("idle", size), &size, |b, _| {
            b.iter(|| idle.render(black_box(&mut buffer)))
        });

        // === CHORD ===
        // four sawtooth voices through the filter and shaper
        let (mut handle, mut chord) = engine();
        hold_chord(&mut handle, &CHORD, Waveform::Sawtooth);
        handle.submit(GraphCommand::SetDrive { amount: 30.0 });
        group.bench_with_input(BenchmarkId::new("chord", size), &size, |b, _| {
            b.iter(|| chord.render(black_box(&mut buffer)))
        });

        // === DRUM KIT ===
        // every drum retriggered each block, the worst case for the noise voices
        let (mut handle, mut kit) = engine();
        group.bench_with_input(BenchmarkId::new("kit", size), &size, |b, _| {
            b.iter(|| {
                hit_kit(&mut handle);
                kit.render(black_box(&mut buffer));
            })
        });

        // === FULL POOL ===
        // every tone slot sounding plus the kit
        let (mut handle, mut full) = engine();
        let notes: Vec<&str> = NoteFrequencyTable.names().collect();
        hold_chord(&mut handle, &notes, Waveform::Square);
        group.bench_with_input(BenchmarkId::new("full", size), &size, |b, _| {
            b.iter(|| {
                hit_kit(&mut handle);
                full.render(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
