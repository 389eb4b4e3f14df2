/*
Step Sequencer
==============

A transport over the pattern grid. The timer does not sleep; it is a
look-ahead scheduler on the audio clock. The host polls it with the current
audio time and every tick due inside the look-ahead window comes back with
its exact clock time, so the hits land sample-accurately no matter how
jittery the polling is.

    start(t0)           tick 1        tick 2        tick 3
       │                  │             │             │
       ▼                  ▼             ▼             ▼
  ─────┼──────────────────┼─────────────┼─────────────┼──────▶ audio clock
       t0          t0 + interval  t0 + 2·interval  ...
                      step 0        step 1        step 2

- interval = 60 / (tempo · 4) seconds (sixteenth notes)
- the first tick fires one interval after start and plays step 0
- tick n is due at t0 + n · interval, computed from the origin every time,
  so rounding never accumulates
- a tick more than STALE_AFTER behind the clock (the host stalled) is
  skipped; the step index still advances

Tempo changes while playing are remembered and take effect on the next
start; a running transport keeps its interval.
*/

use tracing::{debug, trace};

use super::{pattern::PatternGrid, STEPS};
use crate::voices::DrumKind;

/// Ticks later than this are dropped instead of played late.
pub const STALE_AFTER: f64 = 0.2;

/// Length of one sixteenth note in milliseconds.
pub fn step_duration_ms(tempo: u32) -> f64 {
    60_000.0 / (tempo.max(1) as f64 * 4.0)
}

/// The running timer: an origin on the audio clock and a fixed interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepTimer {
    origin: f64,
    interval: f64,
    fired: u64,
}

impl StepTimer {
    pub fn new(origin: f64, interval: f64) -> Self {
        Self {
            origin,
            interval,
            fired: 0,
        }
    }

    /// Clock time of the next tick.
    pub fn next_due(&self) -> f64 {
        self.origin + (self.fired + 1) as f64 * self.interval
    }

    pub fn interval(&self) -> f64 {
        self.interval
    }

    fn advance(&mut self) {
        self.fired += 1;
    }

    /// Step audible at `now`, if any tick has fired by then.
    fn step_at(&self, now: f64) -> Option<usize> {
        let elapsed = ((now - self.origin) / self.interval).floor();
        if elapsed < 1.0 {
            return None;
        }
        Some((elapsed as u64 - 1) as usize % STEPS)
    }
}

/// Snapshot of the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequencerState {
    pub playing: bool,
    pub current_step: usize,
    pub tempo: u32,
}

/// One fired step: what to play and when.
#[derive(Debug, Clone, PartialEq)]
pub struct StepTick {
    pub step: usize,
    pub at: f64,
    pub hits: Vec<DrumKind>,
}

#[derive(Debug, Clone)]
pub struct Sequencer {
    grid: PatternGrid,
    tempo: u32,
    current_step: usize,
    timer: Option<StepTimer>,
}

impl Sequencer {
    pub fn new(tempo: u32) -> Self {
        Self {
            grid: PatternGrid::new(),
            tempo: tempo.max(1),
            current_step: 0,
            timer: None,
        }
    }

    pub fn grid(&self) -> &PatternGrid {
        &self.grid
    }

    pub fn toggle_cell(&mut self, kind: DrumKind, step: usize) -> Option<bool> {
        self.grid.toggle(kind, step)
    }

    pub fn state(&self) -> SequencerState {
        SequencerState {
            playing: self.is_playing(),
            current_step: self.current_step,
            tempo: self.tempo,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.timer.is_some()
    }

    /// Index of the next step to fire.
    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn tempo(&self) -> u32 {
        self.tempo
    }

    /// Remembered immediately, heard from the next start.
    pub fn set_tempo(&mut self, tempo: u32) {
        self.tempo = tempo.max(1);
        debug!(tempo = self.tempo, playing = self.is_playing(), "tempo set");
    }

    /// Returns false when already playing.
    pub fn start(&mut self, now: f64) -> bool {
        if self.is_playing() {
            return false;
        }
        let interval = step_duration_ms(self.tempo) / 1_000.0;
        self.current_step = 0;
        self.timer = Some(StepTimer::new(now, interval));
        debug!(tempo = self.tempo, interval, origin = now, "sequencer started");
        true
    }

    /// Returns false when already stopped.
    pub fn stop(&mut self) -> bool {
        if self.timer.take().is_none() {
            return false;
        }
        self.current_step = 0;
        debug!("sequencer stopped");
        true
    }

    /// Start or stop; returns the new playing state.
    pub fn toggle(&mut self, now: f64) -> bool {
        if self.is_playing() {
            self.stop();
        } else {
            self.start(now);
        }
        self.is_playing()
    }

    /// Fire one step: collect its hits, then move the index on.
    pub fn tick(&mut self, at: f64) -> StepTick {
        let step = self.current_step;
        let hits = self.grid.hits_at(step).collect();
        self.current_step = (step + 1) % STEPS;
        StepTick { step, at, hits }
    }

    /// Every tick due by `now + lookahead`, oldest first.
    pub fn poll(&mut self, now: f64, lookahead: f64) -> Vec<StepTick> {
        let mut ticks = Vec::new();
        let horizon = now + lookahead;

        while let Some(mut timer) = self.timer {
            let due = timer.next_due();
            if due > horizon {
                break;
            }
            timer.advance();
            self.timer = Some(timer);

            if due < now - STALE_AFTER {
                trace!(step = self.current_step, due, now, "skipping stale step");
                self.current_step = (self.current_step + 1) % STEPS;
                continue;
            }
            ticks.push(self.tick(due));
        }

        ticks
    }

    /// The step being heard at `now`, for the playhead display.
    pub fn playhead(&self, now: f64) -> Option<usize> {
        self.timer.as_ref().and_then(|t| t.step_at(now))
    }

    pub fn timer(&self) -> Option<&StepTimer> {
        self.timer.as_ref()
    }
}
