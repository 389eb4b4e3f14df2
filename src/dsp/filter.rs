use std::f32::consts::TAU;

use serde::{Deserialize, Serialize};

/*
| response  | passes          | rejects      | used by                   |
| --------- | --------------- | ------------ | ------------------------- |
| low-pass  | below cutoff    | above cutoff | keyboard tone chain       |
| high-pass | above cutoff    | below cutoff | hi-hat, open hat          |
| band-pass | around cutoff   | both sides   | crash                     |

Topology-preserving state-variable filter: one pair of integrators yields
all three responses per sample. `k = 1 / Q` sets the damping; the band-pass
output is scaled by `k` so its peak gain at the cutoff is unity.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterKind {
    LowPass,
    HighPass,
    BandPass,
}

pub struct FilterOutputs {
    pub lowpass: f32,
    pub bandpass: f32,
    pub highpass: f32,
}

pub struct SvFilter {
    ic1eq: f32, // First integrator's memory
    ic2eq: f32, // Second integrator's memory

    cutoff_hz: f32,
    q: f32,
    kind: FilterKind,
}

impl SvFilter {
    pub const DEFAULT_Q: f32 = 1.0;

    pub fn new(kind: FilterKind, cutoff_hz: f32) -> Self {
        Self {
            ic1eq: 0.0,
            ic2eq: 0.0,
            cutoff_hz,
            q: Self::DEFAULT_Q,
            kind,
        }
    }

    pub fn lowpass(cutoff_hz: f32) -> Self {
        Self::new(FilterKind::LowPass, cutoff_hz)
    }

    pub fn highpass(cutoff_hz: f32) -> Self {
        Self::new(FilterKind::HighPass, cutoff_hz)
    }

    pub fn bandpass(cutoff_hz: f32) -> Self {
        Self::new(FilterKind::BandPass, cutoff_hz)
    }

    pub fn with_q(mut self, q: f32) -> Self {
        self.set_q(q);
        self
    }

    /// Reconfigure in place and clear the integrators.
    pub fn configure(&mut self, kind: FilterKind, cutoff_hz: f32) {
        self.kind = kind;
        self.cutoff_hz = cutoff_hz;
        self.reset();
    }

    pub fn kind(&self) -> FilterKind {
        self.kind
    }

    pub fn cutoff(&self) -> f32 {
        self.cutoff_hz
    }

    pub fn set_cutoff(&mut self, cutoff_hz: f32) {
        self.cutoff_hz = cutoff_hz;
    }

    pub fn set_q(&mut self, q: f32) {
        self.q = q.max(0.05);
    }

    #[inline]
    fn coefficient(&self, sample_rate: f32) -> f32 {
        // Keep the prewarp away from Nyquist where tan() blows up.
        let cutoff = self.cutoff_hz.clamp(10.0, sample_rate * 0.49);
        (TAU * cutoff / (2.0 * sample_rate)).tan()
    }

    #[inline]
    pub fn next_sample(&mut self, sample: f32, k: f32, g: f32) -> FilterOutputs {
        let h = 1.0 / (1.0 + g * (g + k));
        let v3 = sample - self.ic2eq;
        let v1 = h * (self.ic1eq + g * v3);
        let v2 = self.ic2eq + g * v1;

        self.ic1eq = 2.0 * v1 - self.ic1eq;
        self.ic2eq = 2.0 * v2 - self.ic2eq;

        FilterOutputs {
            lowpass: v2,
            bandpass: k * v1,
            highpass: sample - k * v1 - v2,
        }
    }

    pub fn render(&mut self, buffer: &mut [f32], sample_rate: f32) {
        let g = self.coefficient(sample_rate);
        let k = 1.0 / self.q;

        for sample in buffer.iter_mut() {
            let outputs = self.next_sample(*sample, k, g);

            *sample = match self.kind {
                FilterKind::LowPass => outputs.lowpass,
                FilterKind::HighPass => outputs.highpass,
                FilterKind::BandPass => outputs.bandpass,
            }
        }
    }

    pub fn reset(&mut self) {
        self.ic1eq = 0.0;
        self.ic2eq = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::oscillator::{Oscillator, Waveform};

    const SAMPLE_RATE: f32 = 48_000.0;

    fn sine(frequency: f32, len: usize) -> Vec<f32> {
        let mut osc = Oscillator::new(Waveform::Sine);
        let mut buffer = vec![0.0f32; len];
        osc.render(&mut buffer, frequency, SAMPLE_RATE);
        buffer
    }

    fn peak_after_transient(buffer: &[f32]) -> f32 {
        let skip = buffer.len().min(256);
        buffer[skip..].iter().fold(0.0f32, |acc, &x| acc.max(x.abs()))
    }

    #[test]
    fn lowpass_passes_dc() {
        let mut filter = SvFilter::lowpass(500.0);
        let mut buffer = vec![1.0; 512];
        filter.render(&mut buffer, SAMPLE_RATE);
        assert!((buffer[511] - 1.0).abs() < 0.01);
    }

    #[test]
    fn highpass_rejects_dc() {
        let mut filter = SvFilter::highpass(500.0);
        let mut buffer = vec![1.0; 512];
        filter.render(&mut buffer, SAMPLE_RATE);
        assert!(buffer[511].abs() < 0.01);
    }

    #[test]
    fn hihat_highpass_removes_low_content() {
        let mut filter = SvFilter::highpass(7_000.0);
        let mut low = sine(200.0, 2048);
        filter.render(&mut low, SAMPLE_RATE);
        assert!(peak_after_transient(&low) < 0.01);
    }

    #[test]
    fn lowpass_attenuates_ten_times_cutoff() {
        let mut filter = SvFilter::lowpass(500.0);
        let mut buffer = sine(5_000.0, 2048);
        filter.render(&mut buffer, SAMPLE_RATE);
        assert!(peak_after_transient(&buffer) < 0.05);
    }

    #[test]
    fn bandpass_is_unity_at_cutoff() {
        let mut filter = SvFilter::bandpass(3_000.0);
        let mut center = sine(3_000.0, 4096);
        filter.render(&mut center, SAMPLE_RATE);
        let center_peak = peak_after_transient(&center);

        filter.reset();
        let mut off = sine(300.0, 4096);
        filter.render(&mut off, SAMPLE_RATE);
        let off_peak = peak_after_transient(&off);

        assert!((center_peak - 1.0).abs() < 0.1, "center peak {center_peak}");
        assert!(off_peak < center_peak * 0.5, "off peak {off_peak}");
    }

    #[test]
    fn raising_cutoff_passes_more_signal() {
        let mut filter = SvFilter::lowpass(200.0);
        let mut dark = sine(1_000.0, 2048);
        filter.render(&mut dark, SAMPLE_RATE);

        filter.reset();
        filter.set_cutoff(5_000.0);
        let mut bright = sine(1_000.0, 2048);
        filter.render(&mut bright, SAMPLE_RATE);

        assert!(peak_after_transient(&bright) > peak_after_transient(&dark) * 2.0);
    }

    #[test]
    fn cutoff_above_nyquist_stays_finite() {
        let mut filter = SvFilter::lowpass(30_000.0);
        let mut buffer = sine(1_000.0, 512);
        filter.render(&mut buffer, 44_100.0);
        assert!(buffer.iter().all(|s| s.is_finite()));
    }
}
