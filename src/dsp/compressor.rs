//! Dynamics compressor for the master stage.
//!
//! Feed-forward design: a peak envelope follower with separate attack and
//! release smoothing, a soft-knee gain computer in dB, no makeup gain.
//! Defaults match the classic browser compressor settings the toy was voiced
//! against: -24 dB threshold, 30 dB knee, 12:1 ratio, 3 ms attack and
//! 250 ms release.

pub struct Compressor {
    /// Threshold in dB.
    pub threshold: f32,
    /// Knee width in dB (0 = hard knee).
    pub knee: f32,
    /// Compression ratio (12.0 = 12:1).
    pub ratio: f32,
    /// Attack time in seconds.
    pub attack: f32,
    /// Release time in seconds.
    pub release: f32,

    envelope: f32,
}

impl Default for Compressor {
    fn default() -> Self {
        Self::new(-24.0, 30.0, 12.0, 0.003, 0.25)
    }
}

impl Compressor {
    pub fn new(threshold: f32, knee: f32, ratio: f32, attack: f32, release: f32) -> Self {
        Self {
            threshold: threshold.clamp(-100.0, 0.0),
            knee: knee.clamp(0.0, 40.0),
            ratio: ratio.clamp(1.0, 20.0),
            attack: attack.clamp(0.0001, 1.0),
            release: release.clamp(0.001, 1.0),
            envelope: 0.0,
        }
    }

    #[inline]
    fn linear_to_db(linear: f32) -> f32 {
        if linear <= 1e-6 {
            -120.0
        } else {
            20.0 * linear.log10()
        }
    }

    #[inline]
    fn db_to_linear(db: f32) -> f32 {
        10.0_f32.powf(db / 20.0)
    }

    /// Gain change in dB (zero or negative) for an input level in dB.
    #[inline]
    fn gain_for(&self, input_db: f32) -> f32 {
        let slope = 1.0 - 1.0 / self.ratio;

        if self.knee <= 0.0 {
            return if input_db <= self.threshold {
                0.0
            } else {
                (self.threshold - input_db) * slope
            };
        }

        let half_knee = self.knee / 2.0;
        let knee_start = self.threshold - half_knee;
        let knee_end = self.threshold + half_knee;

        if input_db <= knee_start {
            0.0
        } else if input_db >= knee_end {
            (self.threshold - input_db) * slope
        } else {
            // Quadratic blend across the knee.
            let x = input_db - knee_start;
            -slope * x * x / (2.0 * self.knee)
        }
    }

    pub fn process(&mut self, input: f32, sample_rate: f32) -> f32 {
        let level = input.abs();
        let coefficient = if level > self.envelope {
            (-1.0 / (self.attack * sample_rate)).exp()
        } else {
            (-1.0 / (self.release * sample_rate)).exp()
        };
        self.envelope = coefficient * self.envelope + (1.0 - coefficient) * level;

        let gain_db = self.gain_for(Self::linear_to_db(self.envelope));
        input * Self::db_to_linear(gain_db)
    }

    pub fn process_buffer(&mut self, buffer: &mut [f32], sample_rate: f32) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample, sample_rate);
        }
    }

    /// Current gain reduction in dB (positive), for metering.
    pub fn reduction(&self) -> f32 {
        -self.gain_for(Self::linear_to_db(self.envelope))
    }

    pub fn reset(&mut self) {
        self.envelope = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 44_100.0;

    #[test]
    fn quiet_signal_passes_unchanged() {
        let mut comp = Compressor::default();
        let mut out = 0.0;
        for _ in 0..2_000 {
            out = comp.process(0.01, SAMPLE_RATE); // -40 dB, below the knee
        }
        assert!((out - 0.01).abs() < 1e-4, "got {out}");
    }

    #[test]
    fn loud_signal_is_reduced() {
        let mut comp = Compressor::default();
        let mut out = 0.0;
        for _ in 0..10_000 {
            out = comp.process(1.0, SAMPLE_RATE);
        }
        assert!(out < 0.2, "0 dB into -24 dB threshold at 12:1 should squash, got {out}");
        assert!(out > 0.0);
        assert!(comp.reduction() > 15.0);
    }

    #[test]
    fn knee_is_continuous() {
        let comp = Compressor::default();
        let edge = comp.threshold + comp.knee / 2.0;
        let inside = comp.gain_for(edge - 1e-3);
        let outside = comp.gain_for(edge + 1e-3);
        assert!((inside - outside).abs() < 0.01, "{inside} vs {outside}");
    }

    #[test]
    fn gain_recovers_after_release() {
        let mut comp = Compressor::default();
        for _ in 0..5_000 {
            comp.process(1.0, SAMPLE_RATE);
        }
        let squashed = comp.process(0.05, SAMPLE_RATE);
        for _ in 0..(SAMPLE_RATE as usize * 2) {
            comp.process(0.05, SAMPLE_RATE);
        }
        let recovered = comp.process(0.05, SAMPLE_RATE);
        assert!(recovered > squashed);
    }
}
