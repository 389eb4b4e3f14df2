//! Waveshaping distortion.
//!
//! A waveshaper maps each input sample through a fixed transfer curve. The
//! curve here is the classic "drive" formula:
//!
//! ```text
//!            (3 + k) · x · 20°
//!   f(x) = ─────────────────────      x ∈ [-1, 1], angles in radians
//!               π + k · |x|
//! ```
//!
//! At `k = 0` the curve is the straight line `x / 3`. Raising `k` steepens the
//! slope around zero (`(3 + k) / 9`) while the `k·|x|` term in the
//! denominator bends the ends over, so louder input clips harder.
//!
//! The curve is tabulated and read back with linear interpolation, exactly
//! like a lookup-table waveshaper: input `x` lands at index
//! `(N - 1) · (x + 1) / 2` and anything outside [-1, 1] sticks to the ends.

use std::f32::consts::PI;

/// Table length used by the effects chain.
pub const CURVE_SAMPLES: usize = 44_100;

/// Evaluate the transfer function directly.
#[inline]
pub fn curve_value(x: f32, amount: f32) -> f32 {
    let deg = PI / 180.0;
    (3.0 + amount) * x * 20.0 * deg / (PI + amount * x.abs())
}

/// Fill `curve` with the transfer function sampled at `x = 2i/N - 1`.
pub fn fill_distortion_curve(curve: &mut [f32], amount: f32) {
    let samples = curve.len() as f32;
    for (i, slot) in curve.iter_mut().enumerate() {
        let x = (i as f32 * 2.0) / samples - 1.0;
        *slot = curve_value(x, amount);
    }
}

pub fn make_distortion_curve(amount: f32, samples: usize) -> Vec<f32> {
    let mut curve = vec![0.0; samples];
    fill_distortion_curve(&mut curve, amount);
    curve
}

/// Table-driven waveshaper. Changing the drive rewrites the table in place.
pub struct WaveShaper {
    curve: Vec<f32>,
    amount: f32,
}

impl WaveShaper {
    pub fn new(amount: f32) -> Self {
        let amount = amount.max(0.0);
        Self {
            curve: make_distortion_curve(amount, CURVE_SAMPLES),
            amount,
        }
    }

    pub fn amount(&self) -> f32 {
        self.amount
    }

    pub fn set_amount(&mut self, amount: f32) {
        let amount = amount.max(0.0);
        if amount == self.amount {
            return;
        }
        self.amount = amount;
        fill_distortion_curve(&mut self.curve, amount);
    }

    #[inline]
    pub fn shape(&self, x: f32) -> f32 {
        let last = self.curve.len() - 1;
        let position = last as f32 * (x + 1.0) * 0.5;
        if position <= 0.0 {
            return self.curve[0];
        }
        if position >= last as f32 {
            return self.curve[last];
        }
        let index = position as usize;
        let frac = position - index as f32;
        self.curve[index] * (1.0 - frac) + self.curve[index + 1] * frac
    }

    pub fn process_buffer(&self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.shape(*sample);
        }
    }
}
