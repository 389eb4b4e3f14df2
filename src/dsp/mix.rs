//! Bus arithmetic.
//!
//! Voices are summed onto a bus with plain addition. Summing is unweighted,
//! so a busy bus can exceed [-1, 1]; the master gain and compressor after it
//! are what bring the level back down.

/// Add signal B into signal A in-place (summing).
#[inline]
pub fn sum_in_place(a: &mut [f32], b: &[f32]) {
    debug_assert_eq!(a.len(), b.len());

    for (sa, &sb) in a.iter_mut().zip(b.iter()) {
        *sa += sb;
    }
}

/// Multiply A by B sample-by-sample (amplitude control).
#[inline]
pub fn multiply_in_place(a: &mut [f32], b: &[f32]) {
    debug_assert_eq!(a.len(), b.len());

    for (sa, &sb) in a.iter_mut().zip(b.iter()) {
        *sa *= sb;
    }
}

/// Peak absolute value of a block.
pub fn peak(buffer: &[f32]) -> f32 {
    buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()))
}
