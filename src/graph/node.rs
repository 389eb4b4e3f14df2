/// Context passed to graph nodes during rendering
///
/// Contains information about the block being rendered:
/// - sample_rate: Audio sample rate (e.g., 48000.0)
/// - time: Audio clock time of the block's first sample, in seconds
#[derive(Debug, Clone, Copy)]
pub struct RenderCtx {
    pub sample_rate: f32,
    pub time: f64,
}

impl RenderCtx {
    pub fn new(sample_rate: f32, time: f64) -> Self {
        Self { sample_rate, time }
    }

    /// Clock time of sample `index` within the block.
    #[inline]
    pub fn sample_time(&self, index: usize) -> f64 {
        self.time + index as f64 / self.sample_rate as f64
    }

    /// Index of the first sample at or after `time`, clamped to `len`.
    #[inline]
    pub fn index_of(&self, time: f64, len: usize) -> usize {
        if time <= self.time {
            return 0;
        }
        let offset = ((time - self.time) * self.sample_rate as f64).ceil();
        (offset as usize).min(len)
    }
}

/// Core trait for audio processing graph nodes
///
/// Sources overwrite `out`; processors transform it in place.
pub trait GraphNode: Send {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx);

    /// Check if this node is still producing sound
    ///
    /// Used by the voice pools to know when a slot can be reused.
    fn is_active(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_of_maps_clock_to_samples() {
        let ctx = RenderCtx::new(1_000.0, 2.0);
        assert_eq!(ctx.index_of(1.5, 64), 0);
        assert_eq!(ctx.index_of(2.0, 64), 0);
        assert_eq!(ctx.index_of(2.0105, 64), 11);
        assert_eq!(ctx.index_of(9.0, 64), 64);
        assert!((ctx.sample_time(10) - 2.01).abs() < 1e-9);
    }
}
