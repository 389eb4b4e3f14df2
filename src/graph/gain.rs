use crate::{
    dsp::{mix::multiply_in_place, AudioParam},
    graph::node::{GraphNode, RenderCtx},
    MAX_BLOCK_SIZE,
};

/// Audio-rate gain stage driven by an automation timeline.
pub struct GainNode {
    gain: AudioParam,
    gain_buffer: Vec<f32>,
}

impl GainNode {
    pub fn new(gain: f32) -> Self {
        Self {
            gain: AudioParam::new(gain),
            gain_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }

    pub fn gain(&mut self) -> &mut AudioParam {
        &mut self.gain
    }
}

impl GraphNode for GainNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let len = out.len().min(MAX_BLOCK_SIZE);
        let gains = &mut self.gain_buffer[..len];
        self.gain.render(gains, ctx.time, ctx.sample_rate);
        multiply_in_place(&mut out[..len], gains);
    }
}
