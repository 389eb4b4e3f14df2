use crate::{
    dsp::compressor::Compressor,
    graph::node::{GraphNode, RenderCtx},
};

pub struct CompressorNode {
    compressor: Compressor,
}

impl CompressorNode {
    pub fn new(compressor: Compressor) -> Self {
        Self { compressor }
    }
}

impl Default for CompressorNode {
    fn default() -> Self {
        Self::new(Compressor::default())
    }
}

impl GraphNode for CompressorNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.compressor.process_buffer(out, ctx.sample_rate);
    }
}
