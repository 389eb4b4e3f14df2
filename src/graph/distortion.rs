use crate::{
    dsp::distortion::WaveShaper,
    graph::node::{GraphNode, RenderCtx},
};

/*
Distortion Node
===============

Second stage of the keyboard chain. Drive is not automated: a new drive
value rebuilds the transfer table in place and applies from the next block.

  let mut drive = ShaperNode::new(0.0);
  drive.set_drive(40.0);
*/

pub struct ShaperNode {
    shaper: WaveShaper,
}

impl ShaperNode {
    pub fn new(drive: f32) -> Self {
        Self {
            shaper: WaveShaper::new(drive),
        }
    }

    pub fn set_drive(&mut self, drive: f32) {
        self.shaper.set_amount(drive);
    }

    pub fn drive(&self) -> f32 {
        self.shaper.amount()
    }
}

impl GraphNode for ShaperNode {
    fn render_block(&mut self, out: &mut [f32], _ctx: &RenderCtx) {
        self.shaper.process_buffer(out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drive_change_reshapes_signal() {
        let ctx = RenderCtx::new(48_000.0, 0.0);
        let mut node = ShaperNode::new(0.0);

        let mut clean = vec![0.5, -0.5, 0.9];
        node.render_block(&mut clean, &ctx);

        node.set_drive(50.0);
        let mut driven = vec![0.5, -0.5, 0.9];
        node.render_block(&mut driven, &ctx);

        assert!(driven[0] > clean[0]);
        assert!(driven[1] < clean[1]);
        assert!(driven.iter().all(|s| s.is_finite()));
    }
}
