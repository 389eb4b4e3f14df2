use crate::{
    dsp::{
        filter::{FilterKind, SvFilter},
        AudioParam,
    },
    graph::node::{GraphNode, RenderCtx},
};

/*
Filter Node
===========

Wraps the state-variable filter with a cutoff timeline. The cutoff is read
once per block (control rate): the coefficient involves a tan() and the
toy only ever moves it by immediate "set value now" events from a slider,
so per-block updates are smooth enough and cost nothing.

Example usage:
  // Keyboard tone chain
  let mut tone_filter = FilterNode::lowpass(8_000.0);
  tone_filter.cutoff().set_value_at_time(1_200.0, now);

  // Hi-hat shaping
  let hat = FilterNode::highpass(7_000.0);
*/

pub struct FilterNode {
    filter: SvFilter,
    cutoff: AudioParam,
}

impl FilterNode {
    pub fn new(kind: FilterKind, cutoff_hz: f32) -> Self {
        Self {
            filter: SvFilter::new(kind, cutoff_hz),
            cutoff: AudioParam::new(cutoff_hz),
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

    /// Reuse this node for a new response, clearing state and automation.
    pub fn configure(&mut self, kind: FilterKind, cutoff_hz: f32) {
        self.filter.configure(kind, cutoff_hz);
        self.cutoff.reset(cutoff_hz);
    }

    pub fn kind(&self) -> FilterKind {
        self.filter.kind()
    }

    pub fn cutoff(&mut self) -> &mut AudioParam {
        &mut self.cutoff
    }
}

impl GraphNode for FilterNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let cutoff = self.cutoff.k_rate(ctx.time);
        self.filter.set_cutoff(cutoff);
        self.filter.render(out, ctx.sample_rate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::{mix::peak, oscillator::Oscillator, Waveform};

    fn tone(frequency: f32, len: usize, sample_rate: f32) -> Vec<f32> {
        let mut osc = Oscillator::new(Waveform::Sine);
        let mut buffer = vec![0.0; len];
        osc.render(&mut buffer, frequency, sample_rate);
        buffer
    }

    #[test]
    fn scheduled_cutoff_takes_effect_on_its_block() {
        let sample_rate = 48_000.0;
        let mut node = FilterNode::lowpass(8_000.0);
        node.cutoff().set_value_at_time(200.0, 0.05);

        let mut open = tone(2_000.0, 1024, sample_rate);
        node.render_block(&mut open, &RenderCtx::new(sample_rate, 0.0));
        assert!(peak(&open[256..]) > 0.8, "cutoff still 8 kHz");

        let mut closed = tone(2_000.0, 2048, sample_rate);
        node.render_block(&mut closed, &RenderCtx::new(sample_rate, 0.05));
        assert!(peak(&closed[1024..]) < 0.05, "cutoff dropped to 200 Hz");
    }

    #[test]
    fn configure_resets_automation() {
        let mut node = FilterNode::lowpass(1_000.0);
        node.cutoff().set_value_at_time(50.0, 10.0);
        node.configure(FilterKind::HighPass, 5_000.0);
        assert_eq!(node.kind(), FilterKind::HighPass);
        assert_eq!(node.cutoff().pending(), 0);
        assert_eq!(node.cutoff().value_at(20.0), 5_000.0);
    }
}
