/*
Parameter Automation
====================

Every envelope in the toy (note attack and release, drum decays, the kick's
pitch sweep, filter cutoff changes) is expressed as a timeline of scheduled
events on a parameter. The control side never touches samples; it only says
"be at this value at this time" and the render side evaluates the timeline
once per sample.

Events
------

  SetValue         jump to `value` at `time`
  LinearRamp       straight line from the previous event to `value` at `time`
  ExponentialRamp  geometric curve from the previous event to `value` at `time`

A ramp always starts from the event before it. If that event has already
been consumed, its value and time are kept as the "anchor".

    value
      v1 ┤            ●───────
         │          ╱
         │        ╱    LinearRamp { v1, t1 }
      v0 ┤──────●
         └──────┴─────┴──────→ time
               t0     t1

Exponential ramps follow v0 * (v1 / v0)^p. The curve is undefined when either
end is zero or the ends have opposite signs; the value then holds at v0 until
the ramp time and jumps.

Cancel and Hold
---------------

Releasing a note halfway through its attack must not click. The release
first cancels every event at or after `now`, then "holds" the value the
parameter was actually producing (the last rendered sample) as a new
SetValue at `now`, and finally ramps from there to zero.
*/

/// Upper bound on pending events per parameter. Pushing past it drops the
/// event rather than allocating on the render thread.
pub const MAX_EVENTS: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamEvent {
    SetValue { value: f32, time: f64 },
    LinearRamp { value: f32, time: f64 },
    ExponentialRamp { value: f32, time: f64 },
}

impl ParamEvent {
    #[inline]
    fn time(&self) -> f64 {
        match *self {
            ParamEvent::SetValue { time, .. }
            | ParamEvent::LinearRamp { time, .. }
            | ParamEvent::ExponentialRamp { time, .. } => time,
        }
    }

    #[inline]
    fn value(&self) -> f32 {
        match *self {
            ParamEvent::SetValue { value, .. }
            | ParamEvent::LinearRamp { value, .. }
            | ParamEvent::ExponentialRamp { value, .. } => value,
        }
    }
}

/// A scheduling request sent from the control side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamOp {
    SetValueAtTime { value: f32, time: f64 },
    LinearRampToValueAtTime { value: f32, time: f64 },
    ExponentialRampToValueAtTime { value: f32, time: f64 },
    /// Drop every event scheduled at or after `time`.
    CancelScheduledValues { time: f64 },
    /// Pin the last rendered value at `time`.
    HoldValueAtTime { time: f64 },
}

pub struct AudioParam {
    value: f32,
    anchor_value: f32,
    anchor_time: f64,
    events: Vec<ParamEvent>,
}

impl AudioParam {
    pub fn new(value: f32) -> Self {
        Self {
            value,
            anchor_value: value,
            anchor_time: 0.0,
            events: Vec::with_capacity(MAX_EVENTS),
        }
    }

    /// Forget the timeline and rest at `value`. Keeps the event storage.
    pub fn reset(&mut self, value: f32) {
        self.events.clear();
        self.value = value;
        self.anchor_value = value;
        self.anchor_time = 0.0;
    }

    /// The last value produced by `render` or `k_rate`.
    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn pending(&self) -> usize {
        self.events.len()
    }

    pub fn apply(&mut self, op: ParamOp) {
        match op {
            ParamOp::SetValueAtTime { value, time } => self.set_value_at_time(value, time),
            ParamOp::LinearRampToValueAtTime { value, time } => {
                self.linear_ramp_to_value_at_time(value, time)
            }
            ParamOp::ExponentialRampToValueAtTime { value, time } => {
                self.exponential_ramp_to_value_at_time(value, time)
            }
            ParamOp::CancelScheduledValues { time } => self.cancel_scheduled_values(time),
            ParamOp::HoldValueAtTime { time } => self.hold_value_at_time(time),
        }
    }

    pub fn set_value_at_time(&mut self, value: f32, time: f64) {
        self.insert(ParamEvent::SetValue { value, time });
    }

    pub fn linear_ramp_to_value_at_time(&mut self, value: f32, time: f64) {
        self.insert(ParamEvent::LinearRamp { value, time });
    }

    pub fn exponential_ramp_to_value_at_time(&mut self, value: f32, time: f64) {
        self.insert(ParamEvent::ExponentialRamp { value, time });
    }

    pub fn cancel_scheduled_values(&mut self, time: f64) {
        self.events.retain(|e| e.time() < time);
    }

    pub fn hold_value_at_time(&mut self, time: f64) {
        let held = self.value;
        self.set_value_at_time(held, time);
    }

    fn insert(&mut self, event: ParamEvent) {
        if self.events.len() >= MAX_EVENTS {
            return;
        }
        // Equal times keep insertion order, so a ramp scheduled after a set at
        // the same instant still follows it.
        let at = self
            .events
            .iter()
            .position(|e| e.time() > event.time())
            .unwrap_or(self.events.len());
        self.events.insert(at, event);
    }

    /// Evaluate the timeline at `time` without consuming anything.
    pub fn value_at(&self, time: f64) -> f32 {
        let mut prev_value = self.anchor_value;
        let mut prev_time = self.anchor_time;

        for event in &self.events {
            let end = event.time();
            if end <= time {
                prev_value = event.value();
                prev_time = end;
                continue;
            }

            let span = end - prev_time;
            let progress = if span > 0.0 {
                ((time - prev_time) / span).clamp(0.0, 1.0) as f32
            } else {
                1.0
            };

            return match *event {
                ParamEvent::SetValue { .. } => prev_value,
                ParamEvent::LinearRamp { value, .. } => {
                    prev_value + (value - prev_value) * progress
                }
                ParamEvent::ExponentialRamp { value, .. } => {
                    if prev_value == 0.0 || value == 0.0 || prev_value.signum() != value.signum()
                    {
                        prev_value
                    } else {
                        prev_value * (value / prev_value).powf(progress)
                    }
                }
            };
        }

        prev_value
    }

    /// Render one value per sample starting at `start` seconds.
    pub fn render(&mut self, out: &mut [f32], start: f64, sample_rate: f32) {
        if out.is_empty() {
            return;
        }

        let dt = 1.0 / sample_rate as f64;
        if self.events.is_empty() {
            out.fill(self.anchor_value);
        } else {
            for (i, sample) in out.iter_mut().enumerate() {
                *sample = self.value_at(start + i as f64 * dt);
            }
        }

        self.value = out[out.len() - 1];
        self.consume_until(start + (out.len() - 1) as f64 * dt);
    }

    /// Evaluate once for a whole block (control-rate parameters).
    pub fn k_rate(&mut self, time: f64) -> f32 {
        self.value = self.value_at(time);
        self.consume_until(time);
        self.value
    }

    fn consume_until(&mut self, time: f64) {
        let done = self.events.iter().take_while(|e| e.time() <= time).count();
        if done == 0 {
            return;
        }
        let last = self.events[done - 1];
        self.anchor_value = last.value();
        self.anchor_time = last.time();
        self.events.drain(..done);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 1_000.0;

    #[test]
    fn linear_ramp_interpolates_from_previous_event() {
        let mut param = AudioParam::new(1.0);
        param.set_value_at_time(0.0, 1.0);
        param.linear_ramp_to_value_at_time(0.5, 1.1);

        assert!((param.value_at(0.5) - 1.0).abs() < 1e-6, "before any event");
        assert!((param.value_at(1.05) - 0.25).abs() < 1e-4);
        assert!((param.value_at(2.0) - 0.5).abs() < 1e-6, "holds after the ramp");
    }

    #[test]
    fn exponential_ramp_follows_geometric_curve() {
        let mut param = AudioParam::new(0.0);
        param.set_value_at_time(0.8, 0.0);
        param.exponential_ramp_to_value_at_time(0.01, 0.5);

        let expected = 0.8 * (0.01f32 / 0.8).powf(0.5);
        assert!((param.value_at(0.25) - expected).abs() < 1e-4);
        assert!((param.value_at(0.5) - 0.01).abs() < 1e-6);
    }

    #[test]
    fn exponential_ramp_towards_zero_holds_then_jumps() {
        let mut param = AudioParam::new(0.0);
        param.set_value_at_time(0.5, 0.0);
        param.exponential_ramp_to_value_at_time(0.0, 1.0);

        assert_eq!(param.value_at(0.9), 0.5);
        assert_eq!(param.value_at(1.0), 0.0);
    }

    #[test]
    fn render_consumes_past_events_but_keeps_anchor() {
        let mut param = AudioParam::new(0.0);
        param.set_value_at_time(0.0, 0.0);
        param.linear_ramp_to_value_at_time(1.0, 0.1);

        let mut block = vec![0.0; 200];
        param.render(&mut block, 0.0, SAMPLE_RATE);

        assert_eq!(param.pending(), 0);
        assert!((param.value() - 1.0).abs() < 1e-6);
        assert!((block[50] - 0.5).abs() < 1e-3);
        assert!((param.value_at(5.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn cancel_and_hold_mid_attack_does_not_jump() {
        let mut param = AudioParam::new(0.0);
        param.set_value_at_time(0.0, 0.0);
        param.linear_ramp_to_value_at_time(1.0, 1.0);

        // Render the first 300ms of a one second attack.
        let mut block = vec![0.0; 300];
        param.render(&mut block, 0.0, SAMPLE_RATE);
        let reached = param.value();
        assert!((reached - 0.299).abs() < 0.01);

        let now = 0.3;
        param.apply(ParamOp::CancelScheduledValues { time: now });
        param.apply(ParamOp::HoldValueAtTime { time: now });
        param.apply(ParamOp::LinearRampToValueAtTime { value: 0.0, time: now + 0.5 });

        let mut release = vec![0.0; 600];
        param.render(&mut release, now, SAMPLE_RATE);

        assert!((release[0] - reached).abs() < 1e-3, "release starts where attack stopped");
        assert!(release.iter().all(|&v| v <= reached + 1e-6), "never climbs towards the old target");
        assert!(release[599].abs() < 1e-6);
    }

    #[test]
    fn events_at_same_time_keep_insertion_order() {
        let mut param = AudioParam::new(0.0);
        param.set_value_at_time(0.2, 1.0);
        param.set_value_at_time(0.7, 1.0);
        assert!((param.value_at(1.0) - 0.7).abs() < 1e-6);
    }

    #[test]
    fn k_rate_reads_block_start() {
        let mut param = AudioParam::new(8_000.0);
        param.set_value_at_time(1_200.0, 0.25);
        assert_eq!(param.k_rate(0.2), 8_000.0);
        assert_eq!(param.k_rate(0.25), 1_200.0);
        assert_eq!(param.pending(), 0);
    }

    #[test]
    fn full_timeline_drops_overflow() {
        let mut param = AudioParam::new(0.0);
        for i in 0..(MAX_EVENTS + 4) {
            param.set_value_at_time(i as f32, i as f64);
        }
        assert_eq!(param.pending(), MAX_EVENTS);
    }
}
