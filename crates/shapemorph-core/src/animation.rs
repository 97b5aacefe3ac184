//! Tick-driven scalar animations and smoothing helpers.
//!
//! The original behavior here is coroutine-shaped (animate a value over
//! wall-clock frames, then fire a completion callback). In this engine the
//! same thing is explicit state advanced by `dt`: callers poll the finished
//! edge on their own tick.

use serde::{Deserialize, Serialize};

/// Linear interpolation of a scalar over a fixed duration.
///
/// `advance` returns the current value each tick and clamps exactly to
/// `end` once `elapsed >= duration` (no overshoot). A zero or negative
/// duration completes on the first advance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarAnim {
    start: f64,
    end: f64,
    duration: f64,
    elapsed: f64,
    finished: bool,
}

impl ScalarAnim {
    pub fn new(start: f64, end: f64, duration: f64) -> Self {
        Self {
            start,
            end,
            duration,
            elapsed: 0.0,
            finished: false,
        }
    }

    /// Advance by `dt` seconds and return the current value.
    pub fn advance(&mut self, dt: f64) -> f64 {
        if self.finished {
            return self.end;
        }
        self.elapsed += dt;
        if self.elapsed >= self.duration {
            self.finished = true;
            return self.end;
        }
        let t = (self.elapsed / self.duration).clamp(0.0, 1.0);
        self.start + (self.end - self.start) * t
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn end_value(&self) -> f64 {
        self.end
    }
}

/// Two-phase pulse: a multiplier that rises from 1 to `peak` over
/// `half_time` seconds, then returns to 1 over another `half_time`.
#[derive(Debug, Clone)]
pub struct BounceAnim {
    anim: ScalarAnim,
    peak: f64,
    half_time: f64,
    returning: bool,
}

impl BounceAnim {
    pub fn new(peak: f64, half_time: f64) -> Self {
        Self {
            anim: ScalarAnim::new(1.0, peak, half_time),
            peak,
            half_time,
            returning: false,
        }
    }

    /// Advance by `dt` seconds and return the current multiplier.
    pub fn advance(&mut self, dt: f64) -> f64 {
        let value = self.anim.advance(dt);
        if self.anim.is_finished() && !self.returning {
            self.returning = true;
            self.anim = ScalarAnim::new(self.peak, 1.0, self.half_time);
        }
        value
    }

    pub fn is_finished(&self) -> bool {
        self.returning && self.anim.is_finished()
    }
}

/// Frame-rate independent exponential smoothing factor for `rate` per
/// second over a `dt`-second tick.
pub fn exp_smoothing(rate: f64, dt: f64) -> f64 {
    1.0 - (-rate * dt).exp()
}

/// Critically damped spring toward `target` (SmoothDamp).
///
/// `velocity` persists across ticks. Never overshoots the target.
pub fn smooth_damp(
    current: f64,
    target: f64,
    velocity: &mut f64,
    smooth_time: f64,
    dt: f64,
) -> f64 {
    if dt <= 0.0 {
        return current;
    }
    let smooth_time = smooth_time.max(1e-4);
    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);
    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * exp;
    let mut output = target + (change + temp) * exp;
    // Clamp at the target when the spring would cross it.
    if (target - current > 0.0) == (output > target) {
        output = target;
        *velocity = (output - target) / dt;
    }
    output
}
