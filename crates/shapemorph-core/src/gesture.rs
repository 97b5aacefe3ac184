//! Gesture recognition over per-tick pointer snapshots.
//!
//! The recognizer disambiguates tap, double-tap, drag-rotation, and
//! pinch/wheel-scale from the raw snapshot stream. It never blocks and
//! never inspects targets beyond identity: hit-testing is delegated to the
//! caller-supplied closure. Exactly one source is authoritative per tick —
//! the touch path when contacts are present, the mouse path otherwise —
//! and both share the same press/drag routine and thresholds.

use kurbo::Point;
use log::trace;
use serde::{Deserialize, Serialize};

use crate::input::{PointerSnapshot, TouchPoint};
use crate::shapes::ShapeId;

/// Tuning thresholds for gesture classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Maximum seconds between presses on the same target for a double-tap.
    pub double_click_threshold: f64,
    /// Horizontal drag pixels to rotation degrees.
    pub rotation_sensitivity: f64,
    /// Rotation amounts at or below this are jitter and emit nothing.
    pub rotation_dead_zone: f64,
    /// Wheel delta to scale factor.
    pub wheel_sensitivity: f64,
    /// Wheel deltas at or below this are ignored.
    pub wheel_dead_zone: f64,
    /// Pinch distance change (pixels) required to emit a scale step.
    pub pinch_threshold: f64,
    /// Pinch delta pixels to scale factor.
    pub pinch_sensitivity: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            double_click_threshold: 0.3,
            rotation_sensitivity: 0.5,
            rotation_dead_zone: 0.1,
            wheel_sensitivity: 0.1,
            wheel_dead_zone: 0.01,
            pinch_threshold: 5.0,
            pinch_sensitivity: 0.01,
        }
    }
}

/// A classified high-level input event, targeted at a hit-tested shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GestureEvent {
    /// Single press on a target (not part of a double-tap).
    Tap { target: ShapeId },
    /// Two presses on the same target within the double-click window.
    DoubleTap { target: ShapeId },
    /// Horizontal drag over a held target; `amount` is in degrees.
    DragRotate { target: ShapeId, amount: f64 },
    /// Pinch or wheel scale step; `factor` multiplies the target scale.
    Scale { target: ShapeId, factor: f64 },
}

impl GestureEvent {
    /// The shape this event is aimed at.
    pub fn target(&self) -> ShapeId {
        match *self {
            GestureEvent::Tap { target }
            | GestureEvent::DoubleTap { target }
            | GestureEvent::DragRotate { target, .. }
            | GestureEvent::Scale { target, .. } => target,
        }
    }
}

/// Double-tap bookkeeping.
#[derive(Debug, Clone, Default)]
struct ClickState {
    last_target: Option<ShapeId>,
    last_click_time: f64,
}

/// Active drag-rotation.
#[derive(Debug, Clone)]
struct DragState {
    target: ShapeId,
    last_pointer_pos: Point,
}

/// Active two-finger pinch.
#[derive(Debug, Clone)]
struct PinchState {
    target: ShapeId,
    initial_distance: f64,
}

/// Classifies pointer snapshots into gesture events.
#[derive(Debug, Default)]
pub struct GestureRecognizer {
    config: GestureConfig,
    click: ClickState,
    drag: Option<DragState>,
    pinch: Option<PinchState>,
    was_pressed: bool,
}

impl GestureRecognizer {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Classify one snapshot, producing zero or more events.
    ///
    /// `hit_test` resolves a screen point to the topmost interactive shape
    /// there, if any. A miss on press-down starts no drag and leaves the
    /// click state untouched (the double-tap timer keeps running against
    /// the previous target).
    pub fn process<F>(&mut self, snap: &PointerSnapshot, hit_test: F) -> Vec<GestureEvent>
    where
        F: Fn(Point) -> Option<ShapeId>,
    {
        let mut events = Vec::new();
        if snap.touches.is_empty() {
            self.pinch = None;
            self.process_mouse(snap, &hit_test, &mut events);
        } else {
            self.process_touch(snap, &hit_test, &mut events);
        }
        self.was_pressed = snap.pressed;
        events
    }

    fn process_mouse<F>(&mut self, snap: &PointerSnapshot, hit_test: &F, events: &mut Vec<GestureEvent>)
    where
        F: Fn(Point) -> Option<ShapeId>,
    {
        if snap.pressed && !self.was_pressed {
            if let Some(hit) = hit_test(snap.position) {
                self.begin_press(hit, snap.position, snap.time, events);
            }
        } else if snap.pressed {
            self.continue_drag(snap.position, events);
        } else {
            self.drag = None;
        }

        // Wheel scaling applies to the most recently clicked target.
        if let Some(target) = self.click.last_target {
            if snap.scroll_delta.abs() > self.config.wheel_dead_zone {
                let factor = 1.0 + snap.scroll_delta * self.config.wheel_sensitivity * 10.0;
                events.push(GestureEvent::Scale { target, factor });
            }
        }
    }

    fn process_touch<F>(&mut self, snap: &PointerSnapshot, hit_test: &F, events: &mut Vec<GestureEvent>)
    where
        F: Fn(Point) -> Option<ShapeId>,
    {
        if snap.touches.len() == 1 {
            self.pinch = None;
            self.process_single_touch(&snap.touches[0], snap.time, hit_test, events);
        } else {
            self.process_pinch(&snap.touches[0], &snap.touches[1], hit_test, events);
        }
    }

    fn process_single_touch<F>(
        &mut self,
        touch: &TouchPoint,
        time: f64,
        hit_test: &F,
        events: &mut Vec<GestureEvent>,
    ) where
        F: Fn(Point) -> Option<ShapeId>,
    {
        use crate::input::TouchPhase::*;
        match touch.phase {
            Began => {
                if let Some(hit) = hit_test(touch.position) {
                    self.begin_press(hit, touch.position, time, events);
                }
            }
            Moved => self.continue_drag(touch.position, events),
            Stationary => {}
            Ended | Canceled => self.drag = None,
        }
    }

    fn process_pinch<F>(
        &mut self,
        touch0: &TouchPoint,
        touch1: &TouchPoint,
        hit_test: &F,
        events: &mut Vec<GestureEvent>,
    ) where
        F: Fn(Point) -> Option<ShapeId>,
    {
        let distance = (touch1.position - touch0.position).hypot();

        if self.pinch.is_none() {
            let midpoint = touch0.position.midpoint(touch1.position);
            if let Some(hit) = hit_test(midpoint) {
                trace!("pinch begin on {hit} at distance {distance:.1}");
                self.pinch = Some(PinchState {
                    target: hit,
                    initial_distance: distance,
                });
            }
        } else if let Some(pinch) = self.pinch.as_mut() {
            let pinch_delta = distance - pinch.initial_distance;
            if pinch_delta.abs() > self.config.pinch_threshold {
                let factor = 1.0 + pinch_delta * self.config.pinch_sensitivity;
                events.push(GestureEvent::Scale {
                    target: pinch.target,
                    factor,
                });
                // Incremental: re-baseline so sustained pinches do not
                // compound into runaway scale.
                pinch.initial_distance = distance;
            }
        }

        if touch0.phase.is_terminal() || touch1.phase.is_terminal() {
            self.pinch = None;
        }
    }

    /// Shared press-down routine for mouse and touch.
    fn begin_press(
        &mut self,
        hit: ShapeId,
        point: Point,
        now: f64,
        events: &mut Vec<GestureEvent>,
    ) {
        self.drag = Some(DragState {
            target: hit,
            last_pointer_pos: point,
        });

        let is_double = self.click.last_target == Some(hit)
            && now - self.click.last_click_time < self.config.double_click_threshold;
        if is_double {
            events.push(GestureEvent::DoubleTap { target: hit });
            // Reset so a third press cannot pair with this one.
            self.click.last_target = None;
        } else {
            events.push(GestureEvent::Tap { target: hit });
            self.click.last_target = Some(hit);
            self.click.last_click_time = now;
        }
    }

    /// Shared drag-continuation routine for mouse and touch.
    fn continue_drag(&mut self, position: Point, events: &mut Vec<GestureEvent>) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        let delta = position - drag.last_pointer_pos;
        let amount = delta.x * self.config.rotation_sensitivity;
        if amount.abs() > self.config.rotation_dead_zone {
            events.push(GestureEvent::DragRotate {
                target: drag.target,
                amount,
            });
        }
        drag.last_pointer_pos = position;
    }
}
