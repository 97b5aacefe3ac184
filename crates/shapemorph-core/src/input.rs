//! Pointer snapshot types for unified mouse/touch input.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Lifecycle phase of a single touch contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TouchPhase {
    Began,
    Moved,
    Stationary,
    Ended,
    Canceled,
}

impl TouchPhase {
    /// Whether this phase terminates the contact.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TouchPhase::Ended | TouchPhase::Canceled)
    }
}

/// One touch contact within a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    /// Contact position in screen coordinates.
    pub position: Point,
    /// Lifecycle phase this tick.
    pub phase: TouchPhase,
}

impl TouchPoint {
    pub fn new(position: Point, phase: TouchPhase) -> Self {
        Self { position, phase }
    }
}

/// Immutable per-tick record of the pointer state.
///
/// Produced once per tick by the platform input layer and consumed by the
/// gesture recognizer. `time` is the tick clock in seconds; all gesture
/// timing windows are measured against it rather than a wall clock, so a
/// driver (or a test) fully controls the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointerSnapshot {
    /// Tick clock in seconds.
    pub time: f64,
    /// Primary pointer position in screen coordinates.
    pub position: Point,
    /// Whether the primary button is held.
    pub pressed: bool,
    /// Wheel scroll delta accumulated since the previous tick.
    pub scroll_delta: f64,
    /// Active touch contacts (empty on desktop; at most two are recognized).
    pub touches: Vec<TouchPoint>,
}

impl PointerSnapshot {
    /// Snapshot with no input activity.
    pub fn idle(time: f64) -> Self {
        Self {
            time,
            position: Point::ZERO,
            pressed: false,
            scroll_delta: 0.0,
            touches: Vec::new(),
        }
    }

    /// Mouse snapshot at a position with the given button state.
    pub fn mouse(time: f64, position: Point, pressed: bool) -> Self {
        Self {
            time,
            position,
            pressed,
            scroll_delta: 0.0,
            touches: Vec::new(),
        }
    }

    /// Mouse snapshot carrying a wheel delta.
    pub fn wheel(time: f64, position: Point, scroll_delta: f64) -> Self {
        Self {
            time,
            position,
            pressed: false,
            scroll_delta,
            touches: Vec::new(),
        }
    }

    /// Touch snapshot with the given contacts.
    pub fn touch(time: f64, touches: Vec<TouchPoint>) -> Self {
        let position = touches.first().map(|t| t.position).unwrap_or(Point::ZERO);
        Self {
            time,
            position,
            pressed: false,
            scroll_delta: 0.0,
            touches,
        }
    }

    /// Number of active touch contacts.
    pub fn touch_count(&self) -> usize {
        self.touches.len()
    }
}
