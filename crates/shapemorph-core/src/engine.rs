//! Top-level engine: one recognizer pass plus one orchestrator/controller
//! update per tick.
//!
//! Ordering guarantee: gesture recognition completes and every resulting
//! event is delivered before the tick's transform/morph updates run, so a
//! gesture's effect is visible within its own tick.

use crate::config::DemoConfig;
use crate::effects::{Collaborators, SoundKind};
use crate::gesture::{GestureEvent, GestureRecognizer};
use crate::input::PointerSnapshot;
use crate::morph::{MorphManager, MorphPhase, SwitchError};
use crate::shapes::ShapeKind;

/// The assembled demo engine.
#[derive(Debug)]
pub struct Engine {
    recognizer: GestureRecognizer,
    manager: MorphManager,
    collaborators: Collaborators,
}

impl Engine {
    /// Build the engine with its initial shape materialized.
    pub fn new(config: DemoConfig, mut collaborators: Collaborators) -> Self {
        let manager = MorphManager::new(
            ShapeKind::default(),
            config.morph,
            config.shape,
            &mut collaborators,
        );
        Self {
            recognizer: GestureRecognizer::new(config.gesture),
            manager,
            collaborators,
        }
    }

    /// Run one tick: recognize gestures, deliver them, then advance the
    /// controller and the morph state machine by `dt` seconds.
    ///
    /// Returns the tick's gesture events for observers.
    pub fn tick(&mut self, snapshot: &PointerSnapshot, dt: f64) -> Vec<GestureEvent> {
        let manager = &self.manager;
        let events = self
            .recognizer
            .process(snapshot, |point| manager.hit_test(point));

        for event in &events {
            self.manager.handle_gesture(event, &mut self.collaborators);
        }
        self.manager.update(dt, &mut self.collaborators);
        events
    }

    /// Request a switch to `kind` (the menu seam: plays the click sound,
    /// then forwards to the orchestrator).
    pub fn request_switch(&mut self, kind: ShapeKind) -> Result<(), SwitchError> {
        self.collaborators.play_sound(SoundKind::ButtonClick);
        self.manager.try_switch(kind, &mut self.collaborators)
    }

    /// Reset the current shape's transform targets.
    pub fn reset_transform(&mut self) {
        self.manager.reset_transform();
    }

    pub fn phase(&self) -> MorphPhase {
        self.manager.phase()
    }

    pub fn manager(&self) -> &MorphManager {
        &self.manager
    }

    pub fn collaborators(&self) -> &Collaborators {
        &self.collaborators
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    fn engine() -> Engine {
        Engine::new(DemoConfig::default(), Collaborators::new())
    }

    #[test]
    fn test_hit_test_miss_produces_nothing() {
        let mut engine = engine();
        // The initial shape sits at the origin; press far away.
        let events = engine.tick(
            &PointerSnapshot::mouse(0.0, Point::new(500.0, 500.0), true),
            0.016,
        );
        assert!(events.is_empty());
    }

    #[test]
    fn test_double_tap_effect_lands_same_tick() {
        let mut engine = engine();
        let before = engine.manager().current().unwrap().instance().color;

        engine.tick(&PointerSnapshot::mouse(0.0, Point::ZERO, true), 0.016);
        engine.tick(&PointerSnapshot::mouse(0.05, Point::ZERO, false), 0.016);
        let events = engine.tick(&PointerSnapshot::mouse(0.1, Point::ZERO, true), 0.016);

        assert!(matches!(events.as_slice(), [GestureEvent::DoubleTap { .. }]));
        // Color change is already visible when the tick returns.
        let after = engine.manager().current().unwrap().instance().color;
        assert_ne!(before, after);
    }

    #[test]
    fn test_wheel_scales_after_click() {
        let mut engine = engine();
        engine.tick(&PointerSnapshot::mouse(0.0, Point::ZERO, true), 0.016);
        engine.tick(&PointerSnapshot::mouse(0.05, Point::ZERO, false), 0.016);
        engine.tick(&PointerSnapshot::wheel(1.0, Point::ZERO, 0.5), 0.016);

        let target = engine.manager().current().unwrap().target_scale();
        assert!((target - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_full_morph_through_engine() {
        let mut engine = engine();
        engine.request_switch(ShapeKind::Square).unwrap();
        // No effect sink: the fallback path swaps immediately.
        assert_eq!(engine.phase(), MorphPhase::Idle);
        assert_eq!(engine.manager().current_kind(), ShapeKind::Square);

        // The new shape is interactive on the very next tick.
        let events = engine.tick(&PointerSnapshot::mouse(0.0, Point::ZERO, true), 0.016);
        assert!(matches!(events.as_slice(), [GestureEvent::Tap { .. }]));
    }
}
