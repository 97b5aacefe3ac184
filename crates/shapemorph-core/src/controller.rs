//! Interactable shape controller.
//!
//! Binds gesture events to one shape instance: rotation and scale deltas
//! land on *targets* that the per-tick update eases toward, so transforms
//! settle smoothly instead of snapping. Also runs the shape's dissolve /
//! rematerialize animation for the morph transition.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::animation::{BounceAnim, ScalarAnim, exp_smoothing, smooth_damp};
use crate::effects::{Collaborators, SoundKind};
use crate::gesture::GestureEvent;
use crate::material::MaterialCache;
use crate::shapes::{ShapeId, ShapeInstance, random_color};

/// Rotation amounts below this stay silent (no rotate sound).
const ROTATE_SOUND_THRESHOLD: f64 = 1.0;
/// Scale factors this close to 1 stay silent (no scale sound).
const SCALE_SOUND_THRESHOLD: f64 = 0.05;
/// Multiplier applied to `rotation_smooth_time` to get the easing rate.
const ROTATION_RATE_SCALE: f64 = 30.0;

/// Per-shape interaction tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeConfig {
    /// Minimum scale as a fraction of the original scale.
    pub min_scale: f64,
    /// Maximum scale as a fraction of the original scale.
    pub max_scale: f64,
    /// Rotation easing time constant in seconds.
    pub rotation_smooth_time: f64,
    /// Scale spring smooth time in seconds.
    pub scale_smooth_time: f64,
    /// Peak of the double-tap bounce, as a scale multiplier.
    pub bounce_peak: f64,
    /// Seconds for each half of the bounce.
    pub bounce_half_time: f64,
    /// Whether double-tap particle bursts use the rainbow variant.
    pub use_rainbow: bool,
}

impl Default for ShapeConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.5,
            max_scale: 2.0,
            rotation_smooth_time: 0.1,
            scale_smooth_time: 0.1,
            bounce_peak: 1.2,
            bounce_half_time: 0.1,
            use_rainbow: true,
        }
    }
}

/// One on-screen shape wired to gestures.
#[derive(Debug)]
pub struct InteractableShape {
    instance: ShapeInstance,
    config: ShapeConfig,
    original_scale: f64,
    target_rotation: f64,
    target_scale: f64,
    /// Smoothed scale, before the bounce multiplier.
    current_scale: f64,
    scale_velocity: f64,
    bounce: Option<BounceAnim>,
    dissolve_anim: Option<ScalarAnim>,
    dissolve_finished: bool,
    material_released: bool,
}

impl InteractableShape {
    /// Wrap an instance, acquiring its instanced material from the cache.
    pub fn new(instance: ShapeInstance, config: ShapeConfig, ctx: &mut Collaborators) -> Self {
        ctx.materials.acquire(instance.kind, instance.id());
        ctx.materials
            .update_color(instance.id(), instance.color.into());
        let original_scale = instance.scale;
        Self {
            target_rotation: instance.rotation,
            target_scale: instance.scale,
            current_scale: instance.scale,
            instance,
            config,
            original_scale,
            scale_velocity: 0.0,
            bounce: None,
            dissolve_anim: None,
            dissolve_finished: false,
            material_released: false,
        }
    }

    pub fn id(&self) -> ShapeId {
        self.instance.id()
    }

    pub fn instance(&self) -> &ShapeInstance {
        &self.instance
    }

    pub fn instance_mut(&mut self) -> &mut ShapeInstance {
        &mut self.instance
    }

    pub fn target_scale(&self) -> f64 {
        self.target_scale
    }

    pub fn target_rotation(&self) -> f64 {
        self.target_rotation
    }

    /// React to a gesture event; events aimed at other shapes are ignored.
    pub fn handle_gesture(&mut self, event: &GestureEvent, ctx: &mut Collaborators) {
        if event.target() != self.id() {
            return;
        }
        match *event {
            GestureEvent::Tap { .. } => {}
            GestureEvent::DoubleTap { .. } => self.on_double_tap(ctx),
            GestureEvent::DragRotate { amount, .. } => self.on_rotate(amount, ctx),
            GestureEvent::Scale { factor, .. } => self.on_scale(factor, ctx),
        }
    }

    fn on_double_tap(&mut self, ctx: &mut Collaborators) {
        self.change_to_random_color(ctx);
        if self.bounce.is_none() {
            self.bounce = Some(BounceAnim::new(
                self.config.bounce_peak,
                self.config.bounce_half_time,
            ));
            ctx.play_burst(
                self.instance.position,
                self.instance.color.into(),
                self.instance.scale,
                self.config.use_rainbow,
            );
        }
    }

    fn on_rotate(&mut self, amount: f64, ctx: &mut Collaborators) {
        self.target_rotation += amount.to_radians();
        if amount.abs() > ROTATE_SOUND_THRESHOLD {
            ctx.play_sound(SoundKind::Rotate);
        }
    }

    fn on_scale(&mut self, factor: f64, ctx: &mut Collaborators) {
        let candidate = self.target_scale * factor;
        let magnitude = candidate.abs() / self.original_scale.abs();
        self.target_scale = if magnitude < self.config.min_scale {
            self.original_scale * self.config.min_scale
        } else if magnitude > self.config.max_scale {
            self.original_scale * self.config.max_scale
        } else {
            candidate
        };
        if (factor - 1.0).abs() > SCALE_SOUND_THRESHOLD {
            ctx.play_sound(SoundKind::Scale);
        }
    }

    /// Assign a fresh random color, re-tinting the cached material.
    pub fn change_to_random_color(&mut self, ctx: &mut Collaborators) {
        self.instance.color = random_color();
        ctx.materials
            .update_color(self.id(), self.instance.color.into());
        ctx.play_sound(SoundKind::ShapeChange);
    }

    /// Advance smoothing and animations by `dt` seconds.
    pub fn update(&mut self, dt: f64) {
        // Dissolve/rematerialize animation.
        if let Some(anim) = self.dissolve_anim.as_mut() {
            self.instance.dissolve_amount = anim.advance(dt);
            if anim.is_finished() {
                self.dissolve_anim = None;
                self.dissolve_finished = true;
            }
        }

        // Ease rotation toward its target.
        let k = exp_smoothing(ROTATION_RATE_SCALE * self.config.rotation_smooth_time, dt);
        self.instance.rotation += (self.target_rotation - self.instance.rotation) * k;

        // Spring the scale toward its target.
        self.current_scale = smooth_damp(
            self.current_scale,
            self.target_scale,
            &mut self.scale_velocity,
            self.config.scale_smooth_time,
            dt,
        );

        // Bounce rides on top of the smoothed scale.
        let multiplier = match self.bounce.as_mut() {
            Some(bounce) => {
                let m = bounce.advance(dt);
                if bounce.is_finished() {
                    self.bounce = None;
                }
                m
            }
            None => 1.0,
        };
        self.instance.scale = self.current_scale * multiplier;
    }

    /// Start the dissolve animation (0 -> 1 over `duration` seconds).
    ///
    /// Cancels any in-flight dissolve/rematerialize.
    pub fn start_dissolve(&mut self, duration: f64) {
        self.dissolve_finished = false;
        self.dissolve_anim = Some(ScalarAnim::new(0.0, 1.0, duration));
    }

    /// Start the rematerialize animation (1 -> 0 over `duration` seconds).
    pub fn start_rematerialize(&mut self, duration: f64) {
        self.dissolve_finished = false;
        self.dissolve_anim = Some(ScalarAnim::new(1.0, 0.0, duration));
    }

    /// Consume the dissolve completion edge. True exactly once per
    /// finished animation.
    pub fn take_dissolve_finished(&mut self) -> bool {
        std::mem::take(&mut self.dissolve_finished)
    }

    pub fn is_dissolving(&self) -> bool {
        self.dissolve_anim.is_some()
    }

    /// Restore identity rotation and the original scale as targets.
    pub fn reset_transform(&mut self) {
        self.target_rotation = 0.0;
        self.target_scale = self.original_scale;
    }

    /// Release the instanced material. Safe to call once; the destruction
    /// path during a swap goes through here.
    pub fn release_resources(&mut self, materials: &mut MaterialCache) {
        if !self.material_released {
            materials.release(self.id());
            self.material_released = true;
        } else {
            debug!("material for {} already released", self.id());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::ShapeKind;
    use uuid::Uuid;

    fn shape(ctx: &mut Collaborators) -> InteractableShape {
        InteractableShape::new(
            ShapeInstance::new(ShapeKind::Hexagon),
            ShapeConfig::default(),
            ctx,
        )
    }

    #[test]
    fn test_scale_clamps_to_max() {
        let mut ctx = Collaborators::new();
        let mut s = shape(&mut ctx);
        let id = s.id();
        for _ in 0..10 {
            s.handle_gesture(&GestureEvent::Scale { target: id, factor: 1.5 }, &mut ctx);
        }
        assert!((s.target_scale() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_scale_clamps_to_min() {
        let mut ctx = Collaborators::new();
        let mut s = shape(&mut ctx);
        let id = s.id();
        for _ in 0..10 {
            s.handle_gesture(&GestureEvent::Scale { target: id, factor: 0.5 }, &mut ctx);
        }
        assert!((s.target_scale() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_events_for_other_targets_ignored() {
        let mut ctx = Collaborators::new();
        let mut s = shape(&mut ctx);
        let before = s.instance().color;
        s.handle_gesture(
            &GestureEvent::DoubleTap { target: Uuid::new_v4() },
            &mut ctx,
        );
        s.handle_gesture(
            &GestureEvent::Scale { target: Uuid::new_v4(), factor: 1.5 },
            &mut ctx,
        );
        assert_eq!(s.instance().color, before);
        assert!((s.target_scale() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_double_tap_changes_color_and_bounces() {
        let mut ctx = Collaborators::new();
        let mut s = shape(&mut ctx);
        let id = s.id();
        let before = s.instance().color;
        s.handle_gesture(&GestureEvent::DoubleTap { target: id }, &mut ctx);
        assert_ne!(s.instance().color, before);

        s.update(0.05);
        assert!(s.instance().scale > 1.0);

        // The bounce settles back to the smoothed scale.
        for _ in 0..10 {
            s.update(0.05);
        }
        assert!((s.instance().scale - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_rotation_eases_toward_target() {
        let mut ctx = Collaborators::new();
        let mut s = shape(&mut ctx);
        let id = s.id();
        s.handle_gesture(&GestureEvent::DragRotate { target: id, amount: 90.0 }, &mut ctx);
        let target = 90.0_f64.to_radians();
        assert!((s.target_rotation() - target).abs() < 1e-9);

        s.update(1.0 / 60.0);
        let after_one = s.instance().rotation;
        assert!(after_one > 0.0 && after_one < target);

        for _ in 0..600 {
            s.update(1.0 / 60.0);
        }
        assert!((s.instance().rotation - target).abs() < 1e-3);
    }

    #[test]
    fn test_dissolve_runs_to_exact_end() {
        let mut ctx = Collaborators::new();
        let mut s = shape(&mut ctx);
        s.start_dissolve(0.5);
        let mut completions = 0;
        for _ in 0..20 {
            s.update(0.05);
            if s.take_dissolve_finished() {
                completions += 1;
            }
        }
        assert_eq!(completions, 1);
        assert_eq!(s.instance().dissolve_amount, 1.0);
    }

    #[test]
    fn test_new_dissolve_cancels_previous() {
        let mut ctx = Collaborators::new();
        let mut s = shape(&mut ctx);
        s.start_dissolve(0.5);
        s.update(0.1);
        s.start_rematerialize(0.2);
        let mut completions = 0;
        for _ in 0..10 {
            s.update(0.05);
            if s.take_dissolve_finished() {
                completions += 1;
            }
        }
        // Only the replacement animation completes, toward its own end.
        assert_eq!(completions, 1);
        assert_eq!(s.instance().dissolve_amount, 0.0);
    }

    #[test]
    fn test_reset_transform() {
        let mut ctx = Collaborators::new();
        let mut s = shape(&mut ctx);
        let id = s.id();
        s.handle_gesture(&GestureEvent::DragRotate { target: id, amount: 45.0 }, &mut ctx);
        s.handle_gesture(&GestureEvent::Scale { target: id, factor: 1.8 }, &mut ctx);
        s.reset_transform();
        assert_eq!(s.target_rotation(), 0.0);
        assert!((s.target_scale() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_material_lifecycle() {
        let mut ctx = Collaborators::new();
        let mut s = shape(&mut ctx);
        assert_eq!(ctx.materials.len(), 1);
        s.release_resources(&mut ctx.materials);
        assert_eq!(ctx.materials.len(), 0);
        // A second call must not disturb other owners' materials.
        ctx.materials.acquire(ShapeKind::Square, Uuid::new_v4());
        s.release_resources(&mut ctx.materials);
        assert_eq!(ctx.materials.len(), 1);
    }
}
