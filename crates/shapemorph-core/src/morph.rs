//! Shape-morph transition orchestration.
//!
//! One `MorphManager` owns one shape container. A switch request captures
//! the outgoing shape's position/color/size, then the state machine walks
//! Dissolving -> Swapping -> Rematerializing across ticks, driving the
//! visual-effect collaborators at each edge. The original's coroutine
//! yields are expressed as phases that simply return until their
//! completion condition is reached on a later tick.

use kurbo::{Point, Size};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::controller::{InteractableShape, ShapeConfig};
use crate::effects::Collaborators;
use crate::gesture::GestureEvent;
use crate::shapes::{Rgba, ShapeId, ShapeKind};

/// Particles in the outline effect fired at each transition edge.
const OUTLINE_PARTICLES: u32 = 100;
/// Burst size multiplier for the dissolve-out effect.
const DISSOLVE_BURST_SIZE: f64 = 2.0;
/// Burst size multiplier for the rematerialize effect.
const REMATERIALIZE_BURST_SIZE: f64 = 1.0;

/// Morph transition tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MorphConfig {
    /// Total transition seconds; each dissolve half takes half of this.
    pub transition_time: f64,
    /// Settle seconds between the swap and the rematerialize burst.
    pub swap_settle_time: f64,
    /// Whether transitions use the particle path at all.
    pub use_effects: bool,
    /// Whether transition bursts use the rainbow variant.
    pub use_rainbow: bool,
}

impl Default for MorphConfig {
    fn default() -> Self {
        Self {
            transition_time: 0.5,
            swap_settle_time: 0.1,
            use_effects: true,
            use_rainbow: true,
        }
    }
}

/// Phase of the morph state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MorphPhase {
    #[default]
    Idle,
    Dissolving,
    Swapping,
    Rematerializing,
}

/// Why a switch request was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SwitchError {
    #[error("a morph transition is already in flight")]
    Busy,
    #[error("shape is already {0:?}")]
    SameKind(ShapeKind),
}

/// In-flight transition bookkeeping.
#[derive(Debug, Clone)]
struct MorphTransition {
    phase: MorphPhase,
    prev_position: Point,
    prev_color: Rgba,
    prev_size: Size,
    pending_kind: ShapeKind,
    settle_elapsed: f64,
}

/// Owns the shape container and sequences morph transitions.
#[derive(Debug)]
pub struct MorphManager {
    current: Option<InteractableShape>,
    current_kind: ShapeKind,
    transition: Option<MorphTransition>,
    morph_config: MorphConfig,
    shape_config: ShapeConfig,
}

impl MorphManager {
    /// Create the container with its initial shape already materialized.
    pub fn new(
        initial_kind: ShapeKind,
        morph_config: MorphConfig,
        shape_config: ShapeConfig,
        ctx: &mut Collaborators,
    ) -> Self {
        let instance = ctx.factory.create(initial_kind);
        let current = InteractableShape::new(instance, shape_config.clone(), ctx);
        Self {
            current: Some(current),
            current_kind: initial_kind,
            transition: None,
            morph_config,
            shape_config,
        }
    }

    pub fn current(&self) -> Option<&InteractableShape> {
        self.current.as_ref()
    }

    pub fn current_mut(&mut self) -> Option<&mut InteractableShape> {
        self.current.as_mut()
    }

    pub fn current_kind(&self) -> ShapeKind {
        self.current_kind
    }

    pub fn phase(&self) -> MorphPhase {
        self.transition
            .as_ref()
            .map(|t| t.phase)
            .unwrap_or(MorphPhase::Idle)
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    /// Hit-test the container's shape at a screen point.
    pub fn hit_test(&self, point: Point) -> Option<ShapeId> {
        self.current
            .as_ref()
            .filter(|shape| shape.instance().hit_test(point))
            .map(|shape| shape.id())
    }

    /// Forward a gesture event to the current shape.
    pub fn handle_gesture(&mut self, event: &GestureEvent, ctx: &mut Collaborators) {
        if let Some(shape) = self.current.as_mut() {
            shape.handle_gesture(event, ctx);
        }
    }

    /// Reset the current shape's transform targets.
    pub fn reset_transform(&mut self) {
        if let Some(shape) = self.current.as_mut() {
            shape.reset_transform();
        }
    }

    /// Request a switch to `kind`.
    ///
    /// Dropped (with a typed error, never queued) while a transition is in
    /// flight or when the container already shows that kind; the caller may
    /// retry later.
    pub fn try_switch(&mut self, kind: ShapeKind, ctx: &mut Collaborators) -> Result<(), SwitchError> {
        if self.transition.is_some() {
            debug!("switch to {kind:?} dropped: transition in flight");
            return Err(SwitchError::Busy);
        }
        if kind == self.current_kind && self.current.is_some() {
            debug!("switch to {kind:?} dropped: already current");
            return Err(SwitchError::SameKind(kind));
        }

        let use_effects = self.morph_config.use_effects && ctx.has_effects();
        if !use_effects || self.current.is_none() {
            // Degraded path: no bursts, no animations, immediate swap.
            info!("switching {:?} -> {kind:?} (direct)", self.current_kind);
            if let Some(mut old) = self.current.take() {
                old.release_resources(&mut ctx.materials);
            }
            self.create_current(kind, None, ctx);
            return Ok(());
        }
        let Some(shape) = self.current.as_mut() else {
            return Ok(());
        };

        info!("morph transition {:?} -> {kind:?}", self.current_kind);
        let instance = shape.instance();
        let prev_position = instance.position;
        let prev_color = instance.color;
        let prev_size = instance.size();

        ctx.play_burst(
            prev_position,
            prev_color.into(),
            DISSOLVE_BURST_SIZE,
            self.morph_config.use_rainbow,
        );
        ctx.play_outline(prev_position, prev_size, prev_color.into(), OUTLINE_PARTICLES);
        shape.start_dissolve(self.morph_config.transition_time / 2.0);

        self.transition = Some(MorphTransition {
            phase: MorphPhase::Dissolving,
            prev_position,
            prev_color,
            prev_size,
            pending_kind: kind,
            settle_elapsed: 0.0,
        });
        Ok(())
    }

    /// Advance the current shape and the transition state machine.
    pub fn update(&mut self, dt: f64, ctx: &mut Collaborators) {
        if let Some(shape) = self.current.as_mut() {
            shape.update(dt);
        }

        match self.phase() {
            MorphPhase::Idle => {}
            MorphPhase::Dissolving => self.update_dissolving(ctx),
            MorphPhase::Swapping => self.update_swapping(dt, ctx),
            MorphPhase::Rematerializing => self.update_rematerializing(),
        }
    }

    /// Dissolving: wait for the outgoing shape's dissolve edge, then swap.
    fn update_dissolving(&mut self, ctx: &mut Collaborators) {
        let dissolved = self
            .current
            .as_mut()
            .is_some_and(|shape| shape.take_dissolve_finished());
        if !dissolved {
            return;
        }
        let Some(transition) = self.transition.as_ref() else {
            return;
        };
        let pending = transition.pending_kind;
        let restore = (transition.prev_position, transition.prev_color);
        debug!("dissolve complete, swapping to {pending:?}");

        if let Some(mut old) = self.current.take() {
            old.release_resources(&mut ctx.materials);
        }
        self.create_current(pending, Some(restore), ctx);
        if let Some(shape) = self.current.as_mut() {
            // The replacement starts hidden, ready to rematerialize.
            shape.instance_mut().dissolve_amount = 1.0;
        }
        if let Some(transition) = self.transition.as_mut() {
            transition.phase = MorphPhase::Swapping;
            transition.settle_elapsed = 0.0;
        }
    }

    /// Swapping: hold for the settle time, then kick off rematerialize.
    fn update_swapping(&mut self, dt: f64, ctx: &mut Collaborators) {
        let settle_time = self.morph_config.swap_settle_time;
        let Some(transition) = self.transition.as_mut() else {
            return;
        };
        transition.settle_elapsed += dt;
        if transition.settle_elapsed < settle_time {
            return;
        }
        let position = transition.prev_position;
        let color = transition.prev_color;
        let fallback_size = transition.prev_size;
        transition.phase = MorphPhase::Rematerializing;

        ctx.play_burst(
            position,
            color.into(),
            REMATERIALIZE_BURST_SIZE,
            self.morph_config.use_rainbow,
        );
        let size = self
            .current
            .as_ref()
            .map(|shape| shape.instance().size())
            .unwrap_or(fallback_size);
        ctx.play_outline(position, size, color.into(), OUTLINE_PARTICLES);
        if let Some(shape) = self.current.as_mut() {
            shape.start_rematerialize(self.morph_config.transition_time / 2.0);
        }
    }

    /// Rematerializing: wait for the incoming shape's animation edge.
    fn update_rematerializing(&mut self) {
        let rematerialized = self
            .current
            .as_mut()
            .is_some_and(|shape| shape.take_dissolve_finished());
        if rematerialized {
            self.transition = None;
            info!("morph transition complete: now {:?}", self.current_kind);
        }
    }

    /// Create a shape of `kind` through the factory and install it as the
    /// container's current shape, optionally restoring a captured
    /// position/color.
    fn create_current(
        &mut self,
        kind: ShapeKind,
        restore: Option<(Point, Rgba)>,
        ctx: &mut Collaborators,
    ) {
        let mut instance = ctx.factory.create(kind);
        if let Some((position, color)) = restore {
            instance.position = position;
            instance.color = color;
        }
        let shape = InteractableShape::new(instance, self.shape_config.clone(), ctx);
        self.current = Some(shape);
        self.current_kind = kind;
    }
}
