//! Collaborator interfaces: visual effects, audio, and the injected bundle.
//!
//! The engine never reaches for globals; every external collaborator is
//! handed in once at construction and threaded through as `&mut
//! Collaborators`. Sinks are optional and fire-and-forget: a missing sink
//! degrades the feature, never the interaction loop.

use kurbo::{Point, Size};
use peniko::Color;

use crate::material::MaterialCache;
use crate::shapes::ShapeFactory;

/// Sound effects the demo can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundKind {
    ShapeChange,
    ButtonClick,
    Rotate,
    Scale,
}

/// Particle/outline effect triggers.
pub trait VisualEffectSink {
    /// Burst of particles at `position` tinted with `color`.
    fn play_burst(&mut self, position: Point, color: Color, size: f64, rainbow: bool);

    /// Outline of `count` particles tracing a shape's bounding box.
    fn play_outline(&mut self, position: Point, bounding_size: Size, color: Color, count: u32);
}

/// Sound playback.
pub trait AudioSink {
    fn play(&mut self, kind: SoundKind);
}

/// The collaborator bundle injected into the engine.
pub struct Collaborators {
    pub effects: Option<Box<dyn VisualEffectSink>>,
    pub audio: Option<Box<dyn AudioSink>>,
    pub materials: MaterialCache,
    pub factory: ShapeFactory,
}

impl Default for Collaborators {
    fn default() -> Self {
        Self::new()
    }
}

impl Collaborators {
    /// Bundle with no sinks registered (fully degraded path).
    pub fn new() -> Self {
        Self {
            effects: None,
            audio: None,
            materials: MaterialCache::new(),
            factory: ShapeFactory::new(),
        }
    }

    pub fn with_effects(mut self, effects: Box<dyn VisualEffectSink>) -> Self {
        self.effects = Some(effects);
        self
    }

    pub fn with_audio(mut self, audio: Box<dyn AudioSink>) -> Self {
        self.audio = Some(audio);
        self
    }

    pub fn with_factory(mut self, factory: ShapeFactory) -> Self {
        self.factory = factory;
        self
    }

    pub fn has_effects(&self) -> bool {
        self.effects.is_some()
    }

    /// Fire a particle burst if a visual sink is registered.
    pub fn play_burst(&mut self, position: Point, color: Color, size: f64, rainbow: bool) {
        if let Some(effects) = self.effects.as_mut() {
            effects.play_burst(position, color, size, rainbow);
        }
    }

    /// Fire an outline effect if a visual sink is registered.
    pub fn play_outline(
        &mut self,
        position: Point,
        bounding_size: Size,
        color: Color,
        count: u32,
    ) {
        if let Some(effects) = self.effects.as_mut() {
            effects.play_outline(position, bounding_size, color, count);
        }
    }

    /// Play a sound if an audio sink is registered.
    pub fn play_sound(&mut self, kind: SoundKind) {
        if let Some(audio) = self.audio.as_mut() {
            audio.play(kind);
        }
    }
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators")
            .field("effects", &self.effects.is_some())
            .field("audio", &self.audio.is_some())
            .field("materials", &self.materials)
            .field("factory", &self.factory)
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Recording sinks shared by the engine tests.

    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// One recorded visual-effect call.
    #[derive(Debug, Clone, PartialEq)]
    pub enum EffectCall {
        Burst { position: Point, size: f64 },
        Outline { position: Point, count: u32 },
    }

    #[derive(Default)]
    pub struct RecordingEffects {
        pub calls: Rc<RefCell<Vec<EffectCall>>>,
    }

    impl RecordingEffects {
        pub fn new() -> (Box<dyn VisualEffectSink>, Rc<RefCell<Vec<EffectCall>>>) {
            let calls = Rc::new(RefCell::new(Vec::new()));
            let sink = RecordingEffects {
                calls: Rc::clone(&calls),
            };
            (Box::new(sink), calls)
        }
    }

    impl VisualEffectSink for RecordingEffects {
        fn play_burst(&mut self, position: Point, _color: Color, size: f64, _rainbow: bool) {
            self.calls
                .borrow_mut()
                .push(EffectCall::Burst { position, size });
        }

        fn play_outline(
            &mut self,
            position: Point,
            _bounding_size: Size,
            _color: Color,
            count: u32,
        ) {
            self.calls
                .borrow_mut()
                .push(EffectCall::Outline { position, count });
        }
    }

    #[derive(Default)]
    pub struct RecordingAudio {
        pub sounds: Rc<RefCell<Vec<SoundKind>>>,
    }

    impl RecordingAudio {
        pub fn new() -> (Box<dyn AudioSink>, Rc<RefCell<Vec<SoundKind>>>) {
            let sounds = Rc::new(RefCell::new(Vec::new()));
            let sink = RecordingAudio {
                sounds: Rc::clone(&sounds),
            };
            (Box::new(sink), sounds)
        }
    }

    impl AudioSink for RecordingAudio {
        fn play(&mut self, kind: SoundKind) {
            self.sounds.borrow_mut().push(kind);
        }
    }
}
