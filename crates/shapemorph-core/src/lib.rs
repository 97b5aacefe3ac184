//! ShapeMorph Core Library
//!
//! Platform-agnostic gesture recognition and shape-morph transition engine
//! for the interactive shape demo. Raw pointer input arrives as per-tick
//! [`PointerSnapshot`]s; the engine classifies gestures, applies smoothed
//! transforms to the active shape, and sequences dissolve/swap/
//! rematerialize transitions between shape kinds.

pub mod animation;
pub mod config;
pub mod controller;
pub mod effects;
pub mod engine;
pub mod gesture;
pub mod input;
pub mod material;
pub mod morph;
pub mod shapes;

pub use animation::{BounceAnim, ScalarAnim};
pub use config::{ConfigError, DemoConfig};
pub use controller::{InteractableShape, ShapeConfig};
pub use effects::{AudioSink, Collaborators, SoundKind, VisualEffectSink};
pub use engine::Engine;
pub use gesture::{GestureConfig, GestureEvent, GestureRecognizer};
pub use input::{PointerSnapshot, TouchPhase, TouchPoint};
pub use material::{MaterialCache, MaterialHandle};
pub use morph::{MorphConfig, MorphManager, MorphPhase, SwitchError};
pub use shapes::{Rgba, ShapeFactory, ShapeId, ShapeInstance, ShapeKind};
