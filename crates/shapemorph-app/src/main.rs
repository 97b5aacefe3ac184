//! Headless demo driver for the ShapeMorph engine.
//!
//! Feeds a scripted pointer stream through the engine at 60 Hz and logs
//! the recognized gestures, collaborator triggers, and morph phases. Pass
//! a JSON config path as the first argument to override the defaults.

use kurbo::{Point, Size};
use log::{info, warn};
use peniko::Color;

use shapemorph_core::{
    AudioSink, Collaborators, DemoConfig, Engine, GestureEvent, MorphPhase, PointerSnapshot,
    ShapeKind, SoundKind, TouchPhase, TouchPoint, VisualEffectSink,
};

const TICK: f64 = 1.0 / 60.0;

/// Visual-effect sink that logs each trigger.
struct LogEffects;

impl VisualEffectSink for LogEffects {
    fn play_burst(&mut self, position: Point, color: Color, size: f64, rainbow: bool) {
        let rgba = color.to_rgba8();
        info!(
            "burst at ({:.0}, {:.0}) size {size:.1} color #{:02x}{:02x}{:02x} rainbow={rainbow}",
            position.x, position.y, rgba.r, rgba.g, rgba.b
        );
    }

    fn play_outline(&mut self, position: Point, bounding_size: Size, _color: Color, count: u32) {
        info!(
            "outline at ({:.0}, {:.0}) bounds {:.0}x{:.0} particles={count}",
            position.x, position.y, bounding_size.width, bounding_size.height
        );
    }
}

/// Audio sink that logs each sound.
struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&mut self, kind: SoundKind) {
        info!("sound: {kind:?}");
    }
}

/// Drives the engine tick loop with a monotonically increasing clock.
struct Driver {
    engine: Engine,
    time: f64,
}

impl Driver {
    fn new(engine: Engine) -> Self {
        Self { engine, time: 0.0 }
    }

    fn step(&mut self, snapshot: PointerSnapshot) {
        for event in self.engine.tick(&snapshot, TICK) {
            match event {
                GestureEvent::Tap { .. } => info!("gesture: tap"),
                GestureEvent::DoubleTap { .. } => info!("gesture: double-tap"),
                GestureEvent::DragRotate { amount, .. } => {
                    info!("gesture: drag-rotate {amount:+.2}")
                }
                GestureEvent::Scale { factor, .. } => info!("gesture: scale x{factor:.3}"),
            }
        }
        self.time += TICK;
    }

    fn idle(&mut self, ticks: usize) {
        for _ in 0..ticks {
            self.step(PointerSnapshot::idle(self.time));
        }
    }

    fn mouse(&mut self, position: Point, pressed: bool) {
        self.step(PointerSnapshot::mouse(self.time, position, pressed));
    }

    fn wheel(&mut self, position: Point, delta: f64) {
        self.step(PointerSnapshot::wheel(self.time, position, delta));
    }

    fn touches(&mut self, contacts: Vec<TouchPoint>) {
        self.step(PointerSnapshot::touch(self.time, contacts));
    }

    /// Run idle ticks until the morph state machine returns to idle.
    fn run_morph_to_completion(&mut self) {
        let mut last_phase = MorphPhase::Idle;
        for _ in 0..120 {
            let phase = self.engine.phase();
            if phase != last_phase {
                info!("morph phase: {phase:?}");
                last_phase = phase;
            }
            self.step(PointerSnapshot::idle(self.time));
            if self.engine.phase() == MorphPhase::Idle && last_phase != MorphPhase::Idle {
                info!("morph phase: Idle");
                return;
            }
        }
        warn!("morph transition did not settle in time");
    }
}

fn load_config() -> DemoConfig {
    let Some(path) = std::env::args().nth(1) else {
        return DemoConfig::default();
    };
    match std::fs::read_to_string(&path) {
        Ok(json) => match DemoConfig::from_json(&json) {
            Ok(config) => {
                info!("loaded config from {path}");
                config
            }
            Err(err) => {
                warn!("ignoring config {path}: {err}");
                DemoConfig::default()
            }
        },
        Err(err) => {
            warn!("cannot read config {path}: {err}");
            DemoConfig::default()
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config();
    let collaborators = Collaborators::new()
        .with_effects(Box::new(LogEffects))
        .with_audio(Box::new(LogAudio));
    let mut driver = Driver::new(Engine::new(config, collaborators));

    let center = Point::ZERO;
    info!("-- double-tap the shape --");
    driver.mouse(center, true);
    driver.mouse(center, false);
    driver.mouse(center, true);
    driver.mouse(center, false);
    driver.idle(30);

    info!("-- drag to rotate --");
    driver.mouse(center, true);
    for i in 1..=10 {
        driver.mouse(Point::new(i as f64 * 4.0, 0.0), true);
    }
    driver.mouse(Point::new(40.0, 0.0), false);
    driver.idle(30);

    info!("-- wheel to scale up --");
    driver.mouse(center, true);
    driver.mouse(center, false);
    driver.wheel(center, 0.3);
    driver.idle(30);

    info!("-- pinch to scale down --");
    let pinch = |distance: f64, phase| {
        vec![
            TouchPoint::new(Point::new(-distance / 2.0, 0.0), phase),
            TouchPoint::new(Point::new(distance / 2.0, 0.0), phase),
        ]
    };
    driver.touches(pinch(80.0, TouchPhase::Began));
    driver.touches(pinch(60.0, TouchPhase::Moved));
    driver.touches(pinch(40.0, TouchPhase::Moved));
    driver.touches(pinch(40.0, TouchPhase::Ended));
    driver.idle(30);

    info!("-- morph hexagon -> square --");
    if let Err(err) = driver.engine.request_switch(ShapeKind::Square) {
        warn!("switch rejected: {err}");
    }
    // A second request while the transition runs is dropped by design.
    if let Err(err) = driver.engine.request_switch(ShapeKind::Triangle) {
        info!("concurrent switch dropped: {err}");
    }
    driver.run_morph_to_completion();

    info!("-- morph square -> triangle --");
    if let Err(err) = driver.engine.request_switch(ShapeKind::Triangle) {
        warn!("switch rejected: {err}");
    }
    driver.run_morph_to_completion();

    driver.engine.reset_transform();
    driver.idle(30);

    let manager = driver.engine.manager();
    if let Some(shape) = manager.current() {
        let instance = shape.instance();
        info!(
            "final shape: {:?} at ({:.0}, {:.0}) rotation {:.2} rad scale {:.2}",
            instance.kind, instance.position.x, instance.position.y, instance.rotation,
            instance.scale
        );
    }
}
