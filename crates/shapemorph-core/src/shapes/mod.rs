//! Shape kinds, instances, and the shape factory.

mod hexagon;
mod square;
mod triangle;

use std::collections::HashMap;

use kurbo::{Affine, BezPath, Point, Rect, Shape as KurboShape, Size};
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for shape instances.
///
/// Doubles as the opaque gesture target handle and as the owner identity
/// for cached per-instance materials.
pub type ShapeId = Uuid;

/// Circumradius of a freshly created shape, in screen pixels.
pub const BASE_RADIUS: f64 = 50.0;

/// The three shape kinds the demo can morph between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ShapeKind {
    #[default]
    Hexagon,
    Square,
    Triangle,
}

impl ShapeKind {
    /// Cycle to the next kind (menu order).
    pub fn next(self) -> Self {
        match self {
            ShapeKind::Hexagon => ShapeKind::Square,
            ShapeKind::Square => ShapeKind::Triangle,
            ShapeKind::Triangle => ShapeKind::Hexagon,
        }
    }

    /// Outline vertices at `BASE_RADIUS`, centered on the origin.
    pub fn base_vertices(&self) -> Vec<Point> {
        match self {
            ShapeKind::Hexagon => hexagon::vertices(BASE_RADIUS),
            ShapeKind::Square => square::vertices(BASE_RADIUS),
            ShapeKind::Triangle => triangle::vertices(BASE_RADIUS),
        }
    }

    /// Closed outline path at `BASE_RADIUS`, centered on the origin.
    pub fn base_path(&self) -> BezPath {
        polygon_path(&self.base_vertices())
    }
}

/// Build a closed polygon path from its vertices.
pub(crate) fn polygon_path(vertices: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    if let Some((first, rest)) = vertices.split_first() {
        path.move_to(*first);
        for v in rest {
            path.line_to(*v);
        }
        path.close_path();
    }
    path
}

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    /// Convert from HSV (`hue` in degrees, `saturation`/`value` in [0, 1]).
    pub fn from_hsv(hue: f64, saturation: f64, value: f64) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let c = value * saturation;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = value - c;
        Self::new(
            ((r + m) * 255.0).round() as u8,
            ((g + m) * 255.0).round() as u8,
            ((b + m) * 255.0).round() as u8,
            255,
        )
    }
}

impl From<Color> for Rgba {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<Rgba> for Color {
    fn from(color: Rgba) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Pick a pseudo-random vivid color.
///
/// Uses a counter + hash approach (splitmix32-like) rather than an RNG, so
/// the sequence is deterministic within a run and works on all platforms.
pub fn random_color() -> Rgba {
    use std::sync::atomic::{AtomicU32, Ordering};

    static COLOR_COUNTER: AtomicU32 = AtomicU32::new(1);

    let counter = COLOR_COUNTER.fetch_add(1, Ordering::Relaxed);

    let mut x = counter.wrapping_mul(0x9E3779B9);
    x ^= x >> 16;
    x = x.wrapping_mul(0x85EBCA6B);
    x ^= x >> 13;
    x = x.wrapping_mul(0xC2B2AE35);
    x ^= x >> 16;

    let hue = (x % 360) as f64;
    let saturation = 0.6 + ((x >> 9) % 100) as f64 / 250.0;
    let value = 0.75 + ((x >> 17) % 100) as f64 / 400.0;
    Rgba::from_hsv(hue, saturation, value)
}

/// A live shape in the scene.
///
/// Carries the transform the controller animates and the dissolve amount
/// the morph transition drives (0 = fully visible, 1 = fully hidden).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeInstance {
    id: ShapeId,
    pub kind: ShapeKind,
    /// Center position in screen coordinates.
    pub position: Point,
    /// Rotation in radians (around center).
    pub rotation: f64,
    /// Uniform scale relative to `BASE_RADIUS`.
    pub scale: f64,
    /// Fill color.
    pub color: Rgba,
    /// Dissolve amount in [0, 1].
    pub dissolve_amount: f64,
}

impl ShapeInstance {
    /// Create an instance with default transform and a fresh random color.
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            position: Point::ZERO,
            rotation: 0.0,
            scale: 1.0,
            color: random_color(),
            dissolve_amount: 0.0,
        }
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    /// Local-to-screen transform.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.position.to_vec2())
            * Affine::rotate(self.rotation)
            * Affine::scale(self.scale)
    }

    /// Outline path in screen coordinates.
    pub fn path(&self) -> BezPath {
        let mut path = self.kind.base_path();
        path.apply_affine(self.transform());
        path
    }

    /// Axis-aligned bounding box in screen coordinates.
    pub fn bounds(&self) -> Rect {
        self.path().bounding_box()
    }

    /// Bounding box size in screen coordinates.
    pub fn size(&self) -> Size {
        self.bounds().size()
    }

    /// Check if a screen point lies inside the shape.
    pub fn hit_test(&self, point: Point) -> bool {
        self.path().contains(point)
    }
}

/// Constructor for a custom shape variant.
pub type ShapeConstructor = Box<dyn Fn() -> ShapeInstance + Send + Sync>;

/// Creates shape instances by kind.
///
/// A constructor can be registered per kind; without one, `create` falls
/// back to the built-in primitive, so creation always succeeds.
#[derive(Default)]
pub struct ShapeFactory {
    constructors: HashMap<ShapeKind, ShapeConstructor>,
}

impl ShapeFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a custom constructor for a kind.
    pub fn register(&mut self, kind: ShapeKind, constructor: ShapeConstructor) {
        self.constructors.insert(kind, constructor);
    }

    /// Create an instance of the given kind.
    pub fn create(&self, kind: ShapeKind) -> ShapeInstance {
        match self.constructors.get(&kind) {
            Some(constructor) => constructor(),
            None => ShapeInstance::new(kind),
        }
    }
}

impl std::fmt::Debug for ShapeFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShapeFactory")
            .field("registered", &self.constructors.keys().collect::<Vec<_>>())
            .finish()
    }
}
