//! Equilateral triangle outline geometry.

use std::f64::consts::PI;

use kurbo::Point;

/// Equilateral triangle vertices, centered on the circumcenter with the
/// apex straight up (screen coordinates, y grows downward).
pub(crate) fn vertices(circumradius: f64) -> Vec<Point> {
    (0..3)
        .map(|i| {
            let angle = PI / 2.0 + i as f64 * 2.0 * PI / 3.0;
            Point::new(circumradius * angle.cos(), -circumradius * angle.sin())
        })
        .collect()
}
