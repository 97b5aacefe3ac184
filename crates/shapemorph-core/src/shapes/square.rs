//! Square outline geometry.

use std::f64::consts::FRAC_1_SQRT_2;

use kurbo::Point;

/// Axis-aligned square vertices, centered on the origin.
///
/// `circumradius` is the distance from center to a corner, matching the
/// other kinds so morphing between shapes preserves apparent size.
pub(crate) fn vertices(circumradius: f64) -> Vec<Point> {
    let h = circumradius * FRAC_1_SQRT_2;
    vec![
        Point::new(-h, -h),
        Point::new(h, -h),
        Point::new(h, h),
        Point::new(-h, h),
    ]
}
