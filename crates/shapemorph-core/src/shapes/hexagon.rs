//! Hexagon outline geometry.

use std::f64::consts::PI;

use kurbo::Point;

/// Regular pointy-top hexagon vertices, centered on the origin.
///
/// The first vertex sits straight above the center; the rest follow
/// clockwise in screen coordinates (y grows downward).
pub(crate) fn vertices(circumradius: f64) -> Vec<Point> {
    (0..6)
        .map(|i| {
            let angle = PI / 2.0 + i as f64 * PI / 3.0;
            Point::new(circumradius * angle.cos(), -circumradius * angle.sin())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::polygon_path;
    use kurbo::Shape;

    #[test]
    fn test_vertex_count() {
        assert_eq!(vertices(50.0).len(), 6);
    }

    #[test]
    fn test_vertices_on_circumcircle() {
        for v in vertices(50.0) {
            assert!((v.to_vec2().hypot() - 50.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_top_vertex() {
        let v = vertices(50.0);
        assert!(v[0].x.abs() < 1e-9);
        assert!((v[0].y + 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_path_area() {
        // Regular hexagon area: 3*sqrt(3)/2 * r^2.
        let path = polygon_path(&vertices(1.0));
        let expected = 3.0 * 3.0_f64.sqrt() / 2.0;
        assert!((path.area().abs() - expected).abs() < 1e-9);
    }
}
