//! Ribbon geometry.
//!
//! A segment is drawn as a cubic bezier between its endpoints. The host only
//! stores endpoints and end tangents; the two middle control points sit one
//! third of the chord length along each tangent, the same construction the
//! host uses for its own segment curves.

use gridlight_core::graph::{Point, SegmentGeometry};

/// Cubic bezier control points of one segment ribbon, plus its deck
/// elevation for clipping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ribbon {
    pub a: Point,
    pub b: Point,
    pub c: Point,
    pub d: Point,
    pub elevation: f32,
}

impl Ribbon {
    /// Build the draw curve from live segment geometry.
    pub fn from_geometry(geometry: &SegmentGeometry) -> Self {
        let dx = geometry.end.x - geometry.start.x;
        let dy = geometry.end.y - geometry.start.y;
        let chord = (dx * dx + dy * dy).sqrt();
        let reach = chord / 3.0;

        let b = Point::new(
            geometry.start.x + geometry.start_dir.x * reach,
            geometry.start.y + geometry.start_dir.y * reach,
        );
        let c = Point::new(
            geometry.end.x + geometry.end_dir.x * reach,
            geometry.end.y + geometry.end_dir.y * reach,
        );

        Self {
            a: geometry.start,
            b,
            c,
            d: geometry.end,
            elevation: geometry.elevation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_straight_segment_control_points_on_chord() {
        let geometry =
            SegmentGeometry::straight(Point::new(0.0, 0.0), Point::new(30.0, 0.0), 4.0);
        let ribbon = Ribbon::from_geometry(&geometry);
        assert_eq!(ribbon.a, Point::new(0.0, 0.0));
        assert_eq!(ribbon.b, Point::new(10.0, 0.0));
        assert_eq!(ribbon.c, Point::new(20.0, 0.0));
        assert_eq!(ribbon.d, Point::new(30.0, 0.0));
        assert_eq!(ribbon.elevation, 0.0);
    }

    #[test]
    fn test_curved_segment_follows_tangents() {
        // Right-angle corner: start heading +x, end heading +y
        let geometry = SegmentGeometry {
            start: Point::new(0.0, 0.0),
            end: Point::new(30.0, 30.0),
            start_dir: Point::new(1.0, 0.0),
            end_dir: Point::new(0.0, -1.0),
            elevation: 12.0,
            half_width: 4.0,
        };
        let ribbon = Ribbon::from_geometry(&geometry);
        assert!(ribbon.b.x > 0.0 && ribbon.b.y == 0.0);
        assert!(ribbon.c.x == 30.0 && ribbon.c.y < 30.0);
        assert_eq!(ribbon.elevation, 12.0);
    }
}
