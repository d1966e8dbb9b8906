//! Shape types and the geometry builder that derives a shape from the
//! ordered vertex list.

use crate::geo::{LatLng, LatLngBounds, haversine_distance};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// The kind of shape being drawn. Fixed for the lifetime of one shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeType {
    Point,
    Line,
    Polygon,
    Rectangle,
    Circle,
}

impl ShapeType {
    /// Minimum number of vertices before the shape materializes.
    pub fn min_nodes(&self) -> usize {
        match self {
            ShapeType::Point => 1,
            ShapeType::Line => 2,
            ShapeType::Polygon => 3,
            ShapeType::Rectangle => 2,
            ShapeType::Circle => 2,
        }
    }

    /// Whether vertices can be inserted on an edge of the completed shape.
    pub fn supports_edge_insertion(&self) -> bool {
        matches!(self, ShapeType::Line | ShapeType::Polygon)
    }

    /// Whether edge distance wraps from the last vertex back to the first.
    pub fn closes_ring(&self) -> bool {
        matches!(self, ShapeType::Polygon)
    }
}

/// The derived geometric primitive for the current vertex list.
///
/// Rebuilt from scratch on every structural change; never mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// A single coordinate. The shape is the node itself.
    Point(LatLng),
    /// An open polyline through the vertices in order.
    Line(Vec<LatLng>),
    /// A closed ring: the first coordinate is repeated at the end.
    Polygon(Vec<LatLng>),
    /// Axis-aligned bounding box over the two defining corners.
    Rectangle(LatLngBounds),
    /// Center (node 0) plus great-circle radius to node 1.
    Circle { center: LatLng, radius_m: f64 },
}

impl Shape {
    /// Build the shape for the given type over the ordered vertex
    /// coordinates. Returns `None` below the type's minimum vertex count:
    /// an under-specified shape never materializes.
    pub fn build(shape_type: ShapeType, coords: &[LatLng]) -> Option<Shape> {
        if coords.len() < shape_type.min_nodes() {
            return None;
        }
        match shape_type {
            ShapeType::Point => Some(Shape::Point(coords[0])),
            ShapeType::Line => Some(Shape::Line(coords.to_vec())),
            ShapeType::Polygon => {
                let mut ring = coords.to_vec();
                ring.push(coords[0]);
                Some(Shape::Polygon(ring))
            }
            ShapeType::Rectangle => Some(Shape::Rectangle(LatLngBounds::from_corners(
                coords[0], coords[1],
            ))),
            ShapeType::Circle => Some(Shape::Circle {
                center: coords[0],
                radius_m: haversine_distance(coords[0], coords[1]),
            }),
        }
    }
}

/// Distance from a point to a line segment (a→b) in pixel space.
///
/// Projects the query point onto the segment's carrier line and clamps the
/// projection parameter to [0,1], so queries beyond an endpoint measure to
/// that endpoint. Coincident endpoints degrade to point-to-point distance.
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = kurbo::Vec2::new(b.x - a.x, b.y - a.y);
    let pv = kurbo::Vec2::new(point.x - a.x, point.y - a.y);
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = Point::new(a.x + t * seg.x, a.y + t * seg.y);
    ((point.x - proj.x).powi(2) + (point.y - proj.y).powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_nodes_per_type() {
        assert_eq!(ShapeType::Point.min_nodes(), 1);
        assert_eq!(ShapeType::Line.min_nodes(), 2);
        assert_eq!(ShapeType::Polygon.min_nodes(), 3);
        assert_eq!(ShapeType::Rectangle.min_nodes(), 2);
        assert_eq!(ShapeType::Circle.min_nodes(), 2);
    }

    #[test]
    fn test_build_below_minimum_is_none() {
        let two = [LatLng::new(0.0, 0.0), LatLng::new(1.0, 1.0)];
        assert!(Shape::build(ShapeType::Polygon, &two).is_none());
        assert!(Shape::build(ShapeType::Line, &two[..1]).is_none());
        assert!(Shape::build(ShapeType::Circle, &two[..1]).is_none());
        assert!(Shape::build(ShapeType::Point, &[]).is_none());
    }

    #[test]
    fn test_build_polygon_closes_ring() {
        let coords = [
            LatLng::new(0.0, 0.0),
            LatLng::new(0.0, 1.0),
            LatLng::new(1.0, 1.0),
        ];
        match Shape::build(ShapeType::Polygon, &coords) {
            Some(Shape::Polygon(ring)) => {
                assert_eq!(ring.len(), 4);
                assert_eq!(ring[0], ring[3]);
            }
            other => panic!("expected polygon, got {other:?}"),
        }
    }

    #[test]
    fn test_build_rectangle_normalizes_corners() {
        let coords = [LatLng::new(20.0, 20.0), LatLng::new(10.0, 10.0)];
        match Shape::build(ShapeType::Rectangle, &coords) {
            Some(Shape::Rectangle(bounds)) => {
                assert!((bounds.south() - 10.0).abs() < f64::EPSILON);
                assert!((bounds.north() - 20.0).abs() < f64::EPSILON);
            }
            other => panic!("expected rectangle, got {other:?}"),
        }
    }

    #[test]
    fn test_build_circle_radius() {
        let coords = [LatLng::new(0.0, 0.0), LatLng::new(0.0, 1.0)];
        match Shape::build(ShapeType::Circle, &coords) {
            Some(Shape::Circle { center, radius_m }) => {
                assert_eq!(center, coords[0]);
                assert!((radius_m - 111_195.0).abs() < 100.0, "got {radius_m}");
            }
            other => panic!("expected circle, got {other:?}"),
        }
    }

    #[test]
    fn test_segment_dist_interior_projection() {
        let d = point_to_segment_dist(
            Point::new(0.0, 5.0),
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
        );
        assert!((d - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_segment_dist_clamped_to_endpoint() {
        let d = point_to_segment_dist(
            Point::new(-5.0, 0.0),
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
        );
        assert!((d - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_segment_dist_degenerate_segment() {
        let d = point_to_segment_dist(
            Point::new(3.0, 4.0),
            Point::new(0.0, 0.0),
            Point::new(0.0, 0.0),
        );
        assert!((d - 5.0).abs() < f64::EPSILON);
    }
}
