//! GeoJSON codec: bidirectional mapping between the node list and GeoJSON
//! geometry objects, with the shape-specific encodings (rectangles as
//! 5-position rings, circles as a point plus an out-of-band radius).

use crate::geo::{LatLng, destination};
use crate::shapes::{Shape, ShapeType};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// A GeoJSON position: `[longitude, latitude]`. Note the flip relative to
/// the editor's internal lat-first convention.
pub type Position = [f64; 2];

/// Errors from decoding GeoJSON values.
#[derive(Debug, Error)]
pub enum GeoJsonError {
    #[error("invalid GeoJSON: {0}")]
    Invalid(#[from] serde_json::Error),
    #[error("GeoJSON value has no \"type\" member")]
    MissingType,
    #[error("unsupported geometry type: {0}")]
    UnsupportedType(String),
}

/// The subset of GeoJSON geometry the editor speaks.
///
/// `Point` carries an optional non-standard `radius` member (meters): a
/// point with a radius round-trips a circle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point {
        coordinates: Position,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        radius: Option<f64>,
    },
    LineString {
        coordinates: Vec<Position>,
    },
    Polygon {
        coordinates: Vec<Vec<Position>>,
    },
}

fn to_position(latlng: LatLng) -> Position {
    [latlng.lng, latlng.lat]
}

fn to_latlng(position: Position) -> LatLng {
    LatLng::new(position[1], position[0])
}

impl Geometry {
    /// Encode a derived shape as GeoJSON.
    pub fn from_shape(shape: &Shape) -> Geometry {
        match shape {
            Shape::Point(latlng) => Geometry::Point {
                coordinates: to_position(*latlng),
                radius: None,
            },
            Shape::Line(coords) => Geometry::LineString {
                coordinates: coords.iter().copied().map(to_position).collect(),
            },
            Shape::Polygon(ring) => Geometry::Polygon {
                coordinates: vec![ring.iter().copied().map(to_position).collect()],
            },
            Shape::Rectangle(bounds) => {
                let (w, s) = (bounds.west(), bounds.south());
                let (e, n) = (bounds.east(), bounds.north());
                Geometry::Polygon {
                    coordinates: vec![vec![[w, s], [w, n], [e, n], [e, s], [w, s]]],
                }
            }
            Shape::Circle { center, radius_m } => Geometry::Point {
                coordinates: to_position(*center),
                radius: Some(*radius_m),
            },
        }
    }

    /// Decode a JSON value, distinguishing an unsupported `"type"` (which
    /// importers ignore) from structurally broken input.
    pub fn from_value(value: &Value) -> Result<Geometry, GeoJsonError> {
        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or(GeoJsonError::MissingType)?;
        match kind {
            "Point" | "LineString" | "Polygon" => Ok(serde_json::from_value(value.clone())?),
            other => Err(GeoJsonError::UnsupportedType(other.to_string())),
        }
    }

    /// Resolve this geometry to the editing shape type and the defining
    /// node coordinates, undoing the shape-specific encodings:
    ///
    /// - a 5-position polygon ring is a rectangle, reconstructed from ring
    ///   positions 0 and 2 only (a rotated ring collapses to its
    ///   axis-aligned box);
    /// - any other polygon drops the closing duplicate position;
    /// - a point with a `radius` is a circle whose second defining node is
    ///   synthesized due east of the center;
    /// - returns `None` for a polygon without any ring.
    pub fn resolve_nodes(&self) -> Option<(ShapeType, Vec<LatLng>)> {
        match self {
            Geometry::Point {
                coordinates,
                radius: Some(radius_m),
            } => {
                let center = to_latlng(*coordinates);
                let rim = destination(center, 90.0, *radius_m);
                Some((ShapeType::Circle, vec![center, rim]))
            }
            Geometry::Point {
                coordinates,
                radius: None,
            } => Some((ShapeType::Point, vec![to_latlng(*coordinates)])),
            Geometry::LineString { coordinates } => Some((
                ShapeType::Line,
                coordinates.iter().copied().map(to_latlng).collect(),
            )),
            Geometry::Polygon { coordinates } => {
                let ring = coordinates.first()?;
                if ring.len() == 5 {
                    Some((
                        ShapeType::Rectangle,
                        vec![to_latlng(ring[0]), to_latlng(ring[2])],
                    ))
                } else {
                    let open = ring.len().saturating_sub(1);
                    Some((
                        ShapeType::Polygon,
                        ring[..open].iter().copied().map(to_latlng).collect(),
                    ))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::{LatLngBounds, haversine_distance};
    use serde_json::json;

    #[test]
    fn test_point_encoding_is_lng_lat() {
        let geom = Geometry::from_shape(&Shape::Point(LatLng::new(10.0, 20.0)));
        let value = serde_json::to_value(&geom).unwrap();
        assert_eq!(value, json!({"type": "Point", "coordinates": [20.0, 10.0]}));
    }

    #[test]
    fn test_plain_point_has_no_radius_member() {
        let geom = Geometry::from_shape(&Shape::Point(LatLng::new(1.0, 2.0)));
        let value = serde_json::to_value(&geom).unwrap();
        assert!(value.get("radius").is_none());
    }

    #[test]
    fn test_rectangle_encodes_five_position_ring() {
        let bounds =
            LatLngBounds::from_corners(LatLng::new(10.0, 10.0), LatLng::new(20.0, 20.0));
        let geom = Geometry::from_shape(&Shape::Rectangle(bounds));
        let value = serde_json::to_value(&geom).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "Polygon",
                "coordinates": [[
                    [10.0, 10.0], [10.0, 20.0], [20.0, 20.0], [20.0, 10.0], [10.0, 10.0]
                ]]
            })
        );
    }

    #[test]
    fn test_circle_encodes_point_with_radius() {
        let geom = Geometry::from_shape(&Shape::Circle {
            center: LatLng::new(0.0, 0.0),
            radius_m: 1234.5,
        });
        let value = serde_json::to_value(&geom).unwrap();
        assert_eq!(value["type"], "Point");
        assert!((value["radius"].as_f64().unwrap() - 1234.5).abs() < 1e-9);
    }

    #[test]
    fn test_resolve_five_position_ring_as_rectangle() {
        let geom = Geometry::Polygon {
            coordinates: vec![vec![
                [10.0, 10.0],
                [10.0, 20.0],
                [20.0, 20.0],
                [20.0, 10.0],
                [10.0, 10.0],
            ]],
        };
        let (shape_type, nodes) = geom.resolve_nodes().unwrap();
        assert_eq!(shape_type, ShapeType::Rectangle);
        assert_eq!(nodes, vec![LatLng::new(10.0, 10.0), LatLng::new(20.0, 20.0)]);
    }

    #[test]
    fn test_resolve_polygon_drops_closing_position() {
        let geom = Geometry::Polygon {
            coordinates: vec![vec![
                [0.0, 0.0],
                [1.0, 0.0],
                [1.0, 1.0],
                [0.0, 1.0],
                [0.5, 1.5],
                [0.0, 0.0],
            ]],
        };
        let (shape_type, nodes) = geom.resolve_nodes().unwrap();
        assert_eq!(shape_type, ShapeType::Polygon);
        assert_eq!(nodes.len(), 5);
        assert_eq!(nodes[0], LatLng::new(0.0, 0.0));
        assert_eq!(nodes[4], LatLng::new(1.5, 0.5));
    }

    #[test]
    fn test_resolve_point_with_radius_synthesizes_east_rim() {
        let geom = Geometry::Point {
            coordinates: [0.0, 0.0],
            radius: Some(50_000.0),
        };
        let (shape_type, nodes) = geom.resolve_nodes().unwrap();
        assert_eq!(shape_type, ShapeType::Circle);
        assert_eq!(nodes.len(), 2);
        assert!(nodes[1].lng > nodes[0].lng, "rim lies east of the center");
        let d = haversine_distance(nodes[0], nodes[1]);
        assert!((d - 50_000.0).abs() < 1.0, "got {d}");
    }

    #[test]
    fn test_from_value_rejects_unsupported_type() {
        let value = json!({"type": "MultiPolygon", "coordinates": []});
        match Geometry::from_value(&value) {
            Err(GeoJsonError::UnsupportedType(kind)) => assert_eq!(kind, "MultiPolygon"),
            other => panic!("expected unsupported type, got {other:?}"),
        }
    }

    #[test]
    fn test_from_value_missing_type() {
        let value = json!({"coordinates": [0.0, 0.0]});
        assert!(matches!(
            Geometry::from_value(&value),
            Err(GeoJsonError::MissingType)
        ));
    }

    #[test]
    fn test_geometry_serde_roundtrip() {
        let geom = Geometry::LineString {
            coordinates: vec![[0.0, 0.0], [1.0, 2.0], [3.0, 4.0]],
        };
        let value = serde_json::to_value(&geom).unwrap();
        let back = Geometry::from_value(&value).unwrap();
        assert_eq!(back, geom);
    }
}
