//! Geographic primitives: coordinates, bounds, and spherical distance.

use serde::{Deserialize, Serialize};

/// Mean earth radius in meters (spherical model).
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A geographic coordinate in degrees.
///
/// Stored latitude-first, which is the editor's internal convention.
/// GeoJSON output flips this to `[longitude, latitude]`; see the
/// `geojson` module.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    /// Latitude in degrees, positive north.
    pub lat: f64,
    /// Longitude in degrees, positive east.
    pub lng: f64,
}

impl LatLng {
    /// Create a new coordinate.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// An axis-aligned geographic bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    /// South-west corner (minimum latitude and longitude).
    pub south_west: LatLng,
    /// North-east corner (maximum latitude and longitude).
    pub north_east: LatLng,
}

impl LatLngBounds {
    /// Build the bounding box over two corners in any diagonal order.
    pub fn from_corners(a: LatLng, b: LatLng) -> Self {
        Self {
            south_west: LatLng::new(a.lat.min(b.lat), a.lng.min(b.lng)),
            north_east: LatLng::new(a.lat.max(b.lat), a.lng.max(b.lng)),
        }
    }

    /// South latitude of the box.
    pub fn south(&self) -> f64 {
        self.south_west.lat
    }

    /// North latitude of the box.
    pub fn north(&self) -> f64 {
        self.north_east.lat
    }

    /// West longitude of the box.
    pub fn west(&self) -> f64 {
        self.south_west.lng
    }

    /// East longitude of the box.
    pub fn east(&self) -> f64 {
        self.north_east.lng
    }
}

/// Great-circle distance between two coordinates in meters (haversine).
pub fn haversine_distance(a: LatLng, b: LatLng) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlng = (b.lng - a.lng).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}

/// Destination point on the sphere, starting at `origin` and travelling
/// `distance_m` meters along the given initial bearing (degrees clockwise
/// from north).
pub fn destination(origin: LatLng, bearing_deg: f64, distance_m: f64) -> LatLng {
    let delta = distance_m / EARTH_RADIUS_M;
    let theta = bearing_deg.to_radians();
    let lat1 = origin.lat.to_radians();
    let lng1 = origin.lng.to_radians();

    let lat2 = (lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * theta.cos()).asin();
    let lng2 = lng1
        + (theta.sin() * delta.sin() * lat1.cos()).atan2(delta.cos() - lat1.sin() * lat2.sin());

    LatLng::new(lat2.to_degrees(), lng2.to_degrees())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_from_corners_any_order() {
        let a = LatLngBounds::from_corners(LatLng::new(20.0, 10.0), LatLng::new(10.0, 20.0));
        let b = LatLngBounds::from_corners(LatLng::new(10.0, 20.0), LatLng::new(20.0, 10.0));
        assert_eq!(a, b);
        assert!((a.south() - 10.0).abs() < f64::EPSILON);
        assert!((a.north() - 20.0).abs() < f64::EPSILON);
        assert!((a.west() - 10.0).abs() < f64::EPSILON);
        assert!((a.east() - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_haversine_zero() {
        let p = LatLng::new(48.85, 2.35);
        assert!(haversine_distance(p, p) < 1e-9);
    }

    #[test]
    fn test_haversine_one_degree_meridian() {
        // One degree of latitude along a meridian is ~111.19 km on the
        // spherical model.
        let d = haversine_distance(LatLng::new(0.0, 0.0), LatLng::new(1.0, 0.0));
        assert!((d - 111_195.0).abs() < 100.0, "got {d}");
    }

    #[test]
    fn test_haversine_equator_degree() {
        let d = haversine_distance(LatLng::new(0.0, 0.0), LatLng::new(0.0, 1.0));
        assert!((d - 111_195.0).abs() < 100.0, "got {d}");
    }

    #[test]
    fn test_destination_due_east_on_equator() {
        let origin = LatLng::new(0.0, 0.0);
        let dist = 111_195.0;
        let dest = destination(origin, 90.0, dist);
        assert!(dest.lat.abs() < 1e-6, "stays on the equator, got {}", dest.lat);
        assert!((dest.lng - 1.0).abs() < 1e-3, "got {}", dest.lng);
    }

    #[test]
    fn test_destination_roundtrip_distance() {
        let origin = LatLng::new(45.0, 7.0);
        let dest = destination(origin, 90.0, 5_000.0);
        let d = haversine_distance(origin, dest);
        assert!((d - 5_000.0).abs() < 1.0, "got {d}");
    }
}
