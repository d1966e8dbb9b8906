//! Map surface contract: the host widget the editor collaborates with.

use crate::geo::LatLng;
use kurbo::{Point, Size, Vec2};

/// The capabilities the editor needs from its host map widget.
///
/// The host keeps rendering, tiles, and projection math to itself; the
/// editor only needs coordinate transforms, the viewport size, programmatic
/// panning, and a switch for the native pan-by-drag gesture. An
/// implementation missing any of these cannot be constructed, so a
/// contract violation is a compile error rather than a runtime failure.
pub trait MapSurface {
    /// Project a geographic coordinate to viewport pixels.
    fn latlng_to_pixel(&self, latlng: LatLng) -> Point;

    /// Unproject a viewport pixel position to a geographic coordinate.
    fn pixel_to_latlng(&self, pixel: Point) -> LatLng;

    /// Current viewport size in pixels.
    fn viewport_size(&self) -> Size;

    /// Pan the viewport by a pixel delta.
    fn pan_by(&mut self, delta: Vec2);

    /// Enable or disable the surface's native pan-by-drag gesture.
    ///
    /// The editor turns this off while drawing or dragging a vertex so the
    /// drag moves the vertex instead of the map.
    fn set_drag_panning(&mut self, enabled: bool);
}

/// A minimal equirectangular surface: a fixed pixels-per-degree scale plus
/// a pan offset, with y growing downward. Useful for tests and headless
/// hosts; real map widgets bring their own projection.
#[derive(Debug, Clone)]
pub struct FlatSurface {
    /// Pixels per degree of latitude/longitude.
    pub scale: f64,
    /// Pixel offset applied by panning.
    pub offset: Vec2,
    /// Viewport size in pixels.
    pub viewport: Size,
    /// Whether native drag-panning is currently enabled.
    pub drag_panning: bool,
}

impl FlatSurface {
    /// Create a surface with the given pixels-per-degree scale and viewport.
    pub fn new(scale: f64, viewport: Size) -> Self {
        Self {
            scale,
            offset: Vec2::ZERO,
            viewport,
            drag_panning: true,
        }
    }
}

impl Default for FlatSurface {
    fn default() -> Self {
        Self::new(10.0, Size::new(800.0, 600.0))
    }
}

impl MapSurface for FlatSurface {
    fn latlng_to_pixel(&self, latlng: LatLng) -> Point {
        Point::new(
            latlng.lng * self.scale + self.offset.x,
            -latlng.lat * self.scale + self.offset.y,
        )
    }

    fn pixel_to_latlng(&self, pixel: Point) -> LatLng {
        LatLng::new(
            -(pixel.y - self.offset.y) / self.scale,
            (pixel.x - self.offset.x) / self.scale,
        )
    }

    fn viewport_size(&self) -> Size {
        self.viewport
    }

    fn pan_by(&mut self, delta: Vec2) {
        self.offset -= delta;
    }

    fn set_drag_panning(&mut self, enabled: bool) {
        self.drag_panning = enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_surface_roundtrip() {
        let surface = FlatSurface::new(10.0, Size::new(800.0, 600.0));
        let latlng = LatLng::new(12.5, -3.25);
        let back = surface.pixel_to_latlng(surface.latlng_to_pixel(latlng));
        assert!((back.lat - latlng.lat).abs() < 1e-10);
        assert!((back.lng - latlng.lng).abs() < 1e-10);
    }

    #[test]
    fn test_flat_surface_pan_shifts_projection() {
        let mut surface = FlatSurface::new(10.0, Size::new(800.0, 600.0));
        let latlng = LatLng::new(0.0, 0.0);
        let before = surface.latlng_to_pixel(latlng);
        surface.pan_by(Vec2::new(25.0, -10.0));
        let after = surface.latlng_to_pixel(latlng);
        assert!((before.x - after.x - 25.0).abs() < 1e-10);
        assert!((before.y - after.y + 10.0).abs() < 1e-10);
    }

    #[test]
    fn test_drag_panning_toggle() {
        let mut surface = FlatSurface::default();
        assert!(surface.drag_panning);
        surface.set_drag_panning(false);
        assert!(!surface.drag_panning);
    }
}
