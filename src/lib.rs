//! geodraw: interactive shape drawing and editing for map surfaces.
//!
//! The editor owns one live shape at a time: an ordered list of draggable
//! vertex handles, a state machine for placing them, and a GeoJSON codec
//! with the usual map-widget encodings (rectangles as 5-position rings,
//! circles as a point with an out-of-band radius). The host map widget
//! implements [`MapSurface`] and keeps rendering, tiles, and projection
//! math to itself.

pub mod editor;
pub mod events;
pub mod geo;
pub mod geojson;
pub mod node;
pub mod options;
pub mod shapes;
pub mod surface;

pub use editor::ShapeEditor;
pub use events::{EditorEvent, EditorState, Subscribers};
pub use geo::{EARTH_RADIUS_M, LatLng, LatLngBounds, destination, haversine_distance};
pub use geojson::{GeoJsonError, Geometry};
pub use node::{Node, NodeId};
pub use options::{AutoPanOptions, EditorOptions, HaloOptions, NodeOptions, PathOptions, Rgba};
pub use shapes::{Shape, ShapeType, point_to_segment_dist};
pub use surface::{FlatSurface, MapSurface};
