//! The shape editor: drawing/editing state machine, vertex registry,
//! click routing, drag protocol, and GeoJSON import/export.

use crate::events::{EditorEvent, EditorState, EventListener, NodeCreateHook, Subscribers};
use crate::geo::LatLng;
use crate::geojson::Geometry;
use crate::node::{Node, NodeId};
use crate::options::EditorOptions;
use crate::shapes::{Shape, ShapeType, point_to_segment_dist};
use crate::surface::MapSurface;
use kurbo::{Point, Vec2};
use serde_json::Value;

/// Interactive editor for one shape on a map surface.
///
/// Owns the surface, the ordered vertex registry, the derived shape, and
/// the live preview polyline. At most one shape is live at a time; the
/// shape is rebuilt from the vertices on every structural change, never
/// mutated in place.
///
/// Hosts render from the read accessors in this order: [`Self::shape`],
/// then [`Self::preview`], then each node's halo, then the nodes
/// themselves, so vertex handles always sit on top.
pub struct ShapeEditor<S: MapSurface> {
    surface: S,
    options: EditorOptions,
    shape_type: Option<ShapeType>,
    state: EditorState,
    nodes: Vec<Node>,
    shape: Option<Shape>,
    preview: Option<Vec<LatLng>>,
    subscribers: Subscribers,
}

impl<S: MapSurface> ShapeEditor<S> {
    /// Create an editor over the given surface with default options.
    pub fn new(surface: S) -> Self {
        Self::with_options(surface, EditorOptions::default())
    }

    /// Create an editor with explicit options.
    pub fn with_options(surface: S, options: EditorOptions) -> Self {
        Self {
            surface,
            options,
            shape_type: None,
            state: EditorState::Idle,
            nodes: Vec::new(),
            shape: None,
            preview: None,
            subscribers: Subscribers::default(),
        }
    }

    /// Current state of the drawing/editing state machine.
    pub fn state(&self) -> EditorState {
        self.state
    }

    /// The shape type of the current session, if any.
    pub fn shape_type(&self) -> Option<ShapeType> {
        self.shape_type
    }

    /// Ordered vertex handles of the live shape.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// The derived shape, absent until the type's minimum vertex count is
    /// reached.
    pub fn shape(&self) -> Option<&Shape> {
        self.shape.as_ref()
    }

    /// The live preview polyline (placed vertices plus the cursor), only
    /// present while drawing.
    pub fn preview(&self) -> Option<&[LatLng]> {
        self.preview.as_deref()
    }

    /// Current editor options.
    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    /// The host surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the host surface.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Subscribe to editor events. Listeners run synchronously, in
    /// subscription order.
    pub fn on_event(&mut self, listener: EventListener) {
        self.subscribers.on_event(listener);
    }

    /// Subscribe to the before-node-create hook. Mutations of the option
    /// bag feed into the node about to be constructed.
    pub fn on_node_create(&mut self, hook: NodeCreateHook) {
        self.subscribers.on_node_create(hook);
    }

    /// Begin a new drawing session for the given shape type.
    ///
    /// Discards any existing shape and vertices, disables the surface's
    /// native pan-by-drag (drag gestures now move vertices), and
    /// transitions to Drawing.
    pub fn start_drawing(&mut self, shape_type: ShapeType) {
        self.discard_session();
        self.shape_type = Some(shape_type);
        self.surface.set_drag_panning(false);
        log::debug!("drawing session started: {shape_type:?}");
        self.set_state(EditorState::Drawing);
    }

    /// Discard the shape and all vertices and return to Idle. Re-enables
    /// native drag-panning.
    pub fn clear(&mut self) {
        self.discard_session();
        self.shape_type = None;
        self.surface.set_drag_panning(true);
        self.set_state(EditorState::Idle);
    }

    /// Export the current shape as GeoJSON, or `None` if no shape exists.
    pub fn get_geojson(&self) -> Option<Geometry> {
        self.shape.as_ref().map(Geometry::from_shape)
    }

    /// Export the current shape as a JSON value.
    pub fn geojson_value(&self) -> Option<Value> {
        self.get_geojson()
            .and_then(|geometry| serde_json::to_value(geometry).ok())
    }

    /// Replace the current shape with one decoded from GeoJSON.
    ///
    /// Clears existing state first, applies `overrides` to the editor
    /// options if given, then creates a vertex per resolved coordinate
    /// (running the before-node-create hooks for each) and rebuilds the
    /// shape. The editor ends up Idle with a completed shape.
    pub fn draw_from_geojson(&mut self, geometry: &Geometry, overrides: Option<EditorOptions>) {
        self.clear();
        if let Some(options) = overrides {
            self.options = options;
        }
        let Some((shape_type, coords)) = geometry.resolve_nodes() else {
            log::warn!("ignoring GeoJSON import: geometry has no usable coordinates");
            return;
        };
        self.shape_type = Some(shape_type);
        for latlng in coords {
            let node = self.make_node(latlng);
            self.nodes.push(node);
        }
        self.rebuild_shape();
        log::debug!(
            "imported {shape_type:?} with {} vertices from GeoJSON",
            self.nodes.len()
        );
    }

    /// Replace the current shape with one decoded from a raw JSON value.
    ///
    /// Unrecognized or malformed geometry clears prior state and is
    /// otherwise ignored.
    pub fn draw_from_json(&mut self, value: &Value, overrides: Option<EditorOptions>) {
        match Geometry::from_value(value) {
            Ok(geometry) => self.draw_from_geojson(&geometry, overrides),
            Err(err) => {
                self.clear();
                if let Some(options) = overrides {
                    self.options = options;
                }
                log::warn!("ignoring GeoJSON import: {err}");
            }
        }
    }

    /// Route a pointer click at the given viewport pixel position.
    ///
    /// Priority: idle edge insertion, then (while drawing) the per-type
    /// placement and completion rules. Clicks while Idle that do not hit
    /// an insertable edge are ignored.
    pub fn handle_click(&mut self, pixel: Point) {
        let latlng = self.surface.pixel_to_latlng(pixel);

        if self.state == EditorState::Idle {
            if let Some(shape_type) = self.shape_type {
                if shape_type.supports_edge_insertion()
                    && self.nodes.len() >= shape_type.min_nodes()
                {
                    self.try_insert_on_edge(shape_type, pixel, latlng);
                }
            }
            return;
        }

        let Some(shape_type) = self.shape_type else {
            return;
        };

        if shape_type == ShapeType::Point {
            if self.nodes.is_empty() {
                self.append_node(latlng);
                self.complete_shape();
            }
            return;
        }

        // Clicking near the last vertex finishes an open line.
        if shape_type == ShapeType::Line && self.nodes.len() >= 2 {
            if let Some(last) = self.nodes.last() {
                let last_pixel = self.surface.latlng_to_pixel(last.latlng);
                if last_pixel.distance(pixel) <= last.hit_radius() {
                    self.complete_shape();
                    return;
                }
            }
        }

        self.append_node(latlng);
        if shape_type != ShapeType::Line && self.nodes.len() >= shape_type.min_nodes() {
            self.complete_shape();
        }
    }

    /// Finish the drawing session: drop the preview edge, hand drag-panning
    /// back to the surface, and return to Idle.
    fn complete_shape(&mut self) {
        self.preview = None;
        self.surface.set_drag_panning(true);
        self.set_state(EditorState::Idle);
    }

    /// Update the live preview for a pointer move at the given viewport
    /// pixel position. Drawing state only; pans the viewport when the
    /// pointer enters an edge band.
    pub fn handle_pointer_move(&mut self, pixel: Point) {
        if self.state != EditorState::Drawing || self.nodes.is_empty() {
            return;
        }
        let Some(shape_type) = self.shape_type else {
            return;
        };
        let at_cap = match shape_type {
            ShapeType::Point => true,
            ShapeType::Polygon => self.nodes.len() >= 3,
            ShapeType::Rectangle | ShapeType::Circle => self.nodes.len() >= 2,
            ShapeType::Line => false,
        };
        if at_cap {
            return;
        }

        self.auto_pan(pixel);

        let cursor = self.surface.pixel_to_latlng(pixel);
        let mut line: Vec<LatLng> = self.nodes.iter().map(|n| n.latlng).collect();
        line.push(cursor);
        if shape_type == ShapeType::Polygon && self.nodes.len() >= 2 {
            if let Some(first) = self.nodes.first() {
                line.push(first.latlng);
            }
        }
        self.preview = Some(line);
    }

    /// Begin a drag gesture on the given vertex. Returns whether the drag
    /// started; only one drag may be in flight and non-interactive nodes
    /// refuse it.
    pub fn begin_node_drag(&mut self, id: NodeId) -> bool {
        if self.nodes.iter().any(|n| n.dragging) {
            return false;
        }
        let Some(node) = self.nodes.iter_mut().find(|n| n.id == id) else {
            return false;
        };
        if !node.options.interactive {
            return false;
        }
        node.dragging = true;
        self.surface.set_drag_panning(false);
        self.subscribers.emit(EditorEvent::DragStart { id });
        true
    }

    /// Move the dragged vertex to the given viewport pixel position and
    /// rebuild the shape. No-op when no drag is in flight.
    pub fn drag_to(&mut self, pixel: Point) {
        let latlng = self.surface.pixel_to_latlng(pixel);
        let Some(node) = self.nodes.iter_mut().find(|n| n.dragging) else {
            return;
        };
        node.latlng = latlng;
        self.rebuild_shape();
    }

    /// End the drag gesture: restore native drag-panning and emit the
    /// drag-end notification.
    pub fn end_node_drag(&mut self) {
        let Some(node) = self.nodes.iter_mut().find(|n| n.dragging) else {
            return;
        };
        node.dragging = false;
        let id = node.id;
        self.surface.set_drag_panning(true);
        self.subscribers.emit(EditorEvent::DragEnd { id });
    }

    /// Secondary action (e.g. right-click) on a vertex: at the type's
    /// minimum count removes the entire shape, above it removes just that
    /// vertex, preserving the order of the rest.
    pub fn remove_node(&mut self, id: NodeId) {
        let Some(shape_type) = self.shape_type else {
            return;
        };
        let Some(index) = self.nodes.iter().position(|n| n.id == id) else {
            return;
        };
        if self.nodes.len() <= shape_type.min_nodes() {
            self.clear();
            return;
        }
        let node = self.nodes.remove(index);
        if node.dragging {
            // The host's matching release will find no dragging node, so
            // restore panning here.
            self.surface.set_drag_panning(true);
        }
        self.rebuild_shape();
        log::debug!("removed vertex {index} of {:?}", shape_type);
        self.subscribers.emit(EditorEvent::NodeRemoved {
            id: node.id,
            latlng: node.latlng,
        });
    }

    fn set_state(&mut self, state: EditorState) {
        if self.state == state {
            return;
        }
        log::debug!("editor state: {:?} -> {state:?}", self.state);
        self.state = state;
        self.subscribers.emit(EditorEvent::StateChanged(state));
    }

    /// Drop the session's vertices, shape, and preview. If a drag gesture
    /// is in flight, it is terminated and native panning restored, so a
    /// clear or new session mid-drag cannot leave the surface locked.
    fn discard_session(&mut self) {
        if self.nodes.iter().any(|n| n.dragging) {
            self.surface.set_drag_panning(true);
        }
        self.nodes.clear();
        self.shape = None;
        self.preview = None;
    }

    fn make_node(&mut self, latlng: LatLng) -> Node {
        let mut options = self.options.node.clone();
        self.subscribers.resolve_node_options(latlng, &mut options);
        Node::new(latlng, options, Some(self.options.halo.clone()))
    }

    fn append_node(&mut self, latlng: LatLng) {
        let node = self.make_node(latlng);
        let id = node.id;
        self.nodes.push(node);
        self.rebuild_shape();
        self.subscribers.emit(EditorEvent::NodeAdded { id, latlng });
    }

    /// Idle edge insertion: find the nearest edge to the click and, if it
    /// is within tolerance and the click is not ambiguous with an existing
    /// vertex, split that edge at the click's coordinate.
    fn try_insert_on_edge(&mut self, shape_type: ShapeType, pixel: Point, latlng: LatLng) -> bool {
        // A click on top of a vertex is a drag or delete target, not an
        // insertion.
        for node in &self.nodes {
            if self.surface.latlng_to_pixel(node.latlng).distance(pixel) <= node.hit_radius() {
                return false;
            }
        }

        let pixels: Vec<Point> = self
            .nodes
            .iter()
            .map(|n| self.surface.latlng_to_pixel(n.latlng))
            .collect();
        let segment_count = if shape_type.closes_ring() {
            pixels.len()
        } else {
            pixels.len() - 1
        };

        let mut nearest: Option<(usize, f64)> = None;
        for i in 0..segment_count {
            let a = pixels[i];
            let b = pixels[(i + 1) % pixels.len()];
            let dist = point_to_segment_dist(pixel, a, b);
            if nearest.is_none_or(|(_, best)| dist < best) {
                nearest = Some((i, dist));
            }
        }
        let Some((index, dist)) = nearest else {
            return false;
        };
        // Same source as the too-close check above: per-node resolved
        // radii, so hook-enlarged handles widen the edge tolerance too.
        let next = (index + 1) % self.nodes.len();
        let tolerance = self.nodes[index]
            .hit_radius()
            .max(self.nodes[next].hit_radius());
        if dist > tolerance {
            return false;
        }

        let node = self.make_node(latlng);
        let id = node.id;
        self.nodes.insert(index + 1, node);
        self.rebuild_shape();
        log::debug!("inserted vertex after segment {index}");
        self.subscribers.emit(EditorEvent::NodeAdded { id, latlng });
        true
    }

    /// Pan the viewport when the pointer sits inside a configured edge
    /// band. Axes are independent; both may pan at once.
    fn auto_pan(&mut self, pixel: Point) {
        let size = self.surface.viewport_size();
        let (pad_x, pad_y) = self.options.auto_pan.padding;
        let speed = self.options.auto_pan.speed;

        let mut delta = Vec2::ZERO;
        if pixel.x < pad_x {
            delta.x = -speed;
        } else if pixel.x > size.width - pad_x {
            delta.x = speed;
        }
        if pixel.y < pad_y {
            delta.y = -speed;
        } else if pixel.y > size.height - pad_y {
            delta.y = speed;
        }
        if delta != Vec2::ZERO {
            self.surface.pan_by(delta);
        }
    }

    fn rebuild_shape(&mut self) {
        let coords: Vec<LatLng> = self.nodes.iter().map(|n| n.latlng).collect();
        self.shape = self
            .shape_type
            .and_then(|shape_type| Shape::build(shape_type, &coords));
    }
}
