//! Vertex handles: the draggable nodes of the shape being edited.

use crate::geo::LatLng;
use crate::options::{HaloOptions, NodeOptions};
use uuid::Uuid;

/// Unique identifier for a vertex handle.
pub type NodeId = Uuid;

/// A draggable vertex of the live shape.
///
/// The resolved `options` are the node's visual representation in this
/// headless core; the host renders a circular marker from them. The halo
/// is a contrast disc drawn beneath the handle at the same coordinate, and
/// shares the node's lifetime.
#[derive(Debug, Clone)]
pub struct Node {
    /// Stable identifier, used to address the node in events and drags.
    pub id: NodeId,
    /// Geographic position. The halo always mirrors this.
    pub latlng: LatLng,
    /// Resolved visual options (after before-node-create hooks ran).
    pub options: NodeOptions,
    /// Contrast halo beneath the handle, if any.
    pub halo: Option<HaloOptions>,
    /// Whether a drag gesture on this node is in flight.
    pub dragging: bool,
}

impl Node {
    /// Create a node at the given coordinate with resolved options.
    pub fn new(latlng: LatLng, options: NodeOptions, halo: Option<HaloOptions>) -> Self {
        Self {
            id: Uuid::new_v4(),
            latlng,
            options,
            halo,
            dragging: false,
        }
    }

    /// Screen-space tolerance around this node: twice its radius.
    ///
    /// Used for the too-close-to-vertex check on edge insertion and for
    /// the line-finish gesture.
    pub fn hit_radius(&self) -> f64 {
        2.0 * self.options.radius
    }
}
