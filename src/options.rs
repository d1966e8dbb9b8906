//! Editor configuration: node, halo, path, and auto-pan options.

use serde::{Deserialize, Serialize};

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }
}

/// Visual options for a vertex handle.
///
/// This is the mutable option bag handed to before-node-create hooks:
/// subscribers may rewrite any field before the node is constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeOptions {
    /// Handle radius in pixels. Edge insertion and the line-finish gesture
    /// both use twice this value as their screen-space tolerance.
    pub radius: f64,
    /// Stroke color.
    pub color: Rgba,
    /// Stroke width in pixels.
    pub weight: f64,
    /// Fill color.
    pub fill_color: Rgba,
    /// Fill opacity (0.0 to 1.0).
    pub fill_opacity: f64,
    /// Whether the handle responds to pointer input.
    pub interactive: bool,
}

impl Default for NodeOptions {
    fn default() -> Self {
        Self {
            radius: 6.0,
            color: Rgba::new(51, 136, 255, 255),
            weight: 2.0,
            fill_color: Rgba::white(),
            fill_opacity: 1.0,
            interactive: true,
        }
    }
}

/// Visual options for the contrast halo drawn beneath each vertex handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HaloOptions {
    /// Halo color.
    pub color: Rgba,
    /// Extra radius in pixels beyond the node's own radius.
    pub weight: f64,
}

impl Default for HaloOptions {
    fn default() -> Self {
        Self {
            color: Rgba::white(),
            weight: 3.0,
        }
    }
}

/// Visual options for the shape path itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathOptions {
    /// Stroke color.
    pub color: Rgba,
    /// Stroke width in pixels.
    pub weight: f64,
    /// Fill color for closed shapes.
    pub fill_color: Rgba,
    /// Fill opacity (0.0 to 1.0).
    pub fill_opacity: f64,
}

impl Default for PathOptions {
    fn default() -> Self {
        Self {
            color: Rgba::new(51, 136, 255, 255),
            weight: 3.0,
            fill_color: Rgba::new(51, 136, 255, 255),
            fill_opacity: 0.2,
        }
    }
}

/// Auto-pan behavior while drawing near the viewport edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoPanOptions {
    /// Pan distance in pixels applied per pointer-move event.
    pub speed: f64,
    /// Edge band width in pixels, per axis (horizontal, vertical).
    pub padding: (f64, f64),
}

impl Default for AutoPanOptions {
    fn default() -> Self {
        Self {
            speed: 10.0,
            padding: (50.0, 50.0),
        }
    }
}

/// Aggregate editor configuration, applied at construction and replaceable
/// wholesale when importing GeoJSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditorOptions {
    /// Defaults for new vertex handles.
    pub node: NodeOptions,
    /// Halo drawn beneath each handle.
    pub halo: HaloOptions,
    /// Shape path styling.
    pub path: PathOptions,
    /// Auto-pan behavior.
    pub auto_pan: AutoPanOptions,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_node_options() {
        let opts = NodeOptions::default();
        assert!((opts.radius - 6.0).abs() < f64::EPSILON);
        assert!(opts.interactive);
    }

    #[test]
    fn test_options_serde_roundtrip() {
        let opts = EditorOptions::default();
        let json = serde_json::to_string(&opts).unwrap();
        let back: EditorOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, opts);
    }
}
