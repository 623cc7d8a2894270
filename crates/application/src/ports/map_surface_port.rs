//! Map widget port
//!
//! The slice of a slippy-map widget the client needs: point markers,
//! stop dots and polylines grouped in layers, layer attachment, viewport
//! fitting, and the "awaiting click" indication. Implementations own the
//! actual drawing; the application only keeps [`ShapeId`] handles.

use std::fmt;

use domain::{GeoBounds, GeoPoint, PointRole, StopMarker};
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

/// Handle to a shape placed on the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(pub u64);

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Shape groups that can be cleared and attached as a whole
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapLayer {
    /// Drawn route segments; attached from the start
    Route,
    /// All known stops; detached until toggled on
    Network,
}

/// Stroke of a drawn path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    /// CSS-style color, e.g. `#2980b9`
    pub color: String,
    /// Line width in pixels
    pub weight: f32,
    pub opacity: f32,
    /// Dash pattern such as `"5, 10"`; `None` draws a solid line
    #[serde(default)]
    pub dash_array: Option<String>,
}

impl StrokeStyle {
    /// Solid stroke with the route defaults (weight 5, opacity 0.8)
    #[must_use]
    pub fn solid(color: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            weight: 5.0,
            opacity: 0.8,
            dash_array: None,
        }
    }

    /// Dashed stroke with the route defaults
    #[must_use]
    pub fn dashed(color: impl Into<String>, dash_array: impl Into<String>) -> Self {
        Self {
            dash_array: Some(dash_array.into()),
            ..Self::solid(color)
        }
    }

    #[must_use]
    pub const fn is_dashed(&self) -> bool {
        self.dash_array.is_some()
    }
}

/// Style of the small circles drawn for stops
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DotStyle {
    /// Radius in pixels
    pub radius: f32,
    pub stroke_color: String,
    pub fill_color: String,
    pub fill_opacity: f32,
}

impl Default for DotStyle {
    fn default() -> Self {
        Self {
            radius: 2.0,
            stroke_color: "transparent".to_string(),
            fill_color: "#2980b9".to_string(),
            fill_opacity: 0.5,
        }
    }
}

/// Port for the map widget
#[cfg_attr(test, automock)]
pub trait MapSurfacePort {
    /// Place a pin for a picked point directly on the map
    fn add_marker(&mut self, role: PointRole, at: GeoPoint) -> ShapeId;

    /// Add a stop circle, with the stop's label as popup, to a layer
    fn add_stop_dot(&mut self, layer: MapLayer, stop: &StopMarker, style: &DotStyle) -> ShapeId;

    /// Add a connected path to a layer
    fn add_polyline(&mut self, layer: MapLayer, path: &[GeoPoint], style: &StrokeStyle)
    -> ShapeId;

    /// Remove one shape; unknown handles are ignored
    fn remove_shape(&mut self, id: ShapeId);

    /// Remove every shape of a layer
    fn clear_layer(&mut self, layer: MapLayer);

    /// Attach the layer to the map or detach it
    fn set_layer_attached(&mut self, layer: MapLayer, attached: bool);

    fn is_layer_attached(&self, layer: MapLayer) -> bool;

    /// Move the viewport so the bounds are visible
    fn fit_bounds(&mut self, bounds: GeoBounds);

    /// Show or hide the "awaiting click" indication for a role
    fn set_picking(&mut self, role: Option<PointRole>);
}
