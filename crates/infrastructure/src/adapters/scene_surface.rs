//! In-memory map widget
//!
//! Keeps everything a slippy-map widget would draw (pins, stop dots,
//! polylines and their layers) together with the current viewport, so a
//! console front end can print the scene and tests can inspect it.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use application::ports::{DotStyle, MapLayer, MapSurfacePort, ShapeId, StrokeStyle};
use domain::{GeoBounds, GeoPoint, PointRole, StopMarker};
use tracing::trace;

use crate::config::{MAX_ZOOM, MapConfig};

/// Visible part of the map
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: GeoPoint,
    pub zoom: u8,
}

impl Viewport {
    /// Viewport centred on `bounds` at the deepest zoom that still shows them
    ///
    /// Uses the web-mercator rule of thumb that one tile spans
    /// `360 / 2^zoom` degrees of longitude.
    #[must_use]
    pub fn fitting(bounds: &GeoBounds) -> Self {
        let sw = bounds.south_west();
        let ne = bounds.north_east();
        let span = (ne.lat() - sw.lat()).max(ne.lon() - sw.lon());

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let zoom = if span <= f64::EPSILON {
            MAX_ZOOM
        } else {
            (360.0 / span)
                .log2()
                .floor()
                .clamp(0.0, f64::from(MAX_ZOOM)) as u8
        };

        Self {
            center: bounds.center(),
            zoom,
        }
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ z{}", self.center, self.zoom)
    }
}

/// What a layered shape looks like
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    Polyline {
        path: Vec<GeoPoint>,
        style: StrokeStyle,
    },
    StopDot {
        at: GeoPoint,
        popup: String,
        style: DotStyle,
    },
}

/// A shape placed on one of the layers
#[derive(Debug, Clone, PartialEq)]
pub struct SceneShape {
    pub layer: MapLayer,
    pub kind: ShapeKind,
}

/// Map widget state held in memory
#[derive(Debug, Clone)]
pub struct SceneSurface {
    viewport: Viewport,
    next_id: u64,
    markers: BTreeMap<ShapeId, (PointRole, GeoPoint)>,
    shapes: BTreeMap<ShapeId, SceneShape>,
    attached: HashSet<MapLayer>,
    picking: Option<PointRole>,
}

impl SceneSurface {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            next_id: 0,
            markers: BTreeMap::new(),
            shapes: BTreeMap::new(),
            attached: HashSet::new(),
            picking: None,
        }
    }

    /// Surface with the configured initial viewport
    pub fn from_config(config: &MapConfig) -> Result<Self, domain::DomainError> {
        Ok(Self::new(Viewport {
            center: config.center()?,
            zoom: config.zoom,
        }))
    }

    fn allocate(&mut self) -> ShapeId {
        self.next_id += 1;
        ShapeId(self.next_id)
    }

    #[must_use]
    pub const fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub const fn picking(&self) -> Option<PointRole> {
        self.picking
    }

    /// Pins currently on the map, in placement order
    pub fn markers(&self) -> impl Iterator<Item = (PointRole, GeoPoint)> + '_ {
        self.markers.values().copied()
    }

    /// Shapes of one layer, in placement order
    pub fn layer_shapes(&self, layer: MapLayer) -> impl Iterator<Item = &SceneShape> + '_ {
        self.shapes.values().filter(move |s| s.layer == layer)
    }

    /// Polylines of one layer with their styles
    pub fn polylines(&self, layer: MapLayer) -> Vec<(&[GeoPoint], &StrokeStyle)> {
        self.layer_shapes(layer)
            .filter_map(|s| match &s.kind {
                ShapeKind::Polyline { path, style } => Some((path.as_slice(), style)),
                ShapeKind::StopDot { .. } => None,
            })
            .collect()
    }

    /// Number of shapes drawn on the map: pins plus shapes of attached layers
    #[must_use]
    pub fn visible_shape_count(&self) -> usize {
        self.markers.len()
            + self
                .shapes
                .values()
                .filter(|s| self.attached.contains(&s.layer))
                .count()
    }
}

impl MapSurfacePort for SceneSurface {
    fn add_marker(&mut self, role: PointRole, at: GeoPoint) -> ShapeId {
        let id = self.allocate();
        self.markers.insert(id, (role, at));
        trace!(%id, %role, %at, "Marker added");
        id
    }

    fn add_stop_dot(&mut self, layer: MapLayer, stop: &StopMarker, style: &DotStyle) -> ShapeId {
        let id = self.allocate();
        self.shapes.insert(
            id,
            SceneShape {
                layer,
                kind: ShapeKind::StopDot {
                    at: stop.position,
                    popup: stop.label().to_string(),
                    style: style.clone(),
                },
            },
        );
        id
    }

    fn add_polyline(
        &mut self,
        layer: MapLayer,
        path: &[GeoPoint],
        style: &StrokeStyle,
    ) -> ShapeId {
        let id = self.allocate();
        self.shapes.insert(
            id,
            SceneShape {
                layer,
                kind: ShapeKind::Polyline {
                    path: path.to_vec(),
                    style: style.clone(),
                },
            },
        );
        trace!(%id, points = path.len(), "Polyline added");
        id
    }

    fn remove_shape(&mut self, id: ShapeId) {
        if self.markers.remove(&id).is_none() {
            self.shapes.remove(&id);
        }
    }

    fn clear_layer(&mut self, layer: MapLayer) {
        self.shapes.retain(|_, s| s.layer != layer);
    }

    fn set_layer_attached(&mut self, layer: MapLayer, attached: bool) {
        if attached {
            self.attached.insert(layer);
        } else {
            self.attached.remove(&layer);
        }
    }

    fn is_layer_attached(&self, layer: MapLayer) -> bool {
        self.attached.contains(&layer)
    }

    fn fit_bounds(&mut self, bounds: GeoBounds) {
        self.viewport = Viewport::fitting(&bounds);
        trace!(viewport = %self.viewport, "Viewport fitted");
    }

    fn set_picking(&mut self, role: Option<PointRole>) {
        self.picking = role;
    }
}

impl fmt::Display for SceneSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Map {}", self.viewport)?;
        if let Some(role) = self.picking {
            writeln!(f, "  (click the map to set the {role} point)")?;
        }
        for (role, at) in self.markers() {
            writeln!(f, "  pin {role:<5} {at}")?;
        }

        for layer in [MapLayer::Route, MapLayer::Network] {
            let state = if self.is_layer_attached(layer) {
                "shown"
            } else {
                "hidden"
            };
            let count = self.layer_shapes(layer).count();
            writeln!(f, "  layer {layer:?} ({state}, {count} shapes)")?;

            if layer == MapLayer::Route {
                for (path, style) in self.polylines(layer) {
                    let dash = style.dash_array.as_deref().unwrap_or("solid");
                    writeln!(
                        f,
                        "    line {} pts  {} [{dash}]",
                        path.len(),
                        style.color
                    )?;
                }
            }
        }
        Ok(())
    }
}
