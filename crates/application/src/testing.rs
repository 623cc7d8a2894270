//! Test doubles shared by the service tests

use std::collections::{BTreeMap, HashSet};

use domain::{GeoBounds, GeoPoint, PointRole, StopMarker};

use crate::ports::{DotStyle, MapLayer, MapSurfacePort, ShapeId, StrokeStyle};

/// What a recorded shape is
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedShape {
    Marker(PointRole, GeoPoint),
    Dot(MapLayer, String),
    Polyline(MapLayer, Vec<GeoPoint>, StrokeStyle),
}

/// In-memory map surface that records every call
#[derive(Debug)]
pub struct RecordingSurface {
    next_id: u64,
    pub shapes: BTreeMap<ShapeId, RecordedShape>,
    pub attached: HashSet<MapLayer>,
    pub fitted: Vec<GeoBounds>,
    pub picking: Option<PointRole>,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self {
            next_id: 1,
            shapes: BTreeMap::new(),
            attached: HashSet::from([MapLayer::Route]),
            fitted: Vec::new(),
            picking: None,
        }
    }
}

impl RecordingSurface {
    fn insert(&mut self, shape: RecordedShape) -> ShapeId {
        let id = ShapeId(self.next_id);
        self.next_id += 1;
        self.shapes.insert(id, shape);
        id
    }

    pub fn markers(&self, role: PointRole) -> Vec<GeoPoint> {
        self.shapes
            .values()
            .filter_map(|s| match s {
                RecordedShape::Marker(r, at) if *r == role => Some(*at),
                _ => None,
            })
            .collect()
    }

    pub fn polylines(&self) -> Vec<(Vec<GeoPoint>, StrokeStyle)> {
        self.shapes
            .values()
            .filter_map(|s| match s {
                RecordedShape::Polyline(MapLayer::Route, path, style) => {
                    Some((path.clone(), style.clone()))
                },
                _ => None,
            })
            .collect()
    }

    pub fn dots(&self) -> usize {
        self.shapes
            .values()
            .filter(|s| matches!(s, RecordedShape::Dot(..)))
            .count()
    }
}

impl MapSurfacePort for RecordingSurface {
    fn add_marker(&mut self, role: PointRole, at: GeoPoint) -> ShapeId {
        self.insert(RecordedShape::Marker(role, at))
    }

    fn add_stop_dot(&mut self, layer: MapLayer, stop: &StopMarker, _style: &DotStyle) -> ShapeId {
        self.insert(RecordedShape::Dot(layer, stop.label().to_string()))
    }

    fn add_polyline(
        &mut self,
        layer: MapLayer,
        path: &[GeoPoint],
        style: &StrokeStyle,
    ) -> ShapeId {
        self.insert(RecordedShape::Polyline(layer, path.to_vec(), style.clone()))
    }

    fn remove_shape(&mut self, id: ShapeId) {
        self.shapes.remove(&id);
    }

    fn clear_layer(&mut self, layer: MapLayer) {
        self.shapes.retain(|_, shape| match shape {
            RecordedShape::Marker(..) => true,
            RecordedShape::Dot(l, _) | RecordedShape::Polyline(l, ..) => *l != layer,
        });
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
        self.fitted.push(bounds);
    }

    fn set_picking(&mut self, role: Option<PointRole>) {
        self.picking = role;
    }
}
