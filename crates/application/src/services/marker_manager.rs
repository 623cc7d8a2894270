//! Visual marker manager
//!
//! Keeps at most one pin per role on the map.

use domain::{GeoPoint, PointRole};

use crate::ports::{MapSurfacePort, ShapeId};

/// Handles of the current start and end pins
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerManager {
    start: Option<ShapeId>,
    end: Option<ShapeId>,
}

impl MarkerManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Place the pin for a role, removing the previous one first
    pub fn set_marker(&mut self, surface: &mut dyn MapSurfacePort, role: PointRole, at: GeoPoint) {
        let slot = match role {
            PointRole::Start => &mut self.start,
            PointRole::End => &mut self.end,
        };
        if let Some(previous) = slot.take() {
            surface.remove_shape(previous);
        }
        *slot = Some(surface.add_marker(role, at));
    }

    #[must_use]
    pub const fn marker(&self, role: PointRole) -> Option<ShapeId> {
        match role {
            PointRole::Start => self.start,
            PointRole::End => self.end,
        }
    }
}
