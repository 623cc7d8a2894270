//! Selection mode controller and point store
//!
//! Decides what a raw map click means: nothing while no pick is armed,
//! otherwise it assigns the armed role and disarms.

use domain::{GeoPoint, PointRole, SelectionMode};
use tracing::debug;

/// The two user-selected points and the pending pick, if any
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointSelection {
    start: Option<GeoPoint>,
    end: Option<GeoPoint>,
    mode: SelectionMode,
}

impl PointSelection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a pick for a role; replaces any other armed pick
    pub fn arm(&mut self, role: PointRole) {
        debug!(%role, "Pick armed");
        self.mode = SelectionMode::Picking(role);
    }

    /// Consume a map click
    ///
    /// Returns the role the coordinate was assigned to, or `None` when no
    /// pick was armed (the click is ignored and nothing changes). A point
    /// already held for the role is overwritten.
    pub fn consume_click(&mut self, at: GeoPoint) -> Option<PointRole> {
        let role = self.mode.armed()?;
        match role {
            PointRole::Start => self.start = Some(at),
            PointRole::End => self.end = Some(at),
        }
        self.mode = SelectionMode::None;
        Some(role)
    }

    #[must_use]
    pub const fn get(&self, role: PointRole) -> Option<GeoPoint> {
        match role {
            PointRole::Start => self.start,
            PointRole::End => self.end,
        }
    }

    #[must_use]
    pub const fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Both points, once each has been picked at least once
    #[must_use]
    pub fn pair(&self) -> Option<(GeoPoint, GeoPoint)> {
        self.start.zip(self.end)
    }

    #[must_use]
    pub const fn both_set(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }
}
