//! Pick roles and the selection mode

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which of the two user-selected points a pick assigns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointRole {
    /// Origin of the route
    Start,
    /// Destination of the route
    End,
}

impl PointRole {
    /// Both roles, start first
    pub const ALL: [Self; 2] = [Self::Start, Self::End];

    /// Human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::End => "end",
        }
    }
}

impl fmt::Display for PointRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// What the next map click assigns, if anything
///
/// Equivalent to the three states `none`, `pickingStart`, `pickingEnd`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// Clicks are ignored
    #[default]
    None,
    /// The next click assigns the given role
    Picking(PointRole),
}

impl SelectionMode {
    /// The armed role, if a pick is pending
    #[must_use]
    pub const fn armed(&self) -> Option<PointRole> {
        match self {
            Self::None => None,
            Self::Picking(role) => Some(*role),
        }
    }

    #[must_use]
    pub const fn is_picking(&self) -> bool {
        matches!(self, Self::Picking(_))
    }
}
