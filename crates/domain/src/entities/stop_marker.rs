//! Transit stops shown on the network overlay

use serde::{Deserialize, Serialize};

use crate::value_objects::GeoPoint;

/// Label used when the service has no name for a stop
pub const UNNAMED_STOP: &str = "Unnamed stop";

/// A known stop location, read-only once fetched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopMarker {
    pub position: GeoPoint,
    pub name: Option<String>,
    pub id: Option<String>,
}

impl StopMarker {
    #[must_use]
    pub fn new(position: GeoPoint, name: impl Into<String>) -> Self {
        Self {
            position,
            name: Some(name.into()),
            id: None,
        }
    }

    /// Popup text for the stop
    #[must_use]
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(UNNAMED_STOP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_uses_name() {
        let stop = StopMarker::new(GeoPoint::hanoi(), "Hoàn Kiếm");
        assert_eq!(stop.label(), "Hoàn Kiếm");
    }

    #[test]
    fn label_falls_back_when_unnamed() {
        let stop = StopMarker {
            position: GeoPoint::hanoi(),
            name: None,
            id: Some("s1".to_string()),
        };
        assert_eq!(stop.label(), UNNAMED_STOP);
    }
}
