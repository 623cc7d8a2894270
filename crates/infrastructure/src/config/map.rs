//! Map widget configuration

use domain::{DomainError, GeoPoint};
use serde::{Deserialize, Serialize};

/// Deepest zoom level offered by common tile servers
pub const MAX_ZOOM: u8 = 19;

/// Initial viewport of the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    /// Latitude of the initial centre (default: Hanoi)
    #[serde(default = "default_center_lat")]
    pub center_lat: f64,

    /// Longitude of the initial centre
    #[serde(default = "default_center_lon")]
    pub center_lon: f64,

    /// Initial zoom level (default: 13)
    #[serde(default = "default_zoom")]
    pub zoom: u8,
}

const fn default_center_lat() -> f64 {
    21.0285
}

const fn default_center_lon() -> f64 {
    105.8542
}

const fn default_zoom() -> u8 {
    13
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center_lat: default_center_lat(),
            center_lon: default_center_lon(),
            zoom: default_zoom(),
        }
    }
}

impl MapConfig {
    /// Initial centre as a validated point
    pub fn center(&self) -> Result<GeoPoint, DomainError> {
        GeoPoint::new(self.center_lat, self.center_lon)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        self.center().map_err(|e| format!("map centre: {e}"))?;
        if self.zoom > MAX_ZOOM {
            return Err(format!("map.zoom must be at most {MAX_ZOOM}"));
        }
        Ok(())
    }
}
