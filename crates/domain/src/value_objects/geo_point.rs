//! Geographic point value object

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// A geographic point with latitude and longitude in degrees
///
/// Serializes as `{"lat": .., "lon": ..}`, the shape the routing service
/// expects for the start and end of a route request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees (-90 to 90)
    lat: f64,
    /// Longitude in degrees (-180 to 180)
    lon: f64,
}

impl GeoPoint {
    /// Create a new point with validation
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCoordinates` if latitude is not in [-90, 90],
    /// longitude is not in [-180, 180], or either value is not finite.
    pub fn new(lat: f64, lon: f64) -> Result<Self, DomainError> {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(DomainError::InvalidCoordinates(format!(
                "latitude must be -90 to 90 and longitude -180 to 180, got ({lat}, {lon})"
            )));
        }
        Ok(Self { lat, lon })
    }

    /// Create a point without validation (for trusted sources such as wire data)
    #[must_use]
    pub const fn new_unchecked(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Get the latitude
    #[must_use]
    pub const fn lat(&self) -> f64 {
        self.lat
    }

    /// Get the longitude
    #[must_use]
    pub const fn lon(&self) -> f64 {
        self.lon
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lon)
    }
}

/// Hanoi city centre, the default map view
impl GeoPoint {
    #[must_use]
    pub const fn hanoi() -> Self {
        Self::new_unchecked(21.0285, 105.8542)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_coordinates() {
        let point = GeoPoint::new(21.03, 105.85).expect("valid coordinates");
        assert!((point.lat() - 21.03).abs() < f64::EPSILON);
        assert!((point.lon() - 105.85).abs() < f64::EPSILON);
    }

    #[test]
    fn test_boundary_coordinates() {
        assert!(GeoPoint::new(90.0, 180.0).is_ok());
        assert!(GeoPoint::new(-90.0, -180.0).is_ok());
        assert!(GeoPoint::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn test_invalid_latitude() {
        assert!(GeoPoint::new(91.0, 0.0).is_err());
        assert!(GeoPoint::new(-91.0, 0.0).is_err());
    }

    #[test]
    fn test_invalid_longitude() {
        assert!(GeoPoint::new(0.0, 181.0).is_err());
        assert!(GeoPoint::new(0.0, -181.0).is_err());
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
        assert!(GeoPoint::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_display() {
        let point = GeoPoint::new(21.03, 105.85).expect("valid");
        assert_eq!(point.to_string(), "21.030000, 105.850000");
    }

    #[test]
    fn test_serializes_as_lat_lon_object() {
        let point = GeoPoint::new(21.03, 105.85).expect("valid");
        let json = serde_json::to_value(point).expect("serialize");
        assert_eq!(json, serde_json::json!({ "lat": 21.03, "lon": 105.85 }));

        let back: GeoPoint = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, point);
    }
}
