//! Route requests, segments and itineraries
//!
//! A route is requested for a start point, an end point and a time of day.
//! The routing service either rejects the request with a message or answers
//! with an itinerary: an ordered list of walk, bus and transfer segments.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value_objects::{GeoBounds, GeoPoint, TimeOfDay};

/// What the routing service is asked for
///
/// Serializes to the request body `{start:{lat,lon}, end:{lat,lon}, time:"HH:MM"}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteRequest {
    pub start: GeoPoint,
    pub end: GeoPoint,
    pub time: TimeOfDay,
}

impl RouteRequest {
    #[must_use]
    pub const fn new(start: GeoPoint, end: GeoPoint, time: TimeOfDay) -> Self {
        Self { start, end, time }
    }
}

/// Kind of one itinerary leg
///
/// Unknown kinds coming from the service are kept verbatim rather than
/// rejected; they style like a ride.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SegmentKind {
    /// Walking to, from, or between stops
    Walk,
    /// Riding a bus line
    Bus,
    /// Walking between two lines mid-route
    Transfer,
    /// Any other kind reported by the service
    Other(String),
}

impl SegmentKind {
    /// Wire name of the kind
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Walk => "walk",
            Self::Bus => "bus",
            Self::Transfer => "transfer",
            Self::Other(name) => name,
        }
    }

    #[must_use]
    pub const fn is_bus(&self) -> bool {
        matches!(self, Self::Bus)
    }
}

impl From<&str> for SegmentKind {
    fn from(value: &str) -> Self {
        match value {
            "walk" => Self::Walk,
            "bus" => Self::Bus,
            "transfer" => Self::Transfer,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for SegmentKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "walk" | "bus" | "transfer" => Self::from(value.as_str()),
            _ => Self::Other(value),
        }
    }
}

impl From<SegmentKind> for String {
    fn from(value: SegmentKind) -> Self {
        match value {
            SegmentKind::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One leg of an itinerary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSegment {
    pub kind: SegmentKind,
    /// Path of the leg, in travel order
    pub coords: Vec<GeoPoint>,
    /// Headline, passed through from the service
    pub desc: String,
    /// Detail line, passed through from the service
    pub sub: String,
}

impl RouteSegment {
    /// Bounding box of the leg's path
    #[must_use]
    pub fn bounds(&self) -> Option<GeoBounds> {
        GeoBounds::enclosing(&self.coords)
    }
}

/// A computed route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteItinerary {
    /// Door-to-door duration in minutes
    pub total_duration_minutes: u32,
    /// Arrival wall-clock time, when the service reports it
    pub arrival_time: Option<String>,
    pub segments: Vec<RouteSegment>,
}

impl RouteItinerary {
    /// Number of distinct bus rides
    #[must_use]
    pub fn bus_rides(&self) -> usize {
        self.segments.iter().filter(|s| s.kind.is_bus()).count()
    }

    /// Compact one-line summary, e.g. `42 min (arrive 09:12), 2 bus rides`
    #[must_use]
    pub fn format_summary(&self) -> String {
        let arrival = self
            .arrival_time
            .as_deref()
            .map(|t| format!(" (arrive {t})"))
            .unwrap_or_default();
        let rides = self.bus_rides();
        let plural = if rides == 1 { "" } else { "s" };
        format!(
            "{} min{arrival}, {rides} bus ride{plural}",
            self.total_duration_minutes
        )
    }
}

/// Answer of the routing service to a [`RouteRequest`]
#[derive(Debug, Clone, PartialEq)]
pub enum RouteOutcome {
    /// A route was computed
    Found(RouteItinerary),
    /// The service declined, with a message meant for the user
    Rejected { message: String },
}
