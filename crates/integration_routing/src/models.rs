//! Wire models of the routing service
//!
//! Raw shapes as sent by the backend, converted to `domain` types at the
//! boundary. Coordinates are validated during conversion; anything the
//! client cannot draw is treated as a malformed response.

use domain::{GeoPoint, RouteItinerary, RouteSegment, SegmentKind, StopMarker};
use serde::Deserialize;
use serde_json::Value;

use crate::error::RoutingError;

/// Status value the service uses for a refusal
const STATUS_ERROR: &str = "error";

/// One entry of `GET /get_all_stops`
#[derive(Debug, Deserialize)]
pub(crate) struct RawStop {
    #[serde(default)]
    pub id: Option<Value>,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub name: Option<String>,
}

impl RawStop {
    /// Convert to a stop marker, or `None` if the coordinates are unusable
    pub fn into_stop(self) -> Option<StopMarker> {
        let position = GeoPoint::new(self.lat, self.lon).ok()?;
        let id = self.id.and_then(|v| match v {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        });
        Some(StopMarker {
            position,
            name: self.name,
            id,
        })
    }
}

/// Body of a `POST /find_route` answer, success or refusal
#[derive(Debug, Deserialize)]
pub(crate) struct RawRouteResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub total_duration: Option<u32>,
    #[serde(default)]
    pub arrival_time: Option<String>,
    #[serde(default)]
    pub segments: Option<Vec<RawSegment>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawSegment {
    #[serde(rename = "type")]
    pub kind: String,
    /// `[lat, lon]` pairs
    pub coords: Vec<[f64; 2]>,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub sub: String,
}

impl RawRouteResponse {
    /// Whether the service declined the request
    pub fn is_refusal(&self) -> bool {
        self.status == STATUS_ERROR
    }

    /// Convert a non-refusal answer into an itinerary
    pub fn into_itinerary(self) -> Result<RouteItinerary, RoutingError> {
        let total_duration_minutes = self
            .total_duration
            .ok_or_else(|| RoutingError::ParseError("missing total_duration".to_string()))?;
        let raw_segments = self
            .segments
            .ok_or_else(|| RoutingError::ParseError("missing segments".to_string()))?;

        let segments = raw_segments
            .into_iter()
            .enumerate()
            .map(|(index, raw)| raw.into_segment(index))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RouteItinerary {
            total_duration_minutes,
            arrival_time: self.arrival_time,
            segments,
        })
    }
}

impl RawSegment {
    fn into_segment(self, index: usize) -> Result<RouteSegment, RoutingError> {
        let coords = self
            .coords
            .into_iter()
            .map(|[lat, lon]| {
                GeoPoint::new(lat, lon).map_err(|e| {
                    RoutingError::ParseError(format!("segment {index}: {e}"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RouteSegment {
            kind: SegmentKind::from(self.kind),
            coords,
            desc: self.desc,
            sub: self.sub,
        })
    }
}
