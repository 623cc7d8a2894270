//! Domain entities - route itineraries and transit stops

mod route;
mod stop_marker;

pub use route::{RouteItinerary, RouteOutcome, RouteRequest, RouteSegment, SegmentKind};
pub use stop_marker::{StopMarker, UNNAMED_STOP};
