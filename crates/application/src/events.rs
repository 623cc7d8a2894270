//! Typed events driving the map controller
//!
//! Every state transition of the client is the result of one of these,
//! delivered on a single execution context: user input from the map and
//! panel controls, or the completion of one of the two network calls.

use domain::{GeoPoint, PointRole, RouteOutcome, RouteRequest, StopMarker, TimeOfDay};

use crate::error::ApplicationError;

/// An input to [`MapController::dispatch`](crate::services::MapController::dispatch)
#[derive(Debug)]
pub enum MapEvent {
    /// The pick-start or pick-end control was pressed
    PickArmed(PointRole),
    /// The map was clicked at a coordinate
    MapClicked(GeoPoint),
    /// The time-of-day field was edited
    TimeEdited(TimeOfDay),
    /// The find-route control was pressed
    RouteRequested,
    /// A route request issued earlier has completed
    RouteSettled {
        ticket: RouteTicket,
        result: Result<RouteOutcome, ApplicationError>,
    },
    /// The network-overlay control was pressed
    OverlayToggled,
    /// The startup stop fetch has completed
    StopsLoaded(Result<Vec<StopMarker>, ApplicationError>),
}

/// A route request the controller has authorised, to be sent by the caller
///
/// Handed back with the result in [`MapEvent::RouteSettled`] so the
/// controller can tell which request the answer belongs to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteTicket {
    /// Monotonic request number
    pub generation: u64,
    pub request: RouteRequest,
}
