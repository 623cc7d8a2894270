//! Application layer - Use cases and orchestration
//!
//! Holds the interaction state machine of the map client: which point the
//! next click assigns, when a route may be requested, and how a route answer
//! becomes styled map shapes plus an itinerary list. External systems (the
//! map widget and the routing service) are reached only through ports.

pub mod error;
pub mod events;
pub mod ports;
pub mod services;
#[cfg(test)]
pub(crate) mod testing;
pub mod view;

pub use error::ApplicationError;
pub use events::{MapEvent, RouteTicket};
pub use ports::*;
pub use services::*;
pub use view::{FindButton, ItineraryEntry, ItineraryView, Notice, PanelState};
