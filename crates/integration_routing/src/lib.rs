//! Routing service integration for BusMap
//!
//! Talks to the backend that owns stop data and route computation:
//! `GET /get_all_stops` for the network overlay and `POST /find_route` for
//! a walk/bus/transfer itinerary between two points at a time of day.
//!
//! # Architecture
//!
//! [`RoutingClient`] defines the interface, implemented over HTTP by
//! [`HttpRoutingClient`]. Wire shapes live in private models and are
//! converted to `domain` types at the boundary.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain::{GeoPoint, RouteRequest, TimeOfDay};
//! use integration_routing::{HttpRoutingClient, RoutingClient, RoutingConfig};
//!
//! let client = HttpRoutingClient::new(&RoutingConfig::default())?;
//! let request = RouteRequest::new(
//!     GeoPoint::new(21.03, 105.85)?,
//!     GeoPoint::new(21.05, 105.90)?,
//!     TimeOfDay::parse("08:30")?,
//! );
//! let itinerary = client.find_route(&request).await?;
//! ```

mod client;
mod config;
mod error;
mod models;

pub use client::{HttpRoutingClient, RoutingClient};
pub use config::RoutingConfig;
pub use error::RoutingError;
