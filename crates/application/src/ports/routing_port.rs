//! Routing service port
//!
//! Defines the interface to the remote routing service: the one-off stop
//! listing used by the network overlay, and on-demand route requests.
//! Adapters in the infrastructure layer implement this port over HTTP.

use async_trait::async_trait;
use domain::{RouteOutcome, RouteRequest, StopMarker};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for the routing service
///
/// A server-reported refusal is a successful call returning
/// [`RouteOutcome::Rejected`]; only transport-level problems are errors.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RoutingPort: Send + Sync {
    /// Fetch every known stop
    async fn list_stops(&self) -> Result<Vec<StopMarker>, ApplicationError>;

    /// Ask for a route between the request's points at its time of day
    async fn find_route(&self, request: &RouteRequest) -> Result<RouteOutcome, ApplicationError>;

    /// Check if the routing service is reachable
    async fn is_available(&self) -> bool;
}
