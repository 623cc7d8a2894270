//! Routing adapter - Implements RoutingPort using integration_routing

use application::error::ApplicationError;
use application::ports::RoutingPort;
use async_trait::async_trait;
use domain::{RouteOutcome, RouteRequest, StopMarker};
use integration_routing::{HttpRoutingClient, RoutingClient, RoutingConfig, RoutingError};
use tracing::{debug, instrument, warn};

/// Adapter for the BusMap routing service
pub struct RoutingAdapter {
    client: HttpRoutingClient,
}

impl std::fmt::Debug for RoutingAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoutingAdapter")
            .field("client", &"HttpRoutingClient")
            .field("base_url", &self.client.config().base_url)
            .finish()
    }
}

impl RoutingAdapter {
    #[must_use]
    pub const fn new(client: HttpRoutingClient) -> Self {
        Self { client }
    }

    /// Create an adapter with its own HTTP client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// fails to initialize.
    pub fn from_config(config: &RoutingConfig) -> Result<Self, ApplicationError> {
        let client = HttpRoutingClient::new(config).map_err(|e| match e {
            RoutingError::ConfigurationError(msg) => ApplicationError::Configuration(msg),
            other => ApplicationError::ExternalService(other.to_string()),
        })?;
        Ok(Self::new(client))
    }

    /// Split a client error into a refusal or a failure
    fn map_route_error(error: RoutingError) -> Result<RouteOutcome, ApplicationError> {
        if error.is_transport() {
            return Err(ApplicationError::ExternalService(format!(
                "Route search failed: {error}"
            )));
        }
        // A refusal displays as the service's own message
        Ok(RouteOutcome::Rejected {
            message: error.to_string(),
        })
    }
}

#[async_trait]
impl RoutingPort for RoutingAdapter {
    #[instrument(skip(self))]
    async fn list_stops(&self) -> Result<Vec<StopMarker>, ApplicationError> {
        let stops = self.client.fetch_stops().await.map_err(|e| {
            warn!(error = %e, "Stop listing failed");
            ApplicationError::ExternalService(format!("Stop listing failed: {e}"))
        })?;

        debug!(count = stops.len(), "Stops listed");
        Ok(stops)
    }

    #[instrument(skip(self, request))]
    async fn find_route(&self, request: &RouteRequest) -> Result<RouteOutcome, ApplicationError> {
        match self.client.find_route(request).await {
            Ok(itinerary) => Ok(RouteOutcome::Found(itinerary)),
            Err(e) => Self::map_route_error(e),
        }
    }

    async fn is_available(&self) -> bool {
        self.client.is_healthy().await
    }
}
