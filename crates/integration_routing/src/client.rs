//! HTTP client for the routing service
//!
//! Issues exactly one request per call and never retries; a request runs
//! until the service answers or the transport gives up.

use std::time::Duration;

use async_trait::async_trait;
use domain::{RouteItinerary, RouteRequest, StopMarker};
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument, warn};

use crate::config::RoutingConfig;
use crate::error::RoutingError;
use crate::models::{RawRouteResponse, RawStop};

/// Trait for routing service clients
#[async_trait]
pub trait RoutingClient: Send + Sync {
    /// Fetch every stop known to the service
    async fn fetch_stops(&self) -> Result<Vec<StopMarker>, RoutingError>;

    /// Request a route
    ///
    /// A refusal from the service is returned as [`RoutingError::ServerMessage`].
    async fn find_route(&self, request: &RouteRequest) -> Result<RouteItinerary, RoutingError>;

    /// Check if the routing service is reachable
    async fn is_healthy(&self) -> bool;
}

/// Routing client speaking JSON over HTTP
#[derive(Debug)]
pub struct HttpRoutingClient {
    client: Client,
    config: RoutingConfig,
}

impl HttpRoutingClient {
    /// Create a new routing client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &RoutingConfig) -> Result<Self, RoutingError> {
        config.validate().map_err(RoutingError::ConfigurationError)?;

        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if config.has_timeout() {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        let client = builder
            .build()
            .map_err(|e| RoutingError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    #[must_use]
    pub const fn config(&self) -> &RoutingConfig {
        &self.config
    }

    fn map_send_error(&self, e: &reqwest::Error) -> RoutingError {
        if e.is_timeout() {
            RoutingError::Timeout {
                timeout_secs: self.config.timeout_secs,
            }
        } else {
            RoutingError::ConnectionFailed(e.to_string())
        }
    }

    /// Parse the stop listing
    fn parse_stops_response(body: &str) -> Result<Vec<StopMarker>, RoutingError> {
        let raw: Vec<RawStop> =
            serde_json::from_str(body).map_err(|e| RoutingError::ParseError(e.to_string()))?;

        let total = raw.len();
        let stops: Vec<StopMarker> = raw.into_iter().filter_map(RawStop::into_stop).collect();
        if stops.len() < total {
            warn!(
                dropped = total - stops.len(),
                "Skipped stops with invalid coordinates"
            );
        }
        Ok(stops)
    }

    /// Interpret a route answer
    ///
    /// The service reports refusals as a JSON body even on 4xx/5xx
    /// statuses, so the body is inspected before the status.
    fn parse_route_response(status: StatusCode, body: &str) -> Result<RouteItinerary, RoutingError> {
        match serde_json::from_str::<RawRouteResponse>(body) {
            Ok(raw) if raw.is_refusal() => Err(RoutingError::ServerMessage(
                raw.message.unwrap_or_else(|| format!("HTTP {status}")),
            )),
            Ok(raw) if status.is_success() => raw.into_itinerary(),
            Err(e) if status.is_success() => Err(RoutingError::ParseError(e.to_string())),
            Ok(_) | Err(_) => Err(RoutingError::RequestFailed(format!("HTTP {status}"))),
        }
    }
}

#[async_trait]
impl RoutingClient for HttpRoutingClient {
    #[instrument(skip(self))]
    async fn fetch_stops(&self) -> Result<Vec<StopMarker>, RoutingError> {
        let url = self.config.endpoint("get_all_stops");
        debug!(?url, "Fetching stops");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.map_send_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RoutingError::RequestFailed(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| RoutingError::ParseError(e.to_string()))?;

        let stops = Self::parse_stops_response(&body)?;
        debug!(count = stops.len(), "Stops fetched");
        Ok(stops)
    }

    #[instrument(skip(self, request), fields(start = %request.start, end = %request.end, time = %request.time))]
    async fn find_route(&self, request: &RouteRequest) -> Result<RouteItinerary, RoutingError> {
        let url = self.config.endpoint("find_route");
        debug!(?url, "Requesting route");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| self.map_send_error(&e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RoutingError::ParseError(e.to_string()))?;

        let result = Self::parse_route_response(status, &body);
        match &result {
            Ok(itinerary) => debug!(segments = itinerary.segments.len(), "Route found"),
            Err(RoutingError::ServerMessage(message)) => debug!(%message, "Route refused"),
            Err(e) => warn!(error = %e, "Route response unusable"),
        }
        result
    }

    async fn is_healthy(&self) -> bool {
        self.client.get(&self.config.base_url).send().await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stops_response() {
        let json = r#"[
            { "id": 1, "lat": 21.0285, "lon": 105.8542, "name": "Hồ Gươm" },
            { "id": 2, "lat": 21.0368, "lon": 105.8342, "name": null },
            { "id": 3, "lat": 210.0, "lon": 105.0, "name": "broken" }
        ]"#;

        let stops = HttpRoutingClient::parse_stops_response(json).unwrap();
        assert_eq!(stops.len(), 2);
        assert_eq!(stops[0].label(), "Hồ Gươm");
        assert!(stops[1].name.is_none());
    }

    #[test]
    fn test_parse_stops_invalid_json() {
        assert!(matches!(
            HttpRoutingClient::parse_stops_response("not json"),
            Err(RoutingError::ParseError(_))
        ));
    }

    #[test]
    fn test_refusal_on_not_found_status() {
        let body = r#"{ "status": "error", "message": "No route found" }"#;
        let err = HttpRoutingClient::parse_route_response(StatusCode::NOT_FOUND, body).unwrap_err();
        assert!(matches!(err, RoutingError::ServerMessage(ref m) if m == "No route found"));
    }

    #[test]
    fn test_refusal_without_message() {
        let body = r#"{ "status": "error" }"#;
        let err =
            HttpRoutingClient::parse_route_response(StatusCode::INTERNAL_SERVER_ERROR, body)
                .unwrap_err();
        assert!(matches!(err, RoutingError::ServerMessage(ref m) if m.contains("500")));
    }

    #[test]
    fn test_success_body() {
        let body = r#"{ "status": "success", "total_duration": 12, "segments": [] }"#;
        let itinerary = HttpRoutingClient::parse_route_response(StatusCode::OK, body).unwrap();
        assert_eq!(itinerary.total_duration_minutes, 12);
    }

    #[test]
    fn test_garbage_on_success_is_parse_error() {
        let err = HttpRoutingClient::parse_route_response(StatusCode::OK, "<html>").unwrap_err();
        assert!(matches!(err, RoutingError::ParseError(_)));
        assert!(err.is_transport());
    }

    #[test]
    fn test_garbage_on_failure_is_request_failed() {
        let err =
            HttpRoutingClient::parse_route_response(StatusCode::BAD_GATEWAY, "<html>").unwrap_err();
        assert!(matches!(err, RoutingError::RequestFailed(ref m) if m.contains("502")));
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = RoutingConfig {
            base_url: String::new(),
            ..RoutingConfig::default()
        };
        assert!(matches!(
            HttpRoutingClient::new(&config),
            Err(RoutingError::ConfigurationError(_))
        ));
    }
}
