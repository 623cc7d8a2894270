//! Routing error types

use thiserror::Error;

/// Errors that can occur when talking to the routing service
#[derive(Debug, Error)]
pub enum RoutingError {
    /// Connection to the routing service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The service answered with a non-success status and no usable body
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse response from the routing service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The service declined to route; the message is meant for the user
    #[error("{0}")]
    ServerMessage(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },
}

impl RoutingError {
    /// Returns true if the request could not complete, as opposed to the
    /// service answering with a refusal
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        !matches!(self, Self::ServerMessage(_))
    }
}
