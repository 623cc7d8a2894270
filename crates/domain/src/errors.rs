//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Latitude or longitude outside the valid range
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    /// Time of day not in `HH:MM` form or out of range
    #[error("Invalid time of day: {0}")]
    InvalidTimeOfDay(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}
