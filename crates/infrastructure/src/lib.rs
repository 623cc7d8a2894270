//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: the routing service
//! behind [`RoutingAdapter`] and an in-memory map widget in
//! [`SceneSurface`]. Also owns configuration loading and log setup.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use config::{AppConfig, LogConfig, MapConfig};
pub use telemetry::{TelemetryError, init_logging};
