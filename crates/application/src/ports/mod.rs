//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod map_surface_port;
mod routing_port;

#[cfg(test)]
pub use map_surface_port::MockMapSurfacePort;
pub use map_surface_port::{DotStyle, MapLayer, MapSurfacePort, ShapeId, StrokeStyle};
#[cfg(test)]
pub use routing_port::MockRoutingPort;
pub use routing_port::RoutingPort;
