//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod routing_adapter;
mod scene_surface;

pub use routing_adapter::RoutingAdapter;
pub use scene_surface::{SceneShape, SceneSurface, ShapeKind, Viewport};
