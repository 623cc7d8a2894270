//! Application services
//!
//! Each service owns one piece of the client state; [`MapController`]
//! composes them into the single application-state object.

mod find_route_control;
mod map_controller;
mod marker_manager;
mod network_overlay;
mod point_selection;
mod route_renderer;

pub use find_route_control::{BUSY_LABEL, ControlState, FindRouteControl, IDLE_LABEL};
pub use map_controller::MapController;
pub use marker_manager::MarkerManager;
pub use network_overlay::{NetworkOverlay, OverlayLoad, fetch_stops};
pub use point_selection::PointSelection;
pub use route_renderer::{RouteRenderer, RouteStyle};
