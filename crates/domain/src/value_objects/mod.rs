//! Value Objects - Immutable, identity-less domain primitives

mod geo_bounds;
mod geo_point;
mod point_role;
mod time_of_day;

pub use geo_bounds::GeoBounds;
pub use geo_point::GeoPoint;
pub use point_role::{PointRole, SelectionMode};
pub use time_of_day::TimeOfDay;
