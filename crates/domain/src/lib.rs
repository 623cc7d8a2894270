//! Domain layer for BusMap
//!
//! Contains the geographic value objects, route entities, and domain errors
//! shared by every other crate. This layer has no I/O and defines the
//! ubiquitous language: points, picks, segments, itineraries, stops.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
