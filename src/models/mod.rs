//! Core data models for the boundary engine.

pub mod admin;
pub mod coordinate;
pub mod geometry;
pub mod place;

pub use admin::{AdminLevel, HierarchyEntry};
pub use coordinate::Coordinate;
pub use geometry::{Boundary, Geometry, Ring};
pub use place::{AdminMetadata, PlaceRecord, POINT_PLACE_RADIUS_KM};
