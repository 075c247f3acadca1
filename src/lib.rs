//! Spanbound - geospatial boundary and containment engine for places.
//!
//! Answers point-in-place, boundary relationship, distance and nearby-place
//! questions over GeoJSON boundaries and coordinates supplied by the caller. The
//! engine holds no state between calls; persistence and fetching are the caller's
//! concern.

pub mod config;
pub mod error;
pub mod geometry;
pub mod locate;
pub mod models;
pub mod specificity;

pub use config::EngineConfig;
pub use error::{GeoError, Result};
pub use geometry::Relationship;
pub use models::{AdminLevel, Coordinate, Geometry, PlaceRecord};
