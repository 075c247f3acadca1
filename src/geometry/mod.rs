//! Pure geometry over GeoJSON boundaries.
//!
//! Positions follow GeoJSON order (`x` = longitude, `y` = latitude). Areas are in
//! square degrees and only meaningful for comparing boundaries with each other;
//! distances are great-circle kilometres.

pub mod compose;
pub mod distance;
pub mod relationship;
pub mod ring;

pub use compose::{area_of_geometry, centroid_of_geometry, point_in_geometry};
pub use distance::{
    distance_to_boundary, haversine_distance, point_to_geometry_distance, point_to_ring_distance,
    point_to_segment_distance, EARTH_RADIUS_KM,
};
pub use relationship::{
    boundary_specificity_order, classify_relationship, polygons_represent_same_place,
    Relationship, SAME_PLACE_MAX_RATIO, SAME_PLACE_MIN_RATIO,
};
pub use ring::{area_of_ring, centroid_of_ring, point_in_ring, AREA_EPSILON};
