//! Great-circle and point-to-boundary distances, in kilometres.

use geo_types::Coord;

use super::compose::point_in_geometry;
use crate::models::Geometry;

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two lat/lon points.
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Distance from a point to the segment `a`–`b` (GeoJSON-ordered endpoints).
///
/// The closest point is found in planar degree space and the distance to it is
/// then measured with haversine.
pub fn point_to_segment_distance(lat: f64, lon: f64, a: Coord<f64>, b: Coord<f64>) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;

    if len_sq == 0.0 {
        return haversine_distance(lat, lon, a.y, a.x);
    }

    let t = (((lon - a.x) * dx + (lat - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    let closest_lon = a.x + t * dx;
    let closest_lat = a.y + t * dy;

    haversine_distance(lat, lon, closest_lat, closest_lon)
}

/// Minimum distance from a point to any edge of a ring, closing edge included.
/// `None` for an empty ring.
pub fn point_to_ring_distance(lat: f64, lon: f64, ring: &[Coord<f64>]) -> Option<f64> {
    let n = ring.len();
    (0..n)
        .map(|i| point_to_segment_distance(lat, lon, ring[i], ring[(i + 1) % n]))
        .min_by(f64::total_cmp)
}

/// Minimum distance from a point to the exterior edges of a geometry. Does not
/// check containment; see [`distance_to_boundary`].
pub fn point_to_geometry_distance(lat: f64, lon: f64, geometry: &Geometry) -> Option<f64> {
    geometry
        .exterior_rings()
        .into_iter()
        .filter_map(|ring| point_to_ring_distance(lat, lon, ring))
        .min_by(f64::total_cmp)
}

/// `0.0` for points inside the geometry, otherwise the distance to its nearest
/// exterior edge rounded to six decimals.
pub fn distance_to_boundary(lat: f64, lon: f64, geometry: &Geometry) -> Option<f64> {
    if point_in_geometry(lon, lat, geometry) {
        return Some(0.0);
    }
    point_to_geometry_distance(lat, lon, geometry).map(round_6)
}

fn round_6(value: f64) -> f64 {
    (value * 1e6).round() / 1e6
}
